use pitchcraft_core::{CampaignInput, Client};

/// Assemble the caption-suggestion prompt.
pub fn assemble(campaign: &CampaignInput, client: &Client) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are a social media copywriter. Write a catchy, engaging Instagram \
         caption for a brand campaign.\n\nInputs:\n",
    );
    prompt.push_str(&format!("- Headline: {}\n", campaign.headline));
    prompt.push_str(&format!("- USP: {}\n", campaign.usp));
    prompt.push_str(&format!("- CTA: {}\n", campaign.cta));
    prompt.push_str(&format!("- Client Type: {}\n", client.kind.display_name()));
    prompt.push_str(&format!("- Client Name: {}\n", client.name));
    prompt.push_str(&format!(
        "- Client Personality: {}\n\n",
        client.personality.display_name()
    ));
    prompt.push_str(client.personality.tone_guidance());
    prompt.push_str(
        "\n\nOutput a caption in 1-2 short paragraphs with 2-3 emojis that \
         perfectly matches the client's personality and business type.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_identity_and_tone_guidance() {
        let campaign = CampaignInput {
            headline: "Summer Collection".into(),
            usp: "Hand-finished linen".into(),
            cta: "Shop the drop".into(),
            visual_description: "Golden hour".into(),
        };
        let client = Client::roster().remove(0);
        let prompt = assemble(&campaign, &client);

        assert!(prompt.contains("- Headline: Summer Collection"));
        assert!(prompt.contains("- Client Name: LoveSummer"));
        assert!(prompt.contains("- Client Personality: Appreciative"));
        assert!(prompt.contains("warm, elegant, and encouraging"));
        assert!(prompt.contains("2-3 emojis"));
    }
}
