use pitchcraft_core::{CampaignInput, ClientKind};

/// Assemble the image-generation prompt for the campaign poster.
pub fn assemble(campaign: &CampaignInput, kind: ClientKind) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Create a professional Instagram-style poster for a {} brand with the \
         following details:\n\n",
        kind.display_name()
    ));
    prompt.push_str(&format!("Headline: \"{}\"\n", campaign.headline));
    prompt.push_str(&format!(
        "Unique Selling Proposition: \"{}\"\n",
        campaign.usp
    ));
    prompt.push_str(&format!("Call to Action: \"{}\"\n", campaign.cta));
    prompt.push_str(&format!(
        "Visual Style: {}\n\n",
        campaign.visual_description
    ));
    prompt.push_str(art_direction(kind));
    prompt.push_str(
        "\n\nThe image should be vibrant, visually striking, and suitable for \
         social media marketing. The composition should be clean with balanced \
         elements and professional typography. Create a realistic, high-quality \
         image that would look authentic on Instagram.",
    );
    prompt
}

/// Art-direction hint per line of business.
fn art_direction(kind: ClientKind) -> &'static str {
    match kind {
        ClientKind::Fashion => {
            "Include stylish clothing, modern fashion elements, and an elegant \
             aesthetic. The image should convey sophistication and trendy appeal."
        }
        ClientKind::FoodAndBeverage => {
            "Include appetizing food imagery, vibrant colors, and mouth-watering \
             presentation. The image should make viewers hungry and excited about \
             the food."
        }
        ClientKind::Barbershop => {
            "Include clean, precise grooming imagery, modern barbershop elements, \
             and a professional aesthetic. The image should convey precision and \
             style."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign() -> CampaignInput {
        CampaignInput {
            headline: "Spicy Ramen Launch".into(),
            usp: "Secret 12-hour broth".into(),
            cta: "Order now".into(),
            visual_description: "Steaming bowl, neon backdrop".into(),
        }
    }

    #[test]
    fn embeds_every_field_quoted() {
        let prompt = assemble(&campaign(), ClientKind::FoodAndBeverage);
        assert!(prompt.contains("Headline: \"Spicy Ramen Launch\""));
        assert!(prompt.contains("Unique Selling Proposition: \"Secret 12-hour broth\""));
        assert!(prompt.contains("Call to Action: \"Order now\""));
        assert!(prompt.contains("Visual Style: Steaming bowl, neon backdrop"));
    }

    #[test]
    fn art_direction_tracks_the_client_kind() {
        let fashion = assemble(&campaign(), ClientKind::Fashion);
        assert!(fashion.contains("Fashion brand"));
        assert!(fashion.contains("stylish clothing"));

        let barber = assemble(&campaign(), ClientKind::Barbershop);
        assert!(barber.contains("Barbershop brand"));
        assert!(barber.contains("precise grooming imagery"));
    }
}
