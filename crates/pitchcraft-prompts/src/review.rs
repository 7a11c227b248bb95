use crate::context::ReviewContext;

/// Assemble the client-review prompt.
///
/// The model impersonates the business owner in first person, must quote
/// each submitted field back, and must close with a `Feedback: "..."` /
/// `Score: NN` pair the gateway can extract.
pub fn assemble(ctx: &ReviewContext) -> String {
    let contact = ctx.client.contact_name();
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are the client reviewing an Instagram marketing post for your \
         business. Your name is {contact} and you own {}. Based on the \
         following inputs, generate a comprehensive, detailed feedback message \
         that SPECIFICALLY comments on the exact content submitted and give a \
         quality score (0-100).\n\n",
        ctx.client.name
    ));

    prompt.push_str("Inputs:\n");
    prompt.push_str(&format!("- Your Name: {contact}\n"));
    prompt.push_str(&format!(
        "- Your Business: {} ({})\n",
        ctx.client.name,
        ctx.client.kind.display_name()
    ));
    prompt.push_str(&format!(
        "- Your Personality: {}\n",
        ctx.client.personality.display_name()
    ));
    ctx.append_inputs(&mut prompt);

    prompt.push_str(
        "\nClient Details:\n\
         - Rina owns LoveSummer: A warm, encouraging, and sophisticated fashion \
         brand for women who love feeling stylish and empowered\n\
         - Budi owns GoodFood: A direct, playful, and bold F&B business launching \
         a new spicy ramen targeting flavor lovers\n\
         - Brian owns Gentleman Palace: A technical, structured, and minimalist \
         barbershop focused on precision and clean grooming\n\n",
    );

    prompt.push_str(&format!(
        "Your feedback MUST:\n\
         1. Start by introducing yourself by your first name (e.g., \"Hey there, \
         {contact} from {} here!\")\n\
         2. DIRECTLY QUOTE and comment on the specific headline, USP, CTA, and \
         caption submitted\n\
         3. Mention specific elements of the visual/image that you liked or would \
         improve\n\
         4. Maintain your brand's voice throughout\n\n",
        ctx.client.name
    ));

    prompt.push_str(
        "Analyze each of these marketing aspects in detail, ALWAYS referring to \
         the specific content submitted:\n\n",
    );
    append_section(
        &mut prompt,
        1,
        "HEADLINE ANALYSIS",
        20,
        &format!("DIRECTLY QUOTE the headline: \"{}\"", ctx.campaign.headline),
        "Provide specific feedback on this exact headline",
    );
    append_section(
        &mut prompt,
        2,
        "USP ANALYSIS",
        20,
        &format!("DIRECTLY QUOTE the USP: \"{}\"", ctx.campaign.usp),
        "Comment on how effectively it communicates your brand's unique value",
    );
    append_section(
        &mut prompt,
        3,
        "CALL-TO-ACTION ANALYSIS",
        20,
        &format!("DIRECTLY QUOTE the CTA: \"{}\"", ctx.campaign.cta),
        "Analyze its effectiveness for your specific audience",
    );
    append_section(
        &mut prompt,
        4,
        "CAPTION ANALYSIS",
        20,
        &format!(
            "DIRECTLY QUOTE parts of the caption: \"{}...\"",
            ctx.caption_prefix(50)
        ),
        "Comment on tone, length, engagement potential, and brand alignment",
    );
    append_section(
        &mut prompt,
        5,
        "VISUAL ELEMENTS",
        10,
        "Comment on specific elements of the generated image",
        "Discuss color scheme, composition, and brand alignment",
    );
    append_section(
        &mut prompt,
        6,
        "OVERALL CAMPAIGN EFFECTIVENESS",
        10,
        "How well all elements work together for your specific business",
        "Comment on the cohesiveness of the marketing message",
    );

    prompt.push_str(
        "Your feedback should be written in first person, as if you (the actual \
         client) wrote it, with your specific voice and concerns. DO NOT mention \
         being a marketing expert - speak purely as the business owner. BE \
         SPECIFIC and DIRECTLY REFERENCE the actual content submitted.\n\n\
         Output Format:\n\
         Feedback: \"...comprehensive, detailed message directly referencing the \
         submitted content...\"\n\
         Score: XX",
    );

    prompt
}

fn append_section(
    prompt: &mut String,
    n: u8,
    title: &str,
    weight: u8,
    first: &str,
    second: &str,
) {
    prompt.push_str(&format!("{n}. {title} ({weight}% of feedback):\n"));
    prompt.push_str(&format!("   - {first}\n"));
    prompt.push_str(&format!("   - {second}\n"));
    prompt.push_str("   - Suggest specific improvements or praise specific elements\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchcraft_core::{CampaignInput, Client};

    fn ctx() -> ReviewContext {
        ReviewContext {
            client: Client::roster().remove(1),
            campaign: CampaignInput {
                headline: "Spicy Ramen".into(),
                usp: "secret broth".into(),
                cta: "Order now".into(),
                visual_description: "neon bowl".into(),
            },
            caption_text: "Slurp it while it's hot".into(),
            elapsed_secs: 412,
        }
    }

    #[test]
    fn speaks_as_the_contact_and_quotes_the_fields() {
        let prompt = assemble(&ctx());
        assert!(prompt.contains("Your name is Budi and you own GoodFood"));
        assert!(prompt.contains("DIRECTLY QUOTE the headline: \"Spicy Ramen\""));
        assert!(prompt.contains("DIRECTLY QUOTE the USP: \"secret broth\""));
        assert!(prompt.contains("DIRECTLY QUOTE the CTA: \"Order now\""));
        assert!(prompt.contains("- Time Taken (in seconds): 412"));
    }

    #[test]
    fn demands_the_parseable_trailer() {
        let prompt = assemble(&ctx());
        assert!(prompt.contains("Output Format:"));
        assert!(prompt.contains("Feedback: \""));
        assert!(prompt.contains("Score: XX"));
    }

    #[test]
    fn covers_all_six_weighted_sections() {
        let prompt = assemble(&ctx());
        for section in [
            "1. HEADLINE ANALYSIS (20% of feedback):",
            "2. USP ANALYSIS (20% of feedback):",
            "3. CALL-TO-ACTION ANALYSIS (20% of feedback):",
            "4. CAPTION ANALYSIS (20% of feedback):",
            "5. VISUAL ELEMENTS (10% of feedback):",
            "6. OVERALL CAMPAIGN EFFECTIVENESS (10% of feedback):",
        ] {
            assert!(prompt.contains(section), "missing section: {section}");
        }
    }
}
