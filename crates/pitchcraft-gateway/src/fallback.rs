//! Deterministic offline content.
//!
//! Every gateway operation degrades to one of these when the backend fails
//! or times out, so a session stays usable with zero connectivity.

use pitchcraft_core::timer::COUNTDOWN_SECS;
use pitchcraft_core::{CampaignInput, Client, ClientKind, Personality};

/// Stock poster reference used when image generation fails.
pub fn stock_poster(kind: ClientKind) -> &'static str {
    match kind {
        ClientKind::Fashion => {
            "https://images.unsplash.com/photo-1445205170230-053b83016050?q=80&w=1000&auto=format&fit=crop"
        }
        ClientKind::FoodAndBeverage => {
            "https://images.unsplash.com/photo-1565299507177-b0ac66763828?q=80&w=1000&auto=format&fit=crop"
        }
        ClientKind::Barbershop => {
            "https://images.unsplash.com/photo-1503951914875-452162b0f3f1?q=80&w=1000&auto=format&fit=crop"
        }
    }
}

/// Emoji triple woven into fallback captions, per line of business.
pub fn emoji_triple(kind: ClientKind) -> [&'static str; 3] {
    match kind {
        ClientKind::Fashion => ["👗", "✨", "💃"],
        ClientKind::FoodAndBeverage => ["🍜", "🔥", "😋"],
        ClientKind::Barbershop => ["💈", "✂️", "👔"],
    }
}

/// Template caption keyed by personality, decorated with the kind's emoji
/// triple.
pub fn caption(campaign: &CampaignInput, kind: ClientKind, personality: Personality) -> String {
    let [a, b, c] = emoji_triple(kind);
    match personality {
        Personality::Appreciative => format!(
            "{a} Elevate your style with our {}! {b}\n\n{} Don't miss out on looking \
             and feeling your best. {} {c}",
            campaign.headline, campaign.usp, campaign.cta
        ),
        Personality::Outspoken => format!(
            "{a} Introducing: {} that will blow your taste buds away! {b}\n\n{} Ready \
             for a flavor explosion? {} {c}",
            campaign.headline, campaign.usp, campaign.cta
        ),
        Personality::Technical => format!(
            "{a} {} - for those who appreciate precision and style. {b}\n\n{} Looking \
             sharp has never been easier. {} {c}",
            campaign.headline, campaign.usp, campaign.cta
        ),
    }
}

const LOVESUMMER_REVIEW: &str = "As both your client and a marketing expert, I'm impressed with your work! The overall marketing strategy aligns perfectly with our fashion brand identity - elegant, empowering, and modern. Your copywriting has the warm, sophisticated tone our audience responds to, and the headline is memorable and impactful. The visual elements beautifully complement our brand colors and aesthetic, creating an Instagram-worthy post that will stand out in feeds. The call-to-action is clear and compelling, encouraging immediate engagement. Your caption strikes the perfect balance between being informative and conversational, with just the right amount of emojis to enhance engagement without appearing unprofessional. If I could suggest one improvement, perhaps adding a subtle seasonal reference would make it even more timely and relevant. Overall, this is excellent work that captures the essence of LoveSummer!";

const GOODFOOD_REVIEW: &str = "Yo, this campaign is straight FIRE! From a marketing standpoint, you've absolutely nailed our bold, in-your-face brand identity. The copywriting has that perfect casual, energetic vibe that speaks directly to our food-obsessed audience. Your headline is punchy and memorable - exactly what we need to cut through the noise on social. The visual description you've created is mouth-watering and scroll-stopping - those colors and food styling details will definitely make people crave our spicy ramen! The CTA is direct and creates urgency, which is exactly what we want. Your caption has the perfect amount of attitude and slang that resonates with our younger demographic. The emoji game is on point too! One small thing to consider: maybe add something about the unique spice level to really highlight what makes our ramen different. But honestly, this is exactly the kind of content that's going to make our product go viral. Mad respect for understanding the GoodFood vibe so perfectly!";

const GENTLEMAN_PALACE_REVIEW: &str = "I've analyzed your marketing campaign with precision, and I'm pleased to report that it meets our quality standards. From a strategic perspective, you've successfully aligned with our minimalist barbershop brand identity through clean design elements and professional presentation. The copywriting demonstrates technical expertise and structured messaging that our clientele expects. Your headline is concise and informative, clearly communicating our Fresh Fade Friday promotion without unnecessary embellishment. The visual elements you've selected maintain our monochromatic palette and showcase the precision of our grooming services. The call-to-action is appropriately direct and provides clear next steps for booking. Your caption maintains the proper balance of professionalism while still being engaging. I particularly appreciate the absence of excessive emojis, as this aligns with our brand guidelines. One recommendation would be to include more specific technical terminology related to our signature cuts to further establish expertise. Overall, this campaign demonstrates the attention to detail and professional quality that Gentleman Palace represents.";

/// Hand-authored review paragraph keyed by client name, with a templated
/// default for unrecognized clients.
pub fn canned_review(client: &Client, campaign: &CampaignInput) -> String {
    match client.name.as_str() {
        "LoveSummer" => LOVESUMMER_REVIEW.to_string(),
        "GoodFood" => GOODFOOD_REVIEW.to_string(),
        "Gentleman Palace" => GENTLEMAN_PALACE_REVIEW.to_string(),
        _ => default_review(client, campaign),
    }
}

fn default_review(client: &Client, campaign: &CampaignInput) -> String {
    format!(
        "As both your client and a marketing expert, I'm impressed with your {} \
         campaign!\n\nYour marketing strategy effectively targets our audience with \
         a compelling message. The copywriting is engaging and aligns well with our \
         brand voice. Your headline \"{}\" is attention-grabbing and memorable.\n\n\
         The visual elements you've chosen complement our brand identity and will \
         stand out on social media. The call-to-action \"{}\" is clear and \
         encourages engagement. Your caption is well-crafted with the right tone \
         and personality for our audience.\n\nOverall, this is excellent work that \
         will help us achieve our marketing goals. The campaign elements work \
         together cohesively to create a strong social media presence.",
        client.kind.display_name(),
        campaign.headline,
        campaign.cta
    )
}

/// Score used when the review call fails outright: a fixed base plus a
/// time bonus and a completeness bonus, capped at 100. The base is
/// deliberately fixed rather than derived from any partial response.
pub fn score(elapsed_secs: u64, complete: bool) -> u8 {
    const BASE: u8 = 85;
    let time_bonus = if elapsed_secs < COUNTDOWN_SECS { 10 } else { 0 };
    let completeness_bonus = if complete { 10 } else { 0 };
    (BASE + time_bonus + completeness_bonus).min(100)
}
