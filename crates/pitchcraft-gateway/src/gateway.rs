use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pitchcraft_core::{CampaignInput, Client, ClientKind};
use pitchcraft_prompts::{caption, poster, review, ReviewContext};
use tracing::{debug, warn};

use crate::fallback;
use crate::parse;
use crate::traits::{GatewayError, ImageModel, ImageOutput, TextModel};

/// Deadline raced against the caption and review calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

pub const CAPTION_MAX_TOKENS: u32 = 500;
pub const FEEDBACK_MAX_TOKENS: u32 = 1000;

const DEFAULT_FEEDBACK: &str = "Great work on this campaign!";
const DEFAULT_SCORE: u8 = 75;

/// A generated client review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub message: String,
    pub score: u8,
}

/// Facade over the generative backends.
///
/// Every operation is total: real generation first, a parsed-but-partial
/// result where the trailer is damaged, and fully synthetic fallback content
/// on any failure. Callers never see an error.
pub struct Gateway {
    text: Arc<dyn TextModel>,
    image: Arc<dyn ImageModel>,
    deadline: Duration,
}

impl Gateway {
    pub fn new(text: Arc<dyn TextModel>, image: Arc<dyn ImageModel>) -> Self {
        Self {
            text,
            image,
            deadline: REQUEST_TIMEOUT,
        }
    }

    /// A gateway whose backends always fail, so every call resolves to its
    /// offline fallback. Used for `--offline` runs and missing credentials.
    pub fn offline() -> Self {
        Self::new(Arc::new(Offline), Arc::new(Offline))
    }

    /// Override the response deadline (tests race against a short one).
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Generate the campaign poster. Yields whatever reference the service
    /// returned, or the client-kind stock poster on any failure.
    pub async fn generate_image(&self, campaign: &CampaignInput, kind: ClientKind) -> String {
        let prompt = poster::assemble(campaign, kind);
        debug!(kind = kind.as_str(), "requesting poster image");
        match self.image.generate(&prompt).await {
            Ok(output) => output.into_reference(),
            Err(e) => {
                warn!("image generation failed, using stock poster: {e}");
                fallback::stock_poster(kind).to_string()
            }
        }
    }

    /// Generate a caption suggestion, racing the backend against the
    /// deadline. Falls back to the personality-keyed template.
    pub async fn generate_caption(&self, campaign: &CampaignInput, client: &Client) -> String {
        let prompt = caption::assemble(campaign, client);
        debug!(client = %client.name, "requesting caption");
        match tokio::time::timeout(
            self.deadline,
            self.text.complete(&prompt, CAPTION_MAX_TOKENS),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("caption generation failed, using template: {e}");
                fallback::caption(campaign, client.kind, client.personality)
            }
            Err(_) => {
                warn!(
                    "caption generation timed out after {}s, using template",
                    self.deadline.as_secs()
                );
                fallback::caption(campaign, client.kind, client.personality)
            }
        }
    }

    /// Generate the client's review of the finished campaign.
    ///
    /// A response with a damaged trailer still yields the half that parsed;
    /// the other half gets its generic default. Outright failure yields the
    /// canned per-client paragraph and the fallback score.
    pub async fn generate_feedback(&self, ctx: &ReviewContext) -> Review {
        let prompt = review::assemble(ctx);
        debug!(client = %ctx.client.name, "requesting review");
        match tokio::time::timeout(
            self.deadline,
            self.text.complete(&prompt, FEEDBACK_MAX_TOKENS),
        )
        .await
        {
            Ok(Ok(content)) => {
                let message = parse::extract_feedback(&content).unwrap_or_else(|| {
                    warn!("feedback block missing from response, using default");
                    DEFAULT_FEEDBACK.to_string()
                });
                let score = match parse::extract_score(&content) {
                    Some(s) => s.min(100) as u8,
                    None => {
                        warn!("score missing from response, using default");
                        DEFAULT_SCORE
                    }
                };
                Review { message, score }
            }
            Ok(Err(e)) => {
                warn!("review generation failed, using canned review: {e}");
                self.fallback_review(ctx)
            }
            Err(_) => {
                warn!(
                    "review generation timed out after {}s, using canned review",
                    self.deadline.as_secs()
                );
                self.fallback_review(ctx)
            }
        }
    }

    fn fallback_review(&self, ctx: &ReviewContext) -> Review {
        let complete = ctx.campaign.is_complete() && !ctx.caption_text.trim().is_empty();
        Review {
            message: fallback::canned_review(&ctx.client, &ctx.campaign),
            score: fallback::score(ctx.elapsed_secs, complete),
        }
    }
}

/// Backend that refuses every call; the fallback ladder does the rest.
struct Offline;

#[async_trait]
impl TextModel for Offline {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GatewayError> {
        Err(GatewayError::Http("offline mode".into()))
    }
}

#[async_trait]
impl ImageModel for Offline {
    async fn generate(&self, _prompt: &str) -> Result<ImageOutput, GatewayError> {
        Err(GatewayError::Http("offline mode".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockImageModel, MockTextModel};
    use pitchcraft_core::Personality;

    fn campaign() -> CampaignInput {
        CampaignInput {
            headline: "Spicy Ramen".into(),
            usp: "secret broth".into(),
            cta: "Order now".into(),
            visual_description: "neon bowl".into(),
        }
    }

    fn goodfood() -> Client {
        Client::roster().remove(1)
    }

    fn ctx(elapsed_secs: u64) -> ReviewContext {
        ReviewContext {
            client: goodfood(),
            campaign: campaign(),
            caption_text: "Slurp it while it's hot 🍜".into(),
            elapsed_secs,
        }
    }

    fn gateway(text: MockTextModel, image: MockImageModel) -> Gateway {
        Gateway::new(Arc::new(text), Arc::new(image))
    }

    #[tokio::test]
    async fn image_success_passes_the_reference_through() {
        let gw = gateway(
            MockTextModel::failure(),
            MockImageModel::success_url("https://cdn.example.com/poster.png"),
        );
        let reference = gw
            .generate_image(&campaign(), ClientKind::FoodAndBeverage)
            .await;
        assert_eq!(reference, "https://cdn.example.com/poster.png");
    }

    #[tokio::test]
    async fn image_inline_data_becomes_a_data_url() {
        let gw = gateway(
            MockTextModel::failure(),
            MockImageModel::success_inline("aGVsbG8="),
        );
        let reference = gw.generate_image(&campaign(), ClientKind::Fashion).await;
        assert_eq!(reference, "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn image_failure_yields_the_kind_keyed_stock_poster() {
        let gw = gateway(MockTextModel::failure(), MockImageModel::failure());
        let reference = gw.generate_image(&campaign(), ClientKind::Barbershop).await;
        assert_eq!(reference, fallback::stock_poster(ClientKind::Barbershop));
    }

    #[tokio::test]
    async fn caption_success_returns_the_raw_text() {
        let gw = gateway(
            MockTextModel::success("Fresh flavors, zero patience required."),
            MockImageModel::failure(),
        );
        let text = gw.generate_caption(&campaign(), &goodfood()).await;
        assert_eq!(text, "Fresh flavors, zero patience required.");
    }

    #[tokio::test]
    async fn caption_failure_synthesizes_the_outspoken_template() {
        let gw = gateway(MockTextModel::failure(), MockImageModel::failure());
        let text = gw.generate_caption(&campaign(), &goodfood()).await;
        assert!(text.contains("Spicy Ramen"));
        assert!(text.contains("secret broth"));
        assert!(text.contains("Order now"));
        assert!(text.contains("🍜") && text.contains("🔥") && text.contains("😋"));
    }

    #[tokio::test(start_paused = true)]
    async fn caption_timeout_falls_back() {
        let gw = gateway(
            MockTextModel::success("too late").with_delay(Duration::from_secs(30)),
            MockImageModel::failure(),
        );
        let text = gw.generate_caption(&campaign(), &goodfood()).await;
        assert_ne!(text, "too late");
        assert!(text.contains("Spicy Ramen"));
    }

    #[tokio::test]
    async fn feedback_parses_message_and_score() {
        let gw = gateway(
            MockTextModel::success(
                "Feedback: \"Yo, the headline slaps.\nGreat CTA too.\"\nScore: 91",
            ),
            MockImageModel::failure(),
        );
        let review = gw.generate_feedback(&ctx(120)).await;
        assert!(review.message.contains("the headline slaps"));
        assert_eq!(review.score, 91);
    }

    #[tokio::test]
    async fn feedback_with_damaged_trailer_uses_per_half_defaults() {
        let gw = gateway(
            MockTextModel::success("Here are my thoughts, unstructured."),
            MockImageModel::failure(),
        );
        let review = gw.generate_feedback(&ctx(120)).await;
        assert_eq!(review.message, "Great work on this campaign!");
        assert_eq!(review.score, 75);
    }

    #[tokio::test]
    async fn feedback_score_is_clamped_to_one_hundred() {
        let gw = gateway(
            MockTextModel::success("Feedback: \"Beyond perfect.\"\nScore: 140"),
            MockImageModel::failure(),
        );
        let review = gw.generate_feedback(&ctx(120)).await;
        assert_eq!(review.score, 100);
    }

    #[tokio::test]
    async fn feedback_failure_fast_and_complete_scores_one_hundred() {
        let gw = gateway(MockTextModel::failure(), MockImageModel::failure());
        let review = gw.generate_feedback(&ctx(500)).await;
        assert_eq!(review.score, 100);
        assert!(review.message.contains("GoodFood vibe"));
    }

    #[tokio::test]
    async fn feedback_failure_slow_and_incomplete_scores_base() {
        let mut context = ctx(700);
        context.campaign.cta = String::new();
        let gw = gateway(MockTextModel::failure(), MockImageModel::failure());
        let review = gw.generate_feedback(&context).await;
        assert_eq!(review.score, 85);
    }

    #[tokio::test(start_paused = true)]
    async fn feedback_timeout_uses_the_canned_review() {
        let gw = gateway(
            MockTextModel::success("Feedback: \"late\"\nScore: 99")
                .with_delay(Duration::from_secs(26)),
            MockImageModel::failure(),
        );
        let review = gw.generate_feedback(&ctx(700)).await;
        assert!(review.message.contains("GoodFood vibe"));
        assert_eq!(review.score, 95); // 85 + completeness, no time bonus
    }

    #[tokio::test]
    async fn shortened_deadline_is_honored() {
        let gw = gateway(
            MockTextModel::success("slow").with_delay(Duration::from_millis(50)),
            MockImageModel::failure(),
        )
        .with_deadline(Duration::from_millis(5));
        let review = gw.generate_feedback(&ctx(0)).await;
        assert_ne!(review.message, "slow");
    }

    #[tokio::test]
    async fn offline_gateway_is_total_everywhere() {
        let gw = Gateway::offline();
        let client = Client::roster().remove(0);

        let image = gw.generate_image(&campaign(), client.kind).await;
        assert_eq!(image, fallback::stock_poster(ClientKind::Fashion));

        let text = gw.generate_caption(&campaign(), &client).await;
        assert!(!text.is_empty());

        let review = gw
            .generate_feedback(&ReviewContext {
                client,
                campaign: campaign(),
                caption_text: "caption".into(),
                elapsed_secs: 0,
            })
            .await;
        assert!((0..=100).contains(&review.score));
        assert!(!review.message.is_empty());
    }

    #[tokio::test]
    async fn totality_holds_for_every_personality() {
        let gw = Gateway::offline();
        for client in Client::roster() {
            let text = gw.generate_caption(&campaign(), &client).await;
            assert!(!text.is_empty());
            match client.personality {
                Personality::Appreciative => assert!(text.contains("Elevate your style")),
                Personality::Outspoken => assert!(text.contains("blow your taste buds")),
                Personality::Technical => assert!(text.contains("precision and style")),
            }
        }
    }
}
