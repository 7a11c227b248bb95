use pitchcraft_core::{CampaignInput, Client, ClientKind};
use pitchcraft_prompts::ReviewContext;
use tokio::runtime::Runtime;

use crate::gateway::{Gateway, Review};

/// Blocking wrapper around the async [`Gateway`].
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the TUI.
pub struct BlockingGateway {
    inner: Gateway,
    rt: Runtime,
}

impl BlockingGateway {
    pub fn new(inner: Gateway) -> Self {
        Self {
            inner,
            rt: Runtime::new().expect("failed to create tokio runtime"),
        }
    }

    pub fn generate_image(&self, campaign: &CampaignInput, kind: ClientKind) -> String {
        self.rt.block_on(self.inner.generate_image(campaign, kind))
    }

    pub fn generate_caption(&self, campaign: &CampaignInput, client: &Client) -> String {
        self.rt
            .block_on(self.inner.generate_caption(campaign, client))
    }

    pub fn generate_feedback(&self, ctx: &ReviewContext) -> Review {
        self.rt.block_on(self.inner.generate_feedback(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_calls_resolve_without_an_ambient_runtime() {
        let gateway = BlockingGateway::new(Gateway::offline());
        let campaign = CampaignInput {
            headline: "Fresh Fade Friday".into(),
            usp: "Precision cuts".into(),
            cta: "Book today".into(),
            visual_description: "Monochrome".into(),
        };
        let client = Client::roster().remove(2);

        let image = gateway.generate_image(&campaign, client.kind);
        assert!(image.starts_with("https://"));

        let caption = gateway.generate_caption(&campaign, &client);
        assert!(caption.contains("Fresh Fade Friday"));

        let review = gateway.generate_feedback(&ReviewContext {
            client,
            campaign,
            caption_text: caption,
            elapsed_secs: 30,
        });
        assert!((0..=100).contains(&review.score));
    }
}
