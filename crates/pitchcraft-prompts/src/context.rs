use pitchcraft_core::{CampaignInput, Client};
use serde::{Deserialize, Serialize};

/// Everything the review prompt needs about the finished campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewContext {
    pub client: Client,
    pub campaign: CampaignInput,
    pub caption_text: String,
    pub elapsed_secs: u64,
}

impl ReviewContext {
    /// The submitted fields as a quoted input list, shared by the caption
    /// and review prompts.
    pub fn append_inputs(&self, prompt: &mut String) {
        prompt.push_str(&format!(
            "- Headline Submitted: \"{}\"\n",
            self.campaign.headline
        ));
        prompt.push_str(&format!("- USP Submitted: \"{}\"\n", self.campaign.usp));
        prompt.push_str(&format!("- CTA Submitted: \"{}\"\n", self.campaign.cta));
        prompt.push_str(&format!(
            "- Caption Submitted: \"{}\"\n",
            self.caption_text
        ));
        prompt.push_str(&format!(
            "- Time Taken (in seconds): {}\n",
            self.elapsed_secs
        ));
    }

    /// First `n` characters of the caption, for "quote part of it" prompts.
    pub fn caption_prefix(&self, n: usize) -> String {
        self.caption_text.chars().take(n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_prefix_respects_char_boundaries() {
        let ctx = ReviewContext {
            client: Client::roster().remove(0),
            campaign: CampaignInput::default(),
            caption_text: "très chic ✨ summer looks".into(),
            elapsed_secs: 0,
        };
        assert_eq!(ctx.caption_prefix(4), "très");
        assert_eq!(ctx.caption_prefix(100), "très chic ✨ summer looks");
    }
}
