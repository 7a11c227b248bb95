use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignInput;
use crate::client::Client;
use crate::step::Step;

/// The single mutable record describing one wizard run.
///
/// Owned by the screen host and passed by reference; all mutation goes
/// through [`Session::apply`], the transition functions in
/// [`crate::wizard`], or [`Session::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_name: String,
    pub client: Option<Client>,
    pub campaign: CampaignInput,
    pub image_prompt: String,
    pub generated_image: Option<String>,
    pub caption_text: String,
    pub timer_start: Option<DateTime<Utc>>,
    pub elapsed_secs: u64,
    pub feedback_message: String,
    pub score: Option<u8>,
    pub current_step: Step,
    pub generating_image: bool,
    pub generating_caption: bool,
    pub generating_feedback: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            client: None,
            campaign: CampaignInput::default(),
            image_prompt: String::new(),
            generated_image: None,
            caption_text: String::new(),
            timer_start: None,
            elapsed_secs: 0,
            feedback_message: String::new(),
            score: None,
            current_step: Step::Welcome,
            generating_image: false,
            generating_caption: false,
            generating_feedback: false,
        }
    }
}

/// A partial update: only the fields present in the patch change.
///
/// No validation happens at this layer; callers that need gating use the
/// transition functions in [`crate::wizard`].
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub user_name: Option<String>,
    pub client: Option<Client>,
    pub campaign: Option<CampaignInput>,
    pub image_prompt: Option<String>,
    pub generated_image: Option<String>,
    pub caption_text: Option<String>,
    pub timer_start: Option<DateTime<Utc>>,
    pub elapsed_secs: Option<u64>,
    pub feedback_message: Option<String>,
    pub score: Option<u8>,
    pub current_step: Option<Step>,
    pub generating_image: Option<bool>,
    pub generating_caption: Option<bool>,
    pub generating_feedback: Option<bool>,
}

impl Session {
    /// Merge a patch into the session. Unspecified fields are untouched.
    /// Never fails.
    pub fn apply(&mut self, patch: SessionPatch) {
        if let Some(v) = patch.user_name {
            self.user_name = v;
        }
        if let Some(v) = patch.client {
            self.client = Some(v);
        }
        if let Some(v) = patch.campaign {
            self.campaign = v;
        }
        if let Some(v) = patch.image_prompt {
            self.image_prompt = v;
        }
        if let Some(v) = patch.generated_image {
            self.generated_image = Some(v);
        }
        if let Some(v) = patch.caption_text {
            self.caption_text = v;
        }
        if let Some(v) = patch.timer_start {
            self.timer_start = Some(v);
        }
        if let Some(v) = patch.elapsed_secs {
            self.elapsed_secs = v;
        }
        if let Some(v) = patch.feedback_message {
            self.feedback_message = v;
        }
        if let Some(v) = patch.score {
            self.score = Some(v);
        }
        if let Some(v) = patch.current_step {
            self.current_step = v;
        }
        if let Some(v) = patch.generating_image {
            self.generating_image = v;
        }
        if let Some(v) = patch.generating_caption {
            self.generating_caption = v;
        }
        if let Some(v) = patch.generating_feedback {
            self.generating_feedback = v;
        }
    }

    /// Restore the documented initial state, discarding all history.
    pub fn reset(&mut self) {
        *self = Session::default();
    }
}
