use std::time::Duration;

use async_trait::async_trait;

use crate::traits::{GatewayError, ImageModel, ImageOutput, TextModel};

/// Canned text backend for tests: a fixed response or a fixed failure,
/// optionally after an artificial delay.
pub struct MockTextModel {
    response: Option<String>,
    delay: Option<Duration>,
}

impl MockTextModel {
    pub fn success(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            delay: None,
        }
    }

    pub fn failure() -> Self {
        Self {
            response: None,
            delay: None,
        }
    }

    /// Sleep before answering; used to exercise the timeout race.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl TextModel for MockTextModel {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GatewayError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(GatewayError::Http("mock text failure".into())),
        }
    }
}

/// Canned image backend for tests.
pub struct MockImageModel {
    output: Option<ImageOutput>,
    delay: Option<Duration>,
}

impl MockImageModel {
    pub fn success_url(url: &str) -> Self {
        Self {
            output: Some(ImageOutput::Url(url.to_string())),
            delay: None,
        }
    }

    pub fn success_inline(b64: &str) -> Self {
        Self {
            output: Some(ImageOutput::Inline(b64.to_string())),
            delay: None,
        }
    }

    pub fn failure() -> Self {
        Self {
            output: None,
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ImageModel for MockImageModel {
    async fn generate(&self, _prompt: &str) -> Result<ImageOutput, GatewayError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => Err(GatewayError::Http("mock image failure".into())),
        }
    }
}
