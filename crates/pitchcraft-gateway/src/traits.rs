use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

/// What an image generation call produced: the service may answer with a
/// remote URL or with inline base64 data, and both are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutput {
    Url(String),
    Inline(String),
}

impl ImageOutput {
    /// Collapse to a single reference string; inline data becomes a
    /// `data:` URL.
    pub fn into_reference(self) -> String {
        match self {
            ImageOutput::Url(url) => url,
            ImageOutput::Inline(b64) => format!("data:image/png;base64,{b64}"),
        }
    }
}

/// A text-completion backend.
///
/// The gateway programs against this trait; `OpenAiClient` is the HTTP
/// implementation and `MockTextModel` the canned one for tests.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GatewayError>;
}

/// An image-generation backend.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ImageOutput, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_output_renders_as_data_url() {
        let output = ImageOutput::Inline("aGVsbG8=".into());
        assert_eq!(
            output.into_reference(),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn url_output_passes_through_verbatim() {
        let output = ImageOutput::Url("https://cdn.example.com/p.png".into());
        assert_eq!(output.into_reference(), "https://cdn.example.com/p.png");
    }
}
