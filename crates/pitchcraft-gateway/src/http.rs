use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::traits::{GatewayError, ImageModel, ImageOutput, TextModel};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const TEXT_MODEL: &str = "gpt-4-turbo";
const IMAGE_MODEL: &str = "gpt-image-1";
const TEMPERATURE: f32 = 0.7;
const IMAGE_SIZE: &str = "1024x1024";
const IMAGE_QUALITY: &str = "high";

/// Configuration for the OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_base: String,
    pub api_key: Option<String>,
}

impl GatewayConfig {
    /// Build from environment variables. `PITCHCRAFT_*` take precedence over
    /// the stock `OPENAI_*` names.
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("PITCHCRAFT_API_BASE")
                .or_else(|_| std::env::var("OPENAI_BASE_URL"))
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            api_key: std::env::var("PITCHCRAFT_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .ok()
                .filter(|k| !k.is_empty()),
        }
    }
}

/// HTTP client for an OpenAI-compatible generation API.
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client: Client::new(),
        }
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {key}")),
            None => builder,
        }
    }

    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let builder = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body);
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Service(format!("{status}: {body}")));
        }
        resp.json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
    b64_json: Option<String>,
}

#[async_trait]
impl TextModel for OpenAiClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: TEXT_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens,
        };
        let resp: ChatResponse = self.post_json("/chat/completions", &request).await?;
        let content = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(GatewayError::Malformed("empty completion".into()));
        }
        Ok(content)
    }
}

#[async_trait]
impl ImageModel for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<ImageOutput, GatewayError> {
        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
        };
        let resp: ImageResponse = self.post_json("/images/generations", &request).await?;
        let datum = resp
            .data
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Malformed("no image data in response".into()))?;
        if let Some(b64) = datum.b64_json {
            Ok(ImageOutput::Inline(b64))
        } else if let Some(url) = datum.url {
            Ok(ImageOutput::Url(url))
        } else {
            Err(GatewayError::Malformed(
                "image entry has neither url nor b64_json".into(),
            ))
        }
    }
}
