mod blocking;
pub mod fallback;
mod gateway;
mod http;
mod mock;
mod parse;
mod traits;

pub use blocking::BlockingGateway;
pub use gateway::{Gateway, Review, CAPTION_MAX_TOKENS, FEEDBACK_MAX_TOKENS, REQUEST_TIMEOUT};
pub use http::{GatewayConfig, OpenAiClient, DEFAULT_API_BASE};
pub use mock::{MockImageModel, MockTextModel};
pub use traits::{GatewayError, ImageModel, ImageOutput, TextModel};
