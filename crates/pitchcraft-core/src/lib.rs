pub mod campaign;
pub mod client;
pub mod session;
pub mod step;
pub mod timer;
pub mod wizard;

pub use campaign::{CampaignInput, FieldError};
pub use client::{Client, ClientKind, Personality};
pub use session::{Session, SessionPatch};
pub use step::Step;
pub use wizard::TransitionError;
