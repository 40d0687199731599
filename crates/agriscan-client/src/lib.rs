//! Clients for the external services a scan depends on: the image
//! classifier backend and an OpenAI-compatible chat assistant.

#[cfg(feature = "http")]
mod error;
#[cfg(feature = "http")]
pub use error::ClientError;

#[cfg(feature = "http")]
pub mod classifier;
#[cfg(feature = "http")]
pub use classifier::ClassifierClient;

#[cfg(feature = "http")]
pub mod chat;
#[cfg(feature = "http")]
pub use chat::ChatClient;
