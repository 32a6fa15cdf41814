pub mod client;
pub mod types;

pub use client::OpenAIProvider;
pub use types::{
    ClientSecretReply, ClientSecretRequest, REALTIME_EXPIRY_SECONDS, output_text,
    responses_payload, speech_payload,
};
