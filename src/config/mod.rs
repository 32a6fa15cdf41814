pub mod settings;

pub use settings::{ModelConfig, Secrets, ServerConfig, Settings, UpstreamConfig};
