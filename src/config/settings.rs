use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// 进程级配置：启动时构建一次，之后只读共享
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub models: ModelConfig,
    // 密钥只从环境变量读取，不允许写进 TOML
    #[serde(skip)]
    pub secrets: Secrets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub openai_base_url: String,
    pub clerk_base_url: String,
    /// Unset means the HTTP client's own default (no overall timeout).
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            openai_base_url: "https://api.openai.com".to_string(),
            clerk_base_url: "https://api.clerk.com".to_string(),
            timeout_secs: None,
        }
    }
}

/// Upstream model names the service pins regardless of caller input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub speech: String,
    pub text: String,
    pub realtime: String,
    pub realtime_instructions: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            speech: "tts-1".to_string(),
            text: "gpt-5-nano".to_string(),
            realtime: "gpt-realtime".to_string(),
            realtime_instructions: "You are a friendly assistant.".to_string(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Secrets {
    pub openai_api_key: Option<String>,
    pub clerk_secret_key: Option<String>,
    /// Declared for deployments that still set it; no route reads it.
    pub deepgram_key: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            openai_api_key: read("OPENAI_API_KEY"),
            clerk_secret_key: read("CLERK_SECRET_KEY"),
            deepgram_key: read("DEEPGRAM_KEY"),
        }
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn shown(v: &Option<String>) -> &'static str {
            if v.is_some() { "<redacted>" } else { "<unset>" }
        }
        f.debug_struct("Secrets")
            .field("openai_api_key", &shown(&self.openai_api_key))
            .field("clerk_secret_key", &shown(&self.clerk_secret_key))
            .field("deepgram_key", &shown(&self.deepgram_key))
            .finish()
    }
}

impl Settings {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!("Failed to read .env file: {}", e);
        }

        let mut settings = match Self::find_config_file() {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        settings.secrets = Secrets::from_env();

        if settings.secrets.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY 未设置，AI 路由只能依赖调用方提供的 apiKey");
        }
        if settings.secrets.clerk_secret_key.is_none() {
            tracing::warn!("CLERK_SECRET_KEY 未设置，/api/clerk 路由将返回 500");
        }

        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream.timeout_secs.map(Duration::from_secs)
    }

    fn find_config_file() -> Option<&'static str> {
        let possible_names = ["custom-config.toml", "config.toml"];
        possible_names.into_iter().find(|name| Path::new(name).exists())
    }
}
