pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "moonshotai/kimi-k2-instruct";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Groq credential. `None` routes every email to the template path.
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub llm_timeout_secs: u64,
    pub sender_name: String,
    pub sender_company: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            groq_api_key: None,
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            sender_name: "Rohith Dilip".to_string(),
            sender_company: "Wednesday Solutions".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            port: parse_port(&std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()))?,
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .and_then(|url| {
                    if url.starts_with("http://") || url.starts_with("https://") {
                        Some(url.trim_end_matches('/').to_string())
                    } else {
                        tracing::warn!(
                            "GROQ_BASE_URL must start with http:// or https://, using default"
                        );
                        None
                    }
                })
                .unwrap_or(defaults.groq_base_url),
            groq_model: std::env::var("GROQ_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.groq_model),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| match raw.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Some(secs),
                    _ => {
                        tracing::warn!(
                            "LLM_TIMEOUT_SECS must be a positive integer, using {}s",
                            DEFAULT_LLM_TIMEOUT_SECS
                        );
                        None
                    }
                })
                .unwrap_or(defaults.llm_timeout_secs),
            sender_name: std::env::var("SENDER_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.sender_name),
            sender_company: std::env::var("SENDER_COMPANY")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.sender_company),
        };

        // Never log the credential itself
        tracing::info!("Configuration loaded successfully");
        if config.groq_api_key.is_some() {
            tracing::info!("🔑 GROQ_API_KEY loaded");
        } else {
            tracing::warn!("⚠️ No GROQ_API_KEY found, template fallback will be used");
        }
        tracing::debug!("Groq Base URL: {}", config.groq_base_url);
        tracing::debug!("Groq model: {}", config.groq_model);
        tracing::debug!("LLM timeout: {}s", config.llm_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn has_llm_credential(&self) -> bool {
        self.groq_api_key.is_some()
    }
}

fn parse_port(raw: &str) -> anyhow::Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(anyhow::anyhow!("PORT must be a valid number between 1-65535")),
    }
}
