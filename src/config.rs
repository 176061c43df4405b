use serde::Deserialize;
use url::Url;

/// SDK configuration loaded from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub developer_key: String,
    pub project_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            base_url: std::env::var("KYC_BASE_URL")
                .map_err(|_| anyhow::anyhow!("KYC_BASE_URL environment variable required"))
                .and_then(|url| {
                    let parsed = Url::parse(&url)
                        .map_err(|e| anyhow::anyhow!("KYC_BASE_URL is not a valid URL: {}", e))?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("KYC_BASE_URL must use http or https");
                    }
                    Ok(url)
                })?,
            developer_key: std::env::var("KYC_DEVELOPER_KEY")
                .map_err(|_| anyhow::anyhow!("KYC_DEVELOPER_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("KYC_DEVELOPER_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            project_key: std::env::var("KYC_PROJECT_KEY")
                .map_err(|_| anyhow::anyhow!("KYC_PROJECT_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("KYC_PROJECT_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Base URL: {}", config.base_url);

        Ok(config)
    }
}
