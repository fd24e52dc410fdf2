use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Time-to-live of memoised composite lookups, in seconds.
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cache_ttl_secs: 300,
            cache_max_entries: 1_000,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Bind address: {}", config.bind_addr());
        tracing::debug!(
            "Lookup cache: {}s TTL, {} max entries",
            config.cache_ttl_secs,
            config.cache_max_entries
        );

        Ok(config)
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// Unset or blank variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: var("HOST")
                .map(|h| h.trim().to_string())
                .unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))
                    .and_then(|port: u16| {
                        if port == 0 {
                            anyhow::bail!("PORT must be a valid number between 1-65535");
                        }
                        Ok(port)
                    })?,
                None => defaults.port,
            },
            cache_ttl_secs: match var("CACHE_TTL_SECS") {
                Some(ttl) => parse_positive("CACHE_TTL_SECS", &ttl)?,
                None => defaults.cache_ttl_secs,
            },
            cache_max_entries: match var("CACHE_MAX_ENTRIES") {
                Some(max) => parse_positive("CACHE_MAX_ENTRIES", &max)?,
                None => defaults.cache_max_entries,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_positive(key: &str, raw: &str) -> anyhow::Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => anyhow::bail!("{} must be a positive integer", key),
    }
}
