use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub pool_size: usize,
    pub seed_database: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "fabryka.db".to_string(),
            bind_addr: "0.0.0.0".to_string(),
            port: 5000,
            pool_size: 10,
            seed_database: true,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable environment variable");
            default
        }),
        Err(_) => default,
    }
}

/// Boolean switch that also takes `1`/`0`, `yes`/`no` and `on`/`off`, in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flag(bool);

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Flag(true)),
            "false" | "0" | "no" | "off" => Ok(Flag(false)),
            other => Err(format!("not a boolean: {}", other)),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: env_or("PORT", defaults.port),
            pool_size: env_or("DB_POOL_SIZE", defaults.pool_size).max(1),
            seed_database: env_or("SEED_DATABASE", Flag(defaults.seed_database)).0,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_setup() {
        let config = AppConfig::default();
        assert_eq!(config.database_url, "fabryka.db");
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
        assert!(config.seed_database);
    }

    #[test]
    fn seed_flag_ignores_case() {
        for raw in ["false", "FALSE", "No", "0", "off"] {
            assert_eq!(raw.parse::<Flag>(), Ok(Flag(false)), "{}", raw);
        }
        for raw in ["true", "TRUE", "yes", "1", "On"] {
            assert_eq!(raw.parse::<Flag>(), Ok(Flag(true)), "{}", raw);
        }
        assert!("maybe".parse::<Flag>().is_err());
    }
}
