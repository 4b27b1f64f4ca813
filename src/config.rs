use std::env;
use std::str::FromStr;

/// Environment-driven settings. The store host/port are the only values an
/// operator is expected to change; everything else has a working default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_host: String,
    pub redis_port: u16,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: env_or("PORT", 8080),
            redis_host: env::var("REDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            redis_port: env_or("REDIS_PORT", 6379),
        }
    }

    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.redis_host, self.redis_port)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}
