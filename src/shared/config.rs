use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub filter: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                timeout_secs: 30,
                auth_token: None,
            },
            store: StoreConfig {
                default_page_size: 20,
                max_page_size: 100,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "educademy=debug,info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        // API 接続設定
        if let Ok(v) = std::env::var("EDUCADEMY_API_BASE_URL") {
            let trimmed = v.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                cfg.api.base_url = trimmed.to_string();
            }
        }
        if let Ok(v) = std::env::var("EDUCADEMY_API_TIMEOUT_SECS") {
            if let Some(value) = parse_u64(&v) {
                cfg.api.timeout_secs = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("EDUCADEMY_API_TOKEN") {
            let token = v.trim();
            cfg.api.auth_token = if token.is_empty() {
                None
            } else {
                Some(token.to_string())
            };
        }

        if let Ok(v) = std::env::var("EDUCADEMY_DEFAULT_PAGE_SIZE") {
            if let Some(value) = parse_u32(&v) {
                cfg.store.default_page_size = value.clamp(1, cfg.store.max_page_size);
            }
        }

        if let Ok(v) = std::env::var("EDUCADEMY_LOG_FILTER") {
            if !v.trim().is_empty() {
                cfg.logging.filter = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("EDUCADEMY_LOG_JSON") {
            cfg.logging.json = parse_bool(&v, cfg.logging.json);
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err("API base_url must start with http:// or https://".to_string());
        }
        if self.api.timeout_secs == 0 {
            return Err("API timeout_secs must be greater than 0".to_string());
        }
        if self.store.default_page_size == 0 {
            return Err("Store default_page_size must be greater than 0".to_string());
        }
        if self.store.default_page_size > self.store.max_page_size {
            return Err("Store default_page_size must not exceed max_page_size".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}
