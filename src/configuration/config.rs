#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use crate::domain::models::ProviderName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

/// Every runtime setting. The API key is intentionally absent: it only ever
/// lives inside a chat session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BasePath,
    BindAddress,
    DocumentRoot,
    LogDir,
    Model,
    Port,
    Provider,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::LogDir {
            return env::var("SIMPLE_AI_CHAT_LOG_DIR").unwrap_or_else(|_| {
                return dirs::cache_dir()
                    .unwrap_or_else(env::temp_dir)
                    .join("simple-ai-chat")
                    .to_string_lossy()
                    .to_string();
            });
        }

        let res = match key {
            ConfigKey::BasePath => "",
            ConfigKey::BindAddress => "0.0.0.0",
            ConfigKey::DocumentRoot => "dist",
            ConfigKey::Model => "",
            ConfigKey::Port => "3000",
            ConfigKey::Provider => "",

            // Special
            ConfigKey::LogDir => "",
        };

        return res.to_string();
    }

    pub fn port() -> Result<u16> {
        let port = Config::get(ConfigKey::Port);
        return port
            .parse::<u16>()
            .with_context(|| return format!("Invalid port: {port}"));
    }

    pub fn document_root() -> path::PathBuf {
        return path::PathBuf::from(Config::get(ConfigKey::DocumentRoot));
    }

    /// The provider picked on the command line, if any.
    pub fn provider() -> Result<Option<ProviderName>> {
        let provider = Config::get(ConfigKey::Provider);
        if provider.is_empty() {
            return Ok(None);
        }

        return Ok(Some(ProviderName::parse(&provider)?));
    }

    pub fn load(clap_arg_matches: Vec<&ArgMatches>) {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            base_path = %Config::get(ConfigKey::BasePath),
            bind_address = %Config::get(ConfigKey::BindAddress),
            document_root = %Config::get(ConfigKey::DocumentRoot),
            model = %Config::get(ConfigKey::Model),
            port = %Config::get(ConfigKey::Port),
            provider = %Config::get(ConfigKey::Provider),
            "config"
        );
    }
}
