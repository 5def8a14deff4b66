use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("CONSOLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<FileConfig>(raw) {
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_default_server_url() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "server_url = \"http://auth.example.com\"");
        assert_eq!(settings.server_url, "http://auth.example.com");
    }

    #[test]
    fn malformed_file_config_keeps_defaults() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "server_url = [not toml");
        assert_eq!(settings.server_url, Settings::default().server_url);
    }
}
