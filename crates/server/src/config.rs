use std::{collections::HashMap, fs, path::PathBuf};

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub fixtures_path: PathBuf,
    pub auth_token: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".into(),
            fixtures_path: PathBuf::from("./fixtures/offers.json"),
            auth_token: "dev-token".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_overrides(&mut settings, |key| file_cfg.get(key).cloned());
        }
    }

    apply_overrides(&mut settings, |key| {
        std::env::var(format!("APP__{}", key.to_ascii_uppercase())).ok()
    });

    settings
}

fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("bind_addr") {
        settings.bind_addr = v;
    }
    if let Some(v) = lookup("fixtures_path") {
        settings.fixtures_path = PathBuf::from(v.trim());
    }
    if let Some(v) = lookup("auth_token") {
        let v = v.trim();
        if !v.is_empty() {
            settings.auth_token = v.to_string();
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
