use super::{
    apply_env_overrides, load_settings_from, normalize_base_url, Settings, SettingsError,
};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn normalizes_trailing_slashes_and_whitespace() {
    assert_eq!(
        normalize_base_url("  http://localhost:8787/ ").expect("url"),
        "http://localhost:8787"
    );
    assert_eq!(
        normalize_base_url("https://api.example.test/six-cities//").expect("url"),
        "https://api.example.test/six-cities"
    );
}

#[test]
fn blank_base_url_falls_back_to_default() {
    assert_eq!(
        normalize_base_url("   ").expect("url"),
        Settings::default().api_base_url
    );
}

#[test]
fn rejects_non_http_scheme() {
    let err = normalize_base_url("ftp://example.test").expect_err("scheme");
    assert!(matches!(err, SettingsError::InvalidBaseUrl { .. }));
}

#[test]
fn prefixed_env_vars_win_over_short_names() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("RENTAL_API_URL", "http://short.test"),
            ("APP__API_BASE_URL", "http://prefixed.test"),
            ("APP__REQUEST_TIMEOUT_MS", "250"),
            ("RENTAL_AUTH_TOKEN", "secret"),
        ]),
    );
    assert_eq!(settings.api_base_url, "http://prefixed.test");
    assert_eq!(settings.request_timeout_ms, 250);
    assert_eq!(settings.auth_token.as_deref(), Some("secret"));
}

#[test]
fn ignores_unparseable_timeout() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[("APP__REQUEST_TIMEOUT_MS", "soon")]),
    );
    assert_eq!(settings.request_timeout_ms, Settings::default().request_timeout_ms);
}

#[test]
fn reads_flat_toml_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("rental_client_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("client.toml");
    fs::write(
        &path,
        "api_base_url = \"http://file.test\"\nrequest_timeout_ms = \"1200\"\n",
    )
    .expect("write");

    let settings = load_settings_from(&path);
    // Environment may still override in CI, so only check values nobody sets there.
    if env::var("APP__REQUEST_TIMEOUT_MS").is_err() {
        assert_eq!(settings.request_timeout_ms, 1200);
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}
