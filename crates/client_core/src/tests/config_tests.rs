use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_point_at_local_service() {
    let settings = load_settings_from(None, env_from(&[]));
    assert_eq!(settings, Settings::default());

    let endpoints = settings.endpoints().expect("endpoints");
    assert_eq!(endpoints.ask_url.as_str(), "http://localhost:5000/ask");
    assert_eq!(endpoints.image_base.as_str(), "http://localhost:5000/images");
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
        service_origin = "https://analysis.example.org/"
        image_route = "/static/images/"
        request_timeout_seconds = 45
    "#;
    let settings = load_settings_from(Some(raw), env_from(&[]));

    assert_eq!(
        settings.service_origin.as_str(),
        "https://analysis.example.org/"
    );
    assert_eq!(settings.ask_route, "/ask");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(45)));

    let endpoints = settings.endpoints().expect("endpoints");
    assert_eq!(
        endpoints.image_base.as_str(),
        "https://analysis.example.org/static/images"
    );
}

#[test]
fn prefixed_env_wins_over_bare_env_and_file() {
    let raw = r#"service_origin = "http://file-host:5000""#;
    let settings = load_settings_from(
        Some(raw),
        env_from(&[
            ("SERVICE_ORIGIN", "http://bare-host:5000"),
            ("APP__SERVICE_ORIGIN", "http://prefixed-host:7000"),
            ("APP__ASK_ROUTE", "/v2/ask"),
        ]),
    );

    let endpoints = settings.endpoints().expect("endpoints");
    assert_eq!(endpoints.ask_url.as_str(), "http://prefixed-host:7000/v2/ask");
}

#[test]
fn origin_with_path_keeps_its_prefix() {
    let settings = Settings::default()
        .with_origin("http://gateway.local/sdg/")
        .expect("origin");
    let endpoints = settings.endpoints().expect("endpoints");
    assert_eq!(endpoints.ask_url.as_str(), "http://gateway.local/sdg/ask");
    assert_eq!(endpoints.image_base.as_str(), "http://gateway.local/sdg/images");
}

#[test]
fn invalid_values_are_ignored() {
    let settings = load_settings_from(
        Some("this is = not [valid toml"),
        env_from(&[
            ("SERVICE_ORIGIN", "ftp://files.example.org"),
            ("APP__SERVICE_ORIGIN", "not a url"),
            ("APP__REQUEST_TIMEOUT_SECONDS", "soon"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn with_origin_rejects_non_http_schemes() {
    let err = Settings::default()
        .with_origin("file:///tmp/service")
        .expect_err("must reject");
    assert!(matches!(err, ConfigError::UnsupportedOrigin(_)));

    let err = Settings::default()
        .with_origin("localhost:5000/ask")
        .expect_err("must reject");
    assert!(
        matches!(err, ConfigError::UnsupportedOrigin(_) | ConfigError::InvalidOrigin { .. }),
        "unexpected error: {err}"
    );
}
