//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use deck_config::{ConfigError, DeckConfig};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

#[test]
fn loads_backend_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
url = "https://api.taskdeck.test"
timeout_secs = 3
"#,
        )?;

        let config: DeckConfig = Figment::from(Serialized::defaults(DeckConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backend.url, "https://api.taskdeck.test");
        assert_eq!(config.backend.timeout_secs, 3);
        Ok(())
    });
}

#[test]
fn loads_cache_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[cache]
ttl_secs = 300
fetch_timeout_secs = 5
"#,
        )?;

        let config: DeckConfig = Figment::from(Serialized::defaults(DeckConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.cache.ttl_secs, Some(300));
        assert_eq!(config.cache.fetch_timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults_for_omitted_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
url = "https://api.taskdeck.test"
"#,
        )?;

        let config: DeckConfig = Figment::from(Serialized::defaults(DeckConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backend.url, "https://api.taskdeck.test");
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(config.cache.ttl_secs.is_none());
        Ok(())
    });
}

#[test]
fn validation_rejects_a_non_http_backend_url() {
    let config = DeckConfig {
        backend: deck_config::BackendConfig {
            url: "ftp://api.taskdeck.test".into(),
            timeout_secs: 10,
        },
        ..DeckConfig::default()
    };

    let err = config.validate().unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "backend.url"),
        other => panic!("expected InvalidValue, got {other}"),
    }
}

#[test]
fn validation_rejects_a_zero_timeout() {
    let config = DeckConfig {
        backend: deck_config::BackendConfig {
            url: "http://127.0.0.1:8787".into(),
            timeout_secs: 0,
        },
        ..DeckConfig::default()
    };

    let err = config.validate().unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "backend.timeout_secs"),
        other => panic!("expected InvalidValue, got {other}"),
    }
}

#[test]
fn defaults_pass_validation() {
    assert!(DeckConfig::default().validate().is_ok());
}
