//! Environment variables must win over file-provided values.

use deck_config::DeckConfig;
use figment::Jail;

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("TASKDECK_BACKEND__URL", "https://env.taskdeck.test");

        let config = DeckConfig::load().expect("config loads");
        assert_eq!(config.backend.url, "https://env.taskdeck.test");
        Ok(())
    });
}

#[test]
fn env_var_overrides_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".taskdeck")?;
        jail.create_file(
            ".taskdeck/config.toml",
            r#"
[backend]
url = "https://file.taskdeck.test"
timeout_secs = 30
"#,
        )?;
        jail.set_env("TASKDECK_BACKEND__URL", "https://env.taskdeck.test");

        let config = DeckConfig::load().expect("config loads");
        // env wins for the overridden field; file still supplies the rest
        assert_eq!(config.backend.url, "https://env.taskdeck.test");
        assert_eq!(config.backend.timeout_secs, 30);
        Ok(())
    });
}

#[test]
fn nested_cache_section_maps_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("TASKDECK_CACHE__TTL_SECS", "600");
        jail.set_env("TASKDECK_CACHE__FETCH_TIMEOUT_SECS", "2");

        let config = DeckConfig::load().expect("config loads");
        assert_eq!(config.cache.ttl_secs, Some(600));
        assert_eq!(config.cache.fetch_timeout_secs, 2);
        Ok(())
    });
}
