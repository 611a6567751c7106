use super::loading::{apply_defaults, apply_profile_override};
use super::validation::{validate_config, validate_coordinates};
use super::*;
use crate::common::constants::test_constants::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn create_test_config(day_temp: Option<u32>, night_temp: Option<u32>) -> Config {
    Config {
        day_temp,
        night_temp,
        ..Config::default()
    }
}

/// Run `f` with `PROFILE` set to `value` (or removed), restoring it afterwards.
fn with_profile_env<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
    let original = std::env::var(PROFILE_ENV_VAR).ok();
    unsafe {
        match value {
            Some(v) => std::env::set_var(PROFILE_ENV_VAR, v),
            None => std::env::remove_var(PROFILE_ENV_VAR),
        }
    }

    let result = f();

    unsafe {
        match original {
            Some(val) => std::env::set_var(PROFILE_ENV_VAR, val),
            None => std::env::remove_var(PROFILE_ENV_VAR),
        }
    }
    result
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.profile(), Profile::Pr);
    assert_eq!(config.day_temp(), TEST_DAY_TEMP);
    assert_eq!(config.night_temp(), TEST_NIGHT_TEMP);
    assert_eq!(config.provider(), ProviderKind::Live);
    assert_eq!(config.api_base_url(), "https://api.sunrise-sunset.org/json");
    assert_eq!(config.request_timeout(), 20);
    assert_eq!(config.fallback(), FallbackPolicy::Daylight);
    assert!(!config.debug_enabled());
}

#[test]
fn test_dev_profile_defaults_to_mock_provider() {
    let config = Config {
        profile: Some(Profile::Dev),
        ..Config::default()
    };
    assert_eq!(config.provider(), ProviderKind::Mock);
    assert!(config.debug_enabled());

    let explicit = Config {
        profile: Some(Profile::Dev),
        provider: Some(ProviderKind::Solar),
        ..Config::default()
    };
    assert_eq!(explicit.provider(), ProviderKind::Solar);
}

#[test]
fn test_profile_from_str() {
    assert_eq!("dev".parse::<Profile>().unwrap(), Profile::Dev);
    assert_eq!("Pr".parse::<Profile>().unwrap(), Profile::Pr);
    assert_eq!(" DEV ".parse::<Profile>().unwrap(), Profile::Dev);
    assert!("staging".parse::<Profile>().is_err());
}

#[test]
fn test_profile_override() {
    let mut config = Config::default();
    apply_profile_override(&mut config, Some("dev")).unwrap();
    assert_eq!(config.profile, Some(Profile::Dev));

    // Empty or missing values leave the file setting alone
    let mut config = Config {
        profile: Some(Profile::Dev),
        ..Config::default()
    };
    apply_profile_override(&mut config, Some("")).unwrap();
    apply_profile_override(&mut config, None).unwrap();
    assert_eq!(config.profile, Some(Profile::Dev));

    assert!(apply_profile_override(&mut config, Some("qa")).is_err());
}

#[test]
fn test_apply_defaults_fills_every_field() {
    let mut config = Config::default();
    apply_defaults(&mut config);

    assert_eq!(config.profile, Some(Profile::Pr));
    assert_eq!(config.provider, Some(ProviderKind::Live));
    assert_eq!(config.day_temp, Some(DEFAULT_DAY_TEMP));
    assert_eq!(config.night_temp, Some(DEFAULT_NIGHT_TEMP));
    assert_eq!(config.port, Some(DEFAULT_PORT));
    assert_eq!(config.bind.as_deref(), Some(DEFAULT_BIND));
}

#[test]
fn test_config_validation_basic() {
    assert!(validate_config(&Config::default()).is_ok());
    assert!(validate_config(&create_test_config(Some(6500), Some(3300))).is_ok());
}

#[test]
fn test_config_validation_temperature_range() {
    assert!(validate_config(&create_test_config(Some(MAXIMUM_TEMP + 1), None)).is_err());
    assert!(validate_config(&create_test_config(None, Some(MINIMUM_TEMP - 1))).is_err());
    assert!(validate_config(&create_test_config(Some(MAXIMUM_TEMP), Some(MINIMUM_TEMP))).is_ok());
}

#[test]
fn test_config_validation_day_must_exceed_night() {
    let err = validate_config(&create_test_config(Some(3000), Some(3000))).unwrap_err();
    assert!(err.to_string().contains("must be greater than night_temp"));

    // A night temperature above the default day temperature is also caught
    assert!(validate_config(&create_test_config(None, Some(6500))).is_err());
}

#[test]
fn test_config_validation_timeout() {
    let config = Config {
        request_timeout: Some(0),
        ..Config::default()
    };
    assert!(validate_config(&config).is_err());

    let config = Config {
        request_timeout: Some(MAXIMUM_REQUEST_TIMEOUT),
        ..Config::default()
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_url_and_bind() {
    let bad_url = Config {
        api_base_url: Some("not a url".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&bad_url).is_err());

    let bad_scheme = Config {
        api_base_url: Some("ftp://example.com/json".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&bad_scheme).is_err());

    let bad_bind = Config {
        bind: Some("localhost".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&bad_bind).is_err());

    let ipv6 = Config {
        bind: Some("::1".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&ipv6).is_ok());
}

#[test]
fn test_validate_coordinates() {
    assert!(validate_coordinates(TEST_LATITUDE, TEST_LONGITUDE).is_ok());
    assert!(validate_coordinates(90.0, 180.0).is_ok());
    assert!(validate_coordinates(-90.0, -180.0).is_ok());
    assert!(validate_coordinates(90.1, 0.0).is_err());
    assert!(validate_coordinates(0.0, -180.5).is_err());
    assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
}

#[test]
#[serial]
fn test_load_from_path_reads_values() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        "day_temp = 6500\nnight_temp = 3300\nprovider = \"solar\"\nport = 8080\nfallback = \"low\"\n",
    )
    .unwrap();

    let config = with_profile_env(None, || load_from_path(&path)).unwrap();
    assert_eq!(config.day_temp, Some(6500));
    assert_eq!(config.night_temp, Some(3300));
    assert_eq!(config.provider, Some(ProviderKind::Solar));
    assert_eq!(config.port, Some(8080));
    assert_eq!(config.fallback, Some(FallbackPolicy::Low));
    assert_eq!(config.profile, Some(Profile::Pr));
}

#[test]
#[serial]
fn test_load_from_path_profile_env_override() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "profile = \"pr\"\n").unwrap();

    let config = with_profile_env(Some("dev"), || load_from_path(&path)).unwrap();
    assert_eq!(config.profile, Some(Profile::Dev));
    assert_eq!(config.provider, Some(ProviderKind::Mock));
}

#[test]
#[serial]
fn test_load_from_path_rejects_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);

    fs::write(&path, "day_temp = 2000\nnight_temp = 2700\n").unwrap();
    assert!(with_profile_env(None, || load_from_path(&path)).is_err());

    fs::write(&path, "provider = \"carrier-pigeon\"\n").unwrap();
    assert!(with_profile_env(None, || load_from_path(&path)).is_err());

    fs::write(&path, "day_tmep = 6000\n").unwrap();
    assert!(with_profile_env(None, || load_from_path(&path)).is_err());
}

#[test]
fn test_load_from_path_missing_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("missing.toml");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_default_config_content_parses() {
    let content = builder::default_config_content();
    let config: Config = toml::from_str(&content).unwrap();

    assert!(validate_config(&config).is_ok());
    assert_eq!(config.day_temp, Some(DEFAULT_DAY_TEMP));
    assert_eq!(config.provider, None);
    assert_eq!(config.provider(), ProviderKind::Live);
    assert!(content.contains("#[Provider]"));
    assert!(content.contains("# provider = \"live\""));
}

#[test]
#[serial]
fn test_generated_config_follows_profile_provider() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);

    crate::common::logger::Log::set_enabled(false);
    let created = builder::create_default_config(&path);
    crate::common::logger::Log::set_enabled(true);
    created.unwrap();

    let dev = with_profile_env(Some("dev"), || load_from_path(&path)).unwrap();
    assert_eq!(dev.profile, Some(Profile::Dev));
    assert_eq!(dev.provider, Some(ProviderKind::Mock));

    let pr = with_profile_env(None, || load_from_path(&path)).unwrap();
    assert_eq!(pr.profile, Some(Profile::Pr));
    assert_eq!(pr.provider, Some(ProviderKind::Live));
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    crate::common::logger::Log::set_enabled(false);
    let result = with_profile_env(None, Config::load);
    crate::common::logger::Log::set_enabled(true);

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    if let Err(e) = &result {
        eprintln!("Config::load() failed: {:?}", e);
    }
    assert!(result.is_ok());
    assert!(config_path.exists());
}
