/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use kp2imdb::app_config::{Config, Locale, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.omdb_endpoint, "https://www.omdbapi.com/");
    assert_eq!(config.imdb_endpoint, "https://api.graphql.imdb.com/");
    assert_eq!(config.timeout_secs, 30);
    assert!((config.similarity_threshold - 0.8).abs() < f64::EPSILON);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// The template carries no credentials and must be filled in before use
#[test]
fn test_default_config_withoutCredentials_shouldFailValidation() {
    let error = Config::default().validate().unwrap_err();
    assert!(error.to_string().contains("OMDb API Key not set"));

    let config = Config {
        omdb_api_key: "key".to_string(),
        ..Config::default()
    };
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("IMDb Cookie not set"));
}

#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = common::valid_config();
    assert!(config.validate().is_ok());

    config.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.timeout_secs = 10;

    config.similarity_threshold = 1.5;
    assert!(config.validate().is_err());
    config.similarity_threshold = 0.72;
    assert!(config.validate().is_ok());

    config.omdb_endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "config.json",
        r#"{"imdb_cookie": "session-id=1", "omdb_api_key": "abc", "locale": "ru"}"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.locale, Locale::Ru);
    assert_eq!(config.omdb_api_key, "abc");
    assert_eq!(config.timeout_secs, 30);
    Ok(())
}

#[test]
fn test_load_withInvalidLocale_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "config.json",
        r#"{"imdb_cookie": "c", "omdb_api_key": "k", "locale": "de"}"#,
    )?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldFail() {
    assert!(Config::load("definitely_missing_config.json").is_err());
}

#[test]
fn test_locale_fromStr_shouldAcceptKnownLocalesOnly() {
    assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
    assert_eq!(" RU ".parse::<Locale>().unwrap(), Locale::Ru);

    let error = "fr".parse::<Locale>().unwrap_err();
    assert!(error.to_string().contains("'en' or 'ru'"));
}

#[test]
fn test_writeDefault_shouldCreateTemplateOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("config.json");

    Config::write_default(&path)?;
    let content = std::fs::read_to_string(&path)?;
    assert!(content.contains("\"omdb_api_key\""));
    assert!(content.contains("\"imdb_cookie\""));

    assert!(Config::write_default(&path).is_err());
    Ok(())
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
