//! Unit tests for configuration defaults and parsing

use signal_relay::config::{Config, StoreBackend, DEFAULT_PORT, DEFAULT_REDIS_URL};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.webhook_secret, None);
    assert_eq!(config.store, StoreBackend::Redis);
    assert_eq!(config.redis_url, DEFAULT_REDIS_URL);
    assert_eq!(config.port, DEFAULT_PORT);
    assert!(!config.serialize_accounts);
    assert!(!config.is_production());
}

#[test]
fn test_store_backend_parsing() {
    assert_eq!("redis".parse::<StoreBackend>(), Ok(StoreBackend::Redis));
    assert_eq!(" Memory ".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
    assert!("dynamo".parse::<StoreBackend>().is_err());
    assert_eq!(StoreBackend::Memory.to_string(), "memory");
}

#[test]
fn test_production_detection() {
    let mut config = Config::default();
    config.environment = "prod".to_string();
    assert!(config.is_production());
    config.environment = "production".to_string();
    assert!(config.is_production());
    config.environment = "staging".to_string();
    assert!(!config.is_production());
}
