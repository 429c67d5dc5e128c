use crate::error::ConfigError;
use rust_decimal::Decimal;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AccountSettings, Config, Listing, ServerSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Environment variables override file values (e.g. ASTRO__SERVER__PORT).
        .add_source(config::Environment::with_prefix("ASTRO").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.accounts.initial_cash <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "accounts.initial_cash must be greater than 0".to_string(),
        ));
    }
    for listing in &config.listings {
        if listing.price <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "listing {} must have a positive price",
                listing.ticker
            )));
        }
    }
    Ok(())
}
