//! Optional `envstamp.{toml,yaml,yml,json}` configuration.
//!
//! Without a config file the defaults reproduce the plain build step:
//! `.env`, `web/environment.js`, `GOOGLE_MAPS_API_KEY`.

pub mod loader;
pub mod schema;

pub use {
    loader::{CONFIG_FILENAMES, discover_and_load, find_config_file, load_config},
    schema::{DEFAULT_ENV_FILE, EnvstampConfig, TargetConfig},
};
