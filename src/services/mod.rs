//! Services layer (ports + adapters).
//!
//! - `ports`: contracts of the collaborators the part service drives.
//! - `adapters`: default, headless implementations.
//! - `config`: tunable behaviour of the part service.

pub mod adapters;
pub mod config;
pub mod ports;

pub use config::{ConfigError, PartServiceConfig, RemovalSelection, REMOVE_ON_HIDE_TAG};
