//! Configuration loading for PassVault.

pub mod settings;

pub use settings::Settings;
