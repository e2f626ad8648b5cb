//! Environment configuration.

use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment. `PORT` selects the
    /// listening port; unset falls back to 3000, unparsable is a config
    /// error rather than a silent default.
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("invalid PORT value: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { port })
    }
}
