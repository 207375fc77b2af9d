//! Fixed server settings.
//!
//! Both programs run on well-known ports with no flags, environment
//! variables, or config files. The struct exists so tests and embedders can
//! override the defaults in code.

use std::time::Duration;

pub const INLINE_PORT: u16 = 32000;
pub const UPDATER_PORT: u16 = 32001;
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub inline_port: u16,
    pub updater_port: u16,
    /// Tick period of the background gauge updater.
    pub update_interval: Duration,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            inline_port: INLINE_PORT,
            updater_port: UPDATER_PORT,
            update_interval: UPDATE_INTERVAL,
        }
    }
}
