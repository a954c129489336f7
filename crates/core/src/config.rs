use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot

/// Directory holding the overlay images, one `<key>.png` per selection.
/// Read once at startup from the OVERLAY_DIR environment variable.
pub static OVERLAY_DIR: Lazy<String> = Lazy::new(|| env::var("OVERLAY_DIR").unwrap_or_else(|_| "overlays".to_string()));

/// Log file path
/// Read from LOG_FILE environment variable, defaults to avatarka.log
pub static LOG_FILE_PATH: Lazy<String> = Lazy::new(|| env::var("LOG_FILE").unwrap_or_else(|_| "avatarka.log".to_string()));

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for Telegram API requests (in seconds)
    pub const TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_timeout() {
        assert_eq!(network::timeout(), Duration::from_secs(network::TIMEOUT_SECS));
    }
}
