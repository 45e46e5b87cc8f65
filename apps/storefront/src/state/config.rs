//! # Storefront Configuration
//!
//! Settings read once at startup.

use tracing::warn;

use darb_core::order::WhatsAppDestination;

/// Read-only storefront settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// WhatsApp number orders go to unless the shopper picks the other.
    pub default_destination: WhatsAppDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_destination: WhatsAppDestination::Primary,
        }
    }
}

impl AppConfig {
    /// Creates the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `DARB_WHATSAPP`: `primary`, `secondary` or either phone number
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();
        if let Ok(destination) = std::env::var("DARB_WHATSAPP") {
            config.apply_destination(&destination);
        }
        config
    }

    /// Sets the default destination; an unknown value keeps the current one.
    pub fn apply_destination(&mut self, value: &str) {
        match value.parse() {
            Ok(parsed) => self.default_destination = parsed,
            Err(e) => warn!("Ignoring DARB_WHATSAPP: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.default_destination, WhatsAppDestination::Primary);
    }

    #[test]
    fn test_apply_destination() {
        let mut config = AppConfig::default();
        config.apply_destination("secondary");
        assert_eq!(config.default_destination, WhatsAppDestination::Secondary);

        config.apply_destination("somewhere");
        assert_eq!(config.default_destination, WhatsAppDestination::Secondary);
    }
}
