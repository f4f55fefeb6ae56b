//! Pricer configuration.
//!
//! ```toml
//! binary_spread = 1.0e-4
//! parallel_threshold = 32
//! ```

use capfloor_core::{ensure, Error, Real, Result};
use serde::{Deserialize, Serialize};

/// Default half-width of the vertical spread replicating a binary option.
pub const DEFAULT_BINARY_SPREAD: Real = 1.0e-4;

/// Default leg size from which periods are priced in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 32;

/// Tunable pricer settings. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Half-width of the call/put spread used for binary periods.
    pub binary_spread: Real,
    /// Legs with at least this many periods are priced on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            binary_spread: DEFAULT_BINARY_SPREAD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl PricingConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    /// `Error::Configuration` on malformed TOML, unknown keys, or values
    /// rejected by [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| Error::Configuration(format!("pricing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Configuration(format!("pricing config: {e}")))
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    /// `Error::Configuration` if the binary spread is not a positive finite
    /// number.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.binary_spread.is_finite() && self.binary_spread > 0.0,
            "binary spread must be positive and finite, got {}",
            self.binary_spread
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let c = PricingConfig::from_toml_str("").unwrap();
        assert_eq!(c, PricingConfig::default());
        assert_eq!(c.binary_spread, 1.0e-4);
        assert_eq!(c.parallel_threshold, 32);
    }

    #[test]
    fn parses_overrides() {
        let c = PricingConfig::from_toml_str("binary_spread = 5.0e-4\nparallel_threshold = 4\n")
            .unwrap();
        assert_eq!(c.binary_spread, 5.0e-4);
        assert_eq!(c.parallel_threshold, 4);
    }

    #[test]
    fn round_trips_through_toml() {
        let c = PricingConfig {
            binary_spread: 2.0e-4,
            parallel_threshold: 8,
        };
        let text = c.to_toml_string().unwrap();
        assert_eq!(PricingConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            PricingConfig::from_toml_str("binary_spread = 0.0"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            PricingConfig::from_toml_str("binary_spread = -1.0e-4"),
            Err(Error::Configuration(_))
        ));
        assert!(PricingConfig::from_toml_str("spread = 1.0").is_err());
        assert!(PricingConfig::from_toml_str("parallel_threshold = \"many\"").is_err());
    }
}
