use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetError;

/// Seed used when none is given, kept stable so published splits can be reproduced.
pub const DEFAULT_SEED: u64 = 10;

pub const ENV_VAL_FRACTION: &str = "IMGSPLIT_VAL_FRACTION";
pub const ENV_TEST_FRACTION: &str = "IMGSPLIT_TEST_FRACTION";
pub const ENV_SEED: &str = "IMGSPLIT_SEED";

/// Fractions and seed for a three-way stratified split.
///
/// Both fractions are relative to the full dataset size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    pub val_fraction: f64,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            val_fraction: 0.2,
            test_fraction: 0.1,
            seed: DEFAULT_SEED,
        }
    }
}

pub(crate) fn check_fraction(name: &str, value: f64) -> Result<(), DatasetError> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(DatasetError::ConfigError(format!(
            "{} must be strictly between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

fn read_env<T: FromStr>(key: &str) -> Result<Option<T>, DatasetError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| {
                DatasetError::ConfigError(format!("{}={:?} is not valid: {}", key, raw, e))
            }),
        Err(_) => Ok(None),
    }
}

impl SplitConfig {
    pub fn new(val_fraction: f64, test_fraction: f64, seed: u64) -> Self {
        Self { val_fraction, test_fraction, seed }
    }

    /// Builds a configuration from the defaults, overridden by any of
    /// `IMGSPLIT_VAL_FRACTION`, `IMGSPLIT_TEST_FRACTION` and `IMGSPLIT_SEED`.
    pub fn from_env() -> Result<Self, DatasetError> {
        let mut config = Self::default();
        if let Some(val) = read_env(ENV_VAL_FRACTION)? {
            config.val_fraction = val;
        }
        if let Some(test) = read_env(ENV_TEST_FRACTION)? {
            config.test_fraction = test;
        }
        if let Some(seed) = read_env(ENV_SEED)? {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks that both fractions lie in (0, 1) and leave room for a training set.
    pub fn validate(&self) -> Result<(), DatasetError> {
        check_fraction("val_fraction", self.val_fraction)?;
        check_fraction("test_fraction", self.test_fraction)?;
        if self.val_fraction + self.test_fraction >= 1.0 {
            return Err(DatasetError::ConfigError(format!(
                "val_fraction + test_fraction must be below 1, got {} + {}",
                self.val_fraction, self.test_fraction
            )));
        }
        Ok(())
    }

    /// Fraction of the dataset left for training.
    pub fn train_fraction(&self) -> f64 {
        1.0 - self.val_fraction - self.test_fraction
    }
}
