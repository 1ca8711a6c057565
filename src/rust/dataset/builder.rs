use log::info;

use super::error::DatasetError;
use super::splitter::Splitter;
use crate::config::{check_fraction, SplitConfig};

/// A builder for constructing a Splitter with a fluent interface.
#[derive(Debug, Clone, Default)]
pub struct SplitterBuilder {
    config: SplitConfig,
}

impl SplitterBuilder {
    /// Creates a new builder starting from `SplitConfig::default()`
    ///
    /// # Example
    /// ```
    /// use imgsplit::SplitterBuilder;
    ///
    /// let builder = SplitterBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            config: SplitConfig::default(),
        }
    }

    /// Replaces the whole configuration. It is validated in `build()`.
    ///
    /// # Example
    /// ```
    /// use imgsplit::{SplitConfig, SplitterBuilder};
    ///
    /// let splitter = SplitterBuilder::new()
    ///     .with_config(SplitConfig::new(0.15, 0.15, 3))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(splitter.config().seed, 3);
    /// ```
    pub fn with_config(mut self, config: SplitConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the validation fraction, relative to the whole dataset
    ///
    /// # Returns
    /// * `Result<Self, DatasetError>` - The builder, or a `ConfigError` if the
    ///   fraction is not strictly between 0 and 1
    pub fn with_val_fraction(mut self, fraction: f64) -> Result<Self, DatasetError> {
        check_fraction("val_fraction", fraction)?;
        self.config.val_fraction = fraction;
        Ok(self)
    }

    /// Sets the test fraction, relative to the whole dataset
    ///
    /// # Returns
    /// * `Result<Self, DatasetError>` - The builder, or a `ConfigError` if the
    ///   fraction is not strictly between 0 and 1
    pub fn with_test_fraction(mut self, fraction: f64) -> Result<Self, DatasetError> {
        check_fraction("test_fraction", fraction)?;
        self.config.test_fraction = fraction;
        Ok(self)
    }

    /// Sets the seed shared by both sampling stages
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Builds and returns the final Splitter instance
    ///
    /// # Returns
    /// * `Result<Splitter, DatasetError>` - The Splitter, or a `ConfigError` if:
    ///   - Either fraction is outside (0, 1)
    ///   - The fractions add up to 1 or more, leaving no training data
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use imgsplit::Splitter;
    ///
    /// let splitter = Splitter::builder()
    ///     .with_val_fraction(0.2)?
    ///     .with_test_fraction(0.1)?
    ///     .with_seed(42)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Splitter, DatasetError> {
        self.config.validate()?;
        info!(
            "Splitter configured: val={}, test={}, seed={}",
            self.config.val_fraction, self.config.test_fraction, self.config.seed
        );
        Ok(Splitter { config: self.config })
    }
}
