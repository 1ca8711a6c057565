use log::{debug, info};
use serde::Serialize;

use super::builder::SplitterBuilder;
use super::error::DatasetError;
use super::sets::{SplitArrays, SplitDicts, SplitSet};
use super::stratified::{stratified_split_indices, HoldOut};
use super::utils::{ceil_count, select};
use crate::config::{SplitConfig, DEFAULT_SEED};

/// Subset sizes a splitter will produce for a dataset of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitPlan {
    pub total: usize,
    pub test: usize,
    /// Samples left after the test set is carved out
    pub development: usize,
    pub val: usize,
    pub train: usize,
    /// Share of the development set that goes to validation
    pub val_fraction_adjusted: f64,
}

/// Indices into the input for each of the three subsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub val: Vec<usize>,
    pub test: Vec<usize>,
}

/// Divides labelled samples into train, validation and test sets, keeping class
/// proportions in each.
///
/// The split is done in two stratified stages: the test set is carved out of
/// the full dataset, then the validation set out of what remains. Both
/// fractions are relative to the full dataset, so with `val_fraction = 0.2`
/// the validation set holds `floor(0.2 * N)` samples no matter how large the
/// test set is.
///
/// A `Splitter` holds only its configuration and can be shared across threads.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use imgsplit::Splitter;
///
/// let paths: Vec<String> = (0..10).map(|i| format!("data/{}/{}.jpg", i % 2, i)).collect();
/// let labels: Vec<usize> = (0..10).map(|i| i % 2).collect();
///
/// let splitter = Splitter::builder()
///     .with_val_fraction(0.2)?
///     .with_test_fraction(0.2)?
///     .build()?;
/// let split = splitter.split(&paths, &labels)?;
/// assert_eq!((split.train.len(), split.val.len(), split.test.len()), (6, 2, 2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Splitter {
    pub(crate) config: SplitConfig,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Splitter>();
    }
};

impl Splitter {
    /// Creates a new SplitterBuilder for fluent construction
    pub fn builder() -> SplitterBuilder {
        SplitterBuilder::new()
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Computes the subset sizes for `total` samples without sampling anything.
    ///
    /// # Errors
    /// - `EmptyDataset` if `total` is zero
    /// - `InvalidSplitSize` if the test set would take every sample
    pub fn plan(&self, total: usize) -> Result<SplitPlan, DatasetError> {
        if total == 0 {
            return Err(DatasetError::EmptyDataset);
        }
        let test = ceil_count(self.config.test_fraction * total as f64);
        if test >= total {
            return Err(DatasetError::InvalidSplitSize(format!(
                "test set of {} leaves no development data out of {}",
                test, total
            )));
        }
        let development = total - test;
        // Plain truncation, unlike ceil_count for the test set: no tolerance is
        // applied, so 0.15 * 7 gives 1 and 0.29 * 100 (28.999...) gives 28
        let val = (self.config.val_fraction * total as f64) as usize;
        if val > development {
            return Err(DatasetError::InvalidSplitSize(format!(
                "validation set of {} does not fit in {} development samples",
                val, development
            )));
        }
        Ok(SplitPlan {
            total,
            test,
            development,
            val,
            train: development - val,
            val_fraction_adjusted: val as f64 / development as f64,
        })
    }

    /// Assigns every label index to train, validation or test.
    ///
    /// Second-stage indices are mapped back through the development set, so all
    /// returned indices refer to `labels`.
    pub fn split_indices(&self, labels: &[usize]) -> Result<SplitIndices, DatasetError> {
        let plan = self.plan(labels.len())?;
        let seed = self.config.seed;

        let first = stratified_split_indices(labels, HoldOut::Count(plan.test), seed)?;
        let dev_labels = select(labels, &first.retained);

        debug!(
            "Development set has {} samples, adjusted validation fraction {:.4}",
            plan.development, plan.val_fraction_adjusted
        );
        let second = stratified_split_indices(&dev_labels, HoldOut::Count(plan.val), seed)?;

        let indices = SplitIndices {
            train: second.retained.iter().map(|&i| first.retained[i]).collect(),
            val: second.held_out.iter().map(|&i| first.retained[i]).collect(),
            test: first.held_out,
        };
        info!(
            "Split {} samples into train={}, val={}, test={}",
            plan.total,
            indices.train.len(),
            indices.val.len(),
            indices.test.len()
        );
        Ok(indices)
    }

    /// Splits parallel `samples` and `labels` into train, validation and test sets.
    ///
    /// # Errors
    /// - `LengthMismatch` if the inputs differ in length
    /// - `EmptyDataset` if there are no samples
    /// - `InsufficientClassPopulation` if a class is too small to appear on both
    ///   sides of a stage
    /// - `InvalidSplitSize` if a subset could not hold one sample per class
    pub fn split<T: Clone>(
        &self,
        samples: &[T],
        labels: &[usize],
    ) -> Result<SplitDicts<T>, DatasetError> {
        if samples.len() != labels.len() {
            return Err(DatasetError::LengthMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }
        let indices = self.split_indices(labels)?;
        let take = |idx: &[usize]| SplitSet::new(select(samples, idx), select(labels, idx));
        Ok(SplitDicts {
            train: take(&indices.train),
            val: take(&indices.val),
            test: take(&indices.test),
        })
    }
}

/// Splits data into train, validation and test sets with the default seed.
///
/// `val_split` and `test_split` are both fractions of the full dataset. The
/// validation set gets exactly `floor(val_split * N)` samples.
///
/// # Returns
/// Train samples, train labels, validation samples, validation labels, test
/// samples, test labels
///
/// # Example
/// ```
/// use imgsplit::split_data;
///
/// let paths: Vec<String> = (0..10).map(|i| format!("{}.jpg", i)).collect();
/// let labels = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
/// let (train, _, val, _, test, test_labels) = split_data(&paths, &labels, 0.2, 0.2).unwrap();
/// assert_eq!((train.len(), val.len(), test.len()), (6, 2, 2));
/// assert_eq!(test_labels.iter().filter(|&&l| l == 0).count(), 1);
/// ```
pub fn split_data<T: Clone>(
    samples: &[T],
    labels: &[usize],
    val_split: f64,
    test_split: f64,
) -> Result<SplitArrays<T>, DatasetError> {
    split_data_to_dicts(samples, labels, val_split, test_split, DEFAULT_SEED)
        .map(SplitDicts::into_arrays)
}

/// Splits data into train, validation and test sets, each returned as a named
/// `{X, Y}` bundle.
pub fn split_data_to_dicts<T: Clone>(
    samples: &[T],
    labels: &[usize],
    val_split: f64,
    test_split: f64,
    random_state: u64,
) -> Result<SplitDicts<T>, DatasetError> {
    let splitter = SplitterBuilder::new()
        .with_config(SplitConfig::new(val_split, test_split, random_state))
        .build()?;
    splitter.split(samples, labels)
}
