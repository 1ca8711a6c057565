use std::fmt;

use serde::Serialize;

use super::error::DatasetError;
use super::sets::{SplitDicts, SplitSet, Subset};

/// Per-class sample counts for each subset of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStatistics {
    pub classes: Vec<String>,
    pub train: Vec<usize>,
    pub val: Vec<usize>,
    pub test: Vec<usize>,
}

fn count_per_class<T>(set: &SplitSet<T>, num_classes: usize) -> Result<Vec<usize>, DatasetError> {
    let mut counts = vec![0; num_classes];
    for &label in &set.y {
        let slot = counts
            .get_mut(label)
            .ok_or(DatasetError::LabelOutOfRange { label, num_classes })?;
        *slot += 1;
    }
    Ok(counts)
}

impl DatasetStatistics {
    /// Counts the samples of each class in every subset of `split`.
    ///
    /// # Errors
    /// `LabelOutOfRange` if a label has no entry in `classes`
    pub fn from_split<T>(split: &SplitDicts<T>, classes: &[String]) -> Result<Self, DatasetError> {
        Ok(Self {
            classes: classes.to_vec(),
            train: count_per_class(&split.train, classes.len())?,
            val: count_per_class(&split.val, classes.len())?,
            test: count_per_class(&split.test, classes.len())?,
        })
    }

    pub fn counts(&self, subset: Subset) -> &[usize] {
        match subset {
            Subset::Train => &self.train,
            Subset::Val => &self.val,
            Subset::Test => &self.test,
        }
    }

    pub fn subset_total(&self, subset: Subset) -> usize {
        self.counts(subset).iter().sum()
    }

    /// Samples of class `class` across all subsets, 0 for an unknown class.
    pub fn class_total(&self, class: usize) -> usize {
        Subset::ALL
            .iter()
            .map(|&subset| self.counts(subset).get(class).copied().unwrap_or(0))
            .sum()
    }

    pub fn total(&self) -> usize {
        Subset::ALL.iter().map(|&s| self.subset_total(s)).sum()
    }

    /// Share of `subset` made up of class `class`, or 0.0 for an empty subset or
    /// an unknown class.
    pub fn class_fraction(&self, subset: Subset, class: usize) -> f64 {
        let total = self.subset_total(subset);
        if total == 0 {
            return 0.0;
        }
        self.counts(subset).get(class).copied().unwrap_or(0) as f64 / total as f64
    }
}

impl fmt::Display for DatasetStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of images in the dataset: {}", self.total())?;
        writeln!(
            f,
            "  train: {}, val: {}, test: {}",
            self.subset_total(Subset::Train),
            self.subset_total(Subset::Val),
            self.subset_total(Subset::Test)
        )?;
        for (i, class) in self.classes.iter().enumerate() {
            writeln!(
                f,
                "Number of images in class {}: {} (train {}, val {}, test {})",
                class,
                self.class_total(i),
                self.train[i],
                self.val[i],
                self.test[i]
            )?;
        }
        Ok(())
    }
}
