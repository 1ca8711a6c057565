use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Train, validation and test paths/labels, in that order.
pub type SplitArrays<T> = (Vec<T>, Vec<usize>, Vec<T>, Vec<usize>, Vec<T>, Vec<usize>);

/// One of the three subsets a dataset is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    Train,
    Val,
    Test,
}

impl Subset {
    pub const ALL: [Subset; 3] = [Subset::Train, Subset::Val, Subset::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Samples and their integer labels, as parallel vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSet<T> {
    #[serde(rename = "X")]
    pub x: Vec<T>,
    #[serde(rename = "Y")]
    pub y: Vec<usize>,
}

impl<T> SplitSet<T> {
    pub fn new(x: Vec<T>, y: Vec<usize>) -> Self {
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Number of samples carrying `label`.
    pub fn count_label(&self, label: usize) -> usize {
        self.y.iter().filter(|&&l| l == label).count()
    }
}

/// A dataset divided into train, validation and test sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDicts<T> {
    pub train: SplitSet<T>,
    pub val: SplitSet<T>,
    pub test: SplitSet<T>,
}

impl<T> SplitDicts<T> {
    pub fn get(&self, subset: Subset) -> &SplitSet<T> {
        match subset {
            Subset::Train => &self.train,
            Subset::Val => &self.val,
            Subset::Test => &self.test,
        }
    }

    /// Total number of samples across all three subsets.
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_arrays(self) -> SplitArrays<T> {
        (
            self.train.x,
            self.train.y,
            self.val.x,
            self.val.y,
            self.test.x,
            self.test.y,
        )
    }
}

impl<T: AsRef<Path>> SplitDicts<T> {
    /// Hex SHA-256 of which sample went to which subset, with its label.
    ///
    /// Two splits have the same fingerprint only if every subset holds the same
    /// paths and labels in the same order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for subset in Subset::ALL {
            let set = self.get(subset);
            hasher.update(subset.as_str().as_bytes());
            hasher.update(b"\n");
            for (path, label) in set.x.iter().zip(&set.y) {
                hasher.update(path.as_ref().to_string_lossy().as_bytes());
                hasher.update(format!("\t{}\n", label).as_bytes());
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_dicts() -> SplitDicts<PathBuf> {
        SplitDicts {
            train: SplitSet::new(
                vec![PathBuf::from("a/cat/1.jpg"), PathBuf::from("a/dog/1.jpg")],
                vec![0, 1],
            ),
            val: SplitSet::new(vec![PathBuf::from("a/cat/2.jpg")], vec![0]),
            test: SplitSet::new(vec![PathBuf::from("a/dog/2.jpg")], vec![1]),
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample_dicts()).unwrap();
        assert_eq!(json["train"]["X"][0], "a/cat/1.jpg");
        assert_eq!(json["test"]["Y"][0], 1);
        assert!(json["val"].get("x").is_none());
    }

    #[test]
    fn test_fingerprint_tracks_assignment() {
        let dicts = sample_dicts();
        let same = sample_dicts();
        assert_eq!(dicts.fingerprint(), same.fingerprint());
        assert_eq!(dicts.fingerprint().len(), 64);

        let mut swapped = sample_dicts();
        std::mem::swap(&mut swapped.val, &mut swapped.test);
        assert_ne!(dicts.fingerprint(), swapped.fingerprint());
    }

    #[test]
    fn test_into_arrays_order() {
        let (train_x, train_y, val_x, _, _, test_y) = sample_dicts().into_arrays();
        assert_eq!(train_x.len(), 2);
        assert_eq!(train_y, vec![0, 1]);
        assert_eq!(val_x, vec![PathBuf::from("a/cat/2.jpg")]);
        assert_eq!(test_y, vec![1]);
    }
}
