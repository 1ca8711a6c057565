use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::error::DatasetError;
use super::sets::SplitSet;
use super::utils::{allocate_proportional, ceil_count, group_by_label, select};
use crate::config::check_fraction;

/// Size of the group carved out by a stratified split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldOut {
    /// A fraction of the input, rounded up
    Fraction(f64),
    /// An exact number of samples
    Count(usize),
}

impl HoldOut {
    fn resolve(self, n: usize) -> Result<usize, DatasetError> {
        match self {
            Self::Fraction(f) => {
                check_fraction("hold-out fraction", f)?;
                Ok(ceil_count(f * n as f64))
            }
            Self::Count(count) => Ok(count),
        }
    }
}

/// Indices into the input of the two groups produced by a stratified split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSplit {
    pub retained: Vec<usize>,
    pub held_out: Vec<usize>,
}

/// Splits sample indices into two groups that keep the class proportions of `labels`.
///
/// Indices are grouped by label in ascending label order. The held-out size
/// is spread over the classes in proportion to their size (largest remainder
/// first), then each class is shuffled with one ChaCha8 stream seeded from
/// `seed` and cut at its allocation. The same input, size and seed always
/// produce the same groups.
///
/// # Errors
/// - `EmptyDataset` if `labels` is empty
/// - `InsufficientClassPopulation` if any class has fewer than 2 members
/// - `InvalidSplitSize` if either group would be smaller than the number of classes
/// - `ConfigError` for a fraction outside (0, 1)
pub fn stratified_split_indices(
    labels: &[usize],
    hold_out: HoldOut,
    seed: u64,
) -> Result<IndexSplit, DatasetError> {
    let n = labels.len();
    if n == 0 {
        return Err(DatasetError::EmptyDataset);
    }

    let groups = group_by_label(labels);
    if let Some((&label, members)) = groups.iter().min_by_key(|(_, members)| members.len()) {
        if members.len() < 2 {
            return Err(DatasetError::InsufficientClassPopulation { label, count: members.len() });
        }
    }

    let num_classes = groups.len();
    let n_held = hold_out.resolve(n)?;
    if n_held > n {
        return Err(DatasetError::InvalidSplitSize(format!(
            "cannot hold out {} of {} samples",
            n_held, n
        )));
    }
    let n_retained = n - n_held;
    if n_held < num_classes {
        return Err(DatasetError::InvalidSplitSize(format!(
            "held-out size {} should be at least the number of classes {}",
            n_held, num_classes
        )));
    }
    if n_retained < num_classes {
        return Err(DatasetError::InvalidSplitSize(format!(
            "retained size {} should be at least the number of classes {}",
            n_retained, num_classes
        )));
    }

    let counts: Vec<usize> = groups.values().map(Vec::len).collect();
    let allocation = allocate_proportional(&counts, n_held);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut split = IndexSplit {
        retained: Vec::with_capacity(n_retained),
        held_out: Vec::with_capacity(n_held),
    };
    for ((label, mut members), take) in groups.into_iter().zip(allocation) {
        members.shuffle(&mut rng);
        debug!("Class {}: holding out {} of {}", label, take, members.len());
        let (held, kept) = members.split_at(take);
        split.held_out.extend_from_slice(held);
        split.retained.extend_from_slice(kept);
    }

    Ok(split)
}

/// Splits `samples` into a retained and a held-out group, keeping class proportions.
///
/// `fraction` is the share of samples to hold out.
///
/// # Example
/// ```
/// use imgsplit::stratified_split;
///
/// let samples = vec!["a", "b", "c", "d", "e", "f", "g", "h"];
/// let labels = vec![0, 0, 0, 0, 1, 1, 1, 1];
/// let (retained, held_out) = stratified_split(&samples, &labels, 0.25, 10).unwrap();
/// assert_eq!(retained.len(), 6);
/// assert_eq!(held_out.count_label(0), 1);
/// assert_eq!(held_out.count_label(1), 1);
/// ```
pub fn stratified_split<T: Clone>(
    samples: &[T],
    labels: &[usize],
    fraction: f64,
    seed: u64,
) -> Result<(SplitSet<T>, SplitSet<T>), DatasetError> {
    if samples.len() != labels.len() {
        return Err(DatasetError::LengthMismatch { samples: samples.len(), labels: labels.len() });
    }
    let split = stratified_split_indices(labels, HoldOut::Fraction(fraction), seed)?;
    let retained = SplitSet::new(select(samples, &split.retained), select(labels, &split.retained));
    let held_out = SplitSet::new(select(samples, &split.held_out), select(labels, &split.held_out));
    Ok((retained, held_out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced(per_class: usize, classes: usize) -> Vec<usize> {
        (0..classes).flat_map(|c| std::iter::repeat(c).take(per_class)).collect()
    }

    #[test]
    fn test_partition_is_exhaustive() {
        let labels = balanced(7, 3);
        let split = stratified_split_indices(&labels, HoldOut::Fraction(0.3), 1).unwrap();
        let mut all: Vec<usize> = split.retained.iter().chain(&split.held_out).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..labels.len()).collect::<Vec<_>>());
        assert_eq!(split.held_out.len(), 7);
    }

    #[test]
    fn test_exact_count() {
        let labels = balanced(4, 2);
        let split = stratified_split_indices(&labels, HoldOut::Count(2), 10).unwrap();
        assert_eq!(split.held_out.len(), 2);
        assert_eq!(split.retained.len(), 6);
        let held_labels: Vec<usize> = split.held_out.iter().map(|&i| labels[i]).collect();
        assert_eq!(held_labels, vec![0, 1]);
    }

    #[test]
    fn test_seed_changes_selection() {
        let labels = balanced(50, 2);
        let a = stratified_split_indices(&labels, HoldOut::Fraction(0.2), 1).unwrap();
        let b = stratified_split_indices(&labels, HoldOut::Fraction(0.2), 1).unwrap();
        let c = stratified_split_indices(&labels, HoldOut::Fraction(0.2), 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_singleton_class_rejected() {
        let labels = vec![0, 0, 0, 1, 2, 2];
        let result = stratified_split_indices(&labels, HoldOut::Fraction(0.5), 10);
        assert!(matches!(
            result,
            Err(DatasetError::InsufficientClassPopulation { label: 1, count: 1 })
        ));
    }

    #[test]
    fn test_group_too_small_for_classes() {
        let labels = balanced(5, 3);
        let result = stratified_split_indices(&labels, HoldOut::Count(2), 10);
        assert!(matches!(result, Err(DatasetError::InvalidSplitSize(_))));

        let result = stratified_split_indices(&labels, HoldOut::Count(14), 10);
        assert!(matches!(result, Err(DatasetError::InvalidSplitSize(_))));

        let result = stratified_split_indices(&labels, HoldOut::Count(16), 10);
        assert!(matches!(result, Err(DatasetError::InvalidSplitSize(_))));
    }

    #[test]
    fn test_empty_and_mismatched() {
        assert!(matches!(
            stratified_split_indices(&[], HoldOut::Fraction(0.5), 10),
            Err(DatasetError::EmptyDataset)
        ));
        assert!(matches!(
            stratified_split(&["a", "b"], &[0], 0.5, 10),
            Err(DatasetError::LengthMismatch { samples: 2, labels: 1 })
        ));
    }

    #[test]
    fn test_bad_fraction() {
        let labels = balanced(5, 2);
        assert!(matches!(
            stratified_split_indices(&labels, HoldOut::Fraction(1.5), 10),
            Err(DatasetError::ConfigError(_))
        ));
    }
}
