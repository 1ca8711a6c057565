use std::collections::BTreeMap;

pub(crate) fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

/// Sample indices grouped by label, in ascending label order.
pub(crate) fn group_by_label(labels: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(i);
    }
    groups
}

/// Rounds up, treating values within 1e-9 of an integer as that integer.
pub(crate) fn ceil_count(raw: f64) -> usize {
    let rounded = raw.round();
    if (raw - rounded).abs() < 1e-9 {
        rounded as usize
    } else {
        raw.ceil() as usize
    }
}

/// Spreads `total` seats over classes of the given sizes in proportion to their size.
///
/// Each class first gets `floor(count * total / n)`; leftover seats go to the
/// classes with the largest remainders, lower class position first on ties.
pub(crate) fn allocate_proportional(counts: &[usize], total: usize) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return vec![0; counts.len()];
    }

    let mut allocation: Vec<usize> = counts.iter().map(|&c| c * total / n).collect();
    let assigned: usize = allocation.iter().sum();
    let leftover = total.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = counts[a] * total % n;
        let rb = counts[b] * total % n;
        rb.cmp(&ra).then(a.cmp(&b))
    });
    for &i in order.iter().take(leftover) {
        if allocation[i] < counts[i] {
            allocation[i] += 1;
        }
    }
    allocation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_count() {
        assert_eq!(ceil_count(0.2 * 10.0), 2);
        assert_eq!(ceil_count(2.000000000001), 2);
        assert_eq!(ceil_count(1.05), 2);
        assert_eq!(ceil_count(0.0), 0);
    }

    #[test]
    fn test_allocate_exact_total() {
        assert_eq!(allocate_proportional(&[5, 5], 2), vec![1, 1]);
        assert_eq!(allocate_proportional(&[50, 50], 10), vec![5, 5]);
        assert_eq!(allocate_proportional(&[3, 3, 3], 2), vec![1, 1, 0]);

        let alloc = allocate_proportional(&[7, 2, 11], 6);
        assert_eq!(alloc.iter().sum::<usize>(), 6);
        assert_eq!(alloc, vec![2, 1, 3]);
    }

    #[test]
    fn test_group_by_label() {
        let groups = group_by_label(&[1, 0, 1, 2, 0]);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(groups[&0], vec![1, 4]);
        assert_eq!(groups[&1], vec![0, 2]);
    }
}
