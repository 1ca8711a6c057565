use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use log::info;

use super::error::DatasetError;
use crate::listing::list_images;

/// Paths, their integer labels, and the sorted class names the labels index into.
pub type PreparedData = (Vec<PathBuf>, Vec<usize>, Vec<String>);

/// Returns the name of the directory that directly contains `path`.
///
/// Both `/` and `\` are accepted as separators so that listings produced on
/// Windows label the same way as POSIX ones.
fn parent_label(path: &Path) -> Result<String, DatasetError> {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').collect();
    if segments.len() < 2 {
        return Err(DatasetError::MalformedPath(normalized));
    }
    let label = segments[segments.len() - 2];
    if label.is_empty() {
        return Err(DatasetError::MalformedPath(normalized));
    }
    Ok(label.to_string())
}

/// Extracts one label per path from its parent directory name.
///
/// # Returns
/// A tuple containing:
/// * The per-path labels, parallel to `paths`
/// * The distinct labels in ascending order ("classes")
///
/// # Errors
/// `MalformedPath` when a path has no parent directory segment
///
/// # Example
/// ```
/// use imgsplit::extract_labels;
///
/// let (labels, classes) = extract_labels(&["a/cat/1.jpg", "a/dog/1.jpg"]).unwrap();
/// assert_eq!(labels, vec!["cat", "dog"]);
/// assert_eq!(classes, vec!["cat", "dog"]);
/// ```
pub fn extract_labels<P: AsRef<Path>>(
    paths: &[P],
) -> Result<(Vec<String>, Vec<String>), DatasetError> {
    let labels = paths
        .iter()
        .map(|p| parent_label(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let classes: Vec<String> = labels
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok((labels, classes))
}

/// Encodes each label as the index of its class in `classes`.
///
/// `classes` is expected to be sorted, as returned by [`extract_labels`], so
/// that the class at position `i` always maps to `i`.
///
/// # Errors
/// `UnknownLabel` for a label that does not appear in `classes`
pub fn convert_labels_to_int<S: AsRef<str>>(
    labels: &[S],
    classes: &[String],
) -> Result<Vec<usize>, DatasetError> {
    let label_to_int: HashMap<&str, usize> = classes
        .iter()
        .enumerate()
        .map(|(i, class)| (class.as_str(), i))
        .collect();

    labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            label_to_int
                .get(label)
                .copied()
                .ok_or_else(|| DatasetError::UnknownLabel(label.to_string()))
        })
        .collect()
}

/// Maps integer labels back to their class names.
///
/// # Errors
/// `LabelOutOfRange` for an index past the end of `classes`
pub fn decode_labels(
    int_labels: &[usize],
    classes: &[String],
) -> Result<Vec<String>, DatasetError> {
    int_labels
        .iter()
        .map(|&label| {
            classes
                .get(label)
                .cloned()
                .ok_or(DatasetError::LabelOutOfRange { label, num_classes: classes.len() })
        })
        .collect()
}

/// Lists images matching `pattern`, labels them by parent directory and encodes the labels.
///
/// # Example
/// ```no_run
/// use imgsplit::list_data_and_prepare_labels;
///
/// let (paths, labels, classes) = list_data_and_prepare_labels("data/**/*.jpg").unwrap();
/// assert_eq!(paths.len(), labels.len());
/// println!("{} classes", classes.len());
/// ```
pub fn list_data_and_prepare_labels(pattern: &str) -> Result<PreparedData, DatasetError> {
    let images = list_images(pattern)?;
    let (labels, classes) = extract_labels(&images)?;
    let labels_int = convert_labels_to_int(&labels, &classes)?;

    info!("Prepared {} images across {} classes", images.len(), classes.len());
    Ok((images, labels_int, classes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_label_backslashes() {
        let label = parent_label(Path::new(r"C:\data\bird\003.png")).unwrap();
        assert_eq!(label, "bird");
    }

    #[test]
    fn test_parent_label_without_parent() {
        assert!(matches!(
            parent_label(Path::new("image.jpg")),
            Err(DatasetError::MalformedPath(_))
        ));
        assert!(matches!(
            parent_label(Path::new("/image.jpg")),
            Err(DatasetError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_unknown_label() {
        let classes = vec!["cat".to_string()];
        let result = convert_labels_to_int(&["cat", "dog"], &classes);
        assert!(matches!(result, Err(DatasetError::UnknownLabel(ref l)) if l == "dog"));
    }

    #[test]
    fn test_decode_out_of_range() {
        let classes = vec!["cat".to_string(), "dog".to_string()];
        assert!(matches!(
            decode_labels(&[0, 2], &classes),
            Err(DatasetError::LabelOutOfRange { label: 2, num_classes: 2 })
        ));
    }

    #[test]
    fn test_empty_paths() {
        let paths: Vec<PathBuf> = Vec::new();
        let (labels, classes) = extract_labels(&paths).unwrap();
        assert!(labels.is_empty());
        assert!(classes.is_empty());
        assert!(convert_labels_to_int(&labels, &classes).unwrap().is_empty());
    }
}
