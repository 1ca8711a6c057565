use std::fmt;

use crate::listing::ListingError;

/// Represents the different types of errors that can occur while preparing or splitting a dataset.
#[derive(Debug)]
pub enum DatasetError {
    /// A path has no parent directory segment to take a label from
    MalformedPath(String),
    /// A label was not found in the class set used for encoding
    UnknownLabel(String),
    /// An integer label is past the end of the class set
    LabelOutOfRange { label: usize, num_classes: usize },
    /// The split stage received zero samples
    EmptyDataset,
    /// Samples and labels are not parallel collections
    LengthMismatch { samples: usize, labels: usize },
    /// A class has too few members for a stratified split
    InsufficientClassPopulation { label: usize, count: usize },
    /// The requested group sizes cannot hold one sample per class
    InvalidSplitSize(String),
    /// Split fractions or seed are invalid
    ConfigError(String),
    /// Error occurred while enumerating image paths
    ListingError(ListingError),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPath(path) => {
                write!(f, "Malformed path (no parent directory): {}", path)
            }
            Self::UnknownLabel(label) => write!(f, "Unknown label: {}", label),
            Self::LabelOutOfRange { label, num_classes } => write!(
                f,
                "Label {} out of range for {} classes",
                label, num_classes
            ),
            Self::EmptyDataset => write!(f, "Cannot split an empty dataset"),
            Self::LengthMismatch { samples, labels } => write!(
                f,
                "Length mismatch: {} samples but {} labels",
                samples, labels
            ),
            Self::InsufficientClassPopulation { label, count } => write!(
                f,
                "The least populated class (label {}) has only {} member(s), which is too few; \
                 every class needs at least 2",
                label, count
            ),
            Self::InvalidSplitSize(msg) => write!(f, "Invalid split size: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::ListingError(err) => write!(f, "Listing error: {}", err),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ListingError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ListingError> for DatasetError {
    fn from(err: ListingError) -> Self {
        DatasetError::ListingError(err)
    }
}
