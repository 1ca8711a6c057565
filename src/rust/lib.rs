//! Stratified train/validation/test splitting for image datasets labelled by folder.
//!
//! Images are expected under one directory per class (`root/<class>/<image>`).
//! The pipeline lists them with a glob pattern, labels each image by its parent
//! directory, encodes the labels as integers in alphabetical class order, and
//! splits the result so that every subset keeps the class proportions of the
//! whole dataset.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use imgsplit::{list_data_and_prepare_labels, split_data_to_dicts, DatasetStatistics};
//!
//! let (paths, labels, classes) = list_data_and_prepare_labels("data/**/*.jpg")?;
//! let split = split_data_to_dicts(&paths, &labels, 0.2, 0.1, 10)?;
//!
//! println!("{}", DatasetStatistics::from_split(&split, &classes)?);
//! println!("fingerprint: {}", split.fingerprint());
//! # Ok(())
//! # }
//! ```
//!
//! # Reproducibility
//!
//! Splits are a pure function of the input order, the fractions and the seed.
//! Sampling uses ChaCha8, whose output does not depend on platform, so the same
//! inputs give the same partition everywhere:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use imgsplit::Splitter;
//!
//! let paths: Vec<String> = (0..20).map(|i| format!("data/{}/{}.jpg", i % 2, i)).collect();
//! let labels: Vec<usize> = (0..20).map(|i| i % 2).collect();
//!
//! let splitter = Splitter::builder().with_seed(7).build()?;
//! assert_eq!(splitter.split(&paths, &labels)?, splitter.split(&paths, &labels)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod listing;

pub use config::{SplitConfig, DEFAULT_SEED};
pub use dataset::{
    convert_labels_to_int, decode_labels, extract_labels, list_data_and_prepare_labels, split_data,
    split_data_to_dicts, stratified_split, stratified_split_indices, DatasetError,
    DatasetStatistics, HoldOut, IndexSplit, PreparedData, SplitArrays, SplitDicts, SplitIndices,
    SplitPlan, SplitSet, Splitter, SplitterBuilder, Subset,
};
pub use listing::{list_images, ListingError};

pub fn init_logger() {
    env_logger::init();
}
