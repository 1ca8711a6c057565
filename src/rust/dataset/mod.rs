pub mod builder;
mod error;
mod labels;
mod sets;
pub mod splitter;
mod stats;
mod stratified;
mod utils;

pub use builder::SplitterBuilder;
pub use error::DatasetError;
pub use labels::{
    convert_labels_to_int, decode_labels, extract_labels, list_data_and_prepare_labels,
    PreparedData,
};
pub use sets::{SplitArrays, SplitDicts, SplitSet, Subset};
pub use splitter::{split_data, split_data_to_dicts, SplitIndices, SplitPlan, Splitter};
pub use stats::DatasetStatistics;
pub use stratified::{stratified_split, stratified_split_indices, HoldOut, IndexSplit};
