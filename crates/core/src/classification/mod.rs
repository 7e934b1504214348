//! Classification module - maps a token to the category that drives routing.

mod classifier;

pub use classifier::{AssetCategory, AssetClassifier};
