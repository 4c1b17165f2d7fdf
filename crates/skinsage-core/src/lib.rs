//! skinsage-core — Content-based skincare product recommendation.
//!
//! Cleans free-text effect labels into a canonical vocabulary, annotates
//! an immutable product catalog with them, and ranks products for a skin
//! problem by bag-of-effects overlap.

pub mod catalog;
pub mod effects;
pub mod problem;
pub mod recommender;

pub use catalog::{Catalog, CatalogError, Product};
pub use effects::EffectNormalizer;
pub use problem::{ProblemInfo, SkinProblem};
pub use recommender::{recommend, Recommendation, RecommendQuery, SortOrder};
