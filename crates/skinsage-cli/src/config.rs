use std::path::PathBuf;

/// CLI configuration, loaded from environment variables.
pub struct Config {
    /// Path to the product catalog CSV.
    pub catalog_path: PathBuf,
    /// Path to the seven-class skin-condition ONNX model.
    pub model_path: PathBuf,
    /// Optional JSON alias-table override for effect normalization.
    pub alias_path: Option<PathBuf>,
    /// Default number of recommendations per query.
    pub default_top_n: usize,
}

impl Config {
    /// Load configuration from `SKINSAGE_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            catalog_path: std::env::var("SKINSAGE_CATALOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/products.csv")),
            model_path: std::env::var("SKINSAGE_MODEL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models/skin_condition.onnx")),
            alias_path: std::env::var("SKINSAGE_ALIASES").map(PathBuf::from).ok(),
            default_top_n: env_usize("SKINSAGE_TOP_N", 10),
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
