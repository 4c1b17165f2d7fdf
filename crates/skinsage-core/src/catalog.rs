//! In-memory product catalog.
//!
//! Loaded once at startup from delimited text and treated as an
//! immutable snapshot afterward: every record's canonical effect labels
//! are derived exactly once at load time, and no query ever writes back
//! into the table.

use crate::effects::EffectNormalizer;
use crate::problem::SkinProblem;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    FileNotFound(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

/// One skincare product. Immutable after load; `effects` is derived from
/// `raw_effects` by the normalizer and cached for the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub name: String,
    pub brand: String,
    /// The original comma-separated effects string, kept for display.
    pub raw_effects: String,
    /// Canonical effect labels derived at load time.
    pub effects: Vec<String>,
    /// Locally formatted price string, e.g. "Rp150.000".
    pub price: String,
    pub description: String,
    pub product_url: String,
    pub image_url: String,
}

/// Raw CSV row; column names follow the source dataset's header.
#[derive(Debug, Deserialize)]
struct RawRecord {
    product_name: String,
    #[serde(default)]
    brand: String,
    /// Absent or empty means the product matches no problem.
    #[serde(default)]
    notable_effects: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    product_href: String,
    #[serde(default)]
    picture_src: String,
}

/// Immutable snapshot of the product table.
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog from a CSV file and annotate every product with
    /// its canonical effects.
    pub fn from_csv_path(path: &Path, normalizer: &EffectNormalizer) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_csv_reader(file, normalizer)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load the catalog from any CSV reader.
    ///
    /// Rows that fail to parse are skipped with a warning — dataset
    /// quality is an external concern and must not take the process down.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        normalizer: &EffectNormalizer,
    ) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut products = Vec::new();
        for (row, record) in csv_reader.deserialize::<RawRecord>().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(row, error = %e, "skipping malformed catalog row");
                    continue;
                }
            };
            let effects = normalizer.normalize(&record.notable_effects);
            products.push(Product {
                name: record.product_name,
                brand: record.brand,
                raw_effects: record.notable_effects,
                effects,
                price: record.price,
                description: record.description,
                product_url: record.product_href,
                image_url: record.picture_src,
            });
        }

        let catalog = Self { products };
        catalog.audit_target_coverage();
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Warn about target effects no product carries.
    ///
    /// The problem → effects mapping and the alias table are maintained
    /// by hand; nothing structural keeps them consistent with the
    /// catalog, so a target effect that matches zero products is the
    /// curation signal worth surfacing at load time.
    fn audit_target_coverage(&self) {
        for problem in SkinProblem::ALL {
            for target in problem.target_effects() {
                let target_lower = target.to_lowercase();
                let covered = self.products.iter().any(|p| {
                    p.effects.iter().any(|e| e.to_lowercase() == target_lower)
                });
                if !covered {
                    tracing::warn!(
                        problem = %problem,
                        effect = target,
                        "target effect not carried by any catalog product"
                    );
                }
            }
        }
    }
}
