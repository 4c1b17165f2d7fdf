//! Effect-label normalization.
//!
//! Product datasets carry free-text `notable_effects` strings with
//! inconsistent spelling ("soothing & calming", "deep moistur",
//! "oil-control (indirect)"). The normalizer cleans each comma-separated
//! token into a canonical, title-cased label via an exact-match alias
//! table, so the recommender can score products against a controlled
//! vocabulary.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Built-in alias table: lower-cased raw token → canonical replacement.
///
/// A replacement may contain an embedded comma when one dirty token
/// stands for two canonical effects; the normalizer never re-splits it.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("soothing & calming", "Soothing"),
    ("calming / soothing", "Soothing"),
    ("soothingglowing", "Soothing"),
    ("brighteningdark spot fading", "Brightening"),
    ("anti-aging ringan", "Anti-Aging"),
    ("mild oil-control", "Oil Control"),
    ("moisturizing.", "Moisturizing"),
    ("hydrating.", "Hydrating"),
    ("deep moistur", "Deep Moisture"),
    ("minimizing pore", "Minimizing Pores"),
    ("oil-control & sebum control", "Oil Control"),
    ("oil-control (indirect)", "Oil Control"),
    ("pore care", "Pore-Care"),
    ("dark spot fading", "Brightening"),
];

#[derive(Error, Debug)]
pub enum AliasTableError {
    #[error("alias file not found: {0}")]
    FileNotFound(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid alias JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maps raw effect tokens to canonical labels.
///
/// Pure and deterministic: the same input always yields the same output,
/// and the table is read-only after construction.
pub struct EffectNormalizer {
    aliases: HashMap<String, String>,
}

impl EffectNormalizer {
    /// Normalizer backed by the built-in alias table.
    pub fn builtin() -> Self {
        Self {
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    /// Load an alias table from a JSON object file
    /// (`{"raw token": "Canonical", ...}`). Keys are lower-cased on load
    /// so curators do not have to care about case in the file.
    pub fn from_json_path(path: &Path) -> Result<Self, AliasTableError> {
        if !path.exists() {
            return Err(AliasTableError::FileNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        let normalizer = Self::from_json_reader(file)?;
        tracing::info!(
            path = %path.display(),
            aliases = normalizer.aliases.len(),
            "loaded effect alias table"
        );
        Ok(normalizer)
    }

    /// Load an alias table from any JSON reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, AliasTableError> {
        #[derive(Deserialize)]
        struct AliasFile(HashMap<String, String>);

        let AliasFile(raw) = serde_json::from_reader(reader)?;
        let aliases = raw
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .collect();
        Ok(Self { aliases })
    }

    /// Number of aliases in the table.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Normalize a raw comma-separated effects string into canonical labels.
    ///
    /// Each comma-separated piece is trimmed (empty pieces dropped),
    /// lower-cased and looked up in the alias table with exact matching.
    /// On a hit the replacement is used verbatim — one input token yields
    /// one output string even when the replacement embeds a comma. On a
    /// miss the trimmed piece falls through unchanged. The chosen string
    /// is then title-cased as a whole. Input order is preserved and
    /// duplicates are kept.
    pub fn normalize(&self, raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                let key = piece.to_lowercase();
                let chosen = self.aliases.get(&key).map(String::as_str).unwrap_or(piece);
                title_case(chosen)
            })
            .collect()
    }
}

/// Title-case a string: every alphabetic character that follows a
/// non-alphabetic one (or starts the string) is upper-cased, the rest
/// lower-cased. Matches the casing the canonical vocabulary was built
/// with, including across hyphens: "anti-acne" → "Anti-Acne".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}
