//! skinsage-vision — Skin-condition classification engine.
//!
//! Runs the pre-trained seven-class skin-condition CNN via ONNX Runtime
//! for CPU inference and maps its output to a [`skinsage_core::SkinProblem`].

pub mod classifier;

pub use classifier::{ClassifierError, Prediction, SkinClassifier};
