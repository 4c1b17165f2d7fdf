//! Skin-condition classifier via ONNX Runtime.
//!
//! Wraps a pre-trained seven-class CNN exported to ONNX. The model takes
//! a single 224×224 RGB image with pixel values scaled to [0, 1] in
//! channel-last (NHWC) layout and returns a probability distribution
//! over the classes in [`SkinProblem::ALL`] order. Consumers only use
//! the argmax; probabilities are surfaced for display.

use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use skinsage_core::SkinProblem;
use std::path::Path;
use thiserror::Error;

// --- Model input contract ---
const INPUT_SIZE: u32 = 224;
const PIXEL_MAX: f32 = 255.0;
pub const NUM_CLASSES: usize = 7;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    #[error("empty image input")]
    EmptyImage,
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("ort: {0}")]
    Ort(#[from] ort::Error),
}

/// Classification result: the winning class plus the full distribution.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub problem: SkinProblem,
    /// Probability of the winning class.
    pub confidence: f32,
    /// Distribution over all classes, in [`SkinProblem::ALL`] order.
    pub probabilities: [f32; NUM_CLASSES],
}

/// Seven-class skin-condition classifier.
pub struct SkinClassifier {
    session: Session,
}

impl SkinClassifier {
    /// Load the classifier ONNX model from the given path.
    pub fn load(model_path: &str) -> Result<Self, ClassifierError> {
        if !Path::new(model_path).exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()?
            .with_intra_threads(2)?
            .commit_from_file(model_path)?;

        tracing::info!(
            path = model_path,
            inputs = ?session.inputs().iter().map(|i| (i.name(), i.dtype())).collect::<Vec<_>>(),
            outputs = ?session.outputs().iter().map(|o| o.name()).collect::<Vec<_>>(),
            "loaded skin-condition model"
        );

        Ok(Self { session })
    }

    /// Decode raw image bytes and classify. Rejects empty input before
    /// touching the decoder or the model.
    pub fn classify_bytes(&mut self, bytes: &[u8]) -> Result<Prediction, ClassifierError> {
        if bytes.is_empty() {
            return Err(ClassifierError::EmptyImage);
        }
        let img = image::load_from_memory(bytes)?;
        self.classify(&img)
    }

    /// Classify a decoded image.
    pub fn classify(&mut self, img: &DynamicImage) -> Result<Prediction, ClassifierError> {
        let input = preprocess(img);

        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(input.view())?])?;

        let (_, raw) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::InferenceFailed(format!("output tensor: {e}")))?;

        if raw.len() < NUM_CLASSES {
            return Err(ClassifierError::InferenceFailed(format!(
                "expected {NUM_CLASSES} class probabilities, got {}",
                raw.len()
            )));
        }

        let mut probabilities = [0.0f32; NUM_CLASSES];
        probabilities.copy_from_slice(&raw[..NUM_CLASSES]);

        let best = argmax(&probabilities);
        let prediction = Prediction {
            problem: SkinProblem::ALL[best],
            confidence: probabilities[best],
            probabilities,
        };

        tracing::debug!(
            problem = %prediction.problem,
            confidence = prediction.confidence,
            "skin condition classified"
        );
        Ok(prediction)
    }
}

/// Preprocess an image into the model's input tensor: RGB, resized to
/// 224×224 (bilinear), pixels scaled to [0, 1], NHWC single-item batch.
pub fn preprocess(img: &DynamicImage) -> Array4<f32> {
    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

    let size = INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, size, size, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[0, y as usize, x as usize, channel]] = pixel[channel] as f32 / PIXEL_MAX;
        }
    }
    tensor
}

/// Index of the largest probability. Ties resolve to the first maximum,
/// matching the fixed class order.
fn argmax(probabilities: &[f32]) -> usize {
    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate() {
        if p > probabilities[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_load_missing_model() {
        let err = SkinClassifier::load("/nonexistent/model.onnx");
        assert!(matches!(err, Err(ClassifierError::ModelNotFound(_))));
    }

    #[test]
    fn test_preprocess_shape_and_range() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, image::Rgb([200, 100, 0])));
        let tensor = preprocess(&img);
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_preprocess_uniform_image_stays_uniform() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(320, 240, image::Rgb([51, 102, 153])));
        let tensor = preprocess(&img);
        let expected = [51.0 / 255.0, 102.0 / 255.0, 153.0 / 255.0];
        for channel in 0..3 {
            assert!(
                tensor
                    .slice(ndarray::s![0, .., .., channel])
                    .iter()
                    .all(|&v| (v - expected[channel]).abs() < 1e-3),
                "channel {channel} not uniform"
            );
        }
    }

    #[test]
    fn test_preprocess_already_sized_input() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(224, 224, image::Rgb([255, 255, 255])));
        let tensor = preprocess(&img);
        assert!(tensor.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_argmax_picks_largest() {
        assert_eq!(argmax(&[0.1, 0.05, 0.6, 0.1, 0.05, 0.05, 0.05]), 2);
        assert_eq!(argmax(&[0.9, 0.02, 0.02, 0.02, 0.02, 0.01, 0.01]), 0);
    }

    #[test]
    fn test_argmax_tie_resolves_to_first() {
        assert_eq!(argmax(&[0.3, 0.3, 0.1, 0.1, 0.1, 0.05, 0.05]), 0);
    }

    #[test]
    fn test_class_index_maps_to_problem_order() {
        assert_eq!(SkinProblem::ALL[0], SkinProblem::Jerawat);
        assert_eq!(SkinProblem::ALL[NUM_CLASSES - 1], SkinProblem::TandaTandaPenuaan);
    }
}
