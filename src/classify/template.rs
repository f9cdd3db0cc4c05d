// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Template-matching classifier backends.
//!
//! A model is a JSON document of per-class mean-intensity templates at the
//! classifier's input resolution. Prediction scores the input against every
//! template and returns the nearest class. Models load lazily on first
//! prediction so a missing file degrades to per-submission feedback instead
//! of blocking startup.

use crate::classify::{Classifier, ClassifyError, Prediction};
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One class: its label and mean-intensity template, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTemplate {
    pub label: String,
    pub pixels: Vec<u8>,
}

/// A complete template model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateModel {
    /// Side length of the square input the templates were built at.
    pub input_size: u32,
    pub classes: Vec<ClassTemplate>,
}

impl TemplateModel {
    /// Load and structurally validate a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ClassifyError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClassifyError::ModelUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let model: TemplateModel = serde_json::from_str(&json).map_err(|e| {
            ClassifyError::ModelUnavailable(format!("{}: {}", path.display(), e))
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Check the structural invariants: at least one class, square templates
    /// of the declared size.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if self.input_size == 0 {
            return Err(ClassifyError::ModelUnavailable(
                "model declares zero input size".to_string(),
            ));
        }
        if self.classes.is_empty() {
            return Err(ClassifyError::ModelUnavailable(
                "model has no classes".to_string(),
            ));
        }
        let expected = (self.input_size * self.input_size) as usize;
        for class in &self.classes {
            if class.pixels.len() != expected {
                return Err(ClassifyError::ModelUnavailable(format!(
                    "class '{}' has {} pixels, expected {}",
                    class.label,
                    class.pixels.len(),
                    expected
                )));
            }
        }
        Ok(())
    }

    /// Score `image` against every template and return the best label with
    /// its similarity in [0, 1].
    pub fn best_match(&self, image: &GrayImage) -> Result<(String, f32), ClassifyError> {
        if image.width() != self.input_size || image.height() != self.input_size {
            return Err(ClassifyError::Inference(format!(
                "input is {}x{}, model expects {}x{}",
                image.width(),
                image.height(),
                self.input_size,
                self.input_size
            )));
        }

        let samples = image.as_raw();
        let mut best: Option<(&str, f32)> = None;
        for class in &self.classes {
            let score = similarity(samples, &class.pixels);
            match best {
                Some((_, s)) if s >= score => {}
                _ => best = Some((&class.label, score)),
            }
        }

        best.map(|(label, score)| (label.to_string(), score))
            .ok_or_else(|| ClassifyError::Inference("model has no classes".to_string()))
    }
}

/// Similarity as 1 minus the mean absolute intensity difference.
fn similarity(a: &[u8], b: &[u8]) -> f32 {
    let total: u64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum();
    1.0 - (total as f32 / a.len() as f32) / 255.0
}

/// Lazily loaded, validated model shared by the classifier variants.
#[derive(Debug)]
struct LazyModel {
    path: PathBuf,
    model: OnceLock<Result<TemplateModel, ClassifyError>>,
}

impl LazyModel {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            model: OnceLock::new(),
        }
    }

    fn preloaded(model: TemplateModel) -> Self {
        let lock = OnceLock::new();
        let _ = lock.set(Ok(model));
        Self {
            path: PathBuf::new(),
            model: lock,
        }
    }

    fn get(
        &self,
        validate: impl FnOnce(&TemplateModel) -> Result<(), ClassifyError>,
    ) -> Result<&TemplateModel, ClassifyError> {
        self.model
            .get_or_init(|| {
                let model = TemplateModel::load(&self.path)?;
                validate(&model)?;
                log::info!(
                    "Loaded template model ({} classes) from {}",
                    model.classes.len(),
                    self.path.display()
                );
                Ok(model)
            })
            .as_ref()
            .map_err(|e| e.clone())
    }
}

/// Classifier for hand-drawn digits. Every model label must be an integer
/// in 0-9.
#[derive(Debug)]
pub struct DigitClassifier {
    model: LazyModel,
}

impl DigitClassifier {
    pub fn new(path: PathBuf) -> Self {
        Self {
            model: LazyModel::new(path),
        }
    }

    /// Build from an in-memory model, validating the digit label contract.
    pub fn from_model(model: TemplateModel) -> Result<Self, ClassifyError> {
        model.validate()?;
        validate_digit_labels(&model)?;
        Ok(Self {
            model: LazyModel::preloaded(model),
        })
    }
}

fn validate_digit_labels(model: &TemplateModel) -> Result<(), ClassifyError> {
    for class in &model.classes {
        let ok = matches!(class.label.parse::<u8>(), Ok(d) if d <= 9);
        if !ok {
            return Err(ClassifyError::ModelUnavailable(format!(
                "digit model label '{}' is not a digit 0-9",
                class.label
            )));
        }
    }
    Ok(())
}

impl Classifier for DigitClassifier {
    fn predict(&self, image: &GrayImage) -> Result<Prediction, ClassifyError> {
        let model = self.model.get(validate_digit_labels)?;
        let (label, score) = model.best_match(image)?;
        Ok(Prediction {
            label,
            confidence: Some(score),
        })
    }
}

/// Classifier for hand-drawn shapes from the prompt vocabulary.
#[derive(Debug)]
pub struct ShapeClassifier {
    model: LazyModel,
}

impl ShapeClassifier {
    pub fn new(path: PathBuf) -> Self {
        Self {
            model: LazyModel::new(path),
        }
    }

    /// Build from an in-memory model.
    pub fn from_model(model: TemplateModel) -> Result<Self, ClassifyError> {
        model.validate()?;
        Ok(Self {
            model: LazyModel::preloaded(model),
        })
    }
}

impl Classifier for ShapeClassifier {
    fn predict(&self, image: &GrayImage) -> Result<Prediction, ClassifyError> {
        let model = self.model.get(|_| Ok(()))?;
        let (label, score) = model.best_match(image)?;
        Ok(Prediction {
            label,
            confidence: Some(score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn two_class_model() -> TemplateModel {
        TemplateModel {
            input_size: 4,
            classes: vec![
                ClassTemplate {
                    label: "0".to_string(),
                    pixels: vec![0; 16],
                },
                ClassTemplate {
                    label: "1".to_string(),
                    pixels: vec![255; 16],
                },
            ],
        }
    }

    #[test]
    fn test_best_match_picks_nearest_template() {
        let model = two_class_model();
        let dark = GrayImage::from_pixel(4, 4, image::Luma([10]));
        let light = GrayImage::from_pixel(4, 4, image::Luma([250]));

        let (label, score) = model.best_match(&dark).unwrap();
        assert_eq!(label, "0");
        assert!(score > 0.9);

        let (label, _) = model.best_match(&light).unwrap();
        assert_eq!(label, "1");
    }

    #[test]
    fn test_input_size_mismatch_is_inference_error() {
        let model = two_class_model();
        let wrong = GrayImage::new(8, 8);
        assert!(matches!(
            model.best_match(&wrong),
            Err(ClassifyError::Inference(_))
        ));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&two_class_model()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let model = TemplateModel::load(file.path()).unwrap();
        assert_eq!(model.classes.len(), 2);
        assert_eq!(model.input_size, 4);
    }

    #[test]
    fn test_missing_file_is_model_unavailable() {
        let classifier = DigitClassifier::new(PathBuf::from("no/such/model.json"));
        let image = GrayImage::new(4, 4);
        assert!(matches!(
            classifier.predict(&image),
            Err(ClassifyError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_model_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(matches!(
            TemplateModel::load(file.path()),
            Err(ClassifyError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_template_length_validated() {
        let model = TemplateModel {
            input_size: 4,
            classes: vec![ClassTemplate {
                label: "0".to_string(),
                pixels: vec![0; 3],
            }],
        };
        assert!(matches!(
            model.validate(),
            Err(ClassifyError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_digit_model_rejects_non_digit_labels() {
        let model = TemplateModel {
            input_size: 4,
            classes: vec![ClassTemplate {
                label: "circle".to_string(),
                pixels: vec![0; 16],
            }],
        };
        assert!(matches!(
            DigitClassifier::from_model(model),
            Err(ClassifyError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_shape_classifier_predicts_label_verbatim() {
        let model = TemplateModel {
            input_size: 4,
            classes: vec![
                ClassTemplate {
                    label: "circle".to_string(),
                    pixels: vec![0; 16],
                },
                ClassTemplate {
                    label: "star".to_string(),
                    pixels: vec![255; 16],
                },
            ],
        };
        let classifier = ShapeClassifier::from_model(model).unwrap();
        let dark = GrayImage::from_pixel(4, 4, image::Luma([0]));

        let prediction = classifier.predict(&dark).unwrap();
        assert_eq!(prediction.label, "circle");
        assert!(prediction.confidence.unwrap() > 0.9);
    }
}
