use crate::classify::labels::CLASS_LABELS;
use crate::classify::preprocess::{MODEL_INPUT_SIZE, NormalizedTensor};
use crate::error::InferenceError;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tch::{CModule, Device, Kind, Tensor};

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Always a member of [`CLASS_LABELS`].
    pub label: &'static str,
    /// Maximum of the probability vector, not re-normalized.
    pub confidence: f32,
}

/// Owns the TorchScript module for the process lifetime.
///
/// Loading happens exactly once at startup. If the artifact is missing or
/// libtorch fails to load it, the classifier stays permanently unloaded and
/// every inference call short-circuits to `ModelUnavailable` without
/// touching the runtime. The loaded module is never mutated after startup.
#[derive(Clone)]
pub struct Classifier {
    module: Option<Arc<Mutex<CModule>>>,
    device: Device,
}

impl Classifier {
    /// Attempts the one-time model load. Failure is logged, not fatal: the
    /// server still serves uploads, predictions are just disabled.
    pub fn load(model_path: &str) -> Self {
        let device = Device::cuda_if_available();
        if !Path::new(model_path).exists() {
            log::error!(
                "Model file not found at {}. Predictions will be disabled.",
                model_path
            );
            return Self::unloaded();
        }
        match CModule::load_on_device(model_path, device) {
            Ok(module) => {
                log::info!("Model loaded from {} on {:?}", model_path, device);
                Self {
                    module: Some(Arc::new(Mutex::new(module))),
                    device,
                }
            }
            Err(e) => {
                log::error!("Error loading model from {}: {:?}", model_path, e);
                Self::unloaded()
            }
        }
    }

    pub fn unloaded() -> Self {
        Self {
            module: None,
            device: Device::Cpu,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.module.is_some()
    }

    /// Runs one forward pass over a single normalized image and returns the
    /// argmax label with its probability.
    pub fn infer(&self, tensor: &NormalizedTensor) -> Result<PredictionResult, InferenceError> {
        let module = self
            .module
            .as_ref()
            .ok_or(InferenceError::ModelUnavailable)?;

        let side = i64::from(MODEL_INPUT_SIZE);
        let input = Tensor::from_slice(tensor.as_slice())
            .view([1, side, side, 3])
            .to_device(self.device);

        let output = module
            .lock()
            .unwrap()
            .forward_ts(&[input])?
            .softmax(-1, Kind::Float)
            .view([-1]);

        let count = output.size()[0] as usize;
        let mut probs = vec![0.0f32; count];
        output.to_device(Device::Cpu).copy_data(&mut probs, count);

        let (index, confidence) = argmax(&probs).ok_or(InferenceError::EmptyOutput)?;
        let label = CLASS_LABELS
            .get(index)
            .copied()
            .ok_or(InferenceError::UnknownClassIndex(index))?;

        Ok(PredictionResult { label, confidence })
    }
}

/// First-occurrence argmax: ties resolve to the lowest index.
fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, max)) if v <= max => {}
            _ => best = Some((i, v)),
        }
    }
    best
}
