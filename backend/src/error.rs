use actix_web::http::StatusCode;

/// Fixed message returned while the classifier is unloaded. Deliberately
/// distinct from the other 500s so a deployment problem is diagnosable
/// from the response alone.
pub const MODEL_UNAVAILABLE_MSG: &str =
    "Classifier model not available. Install libtorch and provide the model artifact to enable predictions.";

/// User-caused rejections, checked before any file-system write.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("No file selected")]
    EmptyFilename,
    #[error("Invalid file type")]
    InvalidFileType,
    #[error("File too large")]
    FileTooLarge,
}

/// Anything that keeps a persisted upload from becoming a tensor.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessingError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("classifier model is not loaded")]
    ModelUnavailable,
    #[error("forward pass failed: {0}")]
    Forward(#[from] tch::TchError),
    #[error("model produced an empty probability vector")]
    EmptyOutput,
    #[error("predicted class index {0} is outside the label registry")]
    UnknownClassIndex(usize),
}

/// One outcome type threaded through the whole upload pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("Error processing file: {0}")]
    Storage(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Storage(err.to_string())
    }
}

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The exact string placed in the `error` field of the JSON response.
    /// Internal causes stay in the logs, not in the payload.
    pub fn public_message(&self) -> String {
        match self {
            PipelineError::Validation(e) => e.to_string(),
            PipelineError::Preprocessing(_) => "Error processing image".to_string(),
            PipelineError::Inference(InferenceError::ModelUnavailable) => {
                MODEL_UNAVAILABLE_MSG.to_string()
            }
            PipelineError::Inference(_) => "Error making prediction".to_string(),
            PipelineError::Storage(_) => self.to_string(),
        }
    }
}
