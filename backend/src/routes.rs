use crate::AppConfig;
use crate::classify::model::Classifier;
use crate::classify::preprocess::preprocess_image;
use crate::classify::response::assemble;
use crate::classify::triage::resolve;
use crate::error::{PipelineError, ValidationError};
use crate::uploads::{MAX_UPLOAD_BYTES, TempUpload, validate_filename};
use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use shared::TrainAck;
use std::path::Path;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: String) {
    cfg.service(web::resource("/upload").route(web::post().to(handle_upload)))
        .service(web::resource("/api/train").route(web::post().to(train_placeholder)))
        .service(Files::new("/", static_dir).index_file("index.html"));
}

/// The upload as it arrives off the wire: declared filename plus raw bytes.
struct RawUpload {
    filename: String,
    bytes: Vec<u8>,
}

/// Handles one upload-to-response cycle: validate, persist, preprocess,
/// infer, triage, assemble. The temporary artifact is removed on every
/// exit path before the response is surfaced.
pub async fn handle_upload(
    classifier: web::Data<Classifier>,
    config: web::Data<AppConfig>,
    mut payload: Multipart,
) -> HttpResponse {
    let raw = match read_file_field(&mut payload).await {
        Ok(raw) => raw,
        Err(e) => return error_response(&e),
    };

    match run_pipeline(&classifier, &config.upload_dir, &raw) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            log::error!("Upload pipeline failed for {}: {:?}", raw.filename, e);
            error_response(&e)
        }
    }
}

/// Pulls the `file` field out of the multipart stream. Filename validation
/// happens here, before anything is written to disk; the body is capped at
/// 16 MiB while streaming.
async fn read_file_field(payload: &mut Multipart) -> Result<RawUpload, PipelineError> {
    while let Ok(Some(mut field)) = payload.try_next().await {
        let (is_file_field, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name() == Some("file"),
                cd.get_filename().unwrap_or("").to_string(),
            ),
            None => (false, String::new()),
        };
        if !is_file_field {
            continue;
        }

        validate_filename(&filename)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| PipelineError::Storage(e.to_string()))?;
            if bytes.len() + data.len() > MAX_UPLOAD_BYTES {
                return Err(ValidationError::FileTooLarge.into());
            }
            bytes.extend_from_slice(&data);
        }
        return Ok(RawUpload { filename, bytes });
    }
    Err(ValidationError::MissingFile.into())
}

fn run_pipeline(
    classifier: &Classifier,
    upload_dir: &Path,
    raw: &RawUpload,
) -> Result<shared::ClassificationResponse, PipelineError> {
    // The guard owns the persisted artifact; dropping it at the end of this
    // scope removes the file no matter which stage failed.
    let temp = TempUpload::persist(upload_dir, &raw.filename, &raw.bytes)?;
    let (tensor, preview) = preprocess_image(temp.path())?;
    let prediction = classifier.infer(&tensor)?;
    let triage = resolve(prediction.label);
    assemble(&prediction, &triage, &preview)
}

async fn train_placeholder() -> HttpResponse {
    HttpResponse::Ok().json(TrainAck {
        success: true,
        message: "Training functionality can be implemented here".to_string(),
        note: "This requires the dataset to be available".to_string(),
    })
}

fn error_response(err: &PipelineError) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(ErrorResponse {
        error: err.public_message(),
    })
}
