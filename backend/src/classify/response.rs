use crate::classify::model::PredictionResult;
use crate::classify::triage::Triage;
use crate::error::PipelineError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbImage};
use shared::ClassificationResponse;
use std::io::Cursor;

/// Packages a prediction, its triage and the preview into the outbound
/// payload. Confidence is exposed both as the raw fraction and as a
/// percentage rounded to two decimals, derived from the same value.
pub fn assemble(
    prediction: &PredictionResult,
    triage: &Triage,
    preview: &RgbImage,
) -> Result<ClassificationResponse, PipelineError> {
    Ok(ClassificationResponse {
        success: true,
        prediction: prediction.label.to_string(),
        confidence: prediction.confidence,
        confidence_percent: round2(prediction.confidence * 100.0),
        severity: triage.severity,
        priority: triage.priority,
        image: encode_preview(preview)?,
    })
}

/// Lossless PNG re-encode of the preview, wrapped in a data URI so the
/// client can drop it straight into an image element.
fn encode_preview(preview: &RgbImage) -> Result<String, PipelineError> {
    let mut buffer = Vec::new();
    preview
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| PipelineError::Storage(e.to_string()))?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&buffer)))
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Priority, Severity};

    fn sample_prediction(confidence: f32) -> PredictionResult {
        PredictionResult {
            label: "Accident",
            confidence,
        }
    }

    fn sample_triage() -> Triage {
        Triage {
            severity: Severity::Critical,
            priority: Priority::High,
        }
    }

    #[test]
    fn confidence_percent_is_rounded_to_two_decimals() {
        let preview = RgbImage::new(224, 224);
        let payload = assemble(&sample_prediction(0.87654), &sample_triage(), &preview).unwrap();
        assert!(payload.success);
        assert_eq!(payload.confidence, 0.87654);
        assert_eq!(payload.confidence_percent, 87.65);
        assert_eq!(payload.prediction, "Accident");
    }

    #[test]
    fn rounding_snaps_to_two_decimals() {
        assert_eq!(round2(87.656), 87.66);
        assert_eq!(round2(12.0), 12.0);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn preview_round_trips_through_the_data_uri() {
        let preview = RgbImage::from_fn(224, 224, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 7])
        });
        let payload = assemble(&sample_prediction(0.5), &sample_triage(), &preview).unwrap();

        let prefix = "data:image/png;base64,";
        assert!(payload.image.starts_with(prefix));

        let bytes = STANDARD.decode(&payload.image[prefix.len()..]).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (224, 224));
        assert_eq!(decoded.get_pixel(10, 3), preview.get_pixel(10, 3));
    }
}
