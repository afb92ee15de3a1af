use crate::error::PreprocessingError;
use image::RgbImage;
use image::imageops::FilterType;
use ndarray::Array3;
use std::path::Path;

/// Side length of the square model input.
pub const MODEL_INPUT_SIZE: u32 = 224;

/// Model-ready HWC tensor: 224x224x3, RGB, values in [0, 1].
///
/// Shape is checked on construction; handing the adapter a differently
/// shaped array is a bug in the preprocessor, not a user error.
pub struct NormalizedTensor(Array3<f32>);

impl NormalizedTensor {
    pub fn new(data: Array3<f32>) -> Self {
        let side = MODEL_INPUT_SIZE as usize;
        assert_eq!(data.dim(), (side, side, 3), "tensor shape mismatch");
        Self(data)
    }

    /// Contiguous HWC view of the tensor data.
    pub fn as_slice(&self) -> &[f32] {
        self.0
            .as_slice()
            .expect("Array3 built by the preprocessor is standard layout")
    }

    pub fn view(&self) -> &Array3<f32> {
        &self.0
    }
}

/// Decodes the persisted upload and produces the normalized tensor for the
/// classifier plus the resized, unnormalized preview kept for display.
pub fn preprocess_image(path: &Path) -> Result<(NormalizedTensor, RgbImage), PreprocessingError> {
    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)?;
    let rgb = decoded.to_rgb8();

    // Triangle filtering keeps the resize deterministic across runs.
    let preview = image::imageops::resize(
        &rgb,
        MODEL_INPUT_SIZE,
        MODEL_INPUT_SIZE,
        FilterType::Triangle,
    );

    let side = MODEL_INPUT_SIZE as usize;
    let mut tensor = Array3::<f32>::zeros((side, side, 3));
    for (x, y, pixel) in preview.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[y as usize, x as usize, channel]] = pixel.0[channel] as f32 / 255.0;
        }
    }

    Ok((NormalizedTensor::new(tensor), preview))
}
