use crate::error::ValidationError;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Extensions accepted at the boundary, checked before anything touches disk.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Uploads above this size are rejected while streaming the multipart field.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Rejects empty filenames and extensions outside the allow-list.
pub fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }
    let allowed = filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if allowed {
        Ok(())
    } else {
        Err(ValidationError::InvalidFileType)
    }
}

/// Keeps only `[A-Za-z0-9._-]`; everything else becomes `_`. Strips any
/// path components a client may have smuggled into the filename.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The on-disk materialization of one upload, owned for exactly one request.
///
/// The persisted name is keyed by a fresh UUID so concurrent uploads sharing
/// a filename never collide. Dropping the guard removes the file; removal
/// failure is logged, never surfaced to the caller.
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub fn persist(upload_dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<Self> {
        fs::create_dir_all(upload_dir)?;
        let name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(filename));
        let path = upload_dir.join(name);
        fs::write(&path, bytes)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!(
                "Failed to remove temporary upload {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_need_an_allowed_extension() {
        assert!(validate_filename("pothole.jpg").is_ok());
        assert!(validate_filename("PHOTO.PNG").is_ok());
        assert!(validate_filename("a.b.gif").is_ok());
        assert_eq!(
            validate_filename("report.pdf"),
            Err(ValidationError::InvalidFileType)
        );
        assert_eq!(
            validate_filename("no_extension"),
            Err(ValidationError::InvalidFileType)
        );
        assert_eq!(validate_filename(""), Err(ValidationError::EmptyFilename));
    }

    #[test]
    fn sanitization_neutralizes_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename("ok-name_01.png"), "ok-name_01.png");
    }

    #[test]
    fn guard_removes_the_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let upload = TempUpload::persist(dir.path(), "scene.jpg", b"bytes").unwrap();
            assert!(upload.path().exists());
            upload.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn identical_filenames_get_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = TempUpload::persist(dir.path(), "same.png", b"a").unwrap();
        let b = TempUpload::persist(dir.path(), "same.png", b"b").unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().exists() && b.path().exists());
    }
}
