use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose};
use regex::Regex;
use thiserror::Error;

use crate::upload::SourceFile;

static IMAGE_MIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^image/(jpe?g|gif|png|svg(\+xml)?|webp)$").expect("mime pattern is valid")
});

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("file has no content to preview")]
    EmptyFile,
    #[error("mime type {0:?} is not a previewable image")]
    UnsupportedMime(String),
}

/// Encode the file into a `data:` URL for immediate local display.
///
/// This is what the placeholder shows while the real upload is still in
/// flight. Only image mime types are previewable; anything else fails here,
/// which skips the placeholder but leaves the upload itself untouched.
pub fn data_url(file: &SourceFile) -> Result<String, PreviewError> {
    if file.data.is_empty() {
        return Err(PreviewError::EmptyFile);
    }
    if !IMAGE_MIME.is_match(&file.mime) {
        return Err(PreviewError::UnsupportedMime(file.mime.clone()));
    }

    let b64 = general_purpose::STANDARD.encode(&file.data[..]);
    Ok(format!("data:{};base64,{b64}", file.mime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_bytes() {
        let file = SourceFile::new("image/png", vec![0x89u8, b'P', b'N', b'G']);
        let url = data_url(&file).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn accepts_common_image_mimes() {
        for mime in ["image/jpeg", "image/jpg", "image/gif", "image/webp", "image/svg+xml", "IMAGE/PNG"] {
            let file = SourceFile::new(mime, vec![1u8]);
            assert!(data_url(&file).is_ok(), "{mime} should be previewable");
        }
    }

    #[test]
    fn rejects_empty_file() {
        let file = SourceFile::new("image/png", Vec::<u8>::new());
        assert!(matches!(data_url(&file), Err(PreviewError::EmptyFile)));
    }

    #[test]
    fn rejects_non_image_mime() {
        let file = SourceFile::new("application/pdf", vec![1u8]);
        assert!(matches!(
            data_url(&file),
            Err(PreviewError::UnsupportedMime(_))
        ));
    }
}
