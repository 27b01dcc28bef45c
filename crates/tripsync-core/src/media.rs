//! Image input: local files become inline base64 data URLs.
//!
//! There is no separate object-storage upload path; images are embedded
//! directly in the document, with no size cap or compression step.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::Result;

/// Read a local image and embed it as a `data:<mime>;base64,` URL.
pub fn encode_image_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let mime = mime_for_extension(path);
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// True when the value is already a URL (remote or data) rather than a
/// local file path.
#[must_use]
pub fn is_image_url(value: &str) -> bool {
    crate::util::is_http_url(value) || value.starts_with("data:")
}

fn mime_for_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_file_as_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let url = encode_image_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn unknown_extension_defaults_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover");
        std::fs::write(&path, [1, 2, 3]).unwrap();

        let url = encode_image_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn is_image_url_accepts_http_and_data() {
        assert!(is_image_url("https://images.unsplash.com/photo.jpg"));
        assert!(is_image_url("data:image/png;base64,AAAA"));
        assert!(!is_image_url("./photos/cover.png"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = encode_image_data_url(Path::new("/nonexistent/cover.png"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
