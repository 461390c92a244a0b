//! `data:` URIs carrying inline images.

use std::{fmt, path::Path};

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose};

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type, e.g. `image/png`.
    pub mime: String,
    /// Raw payload bytes.
    pub data: Vec<u8>,
}

impl DataUri {
    /// Wraps raw bytes.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Parses a base64 `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns an error for plain URLs, non-base64 data URIs, or a broken payload.
    pub fn parse(uri: &str) -> anyhow::Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| anyhow!("not a data URI"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| anyhow!("data URI has no payload"))?;
        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| anyhow!("only base64 data URIs are supported"))?;

        let data = general_purpose::STANDARD
            .decode(payload.trim())
            .context("invalid base64 payload in data URI")?;

        Ok(Self::new(mime, data))
    }

    /// Reads an image file, guessing the media type from its extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::new(mime_for_path(path), data))
    }

    /// Payload as standard base64, without the `data:` prefix.
    pub fn base64_payload(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.base64_payload())
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let uri = DataUri::new("image/png", vec![0x89, b'P', b'N', b'G']);
        let text = uri.to_string();
        assert_eq!(text, "data:image/png;base64,iVBORw==");
        assert_eq!(DataUri::parse(&text).unwrap(), uri);
    }

    #[test]
    fn test_parse_rejects_urls() {
        assert!(DataUri::parse("https://example.com/a.png").is_err());
        assert!(DataUri::parse("data:image/png,raw").is_err());
        assert!(DataUri::parse("data:image/png;base64").is_err());
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(mime_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("menu.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("noext")), "image/jpeg");
    }
}
