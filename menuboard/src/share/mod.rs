//! Share links and the location port.
//!
//! A share action encodes the board, writes the token into the location
//! fragment and hands back a [`ShareLink`]. Downstream artifacts such as the
//! QR code on the board use [`ShareLink::scan_target`], which falls back to
//! the bare page URL once the full link is too long to scan reliably.

use reqwest::Url;

/// The location port and its in-memory implementation.
pub mod location;

pub use location::{Location, StatePort};

/// Practical ceiling on URL length for scanners and chat clients.
pub const DEFAULT_MAX_URL_LEN: usize = 2500;

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Result of a successful share action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Page URL without fragment.
    pub base: String,
    /// The encoded board.
    pub token: String,
}

impl ShareLink {
    /// Full URL carrying the board.
    pub fn url(&self) -> String {
        format!("{}#{}", self.base, self.token)
    }

    /// Whether the full URL is longer than `max_len` characters.
    pub fn exceeds(&self, max_len: usize) -> bool {
        self.url().len() > max_len
    }

    /// URL to embed in scannable artifacts.
    ///
    /// Returns the full URL when it fits in `max_len`, otherwise the bare page.
    pub fn scan_target(&self, max_len: usize) -> String {
        if self.exceeds(max_len) {
            self.base.clone()
        } else {
            self.url()
        }
    }

    /// Image URL of a QR code for [`scan_target`](Self::scan_target).
    pub fn qr_code_url(&self, max_len: usize) -> anyhow::Result<Url> {
        let target = self.scan_target(max_len);
        let url = Url::parse_with_params(
            QR_ENDPOINT,
            &[
                ("size", "250x250"),
                ("data", target.as_str()),
                ("bgcolor", "ffffff"),
                ("color", "000000"),
                ("margin", "5"),
            ],
        )?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(token_len: usize) -> ShareLink {
        ShareLink {
            base: "https://menu.example.com/board".into(),
            token: "A".repeat(token_len),
        }
    }

    #[test]
    fn test_scan_target_within_limit() {
        let short = link(100);
        assert!(!short.exceeds(DEFAULT_MAX_URL_LEN));
        assert_eq!(short.scan_target(DEFAULT_MAX_URL_LEN), short.url());
    }

    #[test]
    fn test_scan_target_falls_back_to_base() {
        let long = link(DEFAULT_MAX_URL_LEN);
        assert!(long.exceeds(DEFAULT_MAX_URL_LEN));
        assert_eq!(
            long.scan_target(DEFAULT_MAX_URL_LEN),
            "https://menu.example.com/board"
        );
    }

    #[test]
    fn test_qr_code_url_encodes_target() {
        let short = link(8);
        let qr = short.qr_code_url(DEFAULT_MAX_URL_LEN).unwrap();
        assert_eq!(qr.host_str(), Some("api.qrserver.com"));

        let data = qr
            .query_pairs()
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned());
        assert_eq!(data.as_deref(), Some("https://menu.example.com/board#AAAAAAAA"));
        assert!(!qr.as_str().contains('#'));
    }
}
