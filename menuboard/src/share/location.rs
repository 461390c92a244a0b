//! The document location as an explicit shared-state port.

/// Where share tokens are published and read back.
///
/// In a browser this is the URL fragment. Keeping it behind a trait lets the
/// application context be driven by an in-memory location in tests and by a
/// command-line argument in the CLI.
pub trait StatePort {
    /// Returns the current token, or `None` when there is no fragment.
    fn read(&self) -> Option<String>;

    /// Publishes a token, replacing any previous one.
    fn write(&mut self, token: &str);
}

/// An in-memory document location: `<origin>/<path>#<fragment>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    base: String,
    fragment: Option<String>,
}

impl Location {
    /// Parses an href. Everything after the first `#` is the fragment.
    pub fn parse(href: &str) -> Self {
        match href.split_once('#') {
            Some((base, fragment)) => Self {
                base: base.to_string(),
                fragment: Some(fragment.to_string()),
            },
            None => Self {
                base: href.to_string(),
                fragment: None,
            },
        }
    }

    /// The URL without its fragment.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The raw fragment, without `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The full URL.
    pub fn href(&self) -> String {
        match &self.fragment {
            Some(fragment) => format!("{}#{}", self.base, fragment),
            None => self.base.clone(),
        }
    }
}

impl StatePort for Location {
    fn read(&self) -> Option<String> {
        self.fragment
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
    }

    fn write(&mut self, token: &str) {
        self.fragment = Some(token.to_string());
    }
}
