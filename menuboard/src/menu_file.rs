//! Reading and writing board files.
//!
//! The editor works on boards stored as `.json` (the web editor's format)
//! or `.toml` files; the extension picks the format.

use std::path::Path;

use anyhow::Context;

use crate::model::MenuConfig;

/// Reads a board file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension, or does not describe a board.
pub fn read_menu(path: &Path) -> anyhow::Result<MenuConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = match extension(path) {
        "json" => serde_json::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        ext => bail!("unsupported menu file extension: {ext:?}"),
    };
    Ok(config)
}

/// Writes a board file, replacing any previous content.
pub fn write_menu(path: &Path, config: &MenuConfig) -> anyhow::Result<()> {
    let content = match extension(path) {
        "json" => serde_json::to_string_pretty(config)?,
        "toml" => toml::to_string_pretty(config)?,
        ext => bail!("unsupported menu file extension: {ext:?}"),
    };
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|s| s.to_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        let config = MenuConfig::default();

        write_menu(&path, &config).unwrap();
        assert_eq!(read_menu(&path).unwrap(), config);
    }

    #[test]
    fn test_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        let config = MenuConfig::default();

        write_menu(&path, &config).unwrap();
        assert_eq!(read_menu(&path).unwrap(), config);
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.yaml");
        assert!(write_menu(&path, &MenuConfig::default()).is_err());
    }
}
