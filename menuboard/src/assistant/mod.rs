//! Generative-AI collaborator.
//!
//! The board editor asks an external model for three things: a photo of an
//! item, a punchier description, and the items printed on a photographed
//! menu. Callers in [`ctx`](crate::ctx) treat every failure as "no change".

use serde::{Deserialize, Serialize};

use crate::model::DataUri;

/// Gemini REST client.
pub mod gemini;

pub use gemini::GeminiAssistant;

/// An item read off a photographed menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Item name.
    pub name: String,
    /// Description or ingredients.
    #[serde(default)]
    pub description: String,
    /// Price as printed.
    #[serde(default)]
    pub price: String,
}

/// Content-generation service used by the editor.
#[allow(async_fn_in_trait)]
pub trait MenuAssistant {
    /// Generates a photo for an item.
    ///
    /// Returns `Ok(None)` when the model answered without an image.
    async fn generate_image(
        &self,
        name: &str,
        description: &str,
        style_prompt: &str,
    ) -> anyhow::Result<Option<DataUri>>;

    /// Rewrites an item description.
    async fn improve_text(&self, name: &str, text: &str) -> anyhow::Result<String>;

    /// Reads menu items from a photo of a printed menu.
    async fn extract_items(&self, image: &DataUri) -> anyhow::Result<Vec<ExtractedItem>>;
}
