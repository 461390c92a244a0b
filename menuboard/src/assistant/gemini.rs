//! Gemini (Generative Language API) implementation of [`MenuAssistant`].

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ExtractedItem, MenuAssistant};
use crate::model::DataUri;
use crate::settings::AssistantConfig;

/// Client for `models/{model}:generateContent`.
pub struct GeminiAssistant {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    image_model: String,
    text_model: String,
}

impl GeminiAssistant {
    /// Builds a client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot
    /// be created.
    pub fn new(config: &AssistantConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("no API key configured, set GEMINI_API_KEY or [assistant].api_key")
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            image_model: config.image_model.clone(),
            text_model: config.text_model.clone(),
        })
    }

    async fn generate(
        &self,
        model: &str,
        body: &Value,
    ) -> anyhow::Result<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, model);
        debug!("POST {url}");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {model} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            bail!("{model} returned {status}: {detail}");
        }

        resp.json()
            .await
            .with_context(|| format!("unexpected response from {model}"))
    }
}

impl MenuAssistant for GeminiAssistant {
    async fn generate_image(
        &self,
        name: &str,
        description: &str,
        style_prompt: &str,
    ) -> anyhow::Result<Option<DataUri>> {
        let body = image_request(name, description, style_prompt);
        let resp = self.generate(&self.image_model, &body).await?;
        first_inline_image(&resp)
    }

    async fn improve_text(&self, name: &str, text: &str) -> anyhow::Result<String> {
        let body = improve_request(name, text);
        let resp = self.generate(&self.text_model, &body).await?;
        let raw = resp
            .text()
            .ok_or_else(|| anyhow!("model returned no text"))?;
        clean_improved_text(&raw).ok_or_else(|| anyhow!("model returned empty text"))
    }

    async fn extract_items(&self, image: &DataUri) -> anyhow::Result<Vec<ExtractedItem>> {
        let body = extract_request(image);
        let resp = self.generate(&self.text_model, &body).await?;
        let raw = resp
            .text()
            .ok_or_else(|| anyhow!("model returned no text"))?;
        let items: Vec<ExtractedItem> =
            serde_json::from_str(raw.trim()).context("extraction result is not an item list")?;
        Ok(items)
    }
}

fn image_request(name: &str, description: &str, style_prompt: &str) -> Value {
    let prompt = format!(
        "Professional, appetizing food photograph of {name}. \
         Show these ingredients or components: {description}. \
         Style: {style_prompt}. \
         Vertical composition. No text, labels, prices, logos or watermarks."
    );
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseModalities": ["IMAGE"],
            "imageConfig": { "aspectRatio": "9:16" }
        }
    })
}

fn improve_request(name: &str, text: &str) -> Value {
    let prompt = format!(
        "You write menu copy for a deli. Rewrite this item description so it is \
         appetizing and focused on freshness and quality, in under 15 words. \
         Answer with the description only.\n\
         Item: {name}\n\
         Original: {text}"
    );
    json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

fn extract_request(image: &DataUri) -> Value {
    let instruction = "List every menu item in this photo \
        with its description or ingredients and its price.";
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": image.mime.as_str(),
                        "data": image.base64_payload()
                    }
                },
                { "text": instruction }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "price": { "type": "STRING" }
                    },
                    "required": ["name", "description", "price"]
                }
            }
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

fn first_inline_image(resp: &GenerateContentResponse) -> anyhow::Result<Option<DataUri>> {
    let Some(inline) = resp.parts().find_map(|p| p.inline_data.as_ref()) else {
        return Ok(None);
    };
    let uri = DataUri::parse(&format!("data:{};base64,{}", inline.mime_type, inline.data))?;
    Ok(Some(uri))
}

fn clean_improved_text(raw: &str) -> Option<String> {
    let text = raw.trim().trim_matches('"').trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
