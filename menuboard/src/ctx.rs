//! Application context and state management.
//!
//! [`AppContext`] owns the board being edited, the location it is shared
//! through and the codec that turns one into the other. Editor actions
//! mutate the board in place; AI actions go through a [`MenuAssistant`] and
//! leave the board untouched when the service fails.

use indicatif::{ProgressBar, ProgressStyle};
use menushare::{ShareCodec, ShareError};

use crate::assistant::MenuAssistant;
use crate::model::{DataUri, DietaryTag, MenuConfig, MenuItem, PLACEHOLDER_ITEM_NAME, theme};
use crate::share::{ShareLink, StatePort};
use crate::utils::unique_timestamp_id;

/// Message shown when a board cannot be turned into a link.
pub const TOO_LARGE_HINT: &str = "This menu is too large to share via a standard link \
    (likely due to many high-resolution images). Try removing some images or \
    shortening item descriptions.";

/// Where the board in an [`AppContext`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The built-in default board.
    Default,
    /// Decoded from the location fragment.
    Shared,
}

/// Partial update for a [`MenuItem`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<String>,
    /// New image; `Some(None)` clears it.
    pub image_url: Option<Option<String>>,
    /// New sold-out flag.
    pub is_sold_out: Option<bool>,
}

/// The main application context holding all state.
pub struct AppContext<P> {
    /// The board being edited.
    pub config: MenuConfig,
    /// Where the board came from.
    pub origin: Origin,
    port: P,
    codec: ShareCodec,
}

impl<P: StatePort> AppContext<P> {
    /// Creates a context holding the default board.
    pub fn new(port: P) -> Self {
        Self::with_codec(port, ShareCodec::new())
    }

    /// Creates a context with a custom codec.
    pub fn with_codec(port: P, codec: ShareCodec) -> Self {
        Self {
            config: MenuConfig::default(),
            origin: Origin::Default,
            port,
            codec,
        }
    }

    /// The location port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Loads the board carried by the location, if any.
    ///
    /// Must run once at start-up, before any edit: a later call would replace
    /// edits in progress. A broken token is logged and the default board
    /// stays active.
    pub async fn hydrate(&mut self) -> Origin {
        let Some(token) = self.port.read() else {
            return self.origin;
        };

        match self.codec.decode_async::<MenuConfig>(token).await {
            Ok(Some(config)) => {
                info!(
                    "loaded shared menu `{}` with {} items",
                    config.title,
                    config.items.len()
                );
                self.config = config;
                self.origin = Origin::Shared;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Failed to decode shared menu, using default: {e}");
            }
        }
        self.origin
    }

    /// Encodes the board and publishes it through the location.
    ///
    /// # Errors
    ///
    /// Returns the codec error when the board cannot be encoded; the location
    /// is not touched in that case. See [`TOO_LARGE_HINT`] for the message to
    /// show the user.
    pub async fn share(&mut self, base: &str) -> Result<ShareLink, ShareError> {
        let token = self.codec.encode_async(self.config.clone()).await?;
        self.port.write(&token);
        Ok(ShareLink {
            base: base.to_string(),
            token,
        })
    }

    /// Appends a placeholder item and returns its id.
    pub fn add_item(&mut self) -> String {
        let id = unique_timestamp_id(|id| self.config.item(id).is_some());
        let item = MenuItem::new(
            id.clone(),
            PLACEHOLDER_ITEM_NAME,
            "Hand-crafted with fresh ingredients",
            "$9.95",
        );
        self.config.items.push(item);
        id
    }

    /// Applies `update` to the item with `id`. Returns `false` if there is none.
    pub fn update_item(&mut self, id: &str, update: ItemUpdate) -> bool {
        let Some(item) = self.config.item_mut(id) else {
            return false;
        };
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(image_url) = update.image_url {
            item.image_url = image_url;
        }
        if let Some(sold_out) = update.is_sold_out {
            item.is_sold_out = sold_out;
        }
        true
    }

    /// Removes the item with `id`. Returns `false` if there is none.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.config.items.len();
        self.config.items.retain(|item| item.id != id);
        self.config.items.len() != before
    }

    /// Adds `tag` to the item if missing, removes it otherwise.
    ///
    /// Returns the new state of the tag, or `None` if the item does not exist.
    pub fn toggle_dietary(&mut self, id: &str, tag: DietaryTag) -> Option<bool> {
        let item = self.config.item_mut(id)?;
        if item.dietary.remove(&tag) {
            Some(false)
        } else {
            item.dietary.insert(tag);
            Some(true)
        }
    }

    /// Sets an uploaded photo on an item.
    pub fn set_item_image(&mut self, id: &str, image: &DataUri) -> bool {
        self.update_item(
            id,
            ItemUpdate {
                image_url: Some(Some(image.to_string())),
                ..Default::default()
            },
        )
    }

    /// Sets or clears the board logo.
    pub fn set_logo(&mut self, logo: Option<&DataUri>) {
        self.config.logo_url = logo.map(DataUri::to_string);
    }

    /// Rewrites an item's description. Returns `true` if it changed.
    pub async fn improve_item_copy<A: MenuAssistant>(&mut self, assistant: &A, id: &str) -> bool {
        let Some(item) = self.config.item(id) else {
            return false;
        };
        let (name, description) = (item.name.clone(), item.description.clone());

        match assistant.improve_text(&name, &description).await {
            Ok(text) if text != description => self.update_item(
                id,
                ItemUpdate {
                    description: Some(text),
                    ..Default::default()
                },
            ),
            Ok(_) => false,
            Err(e) => {
                warn!("Error improving description of `{name}`: {e:#}");
                false
            }
        }
    }

    /// Generates a photo for one item. Returns `true` if the item got one.
    pub async fn generate_item_image<A: MenuAssistant>(&mut self, assistant: &A, id: &str) -> bool {
        let Some(item) = self.config.item(id) else {
            return false;
        };
        let (name, description) = (item.name.clone(), item.description.clone());
        let style = theme::style_prompt(&self.config.image_theme).to_string();

        match assistant.generate_image(&name, &description, &style).await {
            Ok(Some(image)) => self.set_item_image(id, &image),
            Ok(None) => {
                warn!("No image returned for `{name}`");
                false
            }
            Err(e) => {
                warn!("Error generating image for `{name}`: {e:#}");
                false
            }
        }
    }

    /// Generates photos for every named item, one at a time.
    ///
    /// Placeholder and unnamed items are skipped. Returns how many items got
    /// a new photo.
    pub async fn generate_all_images<A: MenuAssistant>(&mut self, assistant: &A) -> usize {
        let ids: Vec<String> = self
            .config
            .items
            .iter()
            .filter(|item| !item.is_placeholder())
            .map(|item| item.id.clone())
            .collect();

        let pb = ProgressBar::new(ids.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
            pb.set_style(style);
        }

        let mut updated = 0;
        for id in ids {
            if let Some(item) = self.config.item(&id) {
                pb.set_message(item.name.clone());
            }
            if self.generate_item_image(assistant, &id).await {
                updated += 1;
            }
            pb.inc(1);
        }
        pb.finish_with_message(format!("{updated} images generated"));
        updated
    }

    /// Replaces the items with those read off a photographed menu.
    ///
    /// Nothing changes when the extraction fails or finds no items. Returns
    /// the number of imported items.
    pub async fn import_from_photo<A: MenuAssistant>(
        &mut self,
        assistant: &A,
        photo: &DataUri,
    ) -> usize {
        let extracted = match assistant.extract_items(photo).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Error extracting menu items: {e:#}");
                return 0;
            }
        };
        if extracted.is_empty() {
            info!("no menu items found in photo");
            return 0;
        }

        self.config.items = extracted
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                MenuItem::new(idx.to_string(), item.name, item.description, item.price)
            })
            .collect();
        self.config.items.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::assistant::ExtractedItem;
    use crate::share::Location;

    /// Scripted assistant: `fail` makes every call error out.
    #[derive(Default)]
    struct Scripted {
        fail: bool,
        calls: Cell<usize>,
    }

    impl MenuAssistant for Scripted {
        async fn generate_image(
            &self,
            name: &str,
            _description: &str,
            style_prompt: &str,
        ) -> anyhow::Result<Option<DataUri>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                bail!("service unavailable");
            }
            assert!(!style_prompt.is_empty());
            Ok(Some(DataUri::new("image/png", name.as_bytes().to_vec())))
        }

        async fn improve_text(&self, name: &str, _text: &str) -> anyhow::Result<String> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                bail!("quota exhausted");
            }
            Ok(format!("Irresistible {name}"))
        }

        async fn extract_items(&self, _image: &DataUri) -> anyhow::Result<Vec<ExtractedItem>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                bail!("bad image");
            }
            Ok(vec![
                ExtractedItem {
                    name: "REUBEN".into(),
                    description: "Rye | Corned Beef".into(),
                    price: "$12".into(),
                },
                ExtractedItem {
                    name: "BLT".into(),
                    description: String::new(),
                    price: "$8".into(),
                },
            ])
        }
    }

    fn ctx() -> AppContext<Location> {
        AppContext::new(Location::parse("https://menu.example.com/"))
    }

    #[test]
    fn test_add_update_remove() {
        let mut ctx = ctx();
        let id = ctx.add_item();
        let id2 = ctx.add_item();
        assert_ne!(id, id2);
        assert!(!ctx.config.has_duplicate_ids());
        assert_eq!(ctx.config.items.len(), 6);
        assert!(ctx.config.item(&id).unwrap().is_placeholder());

        assert!(ctx.update_item(
            &id,
            ItemUpdate {
                name: Some("PASTRAMI".into()),
                is_sold_out: Some(true),
                ..Default::default()
            }
        ));
        let item = ctx.config.item(&id).unwrap();
        assert_eq!(item.name, "PASTRAMI");
        assert!(item.is_sold_out);
        assert_eq!(item.price, "$9.95");

        assert!(ctx.remove_item(&id));
        assert!(!ctx.remove_item(&id));
        assert!(!ctx.update_item(&id, ItemUpdate::default()));
    }

    #[test]
    fn test_toggle_dietary() {
        let mut ctx = ctx();
        assert_eq!(ctx.toggle_dietary("1", DietaryTag::Vegan), Some(true));
        assert_eq!(ctx.toggle_dietary("1", DietaryTag::Vegan), Some(false));
        assert!(ctx.config.item("1").unwrap().dietary.is_empty());
        assert_eq!(ctx.toggle_dietary("missing", DietaryTag::Vegan), None);
    }

    #[tokio::test]
    async fn test_share_then_hydrate() {
        let mut ctx = ctx();
        ctx.config.title = "SMOKEHOUSE ☕".into();
        ctx.toggle_dietary("3", DietaryTag::Seafood);

        let link = ctx.share("https://menu.example.com/").await.unwrap();
        assert_eq!(ctx.port().read().as_deref(), Some(link.token.as_str()));

        let mut fresh = AppContext::new(Location::parse(&link.url()));
        assert_eq!(fresh.hydrate().await, Origin::Shared);
        assert_eq!(fresh.config, ctx.config);
    }

    #[tokio::test]
    async fn test_hydrate_broken_token_keeps_default() {
        let mut ctx = AppContext::new(Location::parse(
            "https://menu.example.com/#not-a-valid-token!!!",
        ));
        assert_eq!(ctx.hydrate().await, Origin::Default);
        assert_eq!(ctx.config, MenuConfig::default());
    }

    #[tokio::test]
    async fn test_share_failure_leaves_location() {
        let codec = ShareCodec::new().with_max_payload(128);
        let mut ctx =
            AppContext::with_codec(Location::parse("https://menu.example.com/#old"), codec);

        let err = ctx.share("https://menu.example.com/").await.unwrap_err();
        assert!(err.is_encode_error());
        assert_eq!(ctx.port().read().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_assistant_success() {
        let mut ctx = ctx();
        let assistant = Scripted::default();
        ctx.add_item();

        assert!(ctx.improve_item_copy(&assistant, "1").await);
        assert_eq!(
            ctx.config.item("1").unwrap().description,
            "Irresistible CHICKEN CAESAR WRAP"
        );

        // 占位名称的条目会被跳过
        assert_eq!(ctx.generate_all_images(&assistant).await, 4);
        assert!(ctx.config.items[..4].iter().all(|i| i.image_url.is_some()));
        assert!(ctx.config.items[4].image_url.is_none());

        let photo = DataUri::new("image/jpeg", vec![1]);
        assert_eq!(ctx.import_from_photo(&assistant, &photo).await, 2);
        let ids: Vec<_> = ctx.config.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["0", "1"]);
        assert!(!ctx.config.items[0].is_sold_out);
    }

    #[tokio::test]
    async fn test_assistant_failures_change_nothing() {
        let mut ctx = ctx();
        let assistant = Scripted {
            fail: true,
            ..Default::default()
        };
        let before = ctx.config.clone();

        assert!(!ctx.improve_item_copy(&assistant, "1").await);
        assert!(!ctx.generate_item_image(&assistant, "2").await);
        assert_eq!(ctx.generate_all_images(&assistant).await, 0);
        let photo = DataUri::new("image/jpeg", vec![1]);
        assert_eq!(ctx.import_from_photo(&assistant, &photo).await, 0);

        assert_eq!(ctx.config, before);
        assert!(assistant.calls.get() >= 4);
    }
}
