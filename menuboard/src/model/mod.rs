//! Menu-board configuration types.
//!
//! [`MenuConfig`] is the complete shareable state of one board. Its JSON form
//! uses the camelCase keys of the web editor, so tokens produced here open
//! there and vice versa.

use std::collections::BTreeSet;

use menushare::Shareable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inline image helpers.
pub mod data_uri;

/// Photography style catalog used for image generation.
pub mod theme;

pub use data_uri::DataUri;
pub use theme::{IMAGE_THEMES, ImageTheme};

/// Name given to items created by the editor before the user renames them.
pub const PLACEHOLDER_ITEM_NAME: &str = "New Sandwich";

/// Complete shareable state of one menu board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    /// Board heading.
    pub title: String,
    /// Line shown under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// Logo as a data URI or plain URL.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Primary accent color (`#rrggbb`).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    /// Secondary accent color (`#rrggbb`).
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    /// Board background color (`#rrggbb`).
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Font family used by the board.
    #[serde(default)]
    pub font_family: FontFamily,
    /// Image theme id, see [`theme`].
    #[serde(default = "default_image_theme")]
    pub image_theme: String,
    /// Items in display order.
    pub items: Vec<MenuItem>,
    /// Image shown when no item has a picture.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Caption for the featured image.
    #[serde(default)]
    pub featured_item_name: String,
}

impl Shareable for MenuConfig {
    const REQUIRED_FIELDS: &'static [&'static str] = &["title", "items"];
}

fn default_accent_color() -> String {
    "#00aeef".into()
}

fn default_secondary_color() -> String {
    "#8dc63f".into()
}

fn default_background_color() -> String {
    "#ffffff".into()
}

fn default_image_theme() -> String {
    "scrivani".into()
}

/// A single entry on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Opaque id, unique within the owning item list.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ingredients or marketing copy.
    pub description: String,
    /// Display price. Free text, never parsed.
    pub price: String,
    /// Dietary tags. A set, so a tag can only appear once.
    #[serde(default)]
    pub dietary: BTreeSet<DietaryTag>,
    /// Item photo as a data URI or plain URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Whether the item is shown as sold out.
    #[serde(default)]
    pub is_sold_out: bool,
}

impl MenuItem {
    /// Creates an item with no tags, image or sold-out flag.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price: price.into(),
            dietary: BTreeSet::new(),
            image_url: None,
            is_sold_out: false,
        }
    }

    /// Adds dietary tags.
    pub fn with_dietary(mut self, tags: impl IntoIterator<Item = DietaryTag>) -> Self {
        self.dietary.extend(tags);
        self
    }

    /// Whether the item still carries the editor's placeholder name.
    pub fn is_placeholder(&self) -> bool {
        self.name.trim().is_empty() || self.name == PLACEHOLDER_ITEM_NAME
    }
}

/// Dietary marker shown next to an item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum DietaryTag {
    /// Vegetarian.
    #[serde(rename = "V")]
    Vegetarian,
    /// Vegan.
    #[serde(rename = "VG")]
    Vegan,
    /// Gluten free.
    #[serde(rename = "GF")]
    GlutenFree,
    /// Seafood Watch certified.
    #[serde(rename = "S")]
    Seafood,
}

impl DietaryTag {
    /// All tags in legend order.
    pub const ALL: [DietaryTag; 4] = [
        DietaryTag::Vegetarian,
        DietaryTag::Vegan,
        DietaryTag::GlutenFree,
        DietaryTag::Seafood,
    ];

    /// Short code used on the wire and on the board.
    pub fn code(self) -> &'static str {
        match self {
            DietaryTag::Vegetarian => "V",
            DietaryTag::Vegan => "VG",
            DietaryTag::GlutenFree => "GF",
            DietaryTag::Seafood => "S",
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            DietaryTag::Vegetarian => "VEGETARIAN",
            DietaryTag::Vegan => "VEGAN",
            DietaryTag::GlutenFree => "GLUTEN FREE",
            DietaryTag::Seafood => "SEAFOOD WATCH",
        }
    }

    /// Parses a short code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Board font family.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Sans-serif.
    #[default]
    Sans,
    /// Serif.
    Serif,
}

impl Default for MenuConfig {
    /// The "CITY DELI" starter board.
    fn default() -> Self {
        Self {
            title: "CITY DELI".into(),
            subtitle: "Freshly prepared daily with the finest local ingredients. Served with your choice of side.".into(),
            logo_url: None,
            accent_color: default_accent_color(),
            secondary_color: default_secondary_color(),
            background_color: default_background_color(),
            font_family: FontFamily::Sans,
            image_theme: default_image_theme(),
            items: vec![
                MenuItem::new(
                    "1",
                    "CHICKEN CAESAR WRAP",
                    "Flour Tortilla | Sliced Chicken Breast | Romaine Lettuce | Parmesan Cheese | Caesar Salad Dressing",
                    "$9.75",
                ),
                MenuItem::new(
                    "2",
                    "THE GARDEN VIBE",
                    "Spinach Tortilla | Hummus | Roasted Peppers | Cucumber | Tomato | Red Onion | Feta | Sunflower Seeds",
                    "$8.50",
                )
                .with_dietary([DietaryTag::Vegetarian, DietaryTag::GlutenFree]),
                MenuItem::new(
                    "3",
                    "ITALIAN STALLION",
                    "Hoagie Roll | Genoa Salami | Ham | Provolone | Banana Peppers | Lettuce | Italian Vinaigrette",
                    "$11.25",
                ),
                MenuItem::new(
                    "4",
                    "TURKEY CLUBHOUSE",
                    "Triple Decker Sourdough | Roasted Turkey | Bacon | Swiss | Tomato | Garlic Aioli",
                    "$10.50",
                ),
            ],
            featured_image: Some(
                "https://images.unsplash.com/photo-1521390188846-e2a3a97453a0?q=80&w=1000&auto=format&fit=crop".into(),
            ),
            featured_item_name: "Chicken Caesar Wrap".into(),
        }
    }
}

impl MenuConfig {
    /// Looks up an item by id.
    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Looks up an item by id for mutation.
    pub fn item_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Whether any two items share an id.
    pub fn has_duplicate_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        !self.items.iter().all(|item| seen.insert(item.id.as_str()))
    }
}
