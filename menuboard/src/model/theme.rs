//! Photography styles offered for generated item images.

/// A named photography style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTheme {
    /// Id stored in `MenuConfig::image_theme`.
    pub id: &'static str,
    /// Human readable name.
    pub label: &'static str,
    /// Style description handed to the image model.
    pub prompt: &'static str,
}

/// Built-in themes.
pub const IMAGE_THEMES: &[ImageTheme] = &[
    ImageTheme {
        id: "modern",
        label: "Modern Studio",
        prompt: "Clean, professional studio lighting with minimalist backgrounds.",
    },
    ImageTheme {
        id: "scrivani",
        label: "Editorial (Scrivani)",
        prompt: "Moody, high-contrast, rustic editorial style inspired by Andrew Scrivani.",
    },
    ImageTheme {
        id: "pub",
        label: "Traditional Pub",
        prompt: "Dark wood textures, warm amber lighting, and cozy tavern vibes.",
    },
    ImageTheme {
        id: "cafe",
        label: "Bright Cafe",
        prompt: "Airy, natural light, marble tables, and a relaxed morning feel.",
    },
    ImageTheme {
        id: "bistro",
        label: "Classic Bistro",
        prompt: "Elegant plating, checkered linens, and sophisticated atmosphere.",
    },
    ImageTheme {
        id: "nautical",
        label: "Nautical / Coastal",
        prompt: "Weathered wood, blue accents, and seaside freshness.",
    },
    ImageTheme {
        id: "farm",
        label: "Farm Fresh",
        prompt: "Rustic burlap, raw ingredients, and \"straight from the field\" honesty.",
    },
    ImageTheme {
        id: "foodie",
        label: "Hardcore Foodie",
        prompt: "Extreme close-ups, high contrast, and focus on rich textures.",
    },
    ImageTheme {
        id: "influencer",
        label: "Influencer Style",
        prompt: "Vibrant colors, trendy props, and perfect social media bokeh.",
    },
];

/// Finds a built-in theme by id.
pub fn find(id: &str) -> Option<&'static ImageTheme> {
    IMAGE_THEMES.iter().find(|t| t.id == id)
}

/// Resolves a theme id to the style prompt sent to the image model.
///
/// Unknown ids are custom themes: the id text itself is the prompt.
pub fn style_prompt(id: &str) -> &str {
    find(id).map_or(id, |t| t.prompt)
}
