//! Saved menus, kept in a [`KeyValueStore`] under [`SAVED_MENUS_KEY`].

use std::collections::HashSet;

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StoreResult};
use crate::model::MenuConfig;
use crate::utils::{now_millis, unique_timestamp_id};

/// Store key holding the saved-menu collection.
pub const SAVED_MENUS_KEY: &str = "saved_menus";

/// Meal period a saved menu is filed under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
pub enum MenuCategory {
    /// Breakfast.
    Breakfast,
    /// Brunch.
    Brunch,
    /// Lunch.
    Lunch,
    /// Happy hour.
    #[serde(rename = "Happy Hour")]
    HappyHour,
    /// Dinner.
    Dinner,
    /// Senior citizen specials.
    #[serde(rename = "Senior Citizen")]
    SeniorCitizen,
    /// Specials.
    Specials,
}

/// A board stored in the local library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SavedMenu {
    /// Library id.
    pub id: String,
    /// Name shown in the library.
    pub name: String,
    /// Save time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// The saved board.
    pub config: MenuConfig,
    /// Categories the menu is filed under.
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

/// Saved-menu collection on top of a store.
pub struct MenuLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> MenuLibrary<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All saved menus, newest first.
    pub fn list(&self) -> StoreResult<Vec<SavedMenu>> {
        let mut menus: Vec<SavedMenu> = match self.store.get(SAVED_MENUS_KEY)? {
            Some(content) => serde_json::from_str(&content)?,
            None => Vec::new(),
        };
        menus.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(menus)
    }

    /// Saved menus filed under `category`, newest first.
    pub fn by_category(&self, category: MenuCategory) -> StoreResult<Vec<SavedMenu>> {
        let mut menus = self.list()?;
        menus.retain(|m| m.categories.contains(&category));
        Ok(menus)
    }

    /// Looks up a saved menu by id.
    pub fn get(&self, id: &str) -> StoreResult<Option<SavedMenu>> {
        Ok(self.list()?.into_iter().find(|m| m.id == id))
    }

    /// Saves a copy of `config`.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::QuotaExceeded`](super::StoreError::QuotaExceeded)
    /// when the library would outgrow the store; the library is then unchanged.
    pub fn save(
        &mut self,
        name: &str,
        categories: &[MenuCategory],
        config: &MenuConfig,
    ) -> StoreResult<SavedMenu> {
        let mut menus = self.list()?;
        let id = unique_timestamp_id(|id| menus.iter().any(|m| m.id == id));

        let mut categories = categories.to_vec();
        let mut seen = HashSet::new();
        categories.retain(|c| seen.insert(*c));

        let saved = SavedMenu {
            id,
            name: name.to_string(),
            timestamp: now_millis(),
            config: config.clone(),
            categories,
        };
        menus.push(saved.clone());
        self.write(&menus)?;

        info!("saved menu `{}` as {}", saved.name, saved.id);
        Ok(saved)
    }

    /// Deletes a saved menu. Returns `false` if no menu had that id.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let mut menus = self.list()?;
        let before = menus.len();
        menus.retain(|m| m.id != id);
        if menus.len() == before {
            return Ok(false);
        }
        self.write(&menus)?;
        Ok(true)
    }

    fn write(&mut self, menus: &[SavedMenu]) -> StoreResult<()> {
        let content = serde_json::to_string(menus)?;
        self.store.set(SAVED_MENUS_KEY, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    #[test]
    fn test_save_list_get_delete() {
        let mut library = MenuLibrary::new(MemoryStore::new(1024 * 1024));
        let config = MenuConfig::default();

        let lunch = library
            .save("Weekday lunch", &[MenuCategory::Lunch], &config)
            .unwrap();
        let brunch = library
            .save("Sunday", &[MenuCategory::Brunch, MenuCategory::Specials], &config)
            .unwrap();
        assert_ne!(lunch.id, brunch.id);

        assert_eq!(library.list().unwrap().len(), 2);
        assert_eq!(library.get(&lunch.id).unwrap().unwrap().config, config);

        let specials = library.by_category(MenuCategory::Specials).unwrap();
        assert_eq!(specials.len(), 1);
        assert_eq!(specials[0].name, "Sunday");

        assert!(library.delete(&lunch.id).unwrap());
        assert!(!library.delete(&lunch.id).unwrap());
        assert_eq!(library.list().unwrap().len(), 1);
    }

    #[test]
    fn test_quota_rejection_keeps_library() {
        let mut library = MenuLibrary::new(MemoryStore::new(2048));
        let small = MenuConfig {
            items: vec![],
            ..MenuConfig::default()
        };
        library.save("small", &[], &small).unwrap();

        let mut big = MenuConfig::default();
        big.logo_url = Some(format!("data:image/png;base64,{}", "A".repeat(4096)));
        let err = library.save("big", &[], &big).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));

        let menus = library.list().unwrap();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].name, "small");
    }

    #[test]
    fn test_repeated_categories_are_stored_once() {
        let mut library = MenuLibrary::new(MemoryStore::new(1024 * 1024));
        let saved = library
            .save(
                "Daily",
                &[MenuCategory::Lunch, MenuCategory::Brunch, MenuCategory::Lunch],
                &MenuConfig::default(),
            )
            .unwrap();
        assert_eq!(saved.categories, [MenuCategory::Lunch, MenuCategory::Brunch]);

        let stored = library.get(&saved.id).unwrap().unwrap();
        assert_eq!(stored.categories, saved.categories);
    }

    #[test]
    fn test_category_names() {
        let json =
            serde_json::to_string(&[MenuCategory::HappyHour, MenuCategory::SeniorCitizen]).unwrap();
        assert_eq!(json, r#"["Happy Hour","Senior Citizen"]"#);
    }
}
