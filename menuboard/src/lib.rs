//! # menuboard
//!
//! A menu-board editor whose boards travel inside their own URL.
//!
//! `menuboard` edits digital-signage menu boards stored as JSON, fills them
//! with AI-generated photos and copy, and shares them as links whose
//! fragment carries the whole board, images included.
//!
//! ## Features
//!
//! - **Share links**: boards are gzip-compressed into URL-safe tokens
//!   (see [`menushare`]); no server is involved
//! - **Scannable fallback**: links too long for a QR code fall back to the
//!   bare page URL
//! - **AI assistant**: item photos, description rewrites and menu import
//!   from a photographed menu
//! - **Library**: named, categorised boards saved in a quota-bound local store
//!
//! ## Modules
//!
//! - [`assistant`] - Generative-AI collaborator
//! - [`ctx`] - Application context and editor actions
//! - [`menu_file`] - Board file I/O
//! - [`model`] - Board data model
//! - [`settings`] - `.menuboard.toml` settings
//! - [`share`] - Share links and the location port
//! - [`store`] - Local storage and saved-menu library
//! - [`utils`] - Common helpers

/// Generative-AI collaborator.
pub mod assistant;

/// Application context and editor actions.
pub mod ctx;

/// Board file I/O.
pub mod menu_file;

/// Board data model.
pub mod model;

/// Application settings.
pub mod settings;

/// Share links and the location port.
pub mod share;

/// Capacity-bounded local storage and the saved-menu library.
pub mod store;

/// Common helpers.
pub mod utils;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub use menushare;
