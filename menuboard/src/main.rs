use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{info, warn};
use menuboard::{
    assistant::GeminiAssistant,
    ctx::{AppContext, ItemUpdate, Origin, TOO_LARGE_HINT},
    menu_file::{read_menu, write_menu},
    model::{DataUri, DietaryTag, MenuConfig},
    settings::{SETTINGS_FILE, Settings},
    share::{Location, StatePort},
    store::{FileStore, MenuCategory, MenuLibrary},
    utils::human_size,
};

#[derive(Parser)]
#[command(name = "menuboard", version, about = "Menu-board editor with shareable links")]
struct Cli {
    /// Settings file.
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default board.
    New {
        #[arg(short, long, default_value = "menu.json")]
        out: PathBuf,
    },
    /// Print a share link for a board.
    Share {
        file: PathBuf,
        /// Page URL the token is appended to (overrides settings).
        #[arg(long)]
        base: Option<String>,
    },
    /// Open a share link or bare token.
    Open {
        link: String,
        #[arg(short, long, default_value = "menu.json")]
        out: PathBuf,
    },
    /// Edit items.
    Item {
        file: PathBuf,
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Set the board logo, or clear it when no image is given.
    Logo { file: PathBuf, image: Option<PathBuf> },
    /// Rewrite an item description with the assistant.
    Improve {
        file: PathBuf,
        #[arg(long)]
        item: String,
    },
    /// Generate item photos with the assistant.
    Images {
        file: PathBuf,
        /// Only this item; all named items otherwise.
        #[arg(long)]
        item: Option<String>,
    },
    /// Replace the items with those found in a photo of a printed menu.
    Import { file: PathBuf, photo: PathBuf },
    /// Save a board to the library.
    Save {
        file: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long = "category", value_enum)]
        categories: Vec<MenuCategory>,
    },
    /// List saved boards.
    List {
        #[arg(long, value_enum)]
        category: Option<MenuCategory>,
    },
    /// Write a saved board to a file.
    Load {
        id: String,
        #[arg(short, long, default_value = "menu.json")]
        out: PathBuf,
    },
    /// Delete a saved board.
    Delete { id: String },
    /// Print the JSON Schema of board files.
    Schema,
}

#[derive(Subcommand)]
enum ItemAction {
    /// Append a placeholder item.
    Add,
    /// Remove an item.
    Remove { id: String },
    /// Toggle a dietary tag (V, VG, GF, S).
    Tag { id: String, tag: String },
    /// Mark an item sold out.
    SoldOut {
        id: String,
        /// Mark it available again.
        #[arg(long)]
        clear: bool,
    },
    /// Attach a photo from disk.
    Photo { id: String, image: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)?;

    match cli.command {
        Command::New { out } => {
            write_menu(&out, &MenuConfig::default())?;
            println!("Default board written to {}", out.display());
        }
        Command::Share { file, base } => {
            let base = base.unwrap_or_else(|| settings.share.base_url.clone());
            share(&settings, &file, &base).await?;
        }
        Command::Open { link, out } => {
            let location = if link.contains('#') {
                Location::parse(&link)
            } else {
                let mut location = Location::default();
                location.write(&link);
                location
            };
            let had_token = location.read().is_some();

            let mut ctx = AppContext::new(location);
            if ctx.hydrate().await == Origin::Default && had_token {
                println!(
                    "{}",
                    "The link could not be read; writing the default board instead.".yellow()
                );
            }
            write_menu(&out, &ctx.config)?;
            println!("Board `{}` written to {}", ctx.config.title, out.display());
        }
        Command::Item { file, action } => {
            let mut ctx = open_file(&file)?;
            let found = match action {
                ItemAction::Add => {
                    let id = ctx.add_item();
                    println!("Added item {id}");
                    true
                }
                ItemAction::Remove { id } => ctx.remove_item(&id),
                ItemAction::Tag { id, tag } => {
                    let tag = DietaryTag::from_code(&tag)
                        .with_context(|| format!("unknown dietary tag `{tag}`"))?;
                    match ctx.toggle_dietary(&id, tag) {
                        Some(on) => {
                            println!("{} {}", tag.label(), if on { "added" } else { "removed" });
                            true
                        }
                        None => false,
                    }
                }
                ItemAction::SoldOut { id, clear } => ctx.update_item(
                    &id,
                    ItemUpdate {
                        is_sold_out: Some(!clear),
                        ..Default::default()
                    },
                ),
                ItemAction::Photo { id, image } => {
                    let image = DataUri::from_path(&image)?;
                    ctx.set_item_image(&id, &image)
                }
            };
            if !found {
                bail!("no such item in {}", file.display());
            }
            write_menu(&file, &ctx.config)?;
        }
        Command::Logo { file, image } => {
            let mut ctx = open_file(&file)?;
            let logo = image.as_deref().map(DataUri::from_path).transpose()?;
            ctx.set_logo(logo.as_ref());
            write_menu(&file, &ctx.config)?;
        }
        Command::Improve { file, item } => {
            let assistant = GeminiAssistant::new(&settings.assistant)?;
            let mut ctx = open_file(&file)?;
            if ctx.improve_item_copy(&assistant, &item).await {
                write_menu(&file, &ctx.config)?;
                if let Some(item) = ctx.config.item(&item) {
                    println!("{}", item.description.green());
                }
            } else {
                println!("Description unchanged.");
            }
        }
        Command::Images { file, item } => {
            let assistant = GeminiAssistant::new(&settings.assistant)?;
            let mut ctx = open_file(&file)?;
            let updated = match item {
                Some(id) => usize::from(ctx.generate_item_image(&assistant, &id).await),
                None => ctx.generate_all_images(&assistant).await,
            };
            if updated > 0 {
                write_menu(&file, &ctx.config)?;
            }
            println!("{updated} item photos updated");
        }
        Command::Import { file, photo } => {
            let assistant = GeminiAssistant::new(&settings.assistant)?;
            let photo = DataUri::from_path(&photo)?;
            let mut ctx = open_file(&file)?;
            let count = ctx.import_from_photo(&assistant, &photo).await;
            if count > 0 {
                write_menu(&file, &ctx.config)?;
                println!("Imported {count} items");
            } else {
                println!("No items found; board unchanged.");
            }
        }
        Command::Save {
            file,
            name,
            categories,
        } => {
            let config = read_menu(&file)?;
            let mut library = open_library(&settings)?;
            let saved = library.save(&name, &categories, &config).map_err(|e| {
                println!("{}", "Could not save the menu to the library.".red());
                e
            })?;
            println!("Saved `{}` as {}", saved.name, saved.id.bold());
        }
        Command::List { category } => {
            let library = open_library(&settings)?;
            let menus = match category {
                Some(c) => library.by_category(c)?,
                None => library.list()?,
            };
            for menu in menus {
                let categories: Vec<String> =
                    menu.categories.iter().map(|c| format!("{c:?}")).collect();
                println!(
                    "{}  {}  [{}]  {} items",
                    menu.id.bold(),
                    menu.name,
                    categories.join(", "),
                    menu.config.items.len()
                );
            }
        }
        Command::Load { id, out } => {
            let library = open_library(&settings)?;
            let saved = library
                .get(&id)?
                .with_context(|| format!("no saved menu with id {id}"))?;
            write_menu(&out, &saved.config)?;
            println!("`{}` written to {}", saved.name, out.display());
        }
        Command::Delete { id } => {
            let mut library = open_library(&settings)?;
            if !library.delete(&id)? {
                bail!("no saved menu with id {id}");
            }
            println!("Deleted {id}");
        }
        Command::Schema => {
            let schema = schemars::schema_for!(MenuConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn open_file(file: &Path) -> anyhow::Result<AppContext<Location>> {
    let mut ctx = AppContext::new(Location::default());
    ctx.config = read_menu(file)?;
    Ok(ctx)
}

fn open_library(settings: &Settings) -> anyhow::Result<MenuLibrary<FileStore>> {
    let store = FileStore::open(&settings.store.dir, settings.store.quota_bytes)
        .with_context(|| format!("Failed to open {}", settings.store.dir.display()))?;
    Ok(MenuLibrary::new(store))
}

async fn share(settings: &Settings, file: &Path, base: &str) -> anyhow::Result<()> {
    let mut ctx = AppContext::new(Location::parse(base));
    ctx.config = read_menu(file)?;

    let base = ctx.port().base().to_string();
    let link = match ctx.share(&base).await {
        Ok(link) => link,
        Err(e) => {
            println!("{}", TOO_LARGE_HINT.red());
            return Err(e.into());
        }
    };

    let max = settings.share.max_url_len;
    info!("token is {} characters", link.token.len());
    println!("{}", ctx.port().href().bold());
    println!("Token size: {}", human_size(link.token.len()));

    if link.exceeds(max) {
        warn!("share link is longer than {max} characters");
        let note = format!(
            "Link is longer than {max} characters; \
             the QR code will point to the page without the menu."
        );
        println!("{}", note.yellow());
    }
    println!("QR code: {}", link.qr_code_url(max)?);
    Ok(())
}
