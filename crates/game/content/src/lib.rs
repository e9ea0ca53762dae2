//! Data-driven content definitions and loaders.
//!
//! Loaders read RON/TOML files into `game-core` types:
//! - Game configuration (TOML)
//! - Item catalog, monster templates, loot and shop tables (RON)
//! - World, town and dungeon maps (RON glyph grids)
//!
//! The `data/` directory shipped with this crate holds the default content.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, GameContent, ItemCatalog, ItemLoader, MapLoader,
    MonsterCatalog, MonsterLoader, Tables, TablesLoader,
};

/// Directory holding the content bundled with this crate.
pub fn bundled_data_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
