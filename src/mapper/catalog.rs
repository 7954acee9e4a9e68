use serde_json::Value;
use tracing::debug;

use super::json::JsonObject;
use super::MapResult;
use crate::domain::{CatalogCategory, CatalogDetails, CatalogEntry, CatalogSection, ContentCatalog, Localization};

/// Reads the category-specific fields of one catalog entry
pub type DetailsExtractor = fn(&JsonObject) -> MapResult<CatalogDetails>;

/// How one category is laid out in the content document
#[derive(Debug, Clone, Copy)]
pub struct CategoryLayout {
    pub category: CatalogCategory,
    /// Key of the category's array in the content document
    pub upstream_key: &'static str,
    pub details: DetailsExtractor,
}

/// One row per category, in `CatalogCategory` declaration order. Adding a category means
/// adding a variant and a row here.
pub static CATEGORY_LAYOUTS: [CategoryLayout; 15] = [
    CategoryLayout { category: CatalogCategory::Character, upstream_key: "characters", details: asset_details },
    CategoryLayout { category: CatalogCategory::Map, upstream_key: "maps", details: asset_details },
    CategoryLayout { category: CatalogCategory::Chroma, upstream_key: "chromas", details: asset_details },
    CategoryLayout { category: CatalogCategory::Skin, upstream_key: "skins", details: asset_details },
    CategoryLayout { category: CatalogCategory::SkinLevel, upstream_key: "skinLevels", details: asset_details },
    CategoryLayout { category: CatalogCategory::Equip, upstream_key: "equips", details: asset_details },
    CategoryLayout { category: CatalogCategory::GameMode, upstream_key: "gameModes", details: game_mode_details },
    CategoryLayout { category: CatalogCategory::Spray, upstream_key: "sprays", details: asset_details },
    CategoryLayout { category: CatalogCategory::SprayLevel, upstream_key: "sprayLevels", details: asset_details },
    CategoryLayout { category: CatalogCategory::Charm, upstream_key: "charms", details: asset_details },
    CategoryLayout { category: CatalogCategory::CharmLevel, upstream_key: "charmLevels", details: asset_details },
    CategoryLayout { category: CatalogCategory::PlayerCard, upstream_key: "playerCards", details: asset_details },
    CategoryLayout { category: CatalogCategory::Ceremony, upstream_key: "ceremonies", details: asset_details },
    CategoryLayout { category: CatalogCategory::PlayerTitle, upstream_key: "playerTitles", details: asset_details },
    CategoryLayout { category: CatalogCategory::Act, upstream_key: "acts", details: act_details },
];

pub fn layout_for(category: CatalogCategory) -> &'static CategoryLayout {
    &CATEGORY_LAYOUTS[category as usize]
}

fn asset_details(entry: &JsonObject) -> MapResult<CatalogDetails> {
    Ok(CatalogDetails::Asset {
        asset_name: entry.string("assetName")?,
    })
}

fn game_mode_details(entry: &JsonObject) -> MapResult<CatalogDetails> {
    Ok(CatalogDetails::GameMode {
        asset_path: entry.string("assetPath")?,
        asset_name: entry.string("assetName")?,
    })
}

fn act_details(entry: &JsonObject) -> MapResult<CatalogDetails> {
    Ok(CatalogDetails::Act {
        parent_id: entry.string("parentId")?,
        act_type: entry.string("type")?,
        is_active: entry.scalar_text("isActive")?,
    })
}

/// Map one category's raw entry array into catalog entries
pub fn map_catalog(category: CatalogCategory, entries: &Value) -> MapResult<Vec<CatalogEntry>> {
    let layout = layout_for(category);
    let items = JsonObject::array_of_objects(format!("$.{}", layout.upstream_key), entries)?;
    map_entries(layout, &items)
}

/// Map the whole content document. Every category key must be present.
pub fn map_content(document: &Value) -> MapResult<ContentCatalog> {
    let root = JsonObject::root(document)?;
    let version = root.optional_string("version")?;

    let sections = CATEGORY_LAYOUTS
        .iter()
        .map(|layout| {
            let items = root.objects(layout.upstream_key)?;
            Ok(CatalogSection {
                category: layout.category,
                entries: map_entries(layout, &items)?,
            })
        })
        .collect::<MapResult<Vec<_>>>()?;

    let catalog = ContentCatalog { version, sections };
    debug!(
        "Mapped content catalog version={:?} entries={}",
        catalog.version,
        catalog.total_entries()
    );
    Ok(catalog)
}

fn map_entries(layout: &CategoryLayout, items: &[JsonObject]) -> MapResult<Vec<CatalogEntry>> {
    items.iter().map(|item| map_entry(layout, item)).collect()
}

fn map_entry(layout: &CategoryLayout, entry: &JsonObject) -> MapResult<CatalogEntry> {
    let name = entry.string("name")?;
    let id = entry.string("id")?;
    let details = (layout.details)(entry)?;

    let localized_names = if entry.has("name") {
        let names = entry.object("localizedNames")?;
        Some(Localization::try_from_fn(|language| names.string(language.tag()))?)
    } else {
        None
    };

    Ok(CatalogEntry {
        category: layout.category,
        name,
        id,
        details,
        localized_names,
    })
}
