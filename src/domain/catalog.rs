use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of static content published by the content endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogCategory {
    Character,
    Map,
    Chroma,
    Skin,
    SkinLevel,
    Equip,
    GameMode,
    Spray,
    SprayLevel,
    Charm,
    CharmLevel,
    PlayerCard,
    Ceremony,
    PlayerTitle,
    Act,
}

impl CatalogCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogCategory::Character => "character",
            CatalogCategory::Map => "map",
            CatalogCategory::Chroma => "chroma",
            CatalogCategory::Skin => "skin",
            CatalogCategory::SkinLevel => "skin-level",
            CatalogCategory::Equip => "equip",
            CatalogCategory::GameMode => "game-mode",
            CatalogCategory::Spray => "spray",
            CatalogCategory::SprayLevel => "spray-level",
            CatalogCategory::Charm => "charm",
            CatalogCategory::CharmLevel => "charm-level",
            CatalogCategory::PlayerCard => "player-card",
            CatalogCategory::Ceremony => "ceremony",
            CatalogCategory::PlayerTitle => "player-title",
            CatalogCategory::Act => "act",
        }
    }
}

impl fmt::Display for CatalogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-specific payload of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogDetails {
    Asset {
        asset_name: String,
    },
    GameMode {
        asset_path: String,
        asset_name: String,
    },
    Act {
        parent_id: String,
        #[serde(rename = "type")]
        act_type: String,
        /// Kept as text; upstream documents a boolean but does not always send one
        is_active: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub category: CatalogCategory,
    pub name: String,
    pub id: String,
    pub details: CatalogDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_names: Option<Localization>,
}

/// Every entry of one category, in upstream order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub category: CatalogCategory,
    pub entries: Vec<CatalogEntry>,
}

/// The whole content document, one section per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCatalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub sections: Vec<CatalogSection>,
}

impl ContentCatalog {
    pub fn entries(&self, category: CatalogCategory) -> &[CatalogEntry] {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_entries(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

/// The fixed set of locales the content endpoint localizes names into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ar-AE")]
    Arabic,
    #[serde(rename = "de-DE")]
    German,
    #[serde(rename = "en-US")]
    English,
    #[serde(rename = "es-ES")]
    SpanishSpain,
    #[serde(rename = "es-MX")]
    SpanishMexico,
    #[serde(rename = "fr-FR")]
    French,
    #[serde(rename = "id-ID")]
    Indonesian,
    #[serde(rename = "it-IT")]
    Italian,
    #[serde(rename = "ja-JP")]
    Japanese,
    #[serde(rename = "ko-KR")]
    Korean,
    #[serde(rename = "pl-PL")]
    Polish,
    #[serde(rename = "pt-BR")]
    PortugueseBrazil,
    #[serde(rename = "ru-RU")]
    Russian,
    #[serde(rename = "th-TH")]
    Thai,
    #[serde(rename = "tr-TR")]
    Turkish,
    #[serde(rename = "vi-VN")]
    Vietnamese,
    #[serde(rename = "zh-CN")]
    ChineseSimplified,
    #[serde(rename = "zh-TW")]
    ChineseTraditional,
}

impl Language {
    pub const ALL: [Language; 18] = [
        Language::Arabic,
        Language::German,
        Language::English,
        Language::SpanishSpain,
        Language::SpanishMexico,
        Language::French,
        Language::Indonesian,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Polish,
        Language::PortugueseBrazil,
        Language::Russian,
        Language::Thai,
        Language::Turkish,
        Language::Vietnamese,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
    ];

    /// The upstream locale key, e.g. `tr-TR`
    pub fn tag(self) -> &'static str {
        match self {
            Language::Arabic => "ar-AE",
            Language::German => "de-DE",
            Language::English => "en-US",
            Language::SpanishSpain => "es-ES",
            Language::SpanishMexico => "es-MX",
            Language::French => "fr-FR",
            Language::Indonesian => "id-ID",
            Language::Italian => "it-IT",
            Language::Japanese => "ja-JP",
            Language::Korean => "ko-KR",
            Language::Polish => "pl-PL",
            Language::PortugueseBrazil => "pt-BR",
            Language::Russian => "ru-RU",
            Language::Thai => "th-TH",
            Language::Turkish => "tr-TR",
            Language::Vietnamese => "vi-VN",
            Language::ChineseSimplified => "zh-CN",
            Language::ChineseTraditional => "zh-TW",
        }
    }
}

/// Localized names in all 18 languages. Only constructible when complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Language, String>", into = "BTreeMap<Language, String>")]
pub struct Localization {
    names: BTreeMap<Language, String>,
}

impl Localization {
    /// Build a localization by asking `lookup` for every language, stopping at the first error
    pub fn try_from_fn<E>(
        mut lookup: impl FnMut(Language) -> Result<String, E>,
    ) -> Result<Self, E> {
        let mut names = BTreeMap::new();
        for language in Language::ALL {
            names.insert(language, lookup(language)?);
        }
        Ok(Self { names })
    }

    pub fn get(&self, language: Language) -> &str {
        self.names.get(&language).map(String::as_str).unwrap_or_default()
    }
}

impl TryFrom<BTreeMap<Language, String>> for Localization {
    type Error = String;

    fn try_from(names: BTreeMap<Language, String>) -> Result<Self, Self::Error> {
        match Language::ALL.iter().find(|lang| !names.contains_key(lang)) {
            Some(missing) => Err(format!("missing localized name for {}", missing.tag())),
            None => Ok(Self { names }),
        }
    }
}

impl From<Localization> for BTreeMap<Language, String> {
    fn from(localization: Localization) -> Self {
        localization.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localization_serializes_with_locale_tags() {
        let localization =
            Localization::try_from_fn::<()>(|lang| Ok(format!("name-{}", lang.tag()))).unwrap();
        let value = serde_json::to_value(&localization).unwrap();
        assert_eq!(value["tr-TR"], "name-tr-TR");
        assert_eq!(value.as_object().unwrap().len(), 18);
    }

    #[test]
    fn test_incomplete_localization_is_rejected_on_deserialize() {
        let result: Result<Localization, _> =
            serde_json::from_value(serde_json::json!({ "en-US": "Fade" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_catalog_lookup() {
        let catalog = ContentCatalog {
            version: None,
            sections: Vec::new(),
        };
        assert!(catalog.entries(CatalogCategory::Act).is_empty());
        assert_eq!(catalog.total_entries(), 0);
    }
}
