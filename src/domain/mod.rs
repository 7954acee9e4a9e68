// Typed records produced by the mapper. Plain owned values; callers own persistence.

pub mod account;
pub mod catalog;
pub mod match_record;

pub use account::{Account, Leaderboard, LeaderboardPlayer, MatchHistory, MatchHistoryEntry};
pub use catalog::{
    CatalogCategory, CatalogDetails, CatalogEntry, CatalogSection, ContentCatalog, Language,
    Localization,
};
pub use match_record::{
    DamageEvent, Economy, FinishingDamage, KillEvent, Location, MatchInfo, MatchRecord, Player,
    PlayerLocation, PlayerRoundStats, PlayerStats, Round, Team,
};
