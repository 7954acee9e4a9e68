use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A fully normalized match: metadata, teams, players and every round in upstream order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_info: MatchInfo,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
}

impl MatchRecord {
    pub fn match_id(&self) -> &str {
        &self.match_info.match_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: String,
    pub map_id: String,
    pub game_length_millis: i64,
    pub game_start_millis: i64,
    pub provisioning_flow_id: String,
    pub is_completed: bool,
    pub custom_game_name: String,
    pub queue_id: String,
    pub game_mode: String,
    pub is_ranked: bool,
    pub season_id: String,
}

impl MatchInfo {
    /// Wall-clock start of the match, if the epoch millis are in range
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.game_start_millis)
    }

    pub fn game_length(&self) -> Duration {
        Duration::milliseconds(self.game_length_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub won: bool,
    pub rounds_played: i64,
    pub rounds_won: i64,
    pub num_points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub puuid: String,
    /// Absent for anonymized players
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_line: Option<String>,
    pub team_id: String,
    pub party_id: String,
    pub character_id: String,
    pub competitive_tier: i64,
    pub player_card: String,
    pub player_title: String,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub score: i64,
    pub rounds_played: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub playtime_millis: i64,
}

/// Map-plane coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

/// Where a player stood and looked at a given instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLocation {
    pub puuid: String,
    pub view_radians: f64,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_num: i64,
    pub round_result: String,
    pub round_ceremony: String,
    pub winning_team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bomb_planter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bomb_defuser: Option<String>,
    pub plant_round_time: i64,
    pub plant_site: String,
    pub plant_location: Location,
    /// Snapshot taken when the spike was planted; `None` if no plant happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_player_locations: Option<Vec<PlayerLocation>>,
    pub defuse_round_time: i64,
    pub defuse_location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defuse_player_locations: Option<Vec<PlayerLocation>>,
    pub round_result_code: String,
    pub player_stats: Vec<PlayerRoundStats>,
}

impl Round {
    pub fn was_planted(&self) -> bool {
        self.bomb_planter.is_some()
    }

    pub fn was_defused(&self) -> bool {
        self.bomb_defuser.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRoundStats {
    pub puuid: String,
    pub score: i64,
    pub damage: Vec<DamageEvent>,
    pub economy: Economy,
    pub kills: Vec<KillEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub receiver: String,
    pub damage: i64,
    pub leg_shots: i64,
    pub body_shots: i64,
    pub head_shots: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub loadout_value: i64,
    pub weapon: String,
    pub armor: String,
    pub remaining: i64,
    pub spent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub time_since_game_start_millis: i64,
    pub time_since_round_start_millis: i64,
    pub killer: String,
    pub victim: String,
    pub victim_location: Location,
    pub player_locations: Vec<PlayerLocation>,
    pub finishing_damage: FinishingDamage,
    /// Assisting players in upstream order; the same puuid may appear more than once
    pub assistants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingDamage {
    pub damage_type: String,
    pub damage_item: String,
    pub is_secondary_fire_mode: bool,
}
