use serde_json::Value;

use super::json::JsonObject;
use super::MapResult;
use crate::domain::{Account, Leaderboard, LeaderboardPlayer, MatchHistory, MatchHistoryEntry};

pub fn map_account(payload: &Value) -> MapResult<Account> {
    let root = JsonObject::root(payload)?;
    Ok(Account {
        puuid: root.string("puuid")?,
        game_name: root.optional_string("gameName")?,
        tag_line: root.optional_string("tagLine")?,
    })
}

/// Only `history` is required; the owning `puuid` is carried when upstream sends it
pub fn map_match_history(payload: &Value) -> MapResult<MatchHistory> {
    let root = JsonObject::root(payload)?;
    let history = root
        .objects("history")?
        .iter()
        .map(|entry| {
            Ok(MatchHistoryEntry {
                match_id: entry.string("matchId")?,
                game_start_time_millis: entry.int("gameStartTimeMillis")?,
                queue_id: entry.string("queueId")?,
            })
        })
        .collect::<MapResult<Vec<_>>>()?;

    Ok(MatchHistory {
        puuid: root.optional_string("puuid")?,
        history,
    })
}

/// Ranked leaderboard for one act. Anonymized players come without a Riot id.
pub fn map_leaderboard(payload: &Value) -> MapResult<Leaderboard> {
    let root = JsonObject::root(payload)?;
    let players = root
        .objects("players")?
        .iter()
        .map(|player| {
            Ok(LeaderboardPlayer {
                puuid: player.string("puuid")?,
                game_name: player.optional_string("gameName")?,
                tag_line: player.optional_string("tagLine")?,
                leaderboard_rank: player.int("leaderboardRank")?,
                ranked_rating: player.int("rankedRating")?,
                number_of_wins: player.int("numberOfWins")?,
            })
        })
        .collect::<MapResult<Vec<_>>>()?;

    Ok(Leaderboard {
        act_id: root.string("actId")?,
        shard: root.string("shard")?,
        total_players: root.int("totalPlayers")?,
        players,
    })
}
