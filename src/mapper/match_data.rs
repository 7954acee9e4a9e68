use serde_json::Value;
use tracing::debug;

use super::json::JsonObject;
use super::MapResult;
use crate::domain::{
    DamageEvent, Economy, FinishingDamage, KillEvent, Location, MatchInfo, MatchRecord, Player,
    PlayerLocation, PlayerRoundStats, PlayerStats, Round, Team,
};

/// Map a raw match payload (`matchInfo`, `players`, `teams`, `roundResults`) into a `MatchRecord`
pub fn map_match(payload: &Value) -> MapResult<MatchRecord> {
    let root = JsonObject::root(payload)?;

    let match_info = map_match_info(&root.object("matchInfo")?)?;
    let teams = root
        .objects("teams")?
        .iter()
        .map(map_team)
        .collect::<MapResult<Vec<_>>>()?;
    let players = root
        .objects("players")?
        .iter()
        .map(map_player)
        .collect::<MapResult<Vec<_>>>()?;
    let rounds = root
        .objects("roundResults")?
        .iter()
        .map(map_round)
        .collect::<MapResult<Vec<_>>>()?;

    debug!(
        "Mapped match {}: teams={} players={} rounds={}",
        match_info.match_id,
        teams.len(),
        players.len(),
        rounds.len()
    );

    Ok(MatchRecord {
        match_info,
        teams,
        players,
        rounds,
    })
}

fn map_match_info(info: &JsonObject) -> MapResult<MatchInfo> {
    Ok(MatchInfo {
        match_id: info.string("matchId")?,
        map_id: info.string("mapId")?,
        game_length_millis: info.int("gameLengthMillis")?,
        game_start_millis: info.int("gameStartMillis")?,
        provisioning_flow_id: info.string("provisioningFlowId")?,
        is_completed: info.boolean("isCompleted")?,
        custom_game_name: info.string("customGameName")?,
        queue_id: info.string("queueId")?,
        game_mode: info.string("gameMode")?,
        is_ranked: info.boolean("isRanked")?,
        season_id: info.string("seasonId")?,
    })
}

fn map_team(team: &JsonObject) -> MapResult<Team> {
    Ok(Team {
        team_id: team.string("teamId")?,
        won: team.boolean("won")?,
        rounds_played: team.int("roundsPlayed")?,
        rounds_won: team.int("roundsWon")?,
        num_points: team.int("numPoints")?,
    })
}

fn map_player(player: &JsonObject) -> MapResult<Player> {
    let stats = player.object("stats")?;
    Ok(Player {
        puuid: player.string("puuid")?,
        game_name: player.optional_string("gameName")?,
        tag_line: player.optional_string("tagLine")?,
        team_id: player.string("teamId")?,
        party_id: player.string("partyId")?,
        character_id: player.string("characterId")?,
        competitive_tier: player.int("competitiveTier")?,
        player_card: player.string("playerCard")?,
        player_title: player.string("playerTitle")?,
        stats: PlayerStats {
            score: stats.int("score")?,
            rounds_played: stats.int("roundsPlayed")?,
            kills: stats.int("kills")?,
            deaths: stats.int("deaths")?,
            assists: stats.int("assists")?,
            playtime_millis: stats.int("playtimeMillis")?,
        },
    })
}

fn map_round(round: &JsonObject) -> MapResult<Round> {
    let plant_player_locations = round
        .optional_objects("plantPlayerLocations")?
        .map(|locations| map_location_list(&locations))
        .transpose()?;
    let defuse_player_locations = round
        .optional_objects("defusePlayerLocations")?
        .map(|locations| map_location_list(&locations))
        .transpose()?;

    Ok(Round {
        round_num: round.int("roundNum")?,
        round_result: round.string("roundResult")?,
        round_ceremony: round.string("roundCeremony")?,
        winning_team: round.string("winningTeam")?,
        bomb_planter: round.optional_string("bombPlanter")?,
        bomb_defuser: round.optional_string("bombDefuser")?,
        plant_round_time: round.int("plantRoundTime")?,
        plant_site: round.string("plantSite")?,
        plant_location: map_location(&round.object("plantLocation")?)?,
        plant_player_locations,
        defuse_round_time: round.int("defuseRoundTime")?,
        defuse_location: map_location(&round.object("defuseLocation")?)?,
        defuse_player_locations,
        round_result_code: round.string("roundResultCode")?,
        player_stats: round
            .objects("playerStats")?
            .iter()
            .map(map_player_round_stats)
            .collect::<MapResult<Vec<_>>>()?,
    })
}

fn map_location(location: &JsonObject) -> MapResult<Location> {
    Ok(Location {
        x: location.float("x")?,
        y: location.float("y")?,
    })
}

/// Map `[{puuid, viewRadians, location: {x, y}}]` snapshots. Shared by plant, defuse and
/// per-kill locations so all three read the same fields the same way.
pub fn map_location_list(entries: &[JsonObject]) -> MapResult<Vec<PlayerLocation>> {
    entries
        .iter()
        .map(|entry| {
            Ok(PlayerLocation {
                puuid: entry.string("puuid")?,
                view_radians: entry.float("viewRadians")?,
                location: map_location(&entry.object("location")?)?,
            })
        })
        .collect()
}

fn map_player_round_stats(stats: &JsonObject) -> MapResult<PlayerRoundStats> {
    let economy = stats.object("economy")?;
    Ok(PlayerRoundStats {
        puuid: stats.string("puuid")?,
        score: stats.int("score")?,
        damage: stats
            .objects("damage")?
            .iter()
            .map(map_damage)
            .collect::<MapResult<Vec<_>>>()?,
        economy: Economy {
            loadout_value: economy.int("loadoutValue")?,
            weapon: economy.string("weapon")?,
            armor: economy.string("armor")?,
            remaining: economy.int("remaining")?,
            spent: economy.int("spent")?,
        },
        kills: stats
            .objects("kills")?
            .iter()
            .map(map_kill)
            .collect::<MapResult<Vec<_>>>()?,
    })
}

fn map_damage(damage: &JsonObject) -> MapResult<DamageEvent> {
    Ok(DamageEvent {
        receiver: damage.string("receiver")?,
        damage: damage.int("damage")?,
        leg_shots: damage.int("legshots")?,
        body_shots: damage.int("bodyshots")?,
        head_shots: damage.int("headshots")?,
    })
}

fn map_kill(kill: &JsonObject) -> MapResult<KillEvent> {
    let finishing = kill.object("finishingDamage")?;
    Ok(KillEvent {
        time_since_game_start_millis: kill.int("timeSinceGameStartMillis")?,
        time_since_round_start_millis: kill.int("timeSinceRoundStartMillis")?,
        killer: kill.string("killer")?,
        victim: kill.string("victim")?,
        victim_location: map_location(&kill.object("victimLocation")?)?,
        player_locations: map_location_list(&kill.objects("playerLocations")?)?,
        finishing_damage: FinishingDamage {
            damage_type: finishing.string("damageType")?,
            damage_item: finishing.string("damageItem")?,
            is_secondary_fire_mode: finishing.boolean("isSecondaryFireMode")?,
        },
        assistants: kill.strings("assistants")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::StructuralError;
    use serde_json::json;

    fn kill(assistants: Value) -> Value {
        json!({
            "timeSinceGameStartMillis": 132254,
            "timeSinceRoundStartMillis": 27254,
            "killer": "p2",
            "victim": "p1",
            "victimLocation": { "x": -642, "y": 8120 },
            "playerLocations": [
                { "puuid": "p2", "viewRadians": 2.7340894, "location": { "x": -1120, "y": 7456 } }
            ],
            "finishingDamage": {
                "damageType": "Weapon",
                "damageItem": "ee8e8d15-496b-07ac-e5f6-8fae5d4c7b1a",
                "isSecondaryFireMode": false
            },
            "assistants": assistants
        })
    }

    fn round(num: i64) -> Value {
        json!({
            "roundNum": num,
            "roundResult": "Eliminated",
            "roundCeremony": "CeremonyDefault",
            "winningTeam": "Blue",
            "plantRoundTime": 0,
            "plantPlayerLocations": null,
            "plantLocation": { "x": 0, "y": 0 },
            "plantSite": "",
            "defuseRoundTime": 0,
            "defusePlayerLocations": null,
            "defuseLocation": { "x": 0, "y": 0 },
            "roundResultCode": "Elimination",
            "playerStats": [
                {
                    "puuid": "p1",
                    "score": 0,
                    "damage": [
                        { "receiver": "p2", "damage": 36, "legshots": 0, "bodyshots": 1, "headshots": 0 }
                    ],
                    "economy": {
                        "loadoutValue": 800,
                        "weapon": "29a0cfab-485b-f5d5-779a-b59f85e204a8",
                        "armor": "",
                        "remaining": 0,
                        "spent": 800
                    },
                    "kills": []
                },
                {
                    "puuid": "p2",
                    "score": 214,
                    "damage": [],
                    "economy": {
                        "loadoutValue": 800,
                        "weapon": "",
                        "armor": "",
                        "remaining": 0,
                        "spent": 800
                    },
                    "kills": [kill(json!(["A", "B"]))]
                }
            ]
        })
    }

    fn player(puuid: &str, score: i64) -> Value {
        json!({
            "puuid": puuid,
            "gameName": "Obli",
            "tagLine": "0003",
            "teamId": "Blue",
            "partyId": "party-1",
            "characterId": "dade69b4-4f5a-8528-247b-219e5a1facd6",
            "stats": {
                "score": score,
                "roundsPlayed": 24,
                "kills": 17,
                "deaths": 15,
                "assists": 4,
                "playtimeMillis": 2356481
            },
            "competitiveTier": 12,
            "playerCard": "card-1",
            "playerTitle": "title-1"
        })
    }

    fn sample_match() -> Value {
        let mut planted = round(2);
        planted["bombPlanter"] = json!("p2");
        planted["plantRoundTime"] = json!(41234);
        planted["plantSite"] = json!("A");
        planted["plantLocation"] = json!({ "x": -2381, "y": 8312 });
        planted["plantPlayerLocations"] = json!([
            { "puuid": "p1", "viewRadians": 1.5, "location": { "x": -2400, "y": 8300 } },
            { "puuid": "p2", "viewRadians": 0.25, "location": { "x": -2381, "y": 8312 } }
        ]);

        json!({
            "matchInfo": {
                "matchId": "7b2412ad-d530-4bec-a112-01b171bb4959",
                "mapId": "/Game/Maps/Ascent/Ascent",
                "gameLengthMillis": 2356481,
                "gameStartMillis": 1598846227315_i64,
                "provisioningFlowId": "Matchmaking",
                "isCompleted": true,
                "customGameName": "",
                "queueId": "competitive",
                "gameMode": "/Game/GameModes/Bomb/BombGameMode.BombGameMode_C",
                "isRanked": true,
                "seasonId": "97b6e739-44cc-ffa7-49ad-398ba502ceb0"
            },
            "players": [player("p1", 3461), player("p2", 6162)],
            "teams": [
                { "teamId": "Red", "won": false, "roundsPlayed": 24, "roundsWon": 11, "numPoints": 11 },
                { "teamId": "Blue", "won": true, "roundsPlayed": 24, "roundsWon": 13, "numPoints": 13 }
            ],
            "roundResults": [round(0), round(1), planted]
        })
    }

    #[test]
    fn test_map_match_end_to_end() {
        let record = map_match(&sample_match()).unwrap();

        assert_eq!(record.match_id(), "7b2412ad-d530-4bec-a112-01b171bb4959");
        assert!(record.match_info.is_completed);
        assert_eq!(record.players[0].stats.score, 3461);
        assert_eq!(record.players[1].stats.score, 6162);
        assert_eq!(record.teams[1].rounds_won, 13);
        assert_eq!(record.rounds[2].plant_location.x, -2381.0);
        assert_eq!(record.rounds[0].player_stats[0].economy.spent, 800);
        assert_eq!(record.rounds[0].player_stats[0].damage[0].leg_shots, 0);

        let kill = &record.rounds[0].player_stats[1].kills[0];
        assert_eq!(kill.time_since_game_start_millis, 132254);
        assert_eq!(kill.victim_location.x, -642.0);
        assert_eq!(kill.player_locations[0].view_radians, 2.7340894);
        assert_eq!(kill.finishing_damage.damage_type, "Weapon");
    }

    #[test]
    fn test_round_order_is_preserved() {
        let record = map_match(&sample_match()).unwrap();
        let nums: Vec<i64> = record.rounds.iter().map(|r| r.round_num).collect();
        assert_eq!(nums, vec![0, 1, 2]);
    }

    #[test]
    fn test_bomb_planter_presence() {
        let record = map_match(&sample_match()).unwrap();
        assert_eq!(record.rounds[0].bomb_planter, None);
        assert_eq!(record.rounds[2].bomb_planter.as_deref(), Some("p2"));
        assert!(record.rounds[2].was_planted());

        let mut payload = sample_match();
        payload["roundResults"][0]["bombPlanter"] = json!("");
        payload["roundResults"][0]["bombDefuser"] = json!("");
        let record = map_match(&payload).unwrap();
        assert_eq!(record.rounds[0].bomb_planter, None);
        assert_eq!(record.rounds[0].bomb_defuser, None);
    }

    #[test]
    fn test_player_location_snapshots_only_when_present() {
        let record = map_match(&sample_match()).unwrap();
        assert!(record.rounds[0].plant_player_locations.is_none());
        assert!(record.rounds[0].defuse_player_locations.is_none());

        let plant = record.rounds[2].plant_player_locations.as_ref().unwrap();
        assert_eq!(plant.len(), 2);
        assert_eq!(plant[0].puuid, "p1");
        assert_eq!(plant[1].puuid, "p2");

        let mut payload = sample_match();
        payload["roundResults"][1]["defusePlayerLocations"] = json!([]);
        let record = map_match(&payload).unwrap();
        assert!(record.rounds[1].defuse_player_locations.is_none());
    }

    #[test]
    fn test_assistants_keep_order_and_duplicates() {
        let record = map_match(&sample_match()).unwrap();
        assert_eq!(
            record.rounds[0].player_stats[1].kills[0].assistants,
            vec!["A".to_string(), "B".to_string()]
        );

        let mut payload = sample_match();
        payload["roundResults"][1]["playerStats"][1]["kills"][0] = kill(json!(["B", "A", "B"]));
        let record = map_match(&payload).unwrap();
        assert_eq!(
            record.rounds[1].player_stats[1].kills[0].assistants,
            vec!["B", "A", "B"]
        );
    }

    #[test]
    fn test_anonymized_player_has_no_riot_id() {
        let mut payload = sample_match();
        payload["players"][0]["gameName"] = json!("");
        payload["players"][0]
            .as_object_mut()
            .unwrap()
            .remove("tagLine");
        let record = map_match(&payload).unwrap();
        assert_eq!(record.players[0].game_name, None);
        assert_eq!(record.players[0].tag_line, None);
        assert_eq!(record.players[1].game_name.as_deref(), Some("Obli"));
    }

    #[test]
    fn test_missing_required_key_fails_with_path() {
        let mut payload = sample_match();
        payload["roundResults"][2]["playerStats"][0]["economy"]
            .as_object_mut()
            .unwrap()
            .remove("weapon");
        let err = map_match(&payload).unwrap_err();
        assert_eq!(
            err,
            StructuralError::MissingKey {
                path: "$.roundResults[2].playerStats[0].economy.weapon".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_snapshot_is_not_skipped() {
        let mut payload = sample_match();
        payload["roundResults"][2]["plantPlayerLocations"][1]["location"] = json!("nowhere");
        let err = map_match(&payload).unwrap_err();
        assert_eq!(err.path(), "$.roundResults[2].plantPlayerLocations[1].location");
    }

    #[test]
    fn test_missing_match_info_field() {
        let mut payload = sample_match();
        payload["matchInfo"].as_object_mut().unwrap().remove("seasonId");
        let err = map_match(&payload).unwrap_err();
        assert_eq!(err.path(), "$.matchInfo.seasonId");
    }

    #[test]
    fn test_started_at_from_epoch_millis() {
        let record = map_match(&sample_match()).unwrap();
        let started = record.match_info.started_at().unwrap();
        assert_eq!(started.timestamp_millis(), 1598846227315);
    }
}
