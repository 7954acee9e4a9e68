//! Upstream endpoint paths and header names for the Riot API.
//! Paths are joined onto the configured base URL by `Endpoints`.

use reqwest::Url;

pub const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

pub const DEFAULT_RIOT_API_URL: &str = "https://na.api.riotgames.com";
pub const DEFAULT_API_KEY_ENV: &str = "RIOT_API_KEY";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const MATCH_PATH: &str = "/val/match/v1/matches";
pub const MATCH_LIST_PATH: &str = "/val/match/v1/matchlists/by-puuid";
pub const ACCOUNT_BY_RIOT_ID_PATH: &str = "/riot/account/v1/accounts/by-riot-id";
pub const CONTENT_PATH: &str = "/val/content/v1/contents";
pub const LEADERBOARD_PATH: &str = "/val/ranked/v1/leaderboards/by-act";

/// Builds fully-qualified upstream URLs from a base URL
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn match_data(&self, match_id: &str) -> String {
        self.with_segments(MATCH_PATH, &[match_id])
    }

    pub fn match_list(&self, puuid: &str) -> String {
        self.with_segments(MATCH_LIST_PATH, &[puuid])
    }

    pub fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> String {
        self.with_segments(ACCOUNT_BY_RIOT_ID_PATH, &[game_name, tag_line])
    }

    pub fn content(&self) -> String {
        format!("{}{}", self.base_url, CONTENT_PATH)
    }

    pub fn leaderboard(&self, act_id: &str) -> String {
        self.with_segments(LEADERBOARD_PATH, &[act_id])
    }

    /// Append caller-supplied values as percent-encoded path segments
    fn with_segments(&self, path: &str, segments: &[&str]) -> String {
        let base = format!("{}{}", self.base_url, path);
        let mut url = match Url::parse(&base) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => return format!("{}/{}", base, segments.join("/")),
        };
        if let Ok(mut path_segments) = url.path_segments_mut() {
            path_segments.extend(segments);
        }
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let endpoints = Endpoints::new("http://mockserver:1080/");
        assert_eq!(
            endpoints.match_data("7b2412ad-d530-4bec-a112-01b171bb4959"),
            "http://mockserver:1080/val/match/v1/matches/7b2412ad-d530-4bec-a112-01b171bb4959"
        );
        assert_eq!(
            endpoints.content(),
            "http://mockserver:1080/val/content/v1/contents"
        );
    }

    #[test]
    fn test_account_and_leaderboard_paths() {
        let endpoints = Endpoints::new("http://mockserver:1080");
        assert_eq!(
            endpoints.account_by_riot_id("Obli", "0003"),
            "http://mockserver:1080/riot/account/v1/accounts/by-riot-id/Obli/0003"
        );
        assert_eq!(
            endpoints.leaderboard("EPISODE_1_ACT_1"),
            "http://mockserver:1080/val/ranked/v1/leaderboards/by-act/EPISODE_1_ACT_1"
        );
        assert_eq!(
            endpoints.match_list("abc"),
            "http://mockserver:1080/val/match/v1/matchlists/by-puuid/abc"
        );
    }

    #[test]
    fn test_riot_id_segments_are_escaped() {
        let endpoints = Endpoints::new("http://mockserver:1080");
        assert_eq!(
            endpoints.account_by_riot_id("hahas das", "LAS"),
            "http://mockserver:1080/riot/account/v1/accounts/by-riot-id/hahas%20das/LAS"
        );
        assert_eq!(
            endpoints.account_by_riot_id("a/b", "#1"),
            "http://mockserver:1080/riot/account/v1/accounts/by-riot-id/a%2Fb/%231"
        );
    }
}
