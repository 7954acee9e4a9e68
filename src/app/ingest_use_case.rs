use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::{HttpClientPort, HttpFailure};
use crate::common::constants::{Endpoints, RIOT_TOKEN_HEADER};
use crate::domain::{Account, ContentCatalog, Leaderboard, MatchHistory, MatchRecord};
use crate::mapper::{self, MapResult, StructuralError};
use crate::observability::metrics;
use crate::status::{self, FetchOutcome, RpcCode, RpcStatus};

/// Fetches upstream documents and maps them into domain records.
///
/// Every operation is one GET with no retry. A non-OK outcome aborts with the translated
/// `RpcStatus`; a structurally broken body aborts with `Internal`.
pub struct RiotIngestUseCase {
    http: Arc<dyn HttpClientPort>,
    endpoints: Endpoints,
    api_key: String,
}

impl RiotIngestUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, endpoints: Endpoints, api_key: String) -> Self {
        Self {
            http,
            endpoints,
            api_key,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_match_data(&self, match_id: &str) -> Result<MatchRecord, RpcStatus> {
        let url = self.endpoints.match_data(match_id);
        let record = self.fetch_and_map("match", &url, mapper::map_match).await?;
        info!(
            "Match {} mapped: players={} rounds={} length={}s",
            record.match_id(),
            record.players.len(),
            record.rounds.len(),
            record.match_info.game_length().num_seconds()
        );
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<Account, RpcStatus> {
        let url = self.endpoints.account_by_riot_id(game_name, tag_line);
        self.fetch_and_map("account", &url, mapper::map_account).await
    }

    #[instrument(skip(self))]
    pub async fn get_player_matches(&self, puuid: &str) -> Result<MatchHistory, RpcStatus> {
        let url = self.endpoints.match_list(puuid);
        self.fetch_and_map("matchlist", &url, mapper::map_match_history)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_content_data(&self) -> Result<ContentCatalog, RpcStatus> {
        let url = self.endpoints.content();
        let catalog = self.fetch_and_map("content", &url, mapper::map_content).await?;
        info!(
            "Content catalog mapped: sections={} entries={}",
            catalog.sections.len(),
            catalog.total_entries()
        );
        Ok(catalog)
    }

    #[instrument(skip(self))]
    pub async fn get_leaderboard(&self, act_id: &str) -> Result<Leaderboard, RpcStatus> {
        let url = self.endpoints.leaderboard(act_id);
        self.fetch_and_map("leaderboard", &url, mapper::map_leaderboard)
            .await
    }

    async fn fetch_and_map<T>(
        &self,
        section: &'static str,
        url: &str,
        map: fn(&Value) -> MapResult<T>,
    ) -> Result<T, RpcStatus> {
        let payload = self.fetch_json(section, url).await?;
        match map(&payload) {
            Ok(record) => {
                metrics::mapper::record_mapped(section);
                Ok(record)
            }
            Err(e) => {
                metrics::mapper::structural_error(section);
                warn!("Upstream {} payload is malformed: {}", section, e);
                Err(structural_status(&e))
            }
        }
    }

    async fn fetch_json(&self, section: &'static str, url: &str) -> Result<Value, RpcStatus> {
        debug!("GET {}", url);
        let headers = [(RIOT_TOKEN_HEADER, self.api_key.as_str())];
        let started = Instant::now();

        let response = match self.http.get(url, &headers).await {
            Ok(response) => response,
            Err(failure) => {
                // A rejected status outranks the unreadable body that came with it
                let outcome = match failure {
                    HttpFailure::Transport(e) => FetchOutcome::Transport(e),
                    HttpFailure::Body { status, .. }
                        if status::code_for_http_status(status) != RpcCode::Ok =>
                    {
                        FetchOutcome::Status(status)
                    }
                    body @ HttpFailure::Body { .. } => FetchOutcome::Unhandled(body.to_string()),
                };
                let status = status::translate_outcome(&outcome);
                metrics::sources::request_error(section, status.code.as_str());
                warn!("Upstream {} request failed: {}", section, status);
                return Err(status);
            }
        };
        metrics::sources::request_duration(section, started.elapsed().as_secs_f64());

        let status = status::translate_outcome(&FetchOutcome::Status(response.status));
        if !status.is_ok() {
            metrics::sources::request_error(section, status.code.as_str());
            warn!("Upstream {} request rejected: {}", section, status);
            return Err(status);
        }

        metrics::sources::request_success(section);
        metrics::sources::payload_bytes(section, response.bytes.len());

        serde_json::from_slice(&response.bytes).map_err(|e| {
            let status = status::translate_outcome(&FetchOutcome::Unhandled(format!(
                "body is not JSON (content-type {:?}): {}",
                response.content_type, e
            )));
            warn!("Upstream {} body is not JSON: {}", section, status);
            status
        })
    }
}

fn structural_status(error: &StructuralError) -> RpcStatus {
    RpcStatus::new(
        RpcCode::Internal,
        format!("malformed upstream payload: {}", error),
    )
}
