//! Metrics for the ingest service
//!
//! Recording functions are grouped by phase. Without an installed recorder every call is a
//! no-op, so tests and library users pay nothing unless `init()` runs.

use std::fmt;
use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

use crate::common::error::{IngestError, Result};

/// Every metric name used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Upstream API requests
    UpstreamRequestsSuccess,
    UpstreamRequestsError,
    UpstreamRequestDuration,
    UpstreamPayloadBytes,

    // Mapper
    MapperRecordsMapped,
    MapperStructuralErrors,

    // Archive
    ArchiveRecordsStored,
    ArchiveRecordsDeleted,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::UpstreamRequestsSuccess => "riot_ingest_upstream_requests_success_total",
            MetricName::UpstreamRequestsError => "riot_ingest_upstream_requests_error_total",
            MetricName::UpstreamRequestDuration => "riot_ingest_upstream_request_duration_seconds",
            MetricName::UpstreamPayloadBytes => "riot_ingest_upstream_payload_bytes",
            MetricName::MapperRecordsMapped => "riot_ingest_mapper_records_mapped_total",
            MetricName::MapperStructuralErrors => "riot_ingest_mapper_structural_errors_total",
            MetricName::ArchiveRecordsStored => "riot_ingest_archive_records_stored_total",
            MetricName::ArchiveRecordsDeleted => "riot_ingest_archive_records_deleted_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            UpstreamRequestsSuccess,
            UpstreamRequestsError,
            UpstreamRequestDuration,
            UpstreamPayloadBytes,
            MapperRecordsMapped,
            MapperStructuralErrors,
            ArchiveRecordsStored,
            ArchiveRecordsDeleted,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it twice is an error from the exporter.
pub fn init() -> Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| IngestError::Config(format!("Failed to install Prometheus recorder: {}", e)))?;
    METRICS_HANDLE.set(handle).ok();
    info!("Metrics system initialized");
    Ok(())
}

/// Current metrics in Prometheus text format, if `init()` has run
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Upstream request metrics
// ============================================================================

pub mod sources {
    use super::MetricName;

    pub fn request_success(endpoint: &'static str) {
        ::metrics::counter!(MetricName::UpstreamRequestsSuccess.as_str(), "endpoint" => endpoint).increment(1);
    }

    pub fn request_error(endpoint: &'static str, code: &'static str) {
        ::metrics::counter!(
            MetricName::UpstreamRequestsError.as_str(),
            "endpoint" => endpoint,
            "code" => code
        )
        .increment(1);
    }

    pub fn request_duration(endpoint: &'static str, secs: f64) {
        ::metrics::histogram!(MetricName::UpstreamRequestDuration.as_str(), "endpoint" => endpoint).record(secs);
    }

    pub fn payload_bytes(endpoint: &'static str, bytes: usize) {
        ::metrics::histogram!(MetricName::UpstreamPayloadBytes.as_str(), "endpoint" => endpoint)
            .record(bytes as f64);
    }
}

// ============================================================================
// Mapper metrics
// ============================================================================

pub mod mapper {
    use super::MetricName;

    pub fn record_mapped(section: &'static str) {
        ::metrics::counter!(MetricName::MapperRecordsMapped.as_str(), "section" => section).increment(1);
    }

    pub fn structural_error(section: &'static str) {
        ::metrics::counter!(MetricName::MapperStructuralErrors.as_str(), "section" => section).increment(1);
    }
}

// ============================================================================
// Archive metrics
// ============================================================================

pub mod archive {
    use super::MetricName;

    pub fn record_stored() {
        ::metrics::counter!(MetricName::ArchiveRecordsStored.as_str()).increment(1);
    }

    pub fn record_deleted() {
        ::metrics::counter!(MetricName::ArchiveRecordsDeleted.as_str()).increment(1);
    }
}
