// Application layer: use cases orchestrating ports

pub mod archive_use_case;
pub mod ingest_use_case;
pub mod ports;

pub use archive_use_case::MatchArchive;
pub use ingest_use_case::RiotIngestUseCase;
