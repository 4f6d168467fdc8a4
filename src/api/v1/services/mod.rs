//! Channel ingestion pipeline: URL resolution, video discovery, Shorts
//! filtering and the orchestration tying them together.

pub mod channel_resolver;
pub mod duration;
pub mod ingestion;
pub mod video_discovery;
pub mod video_enrichment;

pub use ingestion::IngestionService;
