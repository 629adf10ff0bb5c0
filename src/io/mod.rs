//! External interfaces
//!
//! - `catalog` - Dataset file loading
//! - `feed` - Position/heading/answer ingestion (JSONL)
//! - `persistence` - Durable answered-status storage
//! - `render` - Render intent egress (JSONL)

pub mod catalog;
pub mod feed;
pub mod persistence;
pub mod render;

pub use persistence::{FilePersistence, MemoryPersistence, PersistenceAdapter};
pub use render::{CollectingSink, JsonlRenderSink, RenderSink};
