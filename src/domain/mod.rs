//! Core domain types and pure logic
//!
//! - `types` - Points of interest, session state, engine events
//! - `geo` - Great-circle distance and bearing math
//! - `error` - Typed failure taxonomy
//! - `render` - Render intents emitted toward the presentation layer

pub mod error;
pub mod geo;
pub mod render;
pub mod types;
