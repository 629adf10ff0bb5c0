//! Business logic
//!
//! - `point_store` - Catalog ownership and answered status
//! - `scanner` - Nearest-unanswered-point search
//! - `engine` - Quiz state machine and event loop
//! - `judge` - Answer validation and persistence trigger
//! - `compass` - Directional indicator angles

pub mod compass;
pub mod engine;
pub mod judge;
pub mod point_store;
pub mod scanner;

pub use engine::Engine;
pub use judge::AnswerJudge;
pub use point_store::PointStore;
