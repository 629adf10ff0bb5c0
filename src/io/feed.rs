//! Position, heading and answer ingestion
//!
//! The platform shell feeds the engine JSONL lines on an async reader:
//!
//! ```text
//! {"type": "position", "lat": 41.38, "lng": 2.17}
//! {"type": "heading", "degrees": 120.5}
//! {"type": "heading", "degrees": null}
//! {"type": "answer", "point_id": "p1", "answer": "1298"}
//! {"type": "position_error", "terminal": true}
//! ```
//!
//! Headings arrive already normalized to degrees clockwise from north; it is
//! the shell's job to convert whichever raw orientation signal the platform
//! exposes (absolute compass heading or the relative device-orientation
//! fallback). Malformed lines are logged and skipped.

use crate::domain::types::{EngineEvent, GeoPoint, PointId};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedLine {
    Position { lat: f64, lng: f64 },
    Heading {
        #[serde(default)]
        degrees: Option<f64>,
    },
    Answer { point_id: String, answer: String },
    PositionError {
        #[serde(default)]
        terminal: bool,
    },
}

impl FeedLine {
    pub fn into_event(self) -> EngineEvent {
        match self {
            FeedLine::Position { lat, lng } => EngineEvent::Position(GeoPoint::new(lat, lng)),
            FeedLine::Heading { degrees } => {
                // Whatever convention the shell normalized from, the engine
                // consumes [0, 360) clockwise from north
                EngineEvent::Heading(degrees.map(|d| d.rem_euclid(360.0)))
            }
            FeedLine::Answer { point_id, answer } => {
                EngineEvent::Answer { point_id: PointId(point_id), answer }
            }
            FeedLine::PositionError { terminal } => EngineEvent::PositionLost { terminal },
        }
    }
}

/// Read JSONL lines until EOF, forwarding parsed events to the engine
pub async fn run_feed<R>(reader: R, event_tx: mpsc::Sender<EngineEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<FeedLine>(line) {
                    Ok(feed_line) => {
                        if event_tx.send(feed_line.into_event()).await.is_err() {
                            break; // Engine gone
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "feed_line_invalid");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "feed_read_error");
                break;
            }
        }
    }

    info!("feed_closed");
}
