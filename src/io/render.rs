//! Render intent egress
//!
//! Intents are written as JSONL (one JSON object per line) either to stdout
//! or to an append-only file, for whatever presentation shell is attached.
//! A write failure is logged and dropped; rendering is best-effort and the
//! engine state has already moved on.

use crate::domain::render::RenderIntent;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{error, info};

pub trait RenderSink {
    fn emit(&mut self, intent: &RenderIntent);
}

enum Target {
    Stdout,
    File(String),
}

/// JSONL sink; `"-"` writes to stdout
pub struct JsonlRenderSink {
    target: Target,
}

impl JsonlRenderSink {
    pub fn new(output: &str) -> Self {
        let target = if output == "-" {
            info!("render_sink_stdout");
            Target::Stdout
        } else {
            info!(file = %output, "render_sink_file");
            Target::File(output.to_string())
        };
        Self { target }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        match &self.target {
            Target::Stdout => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                writeln!(lock, "{}", line)?;
                lock.flush()
            }
            Target::File(path) => {
                let path = Path::new(path);
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}", line)
            }
        }
    }
}

impl RenderSink for JsonlRenderSink {
    fn emit(&mut self, intent: &RenderIntent) {
        let json = match serde_json::to_string(intent) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "render_intent_serialize_failed");
                return;
            }
        };
        if let Err(e) = self.write_line(&json) {
            error!(error = %e, "render_intent_write_failed");
        }
    }
}

/// Buffers every intent; for tests and embedding
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub intents: Vec<RenderIntent>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for CollectingSink {
    fn emit(&mut self, intent: &RenderIntent) {
        self.intents.push(intent.clone());
    }
}
