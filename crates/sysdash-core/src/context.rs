//! Run Context: per-request state handed to every stage
use std::time::Instant;

/// Created fresh for every orchestration run; nothing here survives the request.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started: Instant,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
