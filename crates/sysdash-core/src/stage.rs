//! Stage Trait: one subsystem adapter (fetch → parse/validate → rank)
use crate::context::RunContext;
use crate::data_model::{StageOutput, Subsystem};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Stage: Send + Sync {
    /// Unique stage id (ex: "sms.file.v1")
    fn id(&self) -> &'static str;

    /// Report slot this stage fills
    fn subsystem(&self) -> Subsystem;

    /// Runs the stage once. Invalid records are dropped silently; only
    /// transport, decode and bitmask failures come back as `Err`.
    async fn run(&self, ctx: &RunContext) -> Result<StageOutput>;
}
