//! Pipeline Runner: runs every stage in order and assembles the Report
//!
//! Sequential and fail-fast: the first stage returning `Err` stops the run.
//! Slots filled before the failure stay in the report, later slots keep
//! their zero value.
use crate::context::RunContext;
use crate::data_model::{Report, ResultSet, StageOutput};
use crate::stage::Stage;
use std::time::Instant;
use tracing::Instrument;

pub struct PipelineRunner {
    stages: Vec<Box<dyn Stage>>,
    pipeline_id: String,
}

impl PipelineRunner {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        let pipeline_id = stages
            .iter()
            .map(|s| s.id().split('.').next().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self {
            stages,
            pipeline_id,
        }
    }

    pub async fn run(&self, ctx: &RunContext) -> Report {
        let span = tracing::info_span!("report", run_id = %ctx.run_id, pipeline = %self.pipeline_id);
        self.run_stages(ctx).instrument(span).await
    }

    async fn run_stages(&self, ctx: &RunContext) -> Report {
        let mut data = ResultSet::default();

        for stage in &self.stages {
            let start = Instant::now();

            let output = match stage.run(ctx).await {
                Ok(output) => output,
                Err(err) => {
                    tracing::error!(
                        stage = stage.id(),
                        "error receiving data about {} system: {}",
                        stage.subsystem(),
                        err
                    );
                    return Report::failed(data, err.to_string());
                }
            };

            if let StageOutput::Unavailable { status } = output {
                tracing::warn!(
                    stage = stage.id(),
                    "{} system answered with status {}, slot left empty",
                    stage.subsystem(),
                    status
                );
            }

            tracing::debug!(
                stage = stage.id(),
                latency_ms = start.elapsed().as_millis() as u64,
                "stage complete"
            );
            data.apply(output);
        }

        tracing::info!(elapsed_ms = ctx.elapsed_ms(), "report assembled");
        Report::ok(data)
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }
}
