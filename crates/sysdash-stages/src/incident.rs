use async_trait::async_trait;
use sysdash_core::ordering::insertion_sort_by;
use sysdash_core::{
    IncidentData, RawRecordSource, Result, RunContext, SourcePayload, Stage, StageOutput,
    Subsystem,
};

/// Incident API: JSON array of `{topic, status}`, sorted by status so that
/// "active" lands before "closed". Equal statuses keep their API order.
pub struct IncidentStage {
    source: Box<dyn RawRecordSource>,
}

impl IncidentStage {
    pub fn new(source: Box<dyn RawRecordSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Stage for IncidentStage {
    fn id(&self) -> &'static str {
        "incident.http.v1"
    }

    fn subsystem(&self) -> Subsystem {
        Subsystem::Incident
    }

    async fn run(&self, _ctx: &RunContext) -> Result<StageOutput> {
        let bytes = match self.source.fetch().await? {
            SourcePayload::Records(bytes) => bytes,
            SourcePayload::Unavailable { status } => return Ok(StageOutput::Unavailable { status }),
        };

        let mut incidents: Vec<IncidentData> = serde_json::from_slice(&bytes)?;
        insertion_sort_by(&mut incidents, |a, b| a.status < b.status);

        Ok(StageOutput::Incident(incidents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysdash_core::StaticSource;

    #[tokio::test]
    async fn test_equal_status_keeps_input_order() {
        let body = r#"[
            {"topic": "Billing isn't allowed in US", "status": "closed"},
            {"topic": "Wrong SMS delivery time", "status": "active"},
            {"topic": "Support overload", "status": "closed"},
            {"topic": "Voice call drop", "status": "active"},
            {"topic": "MMS connection stability", "status": "closed"}
        ]"#;
        let stage = IncidentStage::new(Box::new(StaticSource::records(body)));

        let StageOutput::Incident(incidents) = stage.run(&RunContext::new()).await.unwrap() else {
            panic!("expected incident output");
        };

        let topics: Vec<&str> = incidents.iter().map(|i| i.topic.as_str()).collect();
        assert_eq!(
            topics,
            vec![
                "Wrong SMS delivery time",
                "Voice call drop",
                "Billing isn't allowed in US",
                "Support overload",
                "MMS connection stability",
            ]
        );
    }

    #[tokio::test]
    async fn test_unavailable() {
        let stage = IncidentStage::new(Box::new(StaticSource::unavailable(502)));
        assert_eq!(
            stage.run(&RunContext::new()).await.unwrap(),
            StageOutput::Unavailable { status: 502 }
        );
    }
}
