use async_trait::async_trait;
use sysdash_core::{
    RawRecordSource, Result, RunContext, SourcePayload, Stage, StageOutput, Subsystem,
    SupportData, SysdashError,
};

const MINUTES_PER_HOUR: i64 = 60;
const TICKETS_PER_HOUR: i64 = 18;

/// `[load level, waiting minutes]` for a total number of active tickets.
///
/// Minutes per ticket is truncated to a whole number before multiplying.
/// A waiting time outside the i64 range is an `Overflow` error.
pub fn summarize(total_active_tickets: i64) -> Result<Vec<i64>> {
    let minutes_per_ticket = MINUTES_PER_HOUR / TICKETS_PER_HOUR;
    let waiting_time = minutes_per_ticket
        .checked_mul(total_active_tickets)
        .ok_or_else(|| {
            SysdashError::Overflow(format!(
                "waiting time for {} active tickets",
                total_active_tickets
            ))
        })?;

    let load = match total_active_tickets {
        t if t < 9 => 1,
        9..=16 => 2,
        _ => 3,
    };

    Ok(vec![load, waiting_time])
}

/// Support API: JSON array of `{topic, active_tickets}`.
pub struct SupportStage {
    source: Box<dyn RawRecordSource>,
}

impl SupportStage {
    pub fn new(source: Box<dyn RawRecordSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Stage for SupportStage {
    fn id(&self) -> &'static str {
        "support.http.v1"
    }

    fn subsystem(&self) -> Subsystem {
        Subsystem::Support
    }

    async fn run(&self, _ctx: &RunContext) -> Result<StageOutput> {
        let bytes = match self.source.fetch().await? {
            SourcePayload::Records(bytes) => bytes,
            SourcePayload::Unavailable { status } => return Ok(StageOutput::Unavailable { status }),
        };

        let tickets: Vec<SupportData> = serde_json::from_slice(&bytes)?;
        let total = tickets
            .iter()
            .try_fold(0i64, |acc, t| acc.checked_add(t.active_tickets))
            .ok_or_else(|| {
                SysdashError::Overflow(format!(
                    "active ticket total across {} topics",
                    tickets.len()
                ))
            })?;
        tracing::debug!(topics = tickets.len(), total, "support tickets summed");

        Ok(StageOutput::Support(summarize(total)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysdash_core::StaticSource;

    #[test]
    fn test_load_levels_and_waiting_time() {
        assert_eq!(summarize(10).unwrap(), vec![2, 30]);
        assert_eq!(summarize(8).unwrap(), vec![1, 24]);
        assert_eq!(summarize(9).unwrap(), vec![2, 27]);
        assert_eq!(summarize(16).unwrap(), vec![2, 48]);
        assert_eq!(summarize(17).unwrap(), vec![3, 51]);
        assert_eq!(summarize(0).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_waiting_time_overflow_is_error() {
        assert_eq!(summarize(i64::MAX / 3).unwrap(), vec![3, i64::MAX / 3 * 3]);

        let err = summarize(i64::MAX / 2).unwrap_err();
        assert!(matches!(err, SysdashError::Overflow(_)));
        assert!(err.to_string().starts_with("OVERFLOW/"));
    }

    #[tokio::test]
    async fn test_ticket_sum_overflow_is_error() {
        let body = r#"[
            {"topic": "SMS", "active_tickets": 9223372036854775807},
            {"topic": "MMS", "active_tickets": 1}
        ]"#;
        let stage = SupportStage::new(Box::new(StaticSource::records(body)));

        let err = stage.run(&RunContext::new()).await.unwrap_err();
        assert!(err.to_string().starts_with("OVERFLOW/"));
    }

    #[tokio::test]
    async fn test_sums_across_topics() {
        let body = r#"[
            {"topic": "SMS", "active_tickets": 3},
            {"topic": "MMS", "active_tickets": 4},
            {"topic": "Billing", "active_tickets": 3}
        ]"#;
        let stage = SupportStage::new(Box::new(StaticSource::records(body)));

        let output = stage.run(&RunContext::new()).await.unwrap();
        assert_eq!(output, StageOutput::Support(vec![2, 30]));
    }
}
