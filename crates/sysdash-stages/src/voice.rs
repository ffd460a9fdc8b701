use crate::allowlist::VOICE_PROVIDERS;
use crate::filter::RecordFilter;
use crate::text::delimited_records;
use async_trait::async_trait;
use std::sync::Arc;
use sysdash_core::{
    CountryDirectory, RawRecordSource, Result, RunContext, SourcePayload, Stage, StageOutput,
    Subsystem, VoiceCallData,
};

const VOICE_FIELDS: usize = 8;

/// Voice feed, eight fields per line:
/// `country;load;response_time;provider;stability;ttfb;duration;unknown`.
///
/// No ranking, records keep feed order.
pub struct VoiceCallStage {
    source: Box<dyn RawRecordSource>,
    filter: RecordFilter,
}

impl VoiceCallStage {
    pub fn new(source: Box<dyn RawRecordSource>, directory: Arc<CountryDirectory>) -> Self {
        Self {
            source,
            filter: RecordFilter::new(directory, &VOICE_PROVIDERS),
        }
    }

    fn parse_line(&self, fields: &[&str]) -> Option<VoiceCallData> {
        let current_load = fields[1].parse().ok()?;
        let response_time = fields[2].parse().ok()?;
        let connection_stability: f32 = fields[4].parse().ok()?;
        if !connection_stability.is_finite() {
            return None;
        }
        let purity_ttfb = fields[5].parse().ok()?;
        let call_duration = fields[6].parse().ok()?;
        let unknown_field = fields[7].parse().ok()?;
        let country = self.filter.admit(fields[0], fields[3])?;

        Some(VoiceCallData {
            country,
            current_load,
            response_time,
            provider: fields[3].to_string(),
            connection_stability,
            purity_ttfb,
            call_duration,
            unknown_field,
        })
    }
}

#[async_trait]
impl Stage for VoiceCallStage {
    fn id(&self) -> &'static str {
        "voice.file.v1"
    }

    fn subsystem(&self) -> Subsystem {
        Subsystem::VoiceCall
    }

    async fn run(&self, _ctx: &RunContext) -> Result<StageOutput> {
        let bytes = match self.source.fetch().await? {
            SourcePayload::Records(bytes) => bytes,
            SourcePayload::Unavailable { status } => return Ok(StageOutput::Unavailable { status }),
        };

        let text = String::from_utf8_lossy(&bytes);
        let records: Vec<VoiceCallData> = delimited_records(&text, VOICE_FIELDS)
            .filter_map(|fields| self.parse_line(&fields))
            .collect();
        tracing::debug!(kept = records.len(), source = %self.source.describe(), "voice records validated");

        Ok(StageOutput::VoiceCall(records))
    }
}
