use crate::allowlist::MESSAGING_PROVIDERS;
use crate::filter::RecordFilter;
use crate::ranking::provider_and_country_views;
use async_trait::async_trait;
use std::sync::Arc;
use sysdash_core::{
    CountryDirectory, MmsData, RawRecordSource, Result, RunContext, SourcePayload, Stage,
    StageOutput, Subsystem,
};

/// MMS API: JSON array of `{country, provider, bandwidth, response_time}`.
pub struct MmsStage {
    source: Box<dyn RawRecordSource>,
    filter: RecordFilter,
}

impl MmsStage {
    pub fn new(source: Box<dyn RawRecordSource>, directory: Arc<CountryDirectory>) -> Self {
        Self {
            source,
            filter: RecordFilter::new(directory, &MESSAGING_PROVIDERS),
        }
    }

    fn validate(&self, records: Vec<MmsData>) -> Vec<MmsData> {
        records
            .into_iter()
            .filter_map(|mut record| {
                record.country = self.filter.admit(&record.country, &record.provider)?;
                Some(record)
            })
            .collect()
    }
}

#[async_trait]
impl Stage for MmsStage {
    fn id(&self) -> &'static str {
        "mms.http.v1"
    }

    fn subsystem(&self) -> Subsystem {
        Subsystem::Mms
    }

    async fn run(&self, _ctx: &RunContext) -> Result<StageOutput> {
        let bytes = match self.source.fetch().await? {
            SourcePayload::Records(bytes) => bytes,
            SourcePayload::Unavailable { status } => return Ok(StageOutput::Unavailable { status }),
        };

        let decoded: Vec<MmsData> = serde_json::from_slice(&bytes)?;
        let records = self.validate(decoded);
        tracing::debug!(kept = records.len(), source = %self.source.describe(), "mms records validated");

        Ok(StageOutput::Mms(provider_and_country_views(
            &records,
            |r: &MmsData| r.provider.as_str(),
            |r: &MmsData| r.country.as_str(),
        )))
    }
}
