use crate::allowlist::EMAIL_PROVIDERS;
use crate::filter::RecordFilter;
use crate::ranking::fastest_and_slowest;
use crate::text::delimited_records;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use sysdash_core::{
    CountryDirectory, EmailData, RawRecordSource, Result, RunContext, SourcePayload, Stage,
    StageOutput, Subsystem,
};

const EMAIL_FIELDS: usize = 3;

/// Email feed: `country;provider;delivery_time` per line.
///
/// Output is keyed by country code; each entry holds the three fastest
/// (after the very fastest) and the three slowest providers.
pub struct EmailStage {
    source: Box<dyn RawRecordSource>,
    filter: RecordFilter,
}

impl EmailStage {
    pub fn new(source: Box<dyn RawRecordSource>, directory: Arc<CountryDirectory>) -> Self {
        Self {
            source,
            filter: RecordFilter::new(directory, &EMAIL_PROVIDERS),
        }
    }

    fn bucket_by_code(&self, text: &str) -> BTreeMap<String, Vec<EmailData>> {
        let mut buckets: BTreeMap<String, Vec<EmailData>> = BTreeMap::new();

        for fields in delimited_records(text, EMAIL_FIELDS) {
            let Ok(delivery_time) = fields[2].parse::<i64>() else {
                continue;
            };
            let Some(country) = self.filter.admit(fields[0], fields[1]) else {
                continue;
            };
            buckets
                .entry(fields[0].to_string())
                .or_default()
                .push(EmailData {
                    country,
                    provider: fields[1].to_string(),
                    delivery_time,
                });
        }

        buckets
    }
}

#[async_trait]
impl Stage for EmailStage {
    fn id(&self) -> &'static str {
        "email.file.v1"
    }

    fn subsystem(&self) -> Subsystem {
        Subsystem::Email
    }

    async fn run(&self, _ctx: &RunContext) -> Result<StageOutput> {
        let bytes = match self.source.fetch().await? {
            SourcePayload::Records(bytes) => bytes,
            SourcePayload::Unavailable { status } => return Ok(StageOutput::Unavailable { status }),
        };

        let buckets = self.bucket_by_code(&String::from_utf8_lossy(&bytes));
        tracing::debug!(countries = buckets.len(), source = %self.source.describe(), "email records bucketed");

        let ranked = buckets
            .into_iter()
            .map(|(code, bucket)| (code, fastest_and_slowest(bucket)))
            .collect();
        Ok(StageOutput::Email(ranked))
    }
}
