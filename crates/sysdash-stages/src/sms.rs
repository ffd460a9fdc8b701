use crate::allowlist::MESSAGING_PROVIDERS;
use crate::filter::RecordFilter;
use crate::ranking::provider_and_country_views;
use crate::text::delimited_records;
use async_trait::async_trait;
use std::sync::Arc;
use sysdash_core::{
    CountryDirectory, RawRecordSource, Result, RunContext, SmsData, SourcePayload, Stage,
    StageOutput, Subsystem,
};

const SMS_FIELDS: usize = 4;

/// SMS feed: `country;bandwidth;response_time;provider` per line.
pub struct SmsStage {
    source: Box<dyn RawRecordSource>,
    filter: RecordFilter,
}

impl SmsStage {
    pub fn new(source: Box<dyn RawRecordSource>, directory: Arc<CountryDirectory>) -> Self {
        Self {
            source,
            filter: RecordFilter::new(directory, &MESSAGING_PROVIDERS),
        }
    }

    fn parse(&self, text: &str) -> Vec<SmsData> {
        delimited_records(text, SMS_FIELDS)
            .filter_map(|fields| {
                let country = self.filter.admit(fields[0], fields[3])?;
                Some(SmsData {
                    country,
                    bandwidth: fields[1].to_string(),
                    response_time: fields[2].to_string(),
                    provider: fields[3].to_string(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl Stage for SmsStage {
    fn id(&self) -> &'static str {
        "sms.file.v1"
    }

    fn subsystem(&self) -> Subsystem {
        Subsystem::Sms
    }

    async fn run(&self, _ctx: &RunContext) -> Result<StageOutput> {
        let bytes = match self.source.fetch().await? {
            SourcePayload::Records(bytes) => bytes,
            SourcePayload::Unavailable { status } => return Ok(StageOutput::Unavailable { status }),
        };

        let records = self.parse(&String::from_utf8_lossy(&bytes));
        tracing::debug!(kept = records.len(), source = %self.source.describe(), "sms records validated");

        Ok(StageOutput::Sms(provider_and_country_views(
            &records,
            |r: &SmsData| r.provider.as_str(),
            |r: &SmsData| r.country.as_str(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::directory;
    use sysdash_core::StaticSource;

    const FEED: &str = "U5;41910;Topol;1040\n\
                        US;36;1576;Rond\n\
                        GB;28;1500;Kildy\n\
                        FR;68;1594;Topolo\n\
                        BL;68;1594;Kildy\n\
                        RU;7;\n\
                        DE;100;200;Unknown";

    async fn run(feed: &str) -> Vec<Vec<SmsData>> {
        let stage = SmsStage::new(Box::new(StaticSource::records(feed)), directory());
        match stage.run(&RunContext::new()).await.unwrap() {
            StageOutput::Sms(views) => views,
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_records_dropped_and_country_substituted() {
        let views = run(FEED).await;

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].len(), 4);
        assert!(views[0].iter().all(|r| r.country.len() > 2));
    }

    #[tokio::test]
    async fn test_two_views_sorted_by_provider_and_country() {
        let views = run(FEED).await;

        let providers: Vec<&str> = views[0].iter().map(|r| r.provider.as_str()).collect();
        assert_eq!(providers, vec!["Kildy", "Kildy", "Rond", "Topolo"]);

        let countries: Vec<&str> = views[1].iter().map(|r| r.country.as_str()).collect();
        assert_eq!(
            countries,
            vec!["France", "Saint Barthélemy", "United Kingdom", "United States"]
        );

        let mut a = views[0].clone();
        let mut b = views[1].clone();
        a.sort_by(|x, y| x.provider.cmp(&y.provider).then(x.country.cmp(&y.country)));
        b.sort_by(|x, y| x.provider.cmp(&y.provider).then(x.country.cmp(&y.country)));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_unavailable_passes_through() {
        let stage = SmsStage::new(Box::new(StaticSource::unavailable(404)), directory());
        let output = stage.run(&RunContext::new()).await.unwrap();
        assert_eq!(output, StageOutput::Unavailable { status: 404 });
    }
}
