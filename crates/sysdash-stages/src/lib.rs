//! Sysdash Stages: one fetch → validate → rank stage per subsystem.
//!
//! # Pipeline Flow
//!
//! ```text
//! SMS → MMS → Voice → Email → Billing → Support → Incident
//! file  http  file    file    file      http      http
//! ```
//!
//! Every stage that validates records shares the read-only
//! [`CountryDirectory`] handed to [`default_stages`]. Records with an
//! unknown country code or a provider outside the subsystem's allow-list
//! are dropped without error.

pub mod allowlist;
mod billing;
mod email;
pub mod filter;
mod incident;
mod mms;
pub mod ranking;
mod sms;
mod support;
pub mod text;
mod voice;

pub use billing::{decode_bitmask, BillingStage};
pub use email::EmailStage;
pub use incident::IncidentStage;
pub use mms::MmsStage;
pub use sms::SmsStage;
pub use support::{summarize, SupportStage};
pub use voice::VoiceCallStage;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use sysdash_core::{CountryDirectory, FileSource, HttpSource, Stage};

/// Where each subsystem's raw records live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLocations {
    pub sms_path: PathBuf,
    pub mms_url: String,
    pub voice_path: PathBuf,
    pub email_path: PathBuf,
    pub billing_path: PathBuf,
    pub support_url: String,
    pub incident_url: String,
}

impl Default for SourceLocations {
    fn default() -> Self {
        Self {
            sms_path: PathBuf::from("data/simulator/sms.data"),
            mms_url: "http://127.0.0.1:8383/mms".to_string(),
            voice_path: PathBuf::from("data/simulator/voice.data"),
            email_path: PathBuf::from("data/simulator/email.data"),
            billing_path: PathBuf::from("data/simulator/billing.data"),
            support_url: "http://127.0.0.1:8383/support".to_string(),
            incident_url: "http://127.0.0.1:8383/accendent".to_string(),
        }
    }
}

/// The seven stages in report order.
pub fn default_stages(
    directory: Arc<CountryDirectory>,
    locations: &SourceLocations,
    client: Client,
) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(SmsStage::new(
            Box::new(FileSource::new(&locations.sms_path)),
            directory.clone(),
        )),
        Box::new(MmsStage::new(
            Box::new(HttpSource::new(client.clone(), &locations.mms_url)),
            directory.clone(),
        )),
        Box::new(VoiceCallStage::new(
            Box::new(FileSource::new(&locations.voice_path)),
            directory.clone(),
        )),
        Box::new(EmailStage::new(
            Box::new(FileSource::new(&locations.email_path)),
            directory,
        )),
        Box::new(BillingStage::new(Box::new(FileSource::new(
            &locations.billing_path,
        )))),
        Box::new(SupportStage::new(Box::new(HttpSource::new(
            client.clone(),
            &locations.support_url,
        )))),
        Box::new(IncidentStage::new(Box::new(HttpSource::new(
            client,
            &locations.incident_url,
        )))),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use sysdash_core::Subsystem;

    #[test]
    fn test_default_stages_follow_report_order() {
        let stages = default_stages(
            test_support::directory(),
            &SourceLocations::default(),
            Client::new(),
        );

        let order: Vec<Subsystem> = stages.iter().map(|s| s.subsystem()).collect();
        assert_eq!(order, Subsystem::ALL.to_vec());
    }
}
