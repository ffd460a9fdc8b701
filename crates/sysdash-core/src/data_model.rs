//! Data Model: subsystem records, ResultSet, Report
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The seven independent subsystems, in orchestration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Sms,
    Mms,
    VoiceCall,
    Email,
    Billing,
    Support,
    Incident,
}

impl Subsystem {
    pub const ALL: [Subsystem; 7] = [
        Subsystem::Sms,
        Subsystem::Mms,
        Subsystem::VoiceCall,
        Subsystem::Email,
        Subsystem::Billing,
        Subsystem::Support,
        Subsystem::Incident,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Mms => "MMS",
            Self::VoiceCall => "voice call",
            Self::Email => "email",
            Self::Billing => "billing",
            Self::Support => "support",
            Self::Incident => "incident",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsData {
    pub country: String,
    pub bandwidth: String,
    pub response_time: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmsData {
    pub country: String,
    pub provider: String,
    pub bandwidth: String,
    pub response_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCallData {
    pub country: String,
    pub current_load: i64,
    pub response_time: i64,
    pub provider: String,
    pub connection_stability: f32,
    pub purity_ttfb: i64,
    pub call_duration: i64,
    /// Present in the voice feed, meaning undocumented.
    pub unknown_field: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailData {
    pub country: String,
    pub provider: String,
    pub delivery_time: i64,
}

/// Feature flags decoded from the billing bitmask, bit 0 first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingData {
    pub create_customer: bool,
    pub purchase: bool,
    pub payout: bool,
    pub recurring: bool,
    pub fraud_control: bool,
    pub checkout_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportData {
    pub topic: String,
    pub active_tickets: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentData {
    pub topic: String,
    pub status: String,
}

/// What a single stage hands back to the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput {
    /// `[by provider, by country]`
    Sms(Vec<Vec<SmsData>>),
    /// `[by provider, by country]`
    Mms(Vec<Vec<MmsData>>),
    VoiceCall(Vec<VoiceCallData>),
    /// Country code → `[fastest, slowest]`
    Email(BTreeMap<String, Vec<Vec<EmailData>>>),
    Billing(BillingData),
    /// `[load level, waiting time in minutes]`
    Support(Vec<i64>),
    Incident(Vec<IncidentData>),
    /// The subsystem answered with a non-success status. Zero records, no error.
    Unavailable { status: u16 },
}

/// Ranked result of every subsystem. Each slot is written by exactly one stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub sms: Vec<Vec<SmsData>>,
    pub mms: Vec<Vec<MmsData>>,
    pub voice_call: Vec<VoiceCallData>,
    pub email: BTreeMap<String, Vec<Vec<EmailData>>>,
    pub billing: BillingData,
    pub support: Vec<i64>,
    pub incident: Vec<IncidentData>,
}

impl ResultSet {
    pub fn apply(&mut self, output: StageOutput) {
        match output {
            StageOutput::Sms(views) => self.sms = views,
            StageOutput::Mms(views) => self.mms = views,
            StageOutput::VoiceCall(records) => self.voice_call = records,
            StageOutput::Email(buckets) => self.email = buckets,
            StageOutput::Billing(flags) => self.billing = flags,
            StageOutput::Support(summary) => self.support = summary,
            StageOutput::Incident(records) => self.incident = records,
            StageOutput::Unavailable { .. } => {}
        }
    }
}

/// Top-level value returned for every `/systemsstatus` request.
///
/// `status` is false iff a stage failed; `data` then holds whatever was
/// collected before the failure and `error` carries its description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub status: bool,
    pub data: ResultSet,
    pub error: String,
}

impl Report {
    pub fn ok(data: ResultSet) -> Self {
        Self {
            status: true,
            data,
            error: String::new(),
        }
    }

    pub fn failed(data: ResultSet, error: impl Into<String>) -> Self {
        Self {
            status: false,
            data,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_json_shape() {
        let report = Report::ok(ResultSet::default());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["status"], json!(true));
        assert_eq!(value["error"], json!(""));
        for key in ["sms", "mms", "voice_call", "email", "billing", "support", "incident"] {
            assert!(value["data"].get(key).is_some(), "missing slot {}", key);
        }
        assert_eq!(value["data"]["billing"]["checkout_page"], json!(false));
    }

    #[test]
    fn test_apply_unavailable_leaves_slot_untouched() {
        let mut set = ResultSet::default();
        set.apply(StageOutput::Support(vec![2, 30]));
        set.apply(StageOutput::Unavailable { status: 503 });

        assert_eq!(set.support, vec![2, 30]);
        assert!(set.incident.is_empty());
    }
}
