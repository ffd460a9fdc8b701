use async_trait::async_trait;
use sysdash_core::{
    BillingData, RawRecordSource, Result, RunContext, SourcePayload, Stage, StageOutput,
    Subsystem, SysdashError,
};

/// Decodes a base-2 bitmask; bit 0 is `create_customer`, bit 5 `checkout_page`.
///
/// The mask must fit a signed 8-bit value, so at most seven digits are
/// accepted (an optional sign is tolerated, a negative mask is reinterpreted
/// as its two's complement bits).
pub fn decode_bitmask(text: &str) -> Result<BillingData> {
    let trimmed = text.trim();
    let mask = i8::from_str_radix(trimmed, 2).map_err(|source| SysdashError::Bitmask {
        text: trimmed.to_string(),
        source,
    })? as u8;

    let bit = |i: u8| mask & (1 << i) != 0;
    Ok(BillingData {
        create_customer: bit(0),
        purchase: bit(1),
        payout: bit(2),
        recurring: bit(3),
        fraud_control: bit(4),
        checkout_page: bit(5),
    })
}

/// Billing feed: a single bitmask string.
pub struct BillingStage {
    source: Box<dyn RawRecordSource>,
}

impl BillingStage {
    pub fn new(source: Box<dyn RawRecordSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Stage for BillingStage {
    fn id(&self) -> &'static str {
        "billing.file.v1"
    }

    fn subsystem(&self) -> Subsystem {
        Subsystem::Billing
    }

    async fn run(&self, _ctx: &RunContext) -> Result<StageOutput> {
        let bytes = match self.source.fetch().await? {
            SourcePayload::Records(bytes) => bytes,
            SourcePayload::Unavailable { status } => return Ok(StageOutput::Unavailable { status }),
        };

        let flags = decode_bitmask(&String::from_utf8_lossy(&bytes))?;
        Ok(StageOutput::Billing(flags))
    }
}
