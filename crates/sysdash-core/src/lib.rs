//! Sysdash Core: data model, raw sources, Stage trait and Runner
//!
//! The report pipeline is a fixed sequence of stages, one per subsystem.
//!
//! ```text
//! RawRecordSource → parse → filter (CountryDirectory, allow-list) → rank → ResultSet slot
//! ```
//!
//! [`PipelineRunner`] runs the stages sequentially and stops at the first
//! propagated failure.

pub mod context;
pub mod data_model;
pub mod directory;
pub mod error;
pub mod ordering;
pub mod runner;
pub mod source;
pub mod stage;

pub use context::RunContext;
pub use data_model::{
    BillingData, EmailData, IncidentData, MmsData, Report, ResultSet, SmsData, StageOutput,
    Subsystem, SupportData, VoiceCallData,
};
pub use directory::{CountryDirectory, CountryRecord};
pub use error::{Result, SysdashError};
pub use runner::PipelineRunner;
pub use source::{FileSource, HttpSource, RawRecordSource, SourcePayload, StaticSource};
pub use stage::Stage;
