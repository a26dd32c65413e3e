pub mod engine;
pub mod format;
pub mod lookup;
pub mod pipeline;

pub use crate::domain::model::{
    LookupTable, LookupVariant, RawInputs, RelationshipRecord, ReportMode, ReportResult,
    ReportStats,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
