use crate::domain::model::{LookupVariant, RawInputs, ReportMode, ReportResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn lookup_path(&self) -> &str;
    fn lookup_variant(&self) -> LookupVariant;
    fn relationship_path(&self) -> &str;
    fn report_mode(&self) -> ReportMode;
    fn score_threshold(&self) -> f64;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<RawInputs>;
    fn transform(&self, inputs: RawInputs) -> Result<ReportResult>;
    fn load(&self, result: ReportResult) -> Result<String>;
}
