pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{LookupVariant, ReportMode};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_score_threshold, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.2;
pub const DEFAULT_OUTPUT_FILE: &str = "relationship_named.output";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rel-report")]
#[command(about = "Joins a lookup CSV with a scored relationship file into a named report")]
pub struct CliConfig {
    /// Lookup CSV with a header row (key column first)
    #[arg(long)]
    pub lookup_path: String,

    /// How lookup display values are derived from each row
    #[arg(long, value_enum, default_value = "bill-title")]
    pub lookup_variant: LookupVariant,

    /// Tab-separated relationship file: left, right, score
    #[arg(long)]
    pub relationship_path: String,

    /// Report layout
    #[arg(long, value_enum, default_value = "grouped")]
    pub mode: ReportMode,

    /// Minimum score (inclusive) for a record to be kept
    #[arg(long, default_value_t = DEFAULT_SCORE_THRESHOLD)]
    pub score_threshold: f64,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase CPU and memory usage")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn lookup_path(&self) -> &str {
        &self.lookup_path
    }

    fn lookup_variant(&self) -> LookupVariant {
        self.lookup_variant
    }

    fn relationship_path(&self) -> &str {
        &self.relationship_path
    }

    fn report_mode(&self) -> ReportMode {
        self.mode
    }

    fn score_threshold(&self) -> f64 {
        self.score_threshold
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("lookup_path", &self.lookup_path)?;
        validate_path("relationship_path", &self.relationship_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("output_file", &self.output_file)?;
        validate_score_threshold("score_threshold", self.score_threshold)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            lookup_path: "bills.csv".to_string(),
            lookup_variant: LookupVariant::BillTitle,
            relationship_path: "relationships.tsv".to_string(),
            mode: ReportMode::Grouped,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            output_path: "./output".to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_empty_lookup_path_rejected() {
        let config = CliConfig {
            lookup_path: String::new(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let config = CliConfig {
            score_threshold: -1.0,
            ..base_config()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            score_threshold: f64::NAN,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_parsing_with_defaults() {
        let config = CliConfig::parse_from([
            "rel-report",
            "--lookup-path",
            "bills.csv",
            "--relationship-path",
            "rel.tsv",
        ]);

        assert_eq!(config.mode, ReportMode::Grouped);
        assert_eq!(config.lookup_variant, LookupVariant::BillTitle);
        assert_eq!(config.score_threshold, DEFAULT_SCORE_THRESHOLD);
        assert_eq!(config.output_file, DEFAULT_OUTPUT_FILE);
    }

    #[test]
    fn test_cli_parsing_flat_mode() {
        let config = CliConfig::parse_from([
            "rel-report",
            "--lookup-path",
            "people.csv",
            "--lookup-variant",
            "person-name",
            "--relationship-path",
            "sponsors.tsv",
            "--mode",
            "flat",
            "--score-threshold",
            "0.5",
        ]);

        assert_eq!(config.mode, ReportMode::Flat);
        assert_eq!(config.lookup_variant, LookupVariant::PersonName);
        assert_eq!(config.score_threshold, 0.5);
    }
}
