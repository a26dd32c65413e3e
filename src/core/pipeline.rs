use crate::core::format::{format_report, parse_relationships};
use crate::core::lookup::build_lookup;
use crate::core::{ConfigProvider, Pipeline, RawInputs, ReportResult, Storage};
use crate::utils::error::{ReportError, Result};

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn read_input(path: &str) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| ReportError::InputFileError {
            path: path.to_string(),
            source,
        })
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    fn extract(&self) -> Result<RawInputs> {
        // 兩個輸入檔一次讀入記憶體，資料量小不需要串流
        tracing::debug!("Reading lookup file: {}", self.config.lookup_path());
        let lookup_text = Self::read_input(self.config.lookup_path())?;

        tracing::debug!(
            "Reading relationship file: {}",
            self.config.relationship_path()
        );
        let relationship_text = Self::read_input(self.config.relationship_path())?;

        Ok(RawInputs {
            lookup_text,
            relationship_text,
        })
    }

    fn transform(&self, inputs: RawInputs) -> Result<ReportResult> {
        // 建立查詢表
        let (lookup, lookup_skipped) =
            build_lookup(&inputs.lookup_text, self.config.lookup_variant())?;
        tracing::info!(
            "🔎 Lookup table built: {} entries ({} malformed rows skipped)",
            lookup.len(),
            lookup_skipped
        );

        if lookup.is_empty() {
            tracing::warn!("⚠️ Lookup table is empty, every key will be unresolved");
        }

        // 解析關聯記錄並排版
        let (records, relationship_skipped) = parse_relationships(&inputs.relationship_text);
        tracing::info!(
            "🔗 Parsed {} relationship records ({} malformed lines skipped)",
            records.len(),
            relationship_skipped
        );

        let mut result = format_report(
            &lookup,
            &records,
            self.config.report_mode(),
            self.config.score_threshold(),
        );
        result.stats.skipped_malformed = lookup_skipped + relationship_skipped;

        tracing::info!(
            "📝 Report formatted: {} lines ({} group headers), {} low-score records dropped",
            result.stats.lines_emitted,
            result.stats.group_headers,
            result.stats.skipped_low_score
        );

        Ok(result)
    }

    fn load(&self, result: ReportResult) -> Result<String> {
        let output_file = self.config.output_file();
        let output_path = format!("{}/{}", self.config.output_path(), output_file);

        // 整份報告一次寫出，覆蓋舊檔
        tracing::debug!(
            "Writing report ({} bytes) to {}",
            result.report.len(),
            output_path
        );
        self.storage.write_file(output_file, result.report.as_bytes())?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LookupVariant, ReportMode};
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: RefCell::new(HashMap::new()),
            }
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                ReportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        lookup_path: String,
        relationship_path: String,
        mode: ReportMode,
        variant: LookupVariant,
        threshold: f64,
    }

    impl MockConfig {
        fn flat() -> Self {
            Self {
                lookup_path: "unused.csv".to_string(),
                relationship_path: "unused.tsv".to_string(),
                mode: ReportMode::Flat,
                variant: LookupVariant::BillTitle,
                threshold: 0.2,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn lookup_path(&self) -> &str {
            &self.lookup_path
        }

        fn lookup_variant(&self) -> LookupVariant {
            self.variant
        }

        fn relationship_path(&self) -> &str {
            &self.relationship_path
        }

        fn report_mode(&self) -> ReportMode {
            self.mode
        }

        fn score_threshold(&self) -> f64 {
            self.threshold
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_file(&self) -> &str {
            "report.txt"
        }
    }

    #[test]
    fn test_transform_flat_mode() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::flat());

        let inputs = RawInputs {
            lookup_text: "id,name\nA,Alpha\nB,Beta\n".to_string(),
            relationship_text: "A\tB\t0.5\nA\tC\t0.1\n".to_string(),
        };

        let result = pipeline.transform(inputs).unwrap();
        assert_eq!(result.report, "Alpha,Beta\n");
        assert_eq!(result.stats.skipped_low_score, 1);
        assert_eq!(result.stats.skipped_malformed, 0);
    }

    #[test]
    fn test_transform_counts_malformed_from_both_inputs() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::flat());

        let inputs = RawInputs {
            lookup_text: "id,name\nA,Alpha\nB\n".to_string(),
            relationship_text: "A\tB\t0.5\nA\tB\n".to_string(),
        };

        let result = pipeline.transform(inputs).unwrap();
        assert_eq!(result.stats.skipped_malformed, 2);
    }

    #[test]
    fn test_load_writes_report_through_storage() {
        let storage = MockStorage::new();
        let config = MockConfig::flat();

        let result = ReportResult {
            report: "Alpha,Beta\n".to_string(),
            stats: Default::default(),
        };

        let pipeline = ReportPipeline::new(storage, config);
        let output_path = pipeline.load(result).unwrap();

        assert_eq!(output_path, "test_output/report.txt");

        let ReportPipeline { storage, .. } = pipeline;
        assert_eq!(
            storage.get_file("report.txt").unwrap(),
            b"Alpha,Beta\n".to_vec()
        );
    }

    #[test]
    fn test_extract_missing_input_names_the_file() {
        let config = MockConfig {
            lookup_path: "definitely-not-here.csv".to_string(),
            ..MockConfig::flat()
        };
        let pipeline = ReportPipeline::new(MockStorage::new(), config);

        let err = pipeline.extract().unwrap_err();
        assert!(err.to_string().contains("definitely-not-here.csv"));
    }
}
