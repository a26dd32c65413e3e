use crate::config::{DEFAULT_OUTPUT_FILE, DEFAULT_SCORE_THRESHOLD};
use crate::core::ConfigProvider;
use crate::domain::model::{LookupVariant, ReportMode};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_path, validate_score_threshold, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub lookup: LookupConfig,
    pub relationships: RelationshipsConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
    pub mode: ReportMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub path: String,
    pub variant: LookupVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipsConfig {
    pub path: String,
    pub score_threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("lookup.path", &self.lookup.path)?;
        validate_path("relationships.path", &self.relationships.path)?;
        validate_path("output.path", &self.output.path)?;
        validate_score_threshold("relationships.score_threshold", self.score_threshold())?;

        if let Some(monitoring) = &self.monitoring {
            if let Some(format) = &monitoring.log_format {
                let valid_formats = ["compact", "json"];
                if !valid_formats.contains(&format.as_str()) {
                    return Err(ReportError::InvalidConfigValueError {
                        field: "monitoring.log_format".to_string(),
                        value: format.clone(),
                        reason: format!(
                            "Unsupported format. Valid formats: {}",
                            valid_formats.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn score_threshold(&self) -> f64 {
        self.relationships
            .score_threshold
            .unwrap_or(DEFAULT_SCORE_THRESHOLD)
    }

    pub fn output_file(&self) -> &str {
        self.output.file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn lookup_path(&self) -> &str {
        &self.lookup.path
    }

    fn lookup_variant(&self) -> LookupVariant {
        self.lookup.variant
    }

    fn relationship_path(&self) -> &str {
        &self.relationships.path
    }

    fn report_mode(&self) -> ReportMode {
        self.report.mode
    }

    fn score_threshold(&self) -> f64 {
        self.score_threshold()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_file(&self) -> &str {
        self.output_file()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
