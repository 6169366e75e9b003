use crate::config::PipelineKind;
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional job file describing one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub job: JobSection,
    pub throttle: Option<ThrottleSection>,
    pub model: Option<ModelSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSection {
    pub pipeline: PipelineKind,
    pub input: Option<String>,
    pub output: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleSection {
    pub delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    pub base_url: Option<String>,
}

impl JobConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_BASE_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn delay_seconds(&self) -> Option<u64> {
        self.throttle.as_ref().and_then(|t| t.delay_seconds)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| m.base_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_job() {
        let toml_content = r#"
[job]
pipeline = "reviews"
input = "reviews.txt"
output = "out/transformed_reviews.csv"

[throttle]
delay_seconds = 0
"#;

        let config = JobConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.job.pipeline, PipelineKind::Reviews);
        assert_eq!(config.job.output.as_deref(), Some("out/transformed_reviews.csv"));
        assert!(config.job.delimiter.is_none());
        assert_eq!(config.delay_seconds(), Some(0));
        assert!(config.base_url().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GENAI_ETL_TEST_BASE_URL", "http://127.0.0.1:9999");

        let toml_content = r#"
[job]
pipeline = "emails"

[model]
base_url = "${GENAI_ETL_TEST_BASE_URL}"
"#;

        let config = JobConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), Some("http://127.0.0.1:9999"));

        std::env::remove_var("GENAI_ETL_TEST_BASE_URL");
    }

    #[test]
    fn test_unknown_env_var_left_as_is() {
        let toml_content = r#"
[job]
pipeline = "emails"
input = "${GENAI_ETL_SURELY_UNSET_VAR}"
"#;

        let config = JobConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.job.input.as_deref(), Some("${GENAI_ETL_SURELY_UNSET_VAR}"));
    }

    #[test]
    fn test_unknown_pipeline_is_rejected() {
        let err = JobConfig::from_toml_str("[job]\npipeline = \"tweets\"\n").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }

    #[test]
    fn test_job_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[job]\npipeline = \"emails\"\ndelimiter = \"===\"\n")
            .unwrap();

        let config = JobConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.job.pipeline, PipelineKind::Emails);
        assert_eq!(config.job.delimiter.as_deref(), Some("==="));
    }
}
