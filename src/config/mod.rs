pub mod cli;
pub mod toml_config;

use crate::adapters::gemini::DEFAULT_BASE_URL;
use crate::config::toml_config::JobConfig;
use crate::core::reader::{EMAIL_DELIMITER, REVIEW_DELIMITER};
use crate::core::throttle::DEFAULT_RECORD_DELAY;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_delimiter, validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    Reviews,
    Emails,
}

impl PipelineKind {
    pub fn default_input(&self) -> &'static str {
        match self {
            PipelineKind::Reviews => "reviews.txt",
            PipelineKind::Emails => "email.txt",
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self {
            PipelineKind::Reviews => "transformed_reviews.csv",
            PipelineKind::Emails => "transformed_emails.csv",
        }
    }

    pub fn default_delimiter(&self) -> &'static str {
        match self {
            PipelineKind::Reviews => REVIEW_DELIMITER,
            PipelineKind::Emails => EMAIL_DELIMITER,
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub pipeline: PipelineKind,
    pub input_path: String,
    pub output_path: String,
    pub delimiter: String,
    pub record_delay: Duration,
    pub base_url: String,
}

impl RunConfig {
    pub fn defaults(pipeline: PipelineKind) -> Self {
        Self {
            pipeline,
            input_path: pipeline.default_input().to_string(),
            output_path: pipeline.default_output().to_string(),
            delimiter: pipeline.default_delimiter().to_string(),
            record_delay: DEFAULT_RECORD_DELAY,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_job(job: &JobConfig) -> Self {
        let mut config = Self::defaults(job.job.pipeline);
        if let Some(input) = &job.job.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &job.job.output {
            config.output_path = output.clone();
        }
        if let Some(delimiter) = &job.job.delimiter {
            config.delimiter = delimiter.clone();
        }
        if let Some(secs) = job.delay_seconds() {
            config.record_delay = Duration::from_secs(secs);
        }
        if let Some(base_url) = job.base_url() {
            config.base_url = base_url.to_string();
        }
        config
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output", &self.output_path)?;
        validate_delimiter("delimiter", &self.delimiter)?;
        validate_url("base_url", &self.base_url)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "genai-etl")]
#[command(about = "Run customer reviews or emails through Gemini and save the results as CSV")]
pub struct CliConfig {
    /// Which pipeline to run; required unless --config names one
    #[arg(value_enum)]
    pub pipeline: Option<PipelineKind>,

    /// TOML job file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Input text file")]
    pub input: Option<String>,

    #[arg(short, long, help = "Output CSV file (overwritten)")]
    pub output: Option<String>,

    #[arg(long, help = "Literal string separating records")]
    pub delimiter: Option<String>,

    #[arg(long, help = "Seconds to wait after each review")]
    pub delay_secs: Option<u64>,

    #[arg(long, help = "Gemini API base URL")]
    pub base_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Combines the optional job file with command line overrides.
    pub fn resolve(&self, job: Option<&JobConfig>) -> Result<RunConfig> {
        let mut config = match (job, self.pipeline) {
            (Some(job), _) => RunConfig::from_job(job),
            (None, Some(kind)) => RunConfig::defaults(kind),
            (None, None) => {
                return Err(crate::utils::error::EtlError::MissingConfigError {
                    field: "pipeline (reviews or emails)".to_string(),
                })
            }
        };

        // 命令列參數優先於設定檔
        if let Some(kind) = self.pipeline {
            if kind != config.pipeline {
                tracing::info!("🔧 Pipeline overridden to: {:?}", kind);
                let from_job = config.clone();
                config = RunConfig::defaults(kind);
                config.record_delay = from_job.record_delay;
                config.base_url = from_job.base_url;
            }
        }
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(delimiter) = &self.delimiter {
            config.delimiter = delimiter.clone();
        }
        if let Some(secs) = self.delay_secs {
            config.record_delay = Duration::from_secs(secs);
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_per_pipeline() {
        let cli = CliConfig::parse_from(["genai-etl", "emails"]);
        let config = cli.resolve(None).unwrap();

        assert_eq!(config, RunConfig::defaults(PipelineKind::Emails));
        assert_eq!(config.input_path, "email.txt");
        assert_eq!(config.delimiter, "---END OF EMAIL---");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "genai-etl",
            "reviews",
            "--input",
            "data/in.txt",
            "--delay-secs",
            "0",
            "--base-url",
            "http://localhost:8080",
        ]);
        let config = cli.resolve(None).unwrap();

        assert_eq!(config.input_path, "data/in.txt");
        assert_eq!(config.output_path, "transformed_reviews.csv");
        assert_eq!(config.record_delay, Duration::ZERO);
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_pipeline_is_config_error() {
        let cli = CliConfig::parse_from(["genai-etl"]);
        assert!(cli.resolve(None).is_err());
    }

    #[test]
    fn test_flags_override_job_file() {
        let job = JobConfig::from_toml_str(
            "[job]\npipeline = \"reviews\"\noutput = \"job.csv\"\n[throttle]\ndelay_seconds = 5\n",
        )
        .unwrap();
        let cli = CliConfig::parse_from(["genai-etl", "--output", "cli.csv"]);

        let config = cli.resolve(Some(&job)).unwrap();

        assert_eq!(config.pipeline, PipelineKind::Reviews);
        assert_eq!(config.output_path, "cli.csv");
        assert_eq!(config.record_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_delimiter_fails_validation() {
        let cli = CliConfig::parse_from(["genai-etl", "reviews", "--delimiter", ""]);
        let config = cli.resolve(None).unwrap();
        assert!(config.validate().is_err());
    }
}
