pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, PipelineKind, RunConfig};

pub use crate::adapters::{GeminiChatSession, GeminiClient};
pub use crate::app::pipelines::{EmailPipeline, ReviewPipeline};
pub use crate::core::etl::EtlEngine;
pub use crate::core::throttle::{FixedDelay, NoDelay};
pub use crate::domain::model::{EmailRow, ReviewRow, Sentiment};
pub use crate::domain::ports::{ChatSession, Pipeline};
pub use crate::utils::error::{EtlError, Result};
