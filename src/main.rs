use clap::Parser;
use genai_etl::config::toml_config::JobConfig;
use genai_etl::utils::{logger, validation::Validate};
use genai_etl::{
    CliConfig, EmailPipeline, EtlEngine, EtlError, FixedDelay, GeminiClient, LocalStorage,
    Pipeline, PipelineKind, ReviewPipeline,
};

async fn run_engine<P: Pipeline>(pipeline: P, monitor: bool) -> genai_etl::Result<String> {
    let mut engine = EtlEngine::new_with_monitoring(pipeline, monitor);
    engine.run().await
}

async fn run(cli: &CliConfig) -> genai_etl::Result<String> {
    // 先確認金鑰，再碰任何檔案
    let client = GeminiClient::from_env()?;

    let job = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading job file from: {}", path);
            Some(JobConfig::from_file(path)?)
        }
        None => None,
    };

    let config = cli.resolve(job.as_ref())?;
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);

    let client = client.with_base_url(config.base_url.clone());
    tracing::info!(
        "🚀 Running {:?} pipeline: {} → {} (model {})",
        config.pipeline,
        config.input_path,
        config.output_path,
        client.model()
    );

    let session = client.start_chat();
    let storage = LocalStorage::default();

    let kind = config.pipeline;
    match kind {
        PipelineKind::Reviews => {
            let throttle = FixedDelay(config.record_delay);
            run_engine(ReviewPipeline::new(storage, config, session, throttle), cli.monitor).await
        }
        PipelineKind::Emails => {
            run_engine(EmailPipeline::new(storage, config, session), cli.monitor).await
        }
    }
}

fn report_failure(e: &EtlError) {
    tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting genai-etl");
    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run(&cli).await {
        Ok(output_path) => {
            tracing::info!("✅ Run completed successfully");
            println!("✅ Results saved to: {}", output_path);
        }
        Err(e) => {
            // 所有錯誤一律以 1 結束
            report_failure(&e);
            std::process::exit(1);
        }
    }
}
