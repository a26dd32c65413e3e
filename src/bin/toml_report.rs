use anyhow::Context;
use clap::Parser;
use rel_report::config::toml_config::TomlConfig;
use rel_report::domain::model::ReportMode;
use rel_report::utils::{logger, validation::Validate};
use rel_report::{LocalStorage, ReportEngine, ReportPipeline};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Relationship report tool with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override report mode from config
    #[arg(long, value_enum)]
    mode: Option<ReportMode>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based report tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(mode) = args.mode {
        config.report.mode = mode;
        tracing::info!("🔧 Report mode overridden to: {:?}", mode);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 建立存儲和管道
    let storage = LocalStorage::new(config.output.path.clone());
    let pipeline = ReportPipeline::new(storage, config);

    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("✅ Report generated successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Report generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                rel_report::utils::error::ErrorSeverity::Low => 0,
                rel_report::utils::error::ErrorSeverity::Medium => 2,
                rel_report::utils::error::ErrorSeverity::High => 1,
                rel_report::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);

    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }

    println!("  Mode: {:?}", config.report.mode);
    println!(
        "  Lookup: {} ({:?})",
        config.lookup.path, config.lookup.variant
    );
    println!("  Relationships: {}", config.relationships.path);
    println!("  Score Threshold: {}", config.score_threshold());
    println!("  Output: {}/{}", config.output.path, config.output_file());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Input Analysis:");
    println!("  Lookup CSV: {}", config.lookup.path);
    println!("  Lookup variant: {:?}", config.lookup.variant);
    println!("  Relationship file: {}", config.relationships.path);

    println!();
    println!("⚙️ Processing Mode:");
    match config.report.mode {
        ReportMode::Grouped => {
            println!("  📑 Grouped: consecutive same-left-key records nest under one header");
        }
        ReportMode::Flat => {
            println!("  📄 Flat: one 'left,right' line per surviving record");
        }
    }
    println!(
        "  🎯 Records below score {} will be dropped",
        config.score_threshold()
    );

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output.path);
    println!("  File: {}", config.output_file());

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
