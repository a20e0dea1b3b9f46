use anyhow::Context;
use clap::Parser;
use titanic_survival::core::presentation;
use titanic_survival::utils::error::ErrorSeverity;
use titanic_survival::utils::{logger, validation::Validate};
use titanic_survival::{CliConfig, LocalArtifacts, PredictError, PredictionApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting titanic-survival CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli
        .app_config()
        .and_then(|config| config.validate().map(|_| config))
        .unwrap_or_else(|e| exit_with(e));

    let today = chrono::Local::now().date_naive();
    let form = cli.form(today).unwrap_or_else(|e| exit_with(e));

    // 模型只載入一次，之後唯讀
    let base = cli.artifact_base();
    tracing::debug!("Resolving artifacts against {}", base.display());
    let app = PredictionApp::load(&LocalArtifacts::new(base), &config)
        .await
        .unwrap_or_else(|e| exit_with(e));

    let view = app.handle(&form, today).unwrap_or_else(|e| exit_with(e));

    if cli.json {
        let mut output = serde_json::to_value(&view).context("serializing prediction")?;
        if cli.show_sample {
            output["sample"] = serde_json::to_value(app.preview()).context("serializing sample")?;
        }
        if cli.explain {
            output["explanation"] = presentation::explanation().into();
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", config.app.title);
    println!();
    if cli.show_sample {
        println!("{}", app.preview());
        println!();
    }
    println!("{}", view);
    if cli.explain {
        println!();
        println!("{}", presentation::explanation());
    }

    Ok(())
}

fn exit_with(e: PredictError) -> ! {
    tracing::error!(
        "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2, // 輸入錯誤
        ErrorSeverity::High => 1,                       // 設定錯誤
        ErrorSeverity::Critical => 3,                   // 模型或資料集無法使用
    };
    std::process::exit(exit_code);
}
