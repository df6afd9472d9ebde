use chrono::{Datelike, Local, Weekday};
use clap::Parser;
use daily_lesson::config::cli::LogFormat;
use daily_lesson::core::{Category, RunReport};
use daily_lesson::utils::logger;
use daily_lesson::{
    resolve_assignments, AppConfig, CliArgs, DeliveryEngine, DryRunSession, GeminiClient,
    LessonError, SmtpSession,
};

fn exit_on_setup_error(e: LessonError) -> ! {
    tracing::error!("❌ Setup failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    match args.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("Starting daily-lesson");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config =
        AppConfig::from_env(args.env_file.as_deref()).unwrap_or_else(|e| exit_on_setup_error(e));
    tracing::debug!("Config: {:?}", config);

    let today = Local::now().date_naive();
    let weekday: Weekday = args.day.map(Weekday::from).unwrap_or_else(|| today.weekday());
    let category = Category::for_weekday(weekday);
    tracing::info!("📚 Lesson category for {}: {}", weekday, category);

    let resolution = resolve_assignments(
        &config.recipients,
        &config.levels,
        &config.default_level,
        category,
    )
    .unwrap_or_else(|e| exit_on_setup_error(e));

    let engine = DeliveryEngine::new(GeminiClient::new(&config.gemini));

    let report: RunReport = if args.dry_run {
        tracing::info!("🔍 Dry run: messages will be logged, not sent");
        let mut session = DryRunSession::default();
        engine.run(&resolution.assignments, &mut session, today).await
    } else {
        // 建立 SMTP 連線，整個執行期間只驗證一次
        let mut session = SmtpSession::open(&config.smtp)
            .await
            .unwrap_or_else(|e| exit_on_setup_error(e));
        engine.run(&resolution.assignments, &mut session, today).await
    };

    println!(
        "✅ Daily lesson run finished: {} sent, {} failed",
        report.sent(),
        report.failed()
    );
}
