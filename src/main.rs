use clap::Parser;
use placeable_calc::app::report::{render_calculation, render_placeables};
use placeable_calc::config::cli::{CalculateArgs, Command, ListArgs, ServeArgs, SourceArgs};
use placeable_calc::config::{LogFormat, ServerConfig};
use placeable_calc::core::{CalculatorApi, ConfigProvider};
use placeable_calc::utils::error::ErrorSeverity;
use placeable_calc::utils::logger;
use placeable_calc::{
    adapters::http, CalcError, CalculatorClient, Catalog, Cli, LocalStorage, RequestHandler,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve(args) => serve(args, cli.verbose).await,
        Command::List(args) => {
            logger::init_cli_logger(cli.verbose);
            list(args).await
        }
        Command::Calculate(args) => {
            logger::init_cli_logger(cli.verbose);
            calculate(args).await
        }
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn serve(args: ServeArgs, verbose: bool) -> Result<(), CalcError> {
    // 日誌格式取決於配置檔，先載入配置再初始化
    let config = ServerConfig::load_file(args.config.as_deref())
        .and_then(|file| ServerConfig::resolve(file.as_ref(), &args.overrides()));

    match &config {
        Ok(c) if c.log_format == LogFormat::Json && !verbose => {
            logger::init_json_logger(c.log_level.as_deref())
        }
        _ => logger::init_cli_logger(verbose),
    }
    let config = config?;

    tracing::info!("Starting placeable-calc server");
    tracing::debug!("Server config: {:?}", config);

    let storage = LocalStorage::new(".".to_string());
    let catalog = Catalog::load(&storage, config.catalog_path()).await?;
    if catalog.is_empty() {
        tracing::warn!("⚠️ Catalog {} contains no placeables", config.catalog_path());
    }

    http::serve(&config, catalog).await
}

async fn calculator(source: &SourceArgs) -> Result<Box<dyn CalculatorApi>, CalcError> {
    match (&source.api_url, &source.catalog) {
        (Some(url), _) => Ok(Box::new(CalculatorClient::new(url)?)),
        (None, Some(path)) => {
            let catalog = Catalog::load(&LocalStorage::new(".".to_string()), path).await?;
            Ok(Box::new(RequestHandler::new(Arc::new(catalog))))
        }
        (None, None) => Err(CalcError::MissingConfigError {
            field: "--api-url or --catalog".to_string(),
        }),
    }
}

async fn list(args: ListArgs) -> Result<(), CalcError> {
    let api = calculator(&args.source).await?;
    let placeables = api.list_placeables().await?;

    println!("{}", render_placeables(&placeables, args.format)?);
    Ok(())
}

async fn calculate(args: CalculateArgs) -> Result<(), CalcError> {
    let placeables = args.placeables()?;
    let api = calculator(&args.source).await?;

    let response = api.calculate(placeables, args.deep_desert).await?;

    println!("{}", render_calculation(&response, args.format)?);
    Ok(())
}
