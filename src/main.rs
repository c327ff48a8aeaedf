use anyhow::Context;
use clap::Parser;
use ptax_quote::utils::error::ErrorSeverity;
use ptax_quote::utils::{logger, validation::Validate};
use ptax_quote::{render_quote, CliArgs, FetchSettings, QuoteFetcher, ReqwestTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let mut settings = FetchSettings::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("failed to load config file '{}'", path.display()),
        None => "failed to load settings".to_string(),
    })?;
    args.apply_to(&mut settings);
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let today = chrono::Local::now().date_naive();
    let config = settings.to_fetch_config(args.target_date(today)?);

    let transport = ReqwestTransport::new().context("failed to build HTTP client")?;
    let fetcher = QuoteFetcher::new(transport);
    tracing::debug!(
        "Worst-case fetch duration: {:?}",
        fetcher.worst_case_duration(&config)
    );

    match fetcher.fetch_quote(&config).await {
        Ok(quote) => {
            println!("{}", render_quote(&config.currency_code, &quote, args.price));
        }
        Err(e) => {
            tracing::error!("Quote fetch failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
