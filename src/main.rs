use artic_table::domain::ports::ConfigProvider;
use artic_table::utils::error::ErrorSeverity;
use artic_table::utils::{logger, validation::Validate};
use artic_table::{ArticFetcher, CliConfig, SelectionReconciler, Shell, TableError};
use clap::Parser;
use tokio::io::BufReader;

fn exit_code(e: &TableError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(context: &str, e: TableError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting artic-table");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail("Failed to load configuration", e),
    };

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", e);
    }

    let fetcher = match ArticFetcher::from_config(&config) {
        Ok(fetcher) => fetcher,
        Err(e) => fail("Failed to build HTTP client", e),
    };
    tracing::info!("Using endpoint {}", fetcher.endpoint());

    let mut reconciler = SelectionReconciler::new(fetcher, config.page_size());
    tracing::info!("Loading page {}...", config.start_page());
    if !reconciler.load_page(config.start_page()).await {
        tracing::warn!("Initial page could not be loaded, starting with an empty table");
    }

    let mut shell = Shell::new(reconciler);
    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = shell.run(stdin, tokio::io::stdout()).await {
        fail("Session ended with an error", e);
    }

    tracing::info!(
        "Session finished with {} artworks selected",
        shell.reconciler().selection().len()
    );
    Ok(())
}
