use clap::Parser;
use ticket_dash::core::{Dataset, Pipeline};
use ticket_dash::domain::model::columns;
use ticket_dash::utils::error::{DashboardError, ErrorSeverity};
use ticket_dash::utils::{logger, validation::Validate};
use ticket_dash::{
    CliConfig, ConsolePresenter, DashboardEngine, FilterCriteria, LocalStorage, TicketPipeline,
    TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting ticket-dash");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        fail(&e);
    }

    // Paths are taken as given; the output directory is created on export.
    let storage = LocalStorage::new(".".to_string());

    if let Some(config_path) = cli.config.clone() {
        let config = match TomlConfig::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => fail(&e),
        };
        if let Err(e) = config.validate() {
            fail(&e);
        }
        let presenter = ConsolePresenter::new(config.table_rows(), config.summary_json());
        let criteria = config.criteria();
        let monitor = cli.monitor || config.monitoring_enabled();
        let pipeline = TicketPipeline::with_presenter(storage, config, presenter);
        run(pipeline, criteria, monitor, cli.list_filters).await;
    } else {
        let presenter = ConsolePresenter::new(cli.table_rows, cli.summary_json);
        let criteria = cli.criteria();
        let monitor = cli.monitor;
        let list_filters = cli.list_filters;
        let pipeline = TicketPipeline::with_presenter(storage, cli, presenter);
        run(pipeline, criteria, monitor, list_filters).await;
    }
}

async fn run<P: Pipeline>(pipeline: P, criteria: FilterCriteria, monitor: bool, list_filters: bool) {
    if list_filters {
        match pipeline.extract().await {
            Ok(dataset) => print_filter_options(&dataset),
            Err(e) => fail(&e),
        }
        return;
    }

    let engine = DashboardEngine::new_with_monitoring(pipeline, criteria, monitor);
    match engine.run().await {
        Ok(Some(path)) => {
            tracing::info!("✅ Dashboard refresh completed successfully");
            println!();
            println!("✅ Dashboard refresh complete");
            println!("📁 Filtered workbook saved to: {}", path);
        }
        Ok(None) => {
            println!();
            println!("⚠️  No rows matched the current filters; nothing exported.");
        }
        Err(e) => fail(&e),
    }
}

/// The values a filter UI would offer in its multiselects, straight from the
/// loaded dataset.
fn print_filter_options(dataset: &Dataset) {
    println!("Available filter values:");
    for column in columns::CATEGORICAL {
        if !dataset.has_column(column) {
            continue;
        }
        let values = dataset.distinct_values(column);
        if values.is_empty() {
            println!("  {:<18} (no values)", column);
        } else {
            println!("  {:<18} {}", column, values.join(", "));
        }
    }
    if let Some((min, max)) = dataset.created_span() {
        println!("  {:<18} {} to {}", columns::CREATED_TIME, min, max);
    }
}

fn fail(e: &DashboardError) -> ! {
    match e.severity() {
        // Awaiting input is not a failure: warn and leave a clean exit code.
        ErrorSeverity::Low => {
            tracing::warn!("{}", e);
            eprintln!("⚠️  {}", e.user_friendly_message());
            std::process::exit(0);
        }
        severity => {
            tracing::error!(
                "❌ Dashboard pipeline failed: {} (Severity: {:?})",
                e,
                severity
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            let exit_code = match severity {
                ErrorSeverity::Medium => 2,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
