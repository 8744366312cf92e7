use anyhow::Context;
use clap::Parser;
use cost_of_living::app::export::{ranking_to_csv, report_to_json};
use cost_of_living::utils::error::ErrorSeverity;
use cost_of_living::utils::{logger, validation::Validate};
use cost_of_living::{CliConfig, CostError, DashboardReport, Estimator, OutputFormat};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cost-of-living estimator");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let app_config = match config.resolve_app_config() {
        Ok(app_config) => app_config,
        Err(e) => exit_with(&e),
    };

    let tables = match app_config.data_source().load() {
        Ok(tables) => tables,
        Err(e) => exit_with(&e),
    };
    let estimator = Estimator::new(tables);

    if config.list_areas {
        for area in estimator.areas() {
            println!("{}", area);
        }
        return Ok(());
    }

    let request = match config.request() {
        Ok(request) => request,
        Err(e) => exit_with(&e),
    };
    if request.usable_income().is_none() {
        tracing::warn!("No positive income given; only the area ranking will be shown");
    }
    if let Some(area) = request.usable_area() {
        if !estimator.areas().iter().any(|known| known == area) {
            tracing::warn!("Area '{}' is not in the reference data; rent is priced at 0", area);
        }
    }

    let estimate = estimator.evaluate(&request);
    let report = DashboardReport::build(&request, &estimate, app_config.top_n());
    let format = app_config
        .output_format()
        .context("resolving output format")?;

    let output = match format {
        OutputFormat::Text => report.render_text(app_config.currency_symbol()),
        OutputFormat::Json => report_to_json(&report).context("serializing report")?,
        OutputFormat::Csv => ranking_to_csv(&estimate.ranking).context("writing ranking csv")?,
    };
    println!("{}", output);

    tracing::info!("Done ({} format)", format);
    Ok(())
}

fn exit_with(e: &CostError) -> ! {
    tracing::error!(
        "{} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
