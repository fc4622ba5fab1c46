mod cli;
mod output;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Command, InputArgs, ReportArgs};
use output::{write_json, Envelope, RecordsBody, ReportBody, SchemaBody};
use std::path::PathBuf;
use survey_insights::config::AppConfig;
use survey_insights::error::AppError;
use survey_insights::{telemetry, DashboardState, SurveyImporter};
use tracing::info;

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Report(args) => run_report(&config, args),
        Command::Records(args) => run_records(&config, args),
        Command::Schema(args) => {
            let schema = config.survey.load_schema()?;
            let body = SchemaBody {
                generated_at: Utc::now(),
                schema: &schema,
            };
            write_json(std::io::stdout().lock(), &body, args.pretty)?;
            Ok(())
        }
    }
}

fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let (source, mut state, load) = load_state(config, &args.input)?;

    let filter = args.filter();
    if !filter.is_empty() {
        state.apply_filter(filter);
    }

    let envelope = Envelope {
        generated_at: Utc::now(),
        source: &source,
        load,
        body: ReportBody {
            report: state.report(),
        },
    };
    write_json(std::io::stdout().lock(), &envelope, args.input.output.pretty)?;
    Ok(())
}

fn run_records(config: &AppConfig, args: InputArgs) -> Result<(), AppError> {
    let (source, state, load) = load_state(config, &args)?;

    let envelope = Envelope {
        generated_at: Utc::now(),
        source: &source,
        load,
        body: RecordsBody {
            records: state.records(),
        },
    };
    write_json(std::io::stdout().lock(), &envelope, args.output.pretty)?;
    Ok(())
}

fn load_state(
    config: &AppConfig,
    input: &InputArgs,
) -> Result<(PathBuf, DashboardState, survey_insights::LoadSummary), AppError> {
    let source = input
        .csv
        .clone()
        .or_else(|| config.survey.csv_path.clone())
        .ok_or(AppError::MissingInput)?;

    let pipeline = config.survey.pipeline()?;
    let rows = SurveyImporter::read_path(&source)?;

    let mut state = DashboardState::new(pipeline, config.survey.header_rows);
    let load = state.load(&rows);
    info!(
        ?config.environment,
        source = %source.display(),
        records = load.records,
        skipped = load.skipped,
        "survey export loaded"
    );

    Ok((source, state, load))
}
