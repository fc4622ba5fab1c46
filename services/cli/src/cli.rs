use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use survey_insights::SurveyFilter;

#[derive(Parser, Debug)]
#[command(
    name = "survey-insights",
    about = "Normalize, score and summarize business digitalization survey exports",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the dashboard report for a survey export
    Report(ReportArgs),
    /// Print every normalized business record with its scores
    Records(InputArgs),
    /// Print the active questionnaire schema
    Schema(OutputArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Survey CSV export (defaults to SURVEY_CSV_PATH)
    #[arg(long)]
    pub csv: Option<PathBuf>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Only include this business type (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub business_types: Vec<String>,
    /// Only include this business size (repeatable)
    #[arg(long = "size", value_name = "SIZE")]
    pub sizes: Vec<String>,
    /// Only include businesses run by this role (repeatable)
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,
}

impl ReportArgs {
    pub fn filter(&self) -> SurveyFilter {
        SurveyFilter {
            business_types: self.business_types.clone(),
            sizes: self.sizes.clone(),
            roles: self.roles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeatable_report_filters() {
        let cli = Cli::try_parse_from([
            "survey-insights",
            "report",
            "--csv",
            "encuesta.csv",
            "--type",
            "Restaurante",
            "--type",
            "Hotel / Hospedaje",
            "--role",
            "Dueno",
            "--pretty",
        ])
        .expect("arguments parse");

        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.input.csv, Some(PathBuf::from("encuesta.csv")));
        assert!(args.input.output.pretty);

        let filter = args.filter();
        assert_eq!(filter.business_types, vec!["Restaurante", "Hotel / Hospedaje"]);
        assert!(filter.sizes.is_empty());
        assert_eq!(filter.roles, vec!["Dueno"]);
    }

    #[test]
    fn schema_command_needs_no_input() {
        let cli = Cli::try_parse_from(["survey-insights", "schema"]).expect("arguments parse");
        assert!(matches!(cli.command, Command::Schema(OutputArgs { pretty: false })));
    }
}
