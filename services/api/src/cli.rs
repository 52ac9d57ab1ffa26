use crate::demo::{
    run_demo, run_income_classify, run_income_options, run_salary_estimate, run_salary_options,
    ArtifactArgs, DemoArgs, IncomeClassifyArgs, SalaryEstimateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use salary_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Salary Insight",
    about = "Estimate developer salaries and income brackets from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Developer salary estimates backed by the trained regression model
    Salary {
        #[command(subcommand)]
        command: SalaryCommand,
    },
    /// Rule-based income bracket classification
    Income {
        #[command(subcommand)]
        command: IncomeCommand,
    },
    /// Run both workflows over a handful of sample profiles
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SalaryCommand {
    /// Estimate a salary for one profile
    Estimate(SalaryEstimateArgs),
    /// List the accepted answers for every salary form field
    Options(ArtifactArgs),
}

#[derive(Subcommand, Debug)]
enum IncomeCommand {
    /// Classify one census-style profile as <=50K or >50K
    Classify(IncomeClassifyArgs),
    /// List the accepted answers for every income form field
    Options,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Salary {
            command: SalaryCommand::Estimate(args),
        } => run_salary_estimate(args),
        Command::Salary {
            command: SalaryCommand::Options(args),
        } => run_salary_options(args),
        Command::Income {
            command: IncomeCommand::Classify(args),
        } => run_income_classify(args),
        Command::Income {
            command: IncomeCommand::Options,
        } => run_income_options(),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_roles_and_languages() {
        let cli = Cli::try_parse_from([
            "salary-insight",
            "salary",
            "estimate",
            "--education",
            "Something else",
            "--country",
            "Japan",
            "--role",
            "Student",
            "--role",
            "Engineer, data",
            "--language",
            "C",
            "--certified",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Salary {
                command: SalaryCommand::Estimate(args),
            }) => {
                assert_eq!(args.roles, ["Student", "Engineer, data"]);
                assert_eq!(args.languages, ["C"]);
                assert!(args.certified);
                assert_eq!(args.years_experience, 3);
                assert_eq!(args.work_environment, "Remote");
            }
            other => panic!("expected salary estimate, got {other:?}"),
        }
    }

    #[test]
    fn income_classify_uses_form_defaults() {
        let cli = Cli::try_parse_from(["salary-insight", "income", "classify"])
            .expect("arguments parse");

        match cli.command {
            Some(Command::Income {
                command: IncomeCommand::Classify(args),
            }) => {
                let profile = args.into_profile();
                assert_eq!(profile.age, 30);
                assert_eq!(profile.education_num, 10);
                assert_eq!(profile.hours_per_week, 40);
                assert_eq!(profile.workclass, "Private");
                assert_eq!(profile.native_country, "United-States");
            }
            other => panic!("expected income classify, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["salary-insight"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
