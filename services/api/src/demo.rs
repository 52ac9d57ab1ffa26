use crate::infra::{cli_config, load_estimator};
use clap::Args;
use salary_insight::error::AppError;
use salary_insight::workflows::income::{IncomeClassifier, IncomeProfile};
use salary_insight::workflows::salary::{SalaryEstimator, SalaryProfile};
use std::path::PathBuf;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct ArtifactArgs {
    /// Directory holding model_lr.json, le_edu.json, le_country.json and model_features.json
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
    /// CSV of country,currency_code,rate replacing the built-in exchange rates
    #[arg(long)]
    pub(crate) currency_table: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SalaryEstimateArgs {
    /// Education level, exactly as listed by `salary options`
    #[arg(long)]
    pub(crate) education: String,
    /// Years of professional coding experience (0-50)
    #[arg(long, default_value_t = 3)]
    pub(crate) years_experience: u32,
    /// Country, exactly as listed by `salary options`
    #[arg(long)]
    pub(crate) country: String,
    /// Work environment
    #[arg(long, default_value = "Remote")]
    pub(crate) work_environment: String,
    /// Holds at least one professional certification
    #[arg(long)]
    pub(crate) certified: bool,
    /// Developer role; repeat for several
    #[arg(long = "role")]
    pub(crate) roles: Vec<String>,
    /// Language worked with; repeat for several
    #[arg(long = "language")]
    pub(crate) languages: Vec<String>,
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

impl SalaryEstimateArgs {
    fn into_profile(self) -> (SalaryProfile, ArtifactArgs) {
        let profile = SalaryProfile {
            education: self.education,
            years_experience: self.years_experience,
            country: self.country,
            work_environment: self.work_environment,
            has_certification: self.certified,
            developer_roles: self.roles,
            languages: self.languages,
        };
        (profile, self.artifacts)
    }
}

#[derive(Args, Debug)]
pub(crate) struct IncomeClassifyArgs {
    #[arg(long, default_value_t = 30)]
    pub(crate) age: u32,
    /// Education level on the 1-16 census scale
    #[arg(long, default_value_t = 10)]
    pub(crate) education_num: u32,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub(crate) capital_gain: i64,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub(crate) capital_loss: i64,
    #[arg(long, default_value_t = 40)]
    pub(crate) hours_per_week: u32,
    #[arg(long, default_value = "Private")]
    pub(crate) workclass: String,
    #[arg(long, default_value = "Never-married")]
    pub(crate) marital_status: String,
    #[arg(long, default_value = "Tech-support")]
    pub(crate) occupation: String,
    #[arg(long, default_value = "Not-in-family")]
    pub(crate) relationship: String,
    #[arg(long, default_value = "White")]
    pub(crate) race: String,
    #[arg(long, default_value = "Male")]
    pub(crate) sex: String,
    #[arg(long, default_value = "United-States")]
    pub(crate) native_country: String,
}

impl IncomeClassifyArgs {
    pub(crate) fn into_profile(self) -> IncomeProfile {
        IncomeProfile {
            age: self.age,
            education_num: self.education_num,
            capital_gain: self.capital_gain,
            capital_loss: self.capital_loss,
            hours_per_week: self.hours_per_week,
            workclass: self.workclass,
            marital_status: self.marital_status,
            occupation: self.occupation,
            relationship: self.relationship,
            race: self.race,
            sex: self.sex,
            native_country: self.native_country,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
    /// Skip the income bracket portion of the demo.
    #[arg(long)]
    pub(crate) skip_income: bool,
}

pub(crate) fn run_salary_estimate(args: SalaryEstimateArgs) -> Result<(), AppError> {
    let (profile, artifacts) = args.into_profile();
    let config = cli_config(&artifacts)?;
    let estimator = load_estimator(&config.artifacts)?;

    let estimate = estimator.estimate(&profile)?;
    print!("{}", estimate.render());
    Ok(())
}

pub(crate) fn run_salary_options(args: ArtifactArgs) -> Result<(), AppError> {
    let config = cli_config(&args)?;
    let estimator = load_estimator(&config.artifacts)?;
    let options = estimator.options();

    print_list("Education levels", &options.education_levels);
    print_list("Countries", &options.countries);
    print_list("Work environments", &options.work_environments);
    print_list("Developer roles", &options.developer_roles);
    print_list("Languages", &options.languages);
    println!(
        "\nYears of experience: {} to {}",
        options.years_experience.start(),
        options.years_experience.end()
    );
    Ok(())
}

pub(crate) fn run_income_classify(args: IncomeClassifyArgs) -> Result<(), AppError> {
    cli_config(&ArtifactArgs::default())?;
    let classification = IncomeClassifier::standard()?.classify(&args.into_profile())?;
    print!("{}", classification.render());
    Ok(())
}

pub(crate) fn run_income_options() -> Result<(), AppError> {
    let options = IncomeClassifier::standard()?.options();
    println!("Age: {} to {}", options.age.start(), options.age.end());
    println!(
        "Education level (numeric): {} to {}",
        options.education_num.start(),
        options.education_num.end()
    );
    println!(
        "Hours per week: {} to {}",
        options.hours_per_week.start(),
        options.hours_per_week.end()
    );
    print_list("Workclass", &options.workclass);
    print_list("Marital status", &options.marital_status);
    print_list("Occupation", &options.occupation);
    print_list("Relationship", &options.relationship);
    print_list("Race", &options.race);
    print_list("Sex", &options.sex);
    print_list("Native country", &options.native_country);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        artifacts,
        skip_income,
    } = args;

    let config = cli_config(&artifacts)?;
    let estimator = load_estimator(&config.artifacts)?;

    println!("Salary insight demo");
    println!("Artifacts: {}", config.artifacts.directory.display());
    for profile in sample_salary_profiles(&estimator) {
        println!();
        match estimator.estimate(&profile) {
            Ok(estimate) => print!("{}", estimate.render()),
            Err(err) => println!("Error: {err}"),
        }
    }

    if skip_income {
        return Ok(());
    }

    let classifier = IncomeClassifier::standard()?;
    println!("\nIncome bracket demo");
    for profile in sample_income_profiles() {
        println!();
        match classifier.classify(&profile) {
            Ok(classification) => print!("{}", classification.render()),
            Err(err) => println!("Error: {err}"),
        }
    }

    Ok(())
}

fn print_list(title: &str, values: &[String]) {
    println!("\n{title}");
    for value in values {
        println!("- {value}");
    }
}

fn sample_salary_profiles(estimator: &SalaryEstimator) -> Vec<SalaryProfile> {
    let education = estimator.artifacts().education.labels();
    let pick = |index: usize| {
        education
            .get(index)
            .or_else(|| education.first())
            .cloned()
            .unwrap_or_default()
    };

    vec![
        SalaryProfile {
            education: pick(2),
            years_experience: 8,
            country: "Germany".to_string(),
            work_environment: "Hybrid (some remote, some in-person)".to_string(),
            has_certification: true,
            developer_roles: vec![
                "Developer, back-end".to_string(),
                "Engineer, site reliability".to_string(),
            ],
            languages: vec!["Python".to_string(), "SQL".to_string(), "C++".to_string()],
        },
        SalaryProfile {
            education: pick(1),
            years_experience: 3,
            country: "India".to_string(),
            work_environment: "Remote".to_string(),
            has_certification: false,
            developer_roles: vec!["Developer, full-stack".to_string()],
            languages: vec!["JavaScript".to_string(), "TypeScript".to_string()],
        },
        SalaryProfile {
            education: pick(6),
            years_experience: 0,
            country: "Other".to_string(),
            work_environment: "In-person".to_string(),
            has_certification: false,
            developer_roles: vec!["Student".to_string()],
            languages: vec!["HTML/CSS".to_string()],
        },
    ]
}

fn sample_income_profiles() -> Vec<IncomeProfile> {
    let base = IncomeProfile {
        age: 30,
        education_num: 10,
        capital_gain: 0,
        capital_loss: 0,
        hours_per_week: 40,
        workclass: "Private".to_string(),
        marital_status: "Never-married".to_string(),
        occupation: "Tech-support".to_string(),
        relationship: "Not-in-family".to_string(),
        race: "White".to_string(),
        sex: "Male".to_string(),
        native_country: "United-States".to_string(),
    };

    vec![
        IncomeProfile {
            age: 45,
            education_num: 13,
            hours_per_week: 50,
            workclass: "Self-emp-not-inc".to_string(),
            marital_status: "Married-civ-spouse".to_string(),
            occupation: "Exec-managerial".to_string(),
            relationship: "Wife".to_string(),
            sex: "Female".to_string(),
            ..base.clone()
        },
        base,
    ]
}
