use crate::infra::{load_catalog, InMemoryProfileRepository};
use clap::Args;
use sarvasahay::config::AppConfig;
use sarvasahay::eligibility::{
    EligibilityService, EvaluationResult, Profile, SchemeQuery, SchemeRecord, SchemeType,
};
use sarvasahay::error::AppError;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a profile JSON document
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Scheme catalog JSON file (defaults to ELIGIBILITY_CATALOG_PATH or the standard schemes)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Also report schemes the profile does not qualify for
    #[arg(long)]
    pub(crate) report_ineligible: bool,
    /// Print the raw evaluation result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SchemesArgs {
    /// Scheme catalog JSON file (defaults to ELIGIBILITY_CATALOG_PATH or the standard schemes)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Only list schemes of this type (e.g. agriculture, housing)
    #[arg(long, value_parser = parse_scheme_type)]
    pub(crate) scheme_type: Option<SchemeType>,
    /// Include inactive, suspended, and discontinued schemes
    #[arg(long)]
    pub(crate) all: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        profile,
        catalog,
        report_ineligible,
        json,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.eligibility, catalog.as_deref())?;
    let mut engine_config = config.eligibility.engine_config();
    engine_config.report_ineligible |= report_ineligible;

    let raw = fs::read_to_string(&profile)?;
    let profile: Profile = serde_json::from_str(&raw)?;

    let service = EligibilityService::new(
        Arc::new(InMemoryProfileRepository::default()),
        Arc::new(catalog),
        engine_config,
    );
    let result = service.evaluate_profile(&profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_evaluation(&result));
    }
    Ok(())
}

pub(crate) fn run_schemes(args: SchemesArgs) -> Result<(), AppError> {
    let SchemesArgs {
        catalog,
        scheme_type,
        all,
    } = args;

    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(&config.eligibility, catalog.as_deref())?);
    let service = EligibilityService::new(
        Arc::new(InMemoryProfileRepository::default()),
        catalog,
        config.eligibility.engine_config(),
    );

    let schemes = service.schemes(&SchemeQuery {
        scheme_type,
        active_only: !all,
        limit: usize::MAX,
    });
    print!("{}", render_schemes(&schemes));
    Ok(())
}

fn parse_scheme_type(raw: &str) -> Result<SchemeType, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unknown scheme type '{raw}'"))
}

fn render_evaluation(result: &EvaluationResult) -> String {
    let mut out = format!(
        "Eligibility for {} ({:.3}s)\n{}\n",
        result.profile_id.as_str(),
        result.processing_time_seconds,
        result.summary()
    );
    for entry in &result.results {
        out.push_str(&format!(
            "- {} [{}] {} | benefit {} | score {:.2}\n",
            entry.scheme_id,
            entry.category.label(),
            entry.scheme_name,
            entry.benefit_amount,
            entry.eligibility_score
        ));
        for reason in &entry.reasons {
            out.push_str(&format!("    * {reason}\n"));
        }
        for action in &entry.required_actions {
            out.push_str(&format!("    > {action}\n"));
        }
    }
    out
}

fn render_schemes(schemes: &[SchemeRecord]) -> String {
    if schemes.is_empty() {
        return "No schemes match.\n".to_string();
    }
    let mut out = String::new();
    for scheme in schemes {
        let kind = scheme
            .scheme_type
            .map(|kind| kind.label())
            .unwrap_or("unclassified");
        out.push_str(&format!(
            "{} ({kind}): {} | benefit {}",
            scheme.scheme_id, scheme.name, scheme.benefit_amount
        ));
        if let Some(frequency) = &scheme.benefit_frequency {
            out.push_str(&format!(" {frequency}"));
        }
        out.push('\n');
    }
    out
}
