use crate::infra::{build_catalog, build_filter};
use clap::Args;
use farm_schemes::config::{AppConfig, CatalogConfig};
use farm_schemes::error::AppError;
use farm_schemes::schemes::{
    validate_scheme, ApplicantProfile, EligibilityReport, MalformedRecord, Scheme, SchemeSource,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: u32,
    /// Land holding in hectares
    #[arg(long)]
    pub(crate) land_holding: f64,
    /// Annual income in INR
    #[arg(long)]
    pub(crate) income: f64,
    /// Farmer type (small / marginal / ...)
    #[arg(long)]
    pub(crate) farmer_type: String,
    /// State name
    #[arg(long)]
    pub(crate) state: String,
    /// Crop cultivated
    #[arg(long)]
    pub(crate) crop_type: String,
    /// Social category (SC / ST / OBC / GENERAL)
    #[arg(long)]
    pub(crate) category: String,
    /// Gender (M / F)
    #[arg(long)]
    pub(crate) gender: String,
    /// Scheme catalog CSV (defaults to SCHEME_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the per-criterion reasons for every eligible scheme
    #[arg(long)]
    pub(crate) show_reasons: bool,
}

impl CheckArgs {
    fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            age: self.age,
            land_holding: self.land_holding,
            income: self.income,
            farmer_type: self.farmer_type.clone(),
            state: self.state.clone(),
            crop_type: self.crop_type.clone(),
            category: self.category.clone(),
            gender: self.gender.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Scheme catalog CSV (defaults to SCHEME_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let catalog = catalog_config(args.catalog.clone())?;
    let profile = args.profile();

    let filter = build_filter(&catalog);
    let report = filter.filter_eligible(&profile)?;

    let mut out = io::stdout().lock();
    render_report(&mut out, &catalog, &report, args.show_reasons)?;
    Ok(())
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let catalog = catalog_config(args.catalog)?;
    let schemes = build_catalog(&catalog).load()?;

    let mut out = io::stdout().lock();
    render_validation(&mut out, &catalog, &schemes)?;
    Ok(())
}

fn catalog_config(path: Option<PathBuf>) -> Result<CatalogConfig, AppError> {
    let mut catalog = AppConfig::load()?.catalog;
    if let Some(path) = path {
        catalog.path = path;
    }
    Ok(catalog)
}

fn render_report<W: Write>(
    out: &mut W,
    catalog: &CatalogConfig,
    report: &EligibilityReport,
    show_reasons: bool,
) -> io::Result<()> {
    writeln!(out, "Scheme eligibility check")?;
    writeln!(out, "Catalog: {}", catalog.path.display())?;

    if report.schemes.is_empty() {
        writeln!(out, "\nEligible schemes: none")?;
        return Ok(());
    }

    writeln!(
        out,
        "\nEligible schemes ({})",
        report.total_eligible_schemes
    )?;
    for scheme in &report.schemes {
        writeln!(out, "- [{}] {}", scheme.scheme_id, scheme.scheme_name)?;
        writeln!(out, "  Benefits: {}", scheme.benefits)?;
        if !scheme.other_conditions.is_empty() {
            writeln!(out, "  Conditions: {}", scheme.other_conditions)?;
        }
        writeln!(out, "  How to apply: {}", scheme.steps_to_apply)?;
        writeln!(out, "  More information: {}", scheme.official_url)?;
        if show_reasons {
            for reason in &scheme.reasons {
                writeln!(out, "    * {reason}")?;
            }
        }
    }

    Ok(())
}

fn render_validation<W: Write>(
    out: &mut W,
    catalog: &CatalogConfig,
    schemes: &[Scheme],
) -> io::Result<()> {
    let malformed: Vec<MalformedRecord> = schemes
        .iter()
        .filter_map(|scheme| validate_scheme(scheme).err())
        .collect();

    writeln!(out, "Scheme catalog validation")?;
    writeln!(out, "Catalog: {}", catalog.path.display())?;
    writeln!(
        out,
        "Rows: {} ({} usable, {} malformed)",
        schemes.len(),
        schemes.len() - malformed.len(),
        malformed.len()
    )?;

    for record in &malformed {
        writeln!(out, "- {record}")?;
    }

    Ok(())
}
