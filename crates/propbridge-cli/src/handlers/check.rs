//! Check command handler

use super::utils::{load_plan, load_registry};
use crate::cli::{CheckArgs, OutputFormat};
use crate::error::Result;
use crate::output::OutputWriter;
use serde::Serialize;
use tracing::instrument;

/// Summary of a checked schema and plan
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    valid: bool,
    enums: Vec<&'a str>,
    types: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<PlanSummary>,
}

#[derive(Debug, Serialize)]
struct PlanSummary {
    target: String,
    sources: Vec<String>,
}

/// Handle the check command
#[instrument(skip(output), fields(schema = %args.schema.display()))]
pub fn handle_check(args: CheckArgs, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Checking schema: {}", args.schema.display()))?;
    let registry = load_registry(&args.schema)?;

    let plan = match &args.plan {
        Some(path) => {
            let plan = load_plan(path)?;
            plan.validate(&registry)?;
            Some(PlanSummary {
                target: plan.target,
                sources: plan.sources.into_iter().map(|s| s.type_name).collect(),
            })
        }
        None => None,
    };

    let report = CheckReport {
        valid: true,
        enums: registry.enum_names(),
        types: registry.type_names(),
        plan,
    };

    if output.format() != OutputFormat::Human {
        return output.data(&report);
    }

    output.success("✓ Schema is valid")?;
    output.section("Enums")?;
    for name in &report.enums {
        output.item(name)?;
    }
    output.section("Types")?;
    for name in &report.types {
        output.item(name)?;
    }
    if let Some(plan) = &report.plan {
        output.section("Plan")?;
        output.item(&format!("target: {}", plan.target))?;
        output.item(&format!("sources: {}", plan.sources.join(", ")))?;
    }
    Ok(())
}
