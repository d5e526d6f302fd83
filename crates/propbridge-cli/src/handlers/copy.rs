//! Copy command handler

use super::utils::{load_document, load_plan, load_registry};
use crate::cli::{CopyArgs, OutputFormat};
use crate::config::is_yaml;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use serde_json::Value as Json;
use std::fs;
use tracing::{info, instrument};

/// Handle the copy command
#[instrument(skip(output), fields(plan = %args.plan.display()))]
pub fn handle_copy(args: CopyArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("copy", &args.plan.display().to_string());

    output.info(&format!("Loading schema: {}", args.schema.display()))?;
    let registry = load_registry(&args.schema)?;
    let plan = load_plan(&args.plan)?;

    let target: Option<Json> = args.target.as_deref().map(load_document::<Json>).transpose()?;
    let sources = args
        .sources
        .iter()
        .map(|path| load_document::<Json>(path))
        .collect::<Result<Vec<_>>>()?;

    info!(
        target = %plan.target,
        sources = sources.len(),
        "Running copy plan"
    );
    let Some(copied) = plan.run(&registry, target.as_ref(), &sources)? else {
        output.warning("Plan has no sources, nothing was copied")?;
        return Ok(());
    };

    match args.save_to {
        Some(path) => {
            // Files are never written in the human format
            let format = match output.format() {
                OutputFormat::Human if is_yaml(&path) => OutputFormat::Yaml,
                OutputFormat::Human => OutputFormat::JsonPretty,
                format => format,
            };
            fs::write(&path, ensure_newline(format.format(&copied)?))?;
            output.success(&format!("Wrote {} to {}", plan.target, path.display()))?;
        }
        None => {
            output.section(&plan.target)?;
            output.data(&copied)?;
        }
    }
    Ok(())
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
