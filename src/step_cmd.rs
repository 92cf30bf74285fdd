//! Step command: a single spell-accounting transition.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use palmer_spell::{AccountingResult, DroughtCategory, SpellState, advance_tagged};

use crate::cli::StepArgs;

#[derive(Debug, Serialize)]
struct StepOutput {
    period: String,
    result: AccountingResult,
    pmdi: f64,
    category: Option<DroughtCategory>,
}

/// Run one `advance` and print the result as JSON.
pub fn run(args: StepArgs) -> Result<()> {
    let output = step(&args)?;
    let json = serde_json::to_string_pretty(&output).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}

fn step(args: &StepArgs) -> Result<StepOutput> {
    let prior = SpellState::new(args.x1, args.x2, args.x3, args.uaccum);
    let result = advance_tagged(&args.period, args.z, &prior).context("invalid --period")?;
    let pmdi = result.pmdi();
    let category = DroughtCategory::from_index(pmdi);
    info!(
        period = %args.period,
        z = args.z,
        transition = ?result.transition,
        pmdi,
        class = category.map_or("missing", DroughtCategory::label),
        "advanced one period"
    );
    Ok(StepOutput {
        period: args.period.clone(),
        result,
        pmdi,
        category,
    })
}
