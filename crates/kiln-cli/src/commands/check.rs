//! Check command implementation.
//!
//! Resolves the manifest and reports what the plan contains.

use kiln_config::BuildPlan;

use crate::cli::CheckArgs;
use crate::commands::load_plan;
use crate::error::Result;
use crate::ui;

pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking manifest...");

    let plan = match load_plan(&args.manifest) {
        Ok(plan) => plan,
        Err(err) => {
            ui::error("Manifest did not resolve");
            return Err(err);
        }
    };

    for line in summarize(&plan) {
        ui::info(&line);
    }

    if plan.rules().is_empty() {
        ui::warning("No transform rules declared; files pass through untouched");
    }

    ui::success("Manifest is valid!");
    Ok(())
}

fn summarize(plan: &BuildPlan) -> Vec<String> {
    let mut lines = vec![format!("mode: {}", plan.mode())];

    match &plan.flags().devtool {
        Some(devtool) => lines.push(format!("devtool: {devtool}")),
        None => lines.push("devtool: off".to_string()),
    }
    lines.push(format!(
        "minify: {}",
        if plan.flags().minify { "on" } else { "off" }
    ));

    for (name, set) in plan.entries() {
        lines.push(format!("entry '{name}': {} file(s)", set.len()));
    }

    lines.push(format!("rules: {}", plan.rules().len()));
    lines.push(format!("plugins: {}", plan.plugins().len()));
    lines.push(format!("output: {}", plan.output().directory.display()));
    lines
}
