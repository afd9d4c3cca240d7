//! Resolve command implementation.
//!
//! Prints the build plan as pretty JSON, or writes it to `--out`.

use std::fs;

use crate::cli::ResolveArgs;
use crate::commands::load_plan;
use crate::error::Result;
use crate::ui;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let plan = load_plan(&args.manifest)?;
    let json = plan.to_json()?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("{json}\n"))?;
            ui::success(&format!("Wrote {} plan to {}", plan.mode(), path.display()));
        }
        None => println!("{json}"),
    }

    Ok(())
}
