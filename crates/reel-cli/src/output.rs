//! Plan serialization.

use anyhow::Context;
use reel_models::PlannerOutput;
use std::io::Write;
use std::path::Path;

/// Write the planner output as JSON to `path`, or stdout when absent.
pub fn write_output(output: &PlannerOutput, path: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };

    match path {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write plan to {}", path.display()))?;
            tracing::info!(path = %path.display(), "Plan written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("failed to write plan to stdout")?;
        }
    }

    Ok(())
}
