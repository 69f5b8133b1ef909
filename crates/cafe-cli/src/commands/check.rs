//! Check command: parse and order-validate a day file without replaying it.

use std::path::Path;

use anyhow::{Context, Result};

use cafe_core::validate_order;

use crate::Config;
use crate::dayfile;

/// Parses `file` and checks chronological order, reporting the event count.
pub fn run<W: std::io::Write>(writer: &mut W, config: &Config, file: &Path) -> Result<()> {
    let path = config.resolve_day_file(file);
    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read day file {}", path.display()))?;

    let day = dayfile::parse(&input)?;
    validate_order(&day.events)?;

    writeln!(
        writer,
        "ok: {} tables, {} events",
        day.config.tables(),
        day.events.len()
    )?;
    Ok(())
}
