use std::io::{self, Write};

use anyhow::Result;

use crate::models::{FieldNames, Record};

/// Render search results in human-readable text form, one record per
/// line as `short (long)` or just `short`.
pub fn print_text(results: &[&Record], fields: &FieldNames) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_text(&mut out, results, fields)?;
    Ok(())
}

/// Render search results as a JSON array of field maps.
pub fn print_json(results: &[&Record]) -> Result<()> {
    serde_json::to_writer(io::stdout(), results)?;
    println!();
    Ok(())
}

/// Print the dataset schema, one field name per line.
pub fn print_fields(schema: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for name in schema {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, results: &[&Record], fields: &FieldNames) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "no matches");
    }

    for record in results {
        writeln!(out, "{}", fields.display_name(record))?;
    }

    Ok(())
}
