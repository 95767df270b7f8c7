//! Clean command - map a spreadsheet and export a CRM-ready CSV.

use std::path::PathBuf;

use colored::Colorize;
use leadmap::{apply_mappings, ObjectType, Parser};

use crate::cli::LlmProviderChoice;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    object: ObjectType,
    llm: LlmProviderChoice,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        file.display().to_string().white()
    );

    let parser = Parser::new();
    let (table, source) = parser.parse_file(&file)?;
    println!(
        "  {} rows, {} columns ({})",
        source.row_count, source.column_count, source.format
    );

    let mut mapper = super::build_mapper(llm, model, None)?;
    let report = mapper.map_columns(&table.column_samples(5));

    println!(
        "Mapped {} of {} columns",
        report.mapped_count().to_string().white().bold(),
        report.mappings.len()
    );
    for mapping in report.mappings.iter().filter(|m| !m.is_mapped()) {
        println!(
            "  {} column {} dropped from output",
            "Note:".yellow(),
            mapping.source_column.white()
        );
    }

    let crm_table = apply_mappings(&table, &report.mappings, object)?;

    // Determine output path
    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.crm.csv", stem));
        p
    });

    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record(&crm_table.headers)?;
    for row in &crm_table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!();
    println!(
        "{} {} ({} {} records)",
        "Saved to".green().bold(),
        output_path.display().to_string().white(),
        crm_table.rows.len(),
        object
    );

    Ok(())
}
