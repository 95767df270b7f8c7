//! Map command - classify a spreadsheet's columns and write a report.

use std::path::PathBuf;

use colored::Colorize;
use leadmap::{MappingOutcome, ObjectType, Parser};

use crate::cli::LlmProviderChoice;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    object: ObjectType,
    llm: LlmProviderChoice,
    model: Option<String>,
    locale: Option<String>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    if !json {
        println!(
            "{} {}",
            "Mapping".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let parser = Parser::new();
    let (table, source) = parser.parse_file(&file)?;

    if verbose && !json {
        println!(
            "  {} rows, {} columns ({})",
            source.row_count, source.column_count, source.format
        );
    }

    let mut mapper = super::build_mapper(llm, model, locale)?;
    let report = mapper.map_columns(&table.column_samples(5));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        for mapping in &report.mappings {
            let (stage, detail) = match &mapping.outcome {
                MappingOutcome::RuleMatched { field, confidence } => (
                    "rule".green(),
                    format!("{} ({}%)", field.to_string().white().bold(), confidence),
                ),
                MappingOutcome::AiMatched {
                    field, confidence, ..
                } => (
                    "ai".blue(),
                    format!("{} ({}%)", field.to_string().white().bold(), confidence),
                ),
                MappingOutcome::Unmapped { reasoning } => {
                    ("----".yellow(), format!("unmapped: {}", reasoning.dimmed()))
                }
            };
            println!("  {:30} {:>4}  {}", mapping.source_column, stage, detail);
        }

        println!();
        println!(
            "Mapped {} of {} columns",
            report.mapped_count().to_string().white().bold(),
            report.mappings.len()
        );

        let usage = &report.usage;
        if usage.total_calls > 0 {
            println!(
                "LLM usage: {} calls, {} tokens, ~${:.4}",
                usage.total_calls,
                usage.total_tokens(),
                usage.estimated_cost_usd
            );
        }
        println!(
            "Resolved without AI: {:.0}%",
            usage.ai_skip_ratio() * 100.0
        );

        // Surface required-field gaps before anyone tries an import.
        let missing = object.schema().missing_required(&report.mappings);
        if !missing.is_empty() {
            println!();
            for field in missing {
                println!(
                    "{} no column maps to required field {}",
                    "Warning:".yellow().bold(),
                    field.api_name().white().bold()
                );
            }
        }
    }

    // Determine output path
    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.mapping.json", stem));
        p
    });

    let report_json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&output_path, report_json)?;

    if !json {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            output_path.display().to_string().white()
        );
    }

    Ok(())
}
