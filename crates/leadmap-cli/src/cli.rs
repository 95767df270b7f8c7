//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use leadmap::ObjectType;

/// Leadmap: map lead spreadsheets onto CRM fields
#[derive(Parser)]
#[command(name = "leadmap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a spreadsheet's columns and write a mapping report
    Map {
        /// Path to the spreadsheet (CSV; delimiter auto-detected)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the mapping report (default: <file>.mapping.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target CRM object
        #[arg(long, default_value = "lead")]
        object: ObjectType,

        /// LLM provider for fallback classification
        #[arg(long, default_value = "none")]
        llm: LlmProviderChoice,

        /// Model to use (provider-specific, e.g. "gpt-4o-mini")
        #[arg(long)]
        model: Option<String>,

        /// Header language hint (e.g. "pt-BR")
        #[arg(long)]
        locale: Option<String>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Map a spreadsheet and export a normalized, CRM-ready CSV
    Clean {
        /// Path to the spreadsheet
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the cleaned CSV (default: <file>.crm.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target CRM object
        #[arg(long, default_value = "lead")]
        object: ObjectType,

        /// LLM provider for fallback classification
        #[arg(long, default_value = "none")]
        llm: LlmProviderChoice,

        /// Model to use (provider-specific)
        #[arg(long)]
        model: Option<String>,
    },

    /// List the canonical CRM field catalog
    Fields {
        /// Target CRM object
        #[arg(long, default_value = "lead")]
        object: ObjectType,
    },
}

/// LLM provider choice for fallback classification
#[derive(Clone, Debug, Default)]
pub enum LlmProviderChoice {
    /// No LLM - rule stage only
    #[default]
    None,
    /// OpenAI chat completions (requires OPENAI_API_KEY)
    OpenAi,
    /// Mock provider for testing and dry runs
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "openai" | "gpt" => Ok(LlmProviderChoice::OpenAi),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!("Unknown provider: {}. Use: none, openai, or mock.", s)),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::OpenAi => write!(f, "openai"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}
