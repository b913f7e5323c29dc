//! Command line definition.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MEDKNOW_LOG_LEVEL` | warn | Log level |
//! | `MEDKNOW_PRETTY` | false | Indent `convert` output |

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "medknow")]
#[command(about = "Convert and inspect FHIR R4B MedicationKnowledge resources")]
#[command(version)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "MEDKNOW_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a resource between FHIR JSON and FHIR XML
    Convert {
        /// Input file, or `-` for stdin
        input: PathBuf,
        /// Output format
        #[arg(long, value_enum)]
        to: Format,
        /// Indent the output
        #[arg(long, env = "MEDKNOW_PRETTY")]
        pretty: bool,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarize a resource: type, id, status, memory size and element counts
    Inspect {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
    /// List the nodes selected by a dotted member path such as `code.coding.code`
    Children {
        /// Input file, or `-` for stdin
        input: PathBuf,
        /// Member path, optionally starting with the resource type
        path: String,
    },
    /// Print the FHIRPath type information of a model type
    TypeInfo {
        /// Type name, e.g. `MedicationKnowledgeIngredient` or `Quantity`
        #[arg(default_value = "MedicationKnowledge")]
        type_name: String,
    },
}

/// Wire format of a resource document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Xml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Xml => f.write_str("XML"),
        }
    }
}
