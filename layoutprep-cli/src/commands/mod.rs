//! CLI command implementations

use clap::Subcommand;
use layoutprep_core::{LabelId, DEFAULT_VOCABULARY, IGNORE_LABEL_ID};

pub mod generate_config;
pub mod label;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Turn page images and OCR output into a chunked training dataset
    Process(process::ProcessArgs),

    /// Label a sequence of words with section tags
    Label(label::LabelArgs),

    /// Validate a heading rules file
    Validate(validate::ValidateArgs),

    /// Write a heading rules or pipeline configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List section labels and their ids
    Labels,

    /// List the built-in section vocabulary
    Vocabulary,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            ListCommands::Labels => {
                println!("Section labels:");
                for label in LabelId::ALL {
                    println!("  {:>4}  {:<9} {}", label.id(), label.as_str(), describe(label));
                }
                println!("  {IGNORE_LABEL_ID:>4}  (ignored) padding and special tokens");
            }
            ListCommands::Vocabulary => {
                println!("Built-in section vocabulary:");
                for word in DEFAULT_VOCABULARY {
                    println!("  {word}");
                }
            }
        }
        Ok(())
    }
}

fn describe(label: LabelId) -> &'static str {
    match label {
        LabelId::Outside => "outside any heading",
        LabelId::BeginSection => "first word of a section heading",
        LabelId::InsideSection => "section heading continuation",
        LabelId::BeginSubsection => "first word of a sub-section heading",
        LabelId::InsideSubsection => "sub-section heading continuation",
    }
}
