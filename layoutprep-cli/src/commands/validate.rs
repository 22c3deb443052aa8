//! Validate command implementation

use anyhow::Result;
use clap::Args;
use layoutprep_core::HeadingRules;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to heading rules file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub rules: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating heading rules: {}", self.rules.display());

        match HeadingRules::from_file(&self.rules) {
            Ok(rules) => {
                println!("✓ Rules are valid!");
                println!("  Name: {}", rules.name());
                println!("  Vocabulary words: {}", rules.vocabulary_len());
                println!("  Max header length: {}", rules.max_header_len());
                println!("  Sub-section tags: {}", rules.subsection_tags());
                Ok(())
            }
            Err(e) => {
                println!("✗ Rules are invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
