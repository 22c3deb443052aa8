//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use layoutprep_core::HeadingRulesConfig;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Which template to write
    #[arg(short, long, value_enum, default_value = "rules")]
    pub kind: ConfigKind,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

/// Template kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigKind {
    /// Heading rules for the labeler
    Rules,
    /// Settings for the process command
    Pipeline,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating {} template...", self.kind_name());
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Template generated successfully!");
        println!();
        println!("Next steps:");
        match self.kind {
            ConfigKind::Rules => {
                println!("1. Edit the vocabulary and limits");
                println!("2. Validate your rules:");
                println!("   layoutprep validate --rules {}", self.output.display());
                println!("3. Use them for processing:");
                println!(
                    "   layoutprep process -i 'scans/*' --rules {}",
                    self.output.display()
                );
            }
            ConfigKind::Pipeline => {
                println!("1. Adjust window geometry, OCR and performance settings");
                println!("2. Use it for processing:");
                println!(
                    "   layoutprep process -i 'scans/*' --config {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            ConfigKind::Rules => "heading rules",
            ConfigKind::Pipeline => "pipeline configuration",
        }
    }

    /// Generate template content
    fn generate_template(&self) -> Result<String> {
        let (header, body) = match self.kind {
            ConfigKind::Rules => (
                "# Heading rules for the section labeler\n\
                 #\n\
                 # vocabulary.words   section words, matched case-insensitively\n\
                 # limits             longest heading run in words\n\
                 # labels             set subsection_tags = false to tag sub-sections as sections\n\n",
                HeadingRulesConfig::default().to_toml()?,
            ),
            ConfigKind::Pipeline => (
                "# layoutprep process configuration\n\
                 #\n\
                 # Command-line flags override these values.\n\
                 # [labeling] rules = \"rules.toml\" selects custom heading rules.\n\
                 # [ocr] mode is one of auto, sidecar or command.\n\n",
                CliConfig::default().to_toml()?,
            ),
        };
        Ok(format!("{header}{body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoutprep_core::HeadingRules;
    use tempfile::TempDir;

    #[test]
    fn test_rules_template_loads() {
        let args = GenerateConfigArgs {
            kind: ConfigKind::Rules,
            output: PathBuf::from("rules.toml"),
        };

        let template = args.generate_template().unwrap();
        assert!(template.contains("[metadata]"));
        assert!(template.contains("[vocabulary]"));
        assert_eq!(
            HeadingRules::from_toml_str(&template).unwrap(),
            HeadingRules::default()
        );
    }

    #[test]
    fn test_pipeline_template_loads() {
        let args = GenerateConfigArgs {
            kind: ConfigKind::Pipeline,
            output: PathBuf::from("layoutprep.toml"),
        };

        let template = args.generate_template().unwrap();
        let config: CliConfig = toml::from_str(&template).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("rules.toml");

        let args = GenerateConfigArgs {
            kind: ConfigKind::Rules,
            output: output_path.clone(),
        };

        assert!(args.execute().is_ok());
        assert!(HeadingRules::from_file(&output_path).is_ok());
    }
}
