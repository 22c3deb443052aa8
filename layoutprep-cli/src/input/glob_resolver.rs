//! Document pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use layoutprep_engine::{ImageDirRasterizer, PdfRasterizer};
use std::path::PathBuf;

/// Resolve patterns to documents
///
/// A document is a PDF, a page image or a directory of page images. Anything
/// else a pattern matches (OCR sidecars, notes) is skipped.
pub fn resolve_documents(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            let is_document = path.is_dir()
                || (path.is_file()
                    && (PdfRasterizer::is_pdf(&path) || ImageDirRasterizer::is_page_image(&path)));
            if is_document {
                documents.push(path);
            } else {
                log::debug!("Skipping {}", path.display());
            }
        }
    }

    if documents.is_empty() {
        return Err(CliError::NoDocuments(patterns.join(", ")).into());
    }

    // Remove duplicates and sort
    documents.sort();
    documents.dedup();

    Ok(documents)
}
