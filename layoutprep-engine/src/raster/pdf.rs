//! PDF documents rendered through poppler's `pdftoppm`

use super::{document_id, natural_path_cmp, Rasterizer};
use crate::config::DEFAULT_DPI;
use crate::error::{EngineError, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Renders every PDF page to `<images_dir>/<doc_id>_page_NNN.png`
#[derive(Debug, Clone)]
pub struct PdfRasterizer {
    program: PathBuf,
    dpi: u32,
    images_dir: PathBuf,
}

impl PdfRasterizer {
    /// Rasterizer writing pages under `images_dir` at `dpi`
    pub fn new(images_dir: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            program: PathBuf::from("pdftoppm"),
            dpi,
            images_dir: images_dir.into(),
        }
    }

    /// Use a specific `pdftoppm` executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Render resolution
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Whether `path` has a `.pdf` extension
    pub fn is_pdf(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    }

    /// Final image of one page (`page_number` starts at 1)
    pub fn page_path(&self, doc_id: &str, page_number: usize) -> PathBuf {
        self.images_dir
            .join(format!("{doc_id}_page_{page_number:03}.png"))
    }

    /// Run `pdftoppm` into `staging`, returning its pages in order
    fn render(&self, document: &Path, staging: &Path) -> Result<Vec<PathBuf>> {
        debug!(
            "Running {} on {} at {} dpi",
            self.program.display(),
            document.display(),
            self.dpi
        );

        let output = Command::new(&self.program)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(document)
            .arg(staging.join("page"))
            .output()
            .map_err(|e| {
                EngineError::external(
                    "pdftoppm",
                    format!("cannot run {}: {e}", self.program.display()),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::external(
                "pdftoppm",
                format!("{} on {}: {}", output.status, document.display(), stderr.trim()),
            ));
        }

        let mut pages = Vec::new();
        for entry in fs::read_dir(staging).map_err(|e| EngineError::io(staging, e))? {
            let path = entry.map_err(|e| EngineError::io(staging, e))?.path();
            if path.extension().is_some_and(|e| e == "png") {
                pages.push(path);
            }
        }
        // pdftoppm pads page numbers to the page count's width only
        pages.sort_by(|a, b| natural_path_cmp(a, b));
        Ok(pages)
    }

    /// Move rendered pages to their final names
    fn publish(&self, doc_id: &str, rendered: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        rendered
            .into_iter()
            .enumerate()
            .map(|(i, from)| {
                let to = self.page_path(doc_id, i + 1);
                fs::rename(&from, &to).map_err(|e| EngineError::io(&to, e))?;
                Ok(to)
            })
            .collect()
    }
}

impl Default for PdfRasterizer {
    fn default() -> Self {
        Self::new("images", DEFAULT_DPI)
    }
}

impl Rasterizer for PdfRasterizer {
    fn rasterize(&self, document: &Path) -> Result<Vec<PathBuf>> {
        if !fs::metadata(document)
            .map_err(|e| EngineError::io(document, e))?
            .is_file()
        {
            return Err(EngineError::NoPages {
                path: document.to_path_buf(),
            });
        }

        // One staging directory per document keeps concurrent renders apart
        let doc_id = document_id(document);
        let staging = self.images_dir.join(format!(".{doc_id}.render"));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| EngineError::io(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| EngineError::io(&staging, e))?;

        let result = self
            .render(document, &staging)
            .and_then(|pages| {
                if pages.is_empty() {
                    Err(EngineError::NoPages {
                        path: document.to_path_buf(),
                    })
                } else {
                    self.publish(&doc_id, pages)
                }
            });

        if let Err(e) = fs::remove_dir_all(&staging) {
            warn!("Could not remove {}: {}", staging.display(), e);
        }
        result
    }

    fn name(&self) -> &'static str {
        "pdftoppm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_pdf() {
        assert!(PdfRasterizer::is_pdf(Path::new("papers/a.PDF")));
        assert!(!PdfRasterizer::is_pdf(Path::new("papers/a.png")));
        assert!(!PdfRasterizer::is_pdf(Path::new("papers/pdf")));
    }

    #[test]
    fn test_page_path() {
        let r = PdfRasterizer::new("/out/images", 150);
        assert_eq!(
            r.page_path("paper", 3),
            PathBuf::from("/out/images/paper_page_003.png")
        );
        assert_eq!(r.dpi(), 150);
    }

    #[test]
    fn test_missing_program_is_external_error() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("paper.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        let images = dir.path().join("images");

        let err = PdfRasterizer::new(&images, 200)
            .with_program("/nonexistent/pdftoppm")
            .rasterize(&pdf)
            .unwrap_err();
        assert!(matches!(err, EngineError::External { capability: "pdftoppm", .. }));
        // Staging directory removed on failure
        assert!(!images.join(".paper.render").exists());
    }

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let err = PdfRasterizer::new(dir.path(), 200)
            .rasterize(&dir.path().join("nowhere.pdf"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    /// Stand-in for pdftoppm writing unpadded page numbers, like a short PDF would
    #[cfg(unix)]
    fn fake_pdftoppm(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fake-pdftoppm");
        // args: -r <dpi> -png <pdf> <prefix>
        fs::write(
            &script,
            "#!/bin/sh\nfor n in 1 2 10; do echo \"$2\" > \"$5-$n.png\"; done\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[cfg(unix)]
    #[test]
    fn test_pages_renamed_in_page_order() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("paper.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        let images = dir.path().join("images");

        let pages = PdfRasterizer::new(&images, 300)
            .with_program(fake_pdftoppm(dir.path()))
            .rasterize(&pdf)
            .unwrap();

        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["paper_page_001.png", "paper_page_002.png", "paper_page_003.png"]
        );
        // The tenth rendered page is the last one and carries the requested dpi
        assert_eq!(fs::read_to_string(&pages[2]).unwrap().trim(), "300");
        assert!(!images.join(".paper.render").exists());
    }
}
