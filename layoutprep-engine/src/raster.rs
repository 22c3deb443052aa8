//! Documents to page images
//!
//! A document is a PDF, a single page image, or a directory holding one image
//! per page. PDFs are rendered with poppler's `pdftoppm` into the output's
//! `images/` directory; page images are used in place.

mod pdf;

pub use pdf::PdfRasterizer;

use crate::error::{EngineError, Result};
use std::cmp::Ordering;
use std::fs;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

/// Extensions accepted as page images
pub const PAGE_IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Turns a document into its ordered page images
pub trait Rasterizer: Send + Sync {
    /// Page image paths, first page first
    fn rasterize(&self, document: &Path) -> Result<Vec<PathBuf>>;

    /// Human-readable backend name
    fn name(&self) -> &'static str;
}

/// Single page image, or a directory holding one image per page
#[derive(Debug, Clone, Default)]
pub struct ImageDirRasterizer;

impl ImageDirRasterizer {
    /// Whether `path` has a page image extension
    pub fn is_page_image(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                PAGE_IMAGE_EXTENSIONS
                    .iter()
                    .any(|ext| e.eq_ignore_ascii_case(ext))
            })
    }
}

impl Rasterizer for ImageDirRasterizer {
    fn rasterize(&self, document: &Path) -> Result<Vec<PathBuf>> {
        let meta = fs::metadata(document).map_err(|e| EngineError::io(document, e))?;

        if meta.is_file() {
            return if Self::is_page_image(document) {
                Ok(vec![document.to_path_buf()])
            } else {
                Err(EngineError::NoPages {
                    path: document.to_path_buf(),
                })
            };
        }

        let mut pages = Vec::new();
        for entry in fs::read_dir(document).map_err(|e| EngineError::io(document, e))? {
            let path = entry.map_err(|e| EngineError::io(document, e))?.path();
            if path.is_file() && Self::is_page_image(&path) {
                pages.push(path);
            }
        }

        if pages.is_empty() {
            return Err(EngineError::NoPages {
                path: document.to_path_buf(),
            });
        }

        // page_2 before page_10, padded or not
        pages.sort_by(|a, b| natural_path_cmp(a, b));
        Ok(pages)
    }

    fn name(&self) -> &'static str {
        "image-dir"
    }
}

/// PDFs through [`PdfRasterizer`], everything else through [`ImageDirRasterizer`]
#[derive(Debug, Clone, Default)]
pub struct DocumentRasterizer {
    images: ImageDirRasterizer,
    pdf: PdfRasterizer,
}

impl DocumentRasterizer {
    /// Dispatch PDFs to `pdf`
    pub fn new(pdf: PdfRasterizer) -> Self {
        Self {
            images: ImageDirRasterizer,
            pdf,
        }
    }
}

impl Rasterizer for DocumentRasterizer {
    fn rasterize(&self, document: &Path) -> Result<Vec<PathBuf>> {
        if PdfRasterizer::is_pdf(document) {
            self.pdf.rasterize(document)
        } else {
            self.images.rasterize(document)
        }
    }

    fn name(&self) -> &'static str {
        "document"
    }
}

/// Compare file names with digit runs taken as numbers
pub fn natural_path_cmp(a: &Path, b: &Path) -> Ordering {
    let name = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned());
    match (name(a), name(b)) {
        (Some(x), Some(y)) => natural_cmp(&x, &y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Natural string order: `page_2` < `page_10`, `a01` == `a1` broken by length
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut x, mut y) = (a.chars().peekable(), b.chars().peekable());
    loop {
        match (x.peek().copied(), y.peek().copied()) {
            (None, None) => return a.len().cmp(&b.len()),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(c), Some(d)) if c.is_ascii_digit() && d.is_ascii_digit() => {
                let (m, n) = (digit_run(&mut x), digit_run(&mut y));
                let (m, n) = (m.trim_start_matches('0'), n.trim_start_matches('0'));
                let order = m.len().cmp(&n.len()).then_with(|| m.cmp(n));
                if order != Ordering::Equal {
                    return order;
                }
            }
            (Some(c), Some(d)) => {
                if c != d {
                    return c.cmp(&d);
                }
                x.next();
                y.next();
            }
        }
    }
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

/// Document id derived from the document path (file stem or directory name)
pub fn document_id(document: &Path) -> String {
    let name = if document.is_dir() {
        document.file_name()
    } else {
        document.file_stem()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
