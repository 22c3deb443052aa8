//! Tesseract TSV parsing
//!
//! Columns: `level page_num block_num par_num line_num word_num left top
//! width height conf text`. Level 1 rows describe the page, level 5 rows are
//! words. Structural rows carry `conf = -1`.

use super::OcrWord;
use crate::error::{EngineError, Result};
use layoutprep_core::{ImageSize, PixelBox};

const COLUMNS: usize = 12;
const PAGE_LEVEL: u8 = 1;

/// Parsed TSV: page size (when reported) and the kept words
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TsvPage {
    /// Size from the level-1 row
    pub image_size: Option<ImageSize>,
    /// Words that passed the filter
    pub words: Vec<OcrWord>,
}

/// Parse TSV output, dropping blank words and words below `conf_threshold`
pub fn parse_tsv(content: &str, conf_threshold: f32) -> Result<TsvPage> {
    let mut page = TsvPage::default();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with("level") {
            continue;
        }

        let fields: Vec<&str> = line.splitn(COLUMNS, '\t').collect();
        // Tesseract omits the trailing tab when text is empty
        if fields.len() < COLUMNS - 1 {
            return Err(malformed(line_no, "too few columns"));
        }

        let level: u8 = parse_field(fields[0], line_no, "level")?;
        let left: i32 = parse_field(fields[6], line_no, "left")?;
        let top: i32 = parse_field(fields[7], line_no, "top")?;
        let width: i32 = parse_field(fields[8], line_no, "width")?;
        let height: i32 = parse_field(fields[9], line_no, "height")?;
        let conf: f32 = parse_field(fields[10], line_no, "conf")?;
        let text = fields.get(11).map_or("", |t| t.trim());

        if level == PAGE_LEVEL && width > 0 && height > 0 {
            page.image_size = Some(ImageSize::new(width as u32, height as u32));
        }

        if text.is_empty() || conf < 0.0 || conf < conf_threshold {
            continue;
        }

        page.words.push(OcrWord {
            text: text.to_string(),
            bbox: PixelBox::new(left, top, width, height),
            confidence: conf,
        });
    }

    Ok(page)
}

fn parse_field<T: std::str::FromStr>(raw: &str, line_no: usize, column: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| malformed(line_no, &format!("bad {column} value '{raw}'")))
}

fn malformed(line_no: usize, reason: &str) -> EngineError {
    EngineError::external("tesseract", format!("TSV line {}: {reason}", line_no + 1))
}
