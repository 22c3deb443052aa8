//! JSONL records
//!
//! Two record kinds are written, one JSON object per line: page records (the
//! labeled OCR result of a page) and chunk records (one model window).

use crate::error::{EngineError, Result};
use layoutprep_core::{Chunk, NormBox, Page};
use serde::de::DeserializeOwned;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Labeled OCR result of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Document id
    pub doc_id: String,
    /// Zero-based page index
    pub page_index: usize,
    /// Word texts
    pub words: Vec<String>,
    /// Normalized word boxes
    pub bboxes: Vec<NormBox>,
    /// Numeric word labels
    pub labels: Vec<u8>,
    /// OCR confidences
    pub confidences: Vec<f32>,
    /// Page image
    pub image_path: PathBuf,
    /// `[width, height]` in pixels
    pub image_size: [u32; 2],
}

impl From<&Page> for PageRecord {
    fn from(page: &Page) -> Self {
        Self {
            doc_id: page.doc_id.clone(),
            page_index: page.page_index,
            words: page.words.iter().map(|w| w.text.clone()).collect(),
            bboxes: page.boxes(),
            labels: page.words.iter().map(|w| w.label.id()).collect(),
            confidences: page.words.iter().map(|w| w.confidence).collect(),
            image_path: page.image_ref.clone(),
            image_size: [page.image_size.width, page.image_size.height],
        }
    }
}

/// One model window
///
/// Readers also accept the `input_ids` / `bbox` / `labels` names used by
/// HuggingFace datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Document id
    pub doc_id: String,
    /// Page the window was cut from
    pub page_index: usize,
    /// Position among the page's windows
    pub chunk_index: usize,
    /// Sample group reported by the tokenizer
    pub overflow_sample_index: usize,
    /// Page image
    pub image_path: PathBuf,
    /// Token ids
    #[serde(alias = "input_ids")]
    pub sub_token_ids: Vec<u32>,
    /// 1 for attended positions
    pub attention_mask: Vec<u8>,
    /// Normalized boxes
    #[serde(alias = "bbox")]
    pub sub_token_boxes: Vec<NormBox>,
    /// Numeric labels, `-100` where ignored
    #[serde(alias = "labels")]
    pub sub_token_labels: Vec<i64>,
}

impl From<&Chunk> for ChunkRecord {
    fn from(chunk: &Chunk) -> Self {
        Self {
            doc_id: chunk.doc_id.clone(),
            page_index: chunk.page_index,
            chunk_index: chunk.chunk_index,
            overflow_sample_index: chunk.overflow_sample_index,
            image_path: chunk.image_ref.clone(),
            sub_token_ids: chunk.input_ids(),
            attention_mask: chunk.attention_mask(),
            sub_token_boxes: chunk.boxes(),
            sub_token_labels: chunk.label_ids(),
        }
    }
}

/// Line-delimited JSON writer
///
/// A staged writer fills `<path>.partial` and only moves it to `path` in
/// [`JsonlWriter::finish`], so readers never see a half-written file.
#[derive(Debug)]
pub struct JsonlWriter {
    path: PathBuf,
    publish_to: Option<PathBuf>,
    inner: BufWriter<File>,
    written: usize,
}

impl JsonlWriter {
    /// Truncate or create `path`
    pub fn create(path: &Path) -> Result<Self> {
        Self::open(path.to_path_buf(), None)
    }

    /// Write next to `path`, replacing it on [`JsonlWriter::finish`]
    pub fn staged(path: &Path) -> Result<Self> {
        let mut partial = path.as_os_str().to_owned();
        partial.push(".partial");
        Self::open(PathBuf::from(partial), Some(path.to_path_buf()))
    }

    fn open(path: PathBuf, publish_to: Option<PathBuf>) -> Result<Self> {
        let file = File::create(&path).map_err(|e| EngineError::io(&path, e))?;
        Ok(Self {
            path,
            publish_to,
            inner: BufWriter::new(file),
            written: 0,
        })
    }

    /// Write one record as a line
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner
            .write_all(b"\n")
            .map_err(|e| EngineError::io(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    /// Records written through this writer
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and close, returning the number of records written
    pub fn finish(self) -> Result<usize> {
        let Self {
            path,
            publish_to,
            inner,
            written,
        } = self;

        let flushed = inner
            .into_inner()
            .map(drop)
            .map_err(|e| EngineError::io(&path, e.into_error()));
        let published = flushed.and_then(|()| match &publish_to {
            Some(target) => fs::rename(&path, target).map_err(|e| EngineError::io(target, e)),
            None => Ok(()),
        });

        if published.is_err() && publish_to.is_some() {
            remove_quietly(&path);
        }
        published.map(|()| written)
    }

    /// Drop everything written and remove the file being written
    pub fn discard(self) {
        let Self { path, inner, .. } = self;
        drop(inner);
        remove_quietly(&path);
    }
}

/// Remove a file we own, logging anything but a missing file
pub(crate) fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}

/// Read every record of a JSONL file, skipping blank lines
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| EngineError::io(path, e))?;
    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| EngineError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
