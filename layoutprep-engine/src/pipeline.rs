//! Document pipeline and builder
//!
//! Per document: rasterize (PDFs into `images/`), OCR every page, assemble, label, persist the page
//! records, window, and render highlights. Documents are independent; their
//! chunks are merged into the dataset file in input order.

use crate::{
    assembler::PageAssembler,
    config::PipelineConfig,
    error::{DocumentFailure, EngineError, Result, Stage, StageExt},
    executor::{ExecutionMode, Executor, SequentialExecutor},
    ocr::{OcrEngine, TesseractOcr},
    raster::{document_id, DocumentRasterizer, PdfRasterizer, Rasterizer},
    records::{remove_quietly, ChunkRecord, JsonlWriter, PageRecord},
    visualize::{render_best_effort, HighlightRenderer, Renderer},
};
use layoutprep_core::{
    Chunk, ChunkWindower, HeadingRules, OverflowTokenizer, PieceTokenizer, SectionLabeler,
};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one document produced
#[derive(Debug, Clone)]
pub struct DocumentOutput {
    /// Document id
    pub doc_id: String,
    /// Document path as given
    pub source: PathBuf,
    /// Pages processed
    pub pages: usize,
    /// Words kept after OCR filtering, all pages
    pub words: usize,
    /// Highlight images written
    pub visualizations: usize,
    /// Chunks, ordered by page then chunk index
    pub chunks: Vec<Chunk>,
}

/// Outcome of one document
pub type DocumentResult = std::result::Result<DocumentOutput, DocumentFailure>;

/// Per-document line of a run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Document id
    pub doc_id: String,
    /// Document path as given
    pub source: PathBuf,
    /// Pages processed
    pub pages: usize,
    /// Chunks produced
    pub chunks: usize,
    /// Highlight images written
    pub visualizations: usize,
}

/// What a run did
#[derive(Debug)]
pub struct RunReport {
    /// Documents that made it through, in input order
    pub documents: Vec<DocumentSummary>,
    /// Documents that failed, in input order
    pub failures: Vec<DocumentFailure>,
    /// Merged dataset file
    pub dataset_path: PathBuf,
    /// Chunk records written to the dataset file
    pub chunks_written: usize,
}

impl RunReport {
    /// Whether every document succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Pages over all successful documents
    pub fn total_pages(&self) -> usize {
        self.documents.iter().map(|d| d.pages).sum()
    }
}

/// Configured document pipeline
pub struct Pipeline {
    config: PipelineConfig,
    rasterizer: Box<dyn Rasterizer>,
    ocr: Box<dyn OcrEngine>,
    tokenizer: Box<dyn OverflowTokenizer>,
    renderer: Option<Box<dyn Renderer>>,
    assembler: PageAssembler,
    labeler: SectionLabeler,
    windower: ChunkWindower,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("rasterizer", &self.rasterizer.name())
            .field("ocr", &self.ocr.name())
            .field("tokenizer", &self.tokenizer.name())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

impl Pipeline {
    /// Start building a pipeline
    pub fn builder(config: PipelineConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
    }

    /// Configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one document through every stage
    ///
    /// A failed document leaves neither page records nor highlight images
    /// behind.
    pub fn process_document(&self, document: &Path) -> DocumentResult {
        let doc_id = document_id(document);
        info!("Processing document {} ({})", doc_id, document.display());

        let images = self.rasterizer.rasterize(document).at(&doc_id, Stage::Rasterize)?;
        let pages_path = self.config.pages_path(&doc_id);
        let mut page_records = JsonlWriter::staged(&pages_path).at(&doc_id, Stage::Persist)?;
        let mut highlights = Vec::new();

        let result = match self.process_pages(
            &doc_id,
            document,
            &images,
            &mut page_records,
            &mut highlights,
        ) {
            Ok(output) => page_records
                .finish()
                .map(|_| output)
                .at(&doc_id, Stage::Persist),
            Err(failure) => {
                page_records.discard();
                Err(failure)
            }
        };

        match &result {
            Ok(output) => info!(
                "Finished {}: {} pages, {} chunks",
                doc_id,
                output.pages,
                output.chunks.len()
            ),
            Err(_) => {
                // Records of an earlier run would contradict this run's dataset
                remove_quietly(&pages_path);
                for path in &highlights {
                    remove_quietly(path);
                }
            }
        }
        result
    }

    /// OCR, label, persist, window and render each page in order
    fn process_pages(
        &self,
        doc_id: &str,
        document: &Path,
        images: &[PathBuf],
        page_records: &mut JsonlWriter,
        highlights: &mut Vec<PathBuf>,
    ) -> DocumentResult {
        let config = &self.config;
        let mut output = DocumentOutput {
            doc_id: doc_id.to_string(),
            source: document.to_path_buf(),
            pages: images.len(),
            words: 0,
            visualizations: 0,
            chunks: Vec::new(),
        };

        for (page_index, image) in images.iter().enumerate() {
            let ocr = self
                .ocr
                .recognize(image, config.conf_threshold)
                .at(doc_id, Stage::Ocr)?;
            let mut page = self
                .assembler
                .assemble(doc_id, page_index, image, ocr)
                .at(doc_id, Stage::Normalize)?;

            self.labeler.label_page(&mut page);
            page_records
                .write(&PageRecord::from(&page))
                .at(doc_id, Stage::Persist)?;

            let chunks = self
                .windower
                .window_page(&page, self.tokenizer.as_ref())
                .at(doc_id, Stage::Chunk)?;
            debug!(
                "{} page {}: {} words, {} chunks",
                doc_id,
                page_index,
                page.words.len(),
                chunks.len()
            );

            if let Some(renderer) = &self.renderer {
                let out = config.highlight_path(doc_id, page_index);
                if let Some(path) =
                    render_best_effort(renderer.as_ref(), image, &page.boxes(), &page.labels(), &out)
                {
                    highlights.push(path);
                }
            }

            output.words += page.words.len();
            output.chunks.extend(chunks);
        }

        output.visualizations = highlights.len();
        Ok(output)
    }

    /// Process every document and write the merged dataset
    pub fn run(&self, documents: &[PathBuf]) -> Result<RunReport> {
        self.run_with_progress(documents, |_| {})
    }

    /// Like [`Pipeline::run`], calling `on_done` as each document finishes
    pub fn run_with_progress<F>(&self, documents: &[PathBuf], on_done: F) -> Result<RunReport>
    where
        F: Fn(&DocumentResult) + Sync + Send,
    {
        check_unique_ids(documents)?;
        self.prepare_output()?;

        let work = |document: &PathBuf| {
            let result = self.process_document(document);
            on_done(&result);
            result
        };

        let results = match self.config.execution_mode {
            ExecutionMode::Sequential => SequentialExecutor.execute(documents, work),
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                crate::executor::ParallelExecutor::new(self.config.threads)?.execute(documents, work)
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionMode::Parallel => {
                warn!("Built without the parallel feature, running sequentially");
                SequentialExecutor.execute(documents, work)
            }
        };

        self.merge(results)
    }

    fn prepare_output(&self) -> Result<()> {
        let mut dirs = vec![self.config.intermediate_dir()];
        if self.renderer.is_some() {
            dirs.push(self.config.visualization_dir());
        }
        for dir in dirs {
            fs::create_dir_all(&dir).map_err(|e| EngineError::io(&dir, e))?;
        }
        Ok(())
    }

    /// Write every successful document's chunks in input order
    fn merge(&self, results: Vec<DocumentResult>) -> Result<RunReport> {
        let dataset_path = self.config.dataset_path();
        let mut writer = JsonlWriter::staged(&dataset_path)?;
        let mut documents = Vec::new();
        let mut failures = Vec::new();

        for result in results {
            match result {
                Ok(output) => {
                    for chunk in &output.chunks {
                        writer.write(&ChunkRecord::from(chunk))?;
                    }
                    documents.push(DocumentSummary {
                        doc_id: output.doc_id,
                        source: output.source,
                        pages: output.pages,
                        chunks: output.chunks.len(),
                        visualizations: output.visualizations,
                    });
                }
                Err(failure) => {
                    warn!("{failure}");
                    failures.push(failure);
                }
            }
        }

        let chunks_written = writer.finish()?;
        info!(
            "Wrote {} chunks from {} documents to {} ({} failed)",
            chunks_written,
            documents.len(),
            dataset_path.display(),
            failures.len()
        );

        Ok(RunReport {
            documents,
            failures,
            dataset_path,
            chunks_written,
        })
    }
}

/// Two documents with the same id would overwrite each other's records
fn check_unique_ids(documents: &[PathBuf]) -> Result<()> {
    let mut seen = HashSet::new();
    for document in documents {
        let id = document_id(document);
        if !seen.insert(id.clone()) {
            return Err(EngineError::ConfigError(format!(
                "duplicate document id '{id}' ({})",
                document.display()
            )));
        }
    }
    Ok(())
}

/// Builder for [`Pipeline`]
pub struct PipelineBuilder {
    config: PipelineConfig,
    rasterizer: Option<Box<dyn Rasterizer>>,
    ocr: Option<Box<dyn OcrEngine>>,
    tokenizer: Option<Box<dyn OverflowTokenizer>>,
    renderer: Option<Box<dyn Renderer>>,
    rules: HeadingRules,
}

impl PipelineBuilder {
    /// Builder with default collaborators
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            rasterizer: None,
            ocr: None,
            tokenizer: None,
            renderer: None,
            rules: HeadingRules::default(),
        }
    }

    /// Page image source
    pub fn rasterizer(mut self, rasterizer: impl Rasterizer + 'static) -> Self {
        self.rasterizer = Some(Box::new(rasterizer));
        self
    }

    /// OCR backend
    pub fn ocr(mut self, ocr: impl OcrEngine + 'static) -> Self {
        self.ocr = Some(Box::new(ocr));
        self
    }

    /// Sub-tokenizer
    pub fn tokenizer(mut self, tokenizer: impl OverflowTokenizer + 'static) -> Self {
        self.tokenizer = Some(Box::new(tokenizer));
        self
    }

    /// Boxed sub-tokenizer, when the backend is picked at runtime
    pub fn boxed_tokenizer(mut self, tokenizer: Box<dyn OverflowTokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Highlight renderer (only used when visuals are enabled)
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Heading rules for the labeler
    pub fn rules(mut self, rules: HeadingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Validate the configuration and build the pipeline
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;
        let windower = ChunkWindower::new(self.config.max_length, self.config.stride)?;

        let renderer = if self.config.visuals {
            Some(
                self.renderer
                    .unwrap_or_else(|| Box::new(HighlightRenderer::default())),
            )
        } else {
            None
        };

        Ok(Pipeline {
            rasterizer: self.rasterizer.unwrap_or_else(|| {
                Box::new(DocumentRasterizer::new(
                    PdfRasterizer::new(self.config.images_dir(), self.config.dpi)
                        .with_program(self.config.pdftoppm.clone()),
                ))
            }),
            ocr: self.ocr.unwrap_or_else(|| Box::new(TesseractOcr::default())),
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(PieceTokenizer::default())),
            renderer,
            assembler: PageAssembler::new(),
            labeler: SectionLabeler::new(self.rules),
            windower,
            config: self.config,
        })
    }
}
