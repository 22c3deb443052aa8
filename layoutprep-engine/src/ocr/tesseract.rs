//! Tesseract adapter

use super::tsv::parse_tsv;
use super::{OcrEngine, OcrPage};
use crate::error::{EngineError, Result};
use layoutprep_core::ImageSize;
use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

/// Where the TSV comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcrSource {
    /// Sidecar when present, otherwise the command
    #[default]
    Auto,
    /// Only `<image stem>.tsv` next to the image
    Sidecar,
    /// Only the `tesseract` command
    Command,
}

impl FromStr for OcrSource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(OcrSource::Auto),
            "sidecar" => Ok(OcrSource::Sidecar),
            "command" => Ok(OcrSource::Command),
            other => Err(EngineError::ConfigError(format!(
                "unknown OCR mode '{other}' (expected auto, sidecar or command)"
            ))),
        }
    }
}

impl fmt::Display for OcrSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OcrSource::Auto => "auto",
            OcrSource::Sidecar => "sidecar",
            OcrSource::Command => "command",
        })
    }
}

/// Tesseract TSV reader
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    source: OcrSource,
    program: PathBuf,
    language: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            source: OcrSource::Auto,
            program: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}

impl TesseractOcr {
    /// Adapter reading TSV from `source`
    pub fn new(source: OcrSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    /// Use a specific `tesseract` executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Recognition language passed as `-l`
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sidecar TSV for a page image
    pub fn sidecar_path(image: &Path) -> PathBuf {
        image.with_extension("tsv")
    }

    fn read_tsv(&self, image: &Path) -> Result<String> {
        let sidecar = Self::sidecar_path(image);
        match self.source {
            OcrSource::Sidecar => read_sidecar(&sidecar),
            OcrSource::Command => self.run_command(image),
            OcrSource::Auto if sidecar.is_file() => read_sidecar(&sidecar),
            OcrSource::Auto => self.run_command(image),
        }
    }

    fn run_command(&self, image: &Path) -> Result<String> {
        debug!(
            "Running {} on {} ({})",
            self.program.display(),
            image.display(),
            self.language
        );

        let output = Command::new(&self.program)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("tsv")
            .output()
            .map_err(|e| {
                EngineError::external(
                    "tesseract",
                    format!("cannot run {}: {e}", self.program.display()),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::external(
                "tesseract",
                format!("{} on {}: {}", output.status, image.display(), stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn read_sidecar(path: &Path) -> Result<String> {
    debug!("Reading OCR sidecar {}", path.display());
    fs::read_to_string(path).map_err(|e| EngineError::io(path, e))
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &Path, conf_threshold: f32) -> Result<OcrPage> {
        let tsv = parse_tsv(&self.read_tsv(image)?, conf_threshold)?;

        let image_size = match tsv.image_size {
            Some(size) => size,
            None => {
                let (width, height) = image::image_dimensions(image)?;
                ImageSize::new(width, height)
            }
        };

        Ok(OcrPage {
            image_size,
            words: tsv.words,
        })
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TSV: &str = "\
level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t
5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t90\tIntroduction
";

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            TesseractOcr::sidecar_path(Path::new("doc/page_001.png")),
            PathBuf::from("doc/page_001.tsv")
        );
    }

    #[test]
    fn test_auto_prefers_sidecar() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("page_001.png");
        fs::write(TesseractOcr::sidecar_path(&image), TSV).unwrap();

        // A program that cannot exist proves the command is never run
        let ocr = TesseractOcr::default().with_program("/nonexistent/tesseract");
        let page = ocr.recognize(&image, 40.0).unwrap();
        assert_eq!(page.image_size, ImageSize::new(800, 600));
        assert_eq!(page.words.len(), 1);
        assert_eq!(page.words[0].text, "Introduction");
    }

    #[test]
    fn test_sidecar_mode_requires_sidecar() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("page_001.png");
        let err = TesseractOcr::new(OcrSource::Sidecar)
            .recognize(&image, 40.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn test_missing_program_is_external_error() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("page_001.png");
        let err = TesseractOcr::new(OcrSource::Command)
            .with_program("/nonexistent/tesseract")
            .recognize(&image, 40.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::External { capability: "tesseract", .. }));
    }

    #[test]
    fn test_page_size_falls_back_to_image_header() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("page_001.png");
        image::RgbImage::new(320, 200).save(&image).unwrap();
        fs::write(
            TesseractOcr::sidecar_path(&image),
            "5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t90\tWord\n",
        )
        .unwrap();

        let page = TesseractOcr::default().recognize(&image, 40.0).unwrap();
        assert_eq!(page.image_size, ImageSize::new(320, 200));
    }

    #[test]
    fn test_parse_source() {
        assert_eq!("AUTO".parse::<OcrSource>().unwrap(), OcrSource::Auto);
        assert_eq!("command".parse::<OcrSource>().unwrap(), OcrSource::Command);
        assert!("paddle".parse::<OcrSource>().is_err());
    }
}
