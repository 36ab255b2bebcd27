//! Text recognition engines.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{BillError, Result};

/// Image extensions accepted for upload.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Anything that can turn an image of a measurement sheet into text.
pub trait OcrEngine {
    /// Engine identifier for logs (e.g. "tesseract").
    fn name(&self) -> &'static str;

    /// Recognize the text in an image, one line of the sheet per line.
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Check that `path` exists and has an accepted image extension.
pub fn check_image(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(BillError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let supported = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()));

    if supported {
        Ok(())
    } else {
        Err(BillError::UnsupportedImage {
            path: path.to_path_buf(),
        })
    }
}

/// Runs the `tesseract` command-line program.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    /// Program to run.
    pub program: PathBuf,
    /// Tesseract language code.
    pub language: String,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}

impl TesseractEngine {
    /// Create an engine using a specific tesseract binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        check_image(image)?;
        info!("Running text recognition on {}", image.display());

        let output = Command::new(&self.program)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| BillError::Ocr {
                message: format!("could not run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BillError::Ocr {
                message: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = text.len(), "Recognized text");
        Ok(text)
    }
}
