//! Pre-filling bills from photos of measurement sheets.

mod engine;
mod extract;

pub use engine::{check_image, OcrEngine, TesseractEngine, SUPPORTED_EXTENSIONS};
pub use extract::{
    extract_measurements, ExtractedRow, Extraction, LineOutcome, MeasurementParser,
    PositionalParser, RejectedLine,
};

use std::path::Path;

use crate::error::Result;

/// Recognize an image and parse its lines into measurement rows.
///
/// An empty [`Extraction`] means no data was found; that is not an error.
pub fn extract_from_image(
    engine: &dyn OcrEngine,
    parser: &dyn MeasurementParser,
    image: &Path,
) -> Result<Extraction> {
    let text = engine.recognize(image)?;
    Ok(extract_measurements(&text, parser))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillError;

    struct FixedText(&'static str);

    impl OcrEngine for FixedText {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn recognize(&self, _image: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl OcrEngine for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn recognize(&self, image: &Path) -> Result<String> {
            Err(BillError::ImageNotFound {
                path: image.to_path_buf(),
            })
        }
    }

    #[test]
    fn test_extract_from_image() {
        let engine = FixedText("Length 30 Width 40 Quantity 1\nSignature");
        let extraction =
            extract_from_image(&engine, &PositionalParser, Path::new("sheet.png")).unwrap();
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.rows[0].width, "40");
    }

    #[test]
    fn test_extract_from_image_propagates_engine_error() {
        let result = extract_from_image(&Failing, &PositionalParser, Path::new("gone.png"));
        assert!(matches!(result, Err(BillError::ImageNotFound { .. })));
    }
}
