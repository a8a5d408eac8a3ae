//! PDF text extraction

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Extracted text and metadata from one PDF report
#[derive(Debug, Clone)]
pub struct ParsedReport {
    /// Extracted text, pages concatenated in document order. Pages with no
    /// extractable text contribute nothing.
    pub content: String,
    /// Content hash of the extracted text
    pub content_hash: String,
    /// Total pages, when the document structure is readable
    pub total_pages: Option<u32>,
}

/// PDF report parser
pub struct PdfParser;

impl PdfParser {
    /// Extract text from a PDF byte stream.
    ///
    /// Encrypted or corrupt files surface the extractor's error; a readable
    /// PDF with no text layer yields an empty content string.
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedReport> {
        let content = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::pdf_parse(filename, e.to_string()))?;

        let total_pages = match lopdf::Document::load_mem(data) {
            Ok(doc) => Some(doc.get_pages().len() as u32),
            Err(_) => None,
        };

        Ok(ParsedReport {
            content_hash: hash_content(&content),
            content,
            total_pages,
        })
    }
}

/// Hash extracted text for identification in logs
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document as PdfDocument, Object, Stream};

    /// Build a minimal one-page PDF containing the given text
    fn one_page_pdf(text: &str) -> Vec<u8> {
        let mut doc = PdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn extracts_text_from_one_page_pdf() {
        let pdf = one_page_pdf("Patient has diabetes and was given insulin");
        let parsed = PdfParser::parse("visit.pdf", &pdf).unwrap();

        assert!(parsed.content.contains("diabetes"));
        assert!(parsed.content.contains("insulin"));
        assert_eq!(parsed.total_pages, Some(1));
    }

    #[test]
    fn extracted_text_highlights_with_category_colors() {
        use crate::highlight::{self, Category};

        let pdf = one_page_pdf("Patient has diabetes and was given insulin");
        let parsed = PdfParser::parse("visit.pdf", &pdf).unwrap();
        let preview = highlight::highlight(&parsed.content);

        assert!(preview.contains(&format!(
            "<span style='background-color:{}; padding:2px;'><b>diabetes</b></span>",
            Category::Diagnosis.color()
        )));
        assert!(preview.contains(&format!(
            "<span style='background-color:{}; padding:2px;'><b>insulin</b></span>",
            Category::Medications.color()
        )));
    }

    #[test]
    fn invalid_bytes_surface_parse_error() {
        let err = PdfParser::parse("broken.pdf", b"not a pdf").unwrap_err();
        assert!(matches!(err, Error::PdfParse { .. }));
    }

    #[test]
    fn content_hash_is_stable() {
        assert_eq!(hash_content("abc"), hash_content("abc"));
        assert_ne!(hash_content("abc"), hash_content("abd"));
    }
}
