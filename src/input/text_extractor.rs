//! Text extraction from various file formats

use crate::error::{QualifierError, Result};
use crate::input::ingress::UploadedDocument;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Turns the raw bytes of an uploaded document into plain text.
pub trait TextExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String> {
        pdf_extract::extract_text_from_mem(&document.bytes).map_err(|e| {
            QualifierError::UnreadableDocument(format!(
                "Failed to extract text from PDF '{}': {}",
                document.file_name, e
            ))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String> {
        decode_utf8(document)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String> {
        let markdown_content = decode_utf8(document)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    // Block-level closers become line breaks so the section and experience
    // patterns still see one logical line per heading/paragraph/list item.
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br />", "\n")
            .replace("</p>", "\n")
            .replace("</li>", "\n")
            .replace("</h1>", "\n")
            .replace("</h2>", "\n")
            .replace("</h3>", "\n")
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let clean_text = HTML_TAG.replace_all(&text, "").replace("&amp;", "&");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

fn decode_utf8(document: &UploadedDocument) -> Result<String> {
    String::from_utf8(document.bytes.clone()).map_err(|e| {
        QualifierError::UnreadableDocument(format!(
            "'{}' is not valid UTF-8 text: {}",
            document.file_name, e
        ))
    })
}
