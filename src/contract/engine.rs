//! DOCX rendering engine.
//!
//! A DOCX file is a ZIP archive of XML parts. Rendering copies the archive
//! entry by entry into a new in-memory archive and substitutes `{{ name }}`
//! tokens in the document body parts with the bound values.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use lazy_static::lazy_static;
use log::warn;
use regex::{Captures, Regex};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::GeneratorError;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid");
}

/// Stateless engine for rendering DOCX templates.
pub struct DocxRenderEngine;

impl DocxRenderEngine {
    /// Render a template archive with the given bindings.
    ///
    /// Tokens whose name has no binding are left in place and reported at
    /// warn level. A token must sit inside a single XML run in the template;
    /// tokens split across runs are not recognized.
    pub fn render(
        template_bytes: &[u8],
        bindings: &BTreeMap<String, String>,
    ) -> Result<Vec<u8>, GeneratorError> {
        let mut archive =
            ZipArchive::new(Cursor::new(template_bytes)).map_err(GeneratorError::ArchiveOpen)?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(GeneratorError::Archive)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();

            let mut contents = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut contents)
                .map_err(|e| GeneratorError::ArchiveIo {
                    name: name.clone(),
                    source: e,
                })?;

            let rendered = if is_body_part(&name) {
                substitute(&name, &contents, bindings)
            } else {
                contents
            };

            writer
                .start_file(name.clone(), options)
                .map_err(GeneratorError::Archive)?;
            writer
                .write_all(&rendered)
                .map_err(|e| GeneratorError::ArchiveIo { name, source: e })?;
        }

        let cursor = writer.finish().map_err(GeneratorError::Archive)?;
        Ok(cursor.into_inner())
    }
}

/// Document parts that carry visible text and are subject to substitution.
fn is_body_part(name: &str) -> bool {
    name == "word/document.xml"
        || (name.starts_with("word/header") && name.ends_with(".xml"))
        || (name.starts_with("word/footer") && name.ends_with(".xml"))
}

fn substitute(part: &str, contents: &[u8], bindings: &BTreeMap<String, String>) -> Vec<u8> {
    // Body parts are UTF-8 XML; anything that is not passes through untouched.
    let text = match std::str::from_utf8(contents) {
        Ok(text) => text,
        Err(_) => return contents.to_vec(),
    };

    let mut unresolved: Vec<String> = Vec::new();
    let replaced = PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let key = &caps[1];
        match bindings.get(key) {
            Some(value) => escape_xml(value),
            None => {
                unresolved.push(key.to_string());
                caps[0].to_string()
            }
        }
    });

    if !unresolved.is_empty() {
        unresolved.sort();
        unresolved.dedup();
        warn!(
            "Unresolved placeholders in {}: {}",
            part,
            unresolved.join(", ")
        );
    }

    replaced.into_owned().into_bytes()
}

/// Escape a bound value for inclusion in XML character data.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Smith & Sons"), "Smith &amp; Sons");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_is_body_part() {
        assert!(is_body_part("word/document.xml"));
        assert!(is_body_part("word/header1.xml"));
        assert!(is_body_part("word/footer2.xml"));
        assert!(!is_body_part("word/styles.xml"));
        assert!(!is_body_part("[Content_Types].xml"));
    }

    #[test]
    fn test_render_rejects_non_archive_bytes() {
        let bindings = BTreeMap::new();
        let result = DocxRenderEngine::render(b"not a zip archive", &bindings);
        assert!(matches!(result, Err(GeneratorError::ArchiveOpen(_))));
    }
}
