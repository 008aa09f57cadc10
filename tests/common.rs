//! Shared helpers for integration tests.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Build a minimal DOCX archive whose document body is the given XML
/// fragment.
#[allow(dead_code)]
pub fn build_docx(body_xml: &str) -> Vec<u8> {
    build_docx_with_parts(body_xml, &[])
}

/// Build a minimal DOCX archive with extra named parts.
#[allow(dead_code)]
pub fn build_docx_with_parts(body_xml: &str, extra_parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
        )
        .unwrap();

    writer.start_file("word/document.xml", options).unwrap();
    writer
        .write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}</w:body></w:document>"#
            )
            .as_bytes(),
        )
        .unwrap();

    for (name, contents) in extra_parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Extract a named part from an archive as a string.
#[allow(dead_code)]
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    contents
}

/// Extract the document body part from an archive as a string.
#[allow(dead_code)]
pub fn read_document_xml(bytes: &[u8]) -> String {
    read_part(bytes, "word/document.xml")
}

/// Write a template archive into a directory, creating it as needed.
#[allow(dead_code)]
pub fn write_template(dir: &Path, file_name: &str, body_xml: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(file_name), build_docx(body_xml)).unwrap();
}
