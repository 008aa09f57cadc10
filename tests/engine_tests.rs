mod common;

use std::collections::BTreeMap;
use std::io::Cursor;

use contract_doc_server::contract::DocxRenderEngine;

fn bindings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_render_substitutes_placeholders() {
    let template = common::build_docx(
        "<w:p><w:r><w:t>{{employee_name}} works on {{project_name}}</w:t></w:r></w:p>",
    );
    let rendered = DocxRenderEngine::render(
        &template,
        &bindings(&[
            ("employee_name", "Jane Doe"),
            ("project_name", "Riverside Tower"),
        ]),
    )
    .unwrap();

    let body = common::read_document_xml(&rendered);
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("Riverside Tower"));
    assert!(!body.contains("{{employee_name}}"));
    assert!(!body.contains("{{project_name}}"));
}

#[test]
fn test_render_accepts_spaced_tokens() {
    let template = common::build_docx("<w:p><w:r><w:t>{{ employee_name }}</w:t></w:r></w:p>");
    let rendered =
        DocxRenderEngine::render(&template, &bindings(&[("employee_name", "Jane Doe")])).unwrap();

    let body = common::read_document_xml(&rendered);
    assert!(body.contains("Jane Doe"));
    assert!(!body.contains("employee_name"));
}

#[test]
fn test_render_escapes_xml_in_values() {
    let template = common::build_docx("<w:p><w:r><w:t>{{project_name}}</w:t></w:r></w:p>");
    let rendered = DocxRenderEngine::render(
        &template,
        &bindings(&[("project_name", "Smith & Sons <Construction>")]),
    )
    .unwrap();

    let body = common::read_document_xml(&rendered);
    assert!(body.contains("Smith &amp; Sons &lt;Construction&gt;"));
}

#[test]
fn test_render_leaves_unbound_tokens_in_place() {
    let template =
        common::build_docx("<w:p><w:r><w:t>{{employee_name}} {{unknown_field}}</w:t></w:r></w:p>");
    let rendered =
        DocxRenderEngine::render(&template, &bindings(&[("employee_name", "Jane Doe")])).unwrap();

    let body = common::read_document_xml(&rendered);
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("{{unknown_field}}"));
}

#[test]
fn test_render_skips_non_body_parts() {
    let template = common::build_docx_with_parts(
        "<w:p><w:r><w:t>{{employee_name}}</w:t></w:r></w:p>",
        &[("word/styles.xml", "<w:styles>{{employee_name}}</w:styles>")],
    );
    let rendered =
        DocxRenderEngine::render(&template, &bindings(&[("employee_name", "Jane Doe")])).unwrap();

    assert!(common::read_document_xml(&rendered).contains("Jane Doe"));
    assert!(common::read_part(&rendered, "word/styles.xml").contains("{{employee_name}}"));
}

#[test]
fn test_rendered_output_is_a_valid_archive() {
    let template = common::build_docx("<w:p><w:r><w:t>{{employee_name}}</w:t></w:r></w:p>");
    let rendered =
        DocxRenderEngine::render(&template, &bindings(&[("employee_name", "Jane Doe")])).unwrap();

    let archive = zip::ZipArchive::new(Cursor::new(&rendered[..])).unwrap();
    assert!(archive.len() >= 2);
}
