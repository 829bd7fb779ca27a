mod common;

use common::pdf_assertions::{count_operator, font_names, get_page_dimensions, image_count};
use common::{init_logger, render_document, GeneratedPdf, TestResult, EMERSON};
use folio::document::{default_registry, register_formatters, DOCUMENT, EMERSON_QUOTE, PDF};
use folio::pdf::PdfConfig;
use folio::{OptionsContext, RenderError, RenderRequest};
use serde_json::{json, Value};
use std::io::Cursor;

fn quote_values() -> Vec<(&'static str, Value)> {
    vec![
        ("heading", json!("a good quote")),
        ("author", json!("Ralph Waldo Emerson")),
        ("text", json!(EMERSON)),
    ]
}

fn tiny_png() -> Vec<u8> {
    let img = image::ImageBuffer::from_pixel(478, 718, image::Rgb([200u8, 180, 160]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[test]
fn test_quote_renders_to_a_single_letter_page() -> TestResult {
    init_logger();
    let pdf = render_document(quote_values(), None)?;

    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert_eq!(pdf.page_count(), 1);
    assert_eq!(get_page_dimensions(&pdf.doc, 1), Some((612.0, 792.0)));
    Ok(())
}

#[test]
fn test_author_line_comes_first() -> TestResult {
    let pdf = render_document(quote_values(), None)?;
    let shown = pdf.shown_text();
    assert_eq!(shown.first().map(String::as_str), Some("-- Ralph Waldo Emerson --"));
    Ok(())
}

#[test]
fn test_heading_is_drawn_in_bold() -> TestResult {
    let pdf = render_document(quote_values(), None)?;
    assert!(pdf.contains_text("a good quote"));
    assert_eq!(font_names(&pdf.doc), vec!["Helvetica", "Helvetica-Bold"]);
    Ok(())
}

#[test]
fn test_quote_is_wrapped_across_lines() -> TestResult {
    let pdf = render_document(quote_values(), None)?;
    let shown = pdf.shown_text();

    // Author line and heading come before the body.
    let body: Vec<&String> = shown.iter().skip(2).collect();
    assert!(body.len() > 2, "expected several body lines, got {:?}", body);
    assert!(body[0].starts_with("A foolish consistency"));
    let joined = body.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" ");
    assert!(joined.contains("hobgoblin of little minds"));
    Ok(())
}

#[test]
fn test_full_quote_is_drawn_to_its_last_word() -> TestResult {
    let pdf = render_document(
        vec![
            ("heading", json!("a good quote")),
            ("author", json!("Ralph Waldo Emerson")),
            ("text", json!(EMERSON_QUOTE)),
        ],
        None,
    )?;
    let shown = pdf.shown_text();

    let last = shown.last().map(String::as_str).unwrap_or_default();
    assert!(last.ends_with("To be great is to be misunderstood."), "last line: {:?}", last);
    assert!(shown[2..].join(" ").contains("Pythagoras was misunderstood"));
    Ok(())
}

#[test]
fn test_text_can_be_supplied_by_the_customize_callback() -> TestResult {
    let set_text = |o: &mut OptionsContext| {
        o.assign("text", "Speak what you think now in hard words.").unwrap();
    };
    let pdf = render_document(
        vec![("author", json!("Ralph Waldo Emerson"))],
        Some(&set_text),
    )?;
    assert!(pdf.contains_text("Speak what you think now in hard words."));
    Ok(())
}

#[test]
fn test_missing_author_fails_before_rendering() {
    let err = render_document(vec![("text", json!("hi"))], None).err().unwrap();
    assert!(matches!(err, RenderError::MissingRequiredOption(ref name) if name == "author"));
    assert_eq!(err.to_string(), "Required option 'author' was not set");
}

#[test]
fn test_missing_image_fails_the_body_stage() {
    let mut values = quote_values();
    values.push(("image", json!("/no/such/RWEmerson.jpg")));

    let err = render_document(values, None).err().unwrap();
    assert_eq!(err.failed_stage(), Some("document_body"));
    match err {
        RenderError::StageExecutionFailure { handler, source, .. } => {
            assert_eq!(handler, "build_document_body");
            assert!(source.to_string().contains("RWEmerson.jpg"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_image_is_embedded_when_given() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("portrait.png");
    std::fs::write(&path, tiny_png())?;

    let mut values = quote_values();
    values.push(("image", json!(path.to_string_lossy())));
    let pdf = render_document(values, None)?;

    assert_eq!(image_count(&pdf.doc), 1);
    assert_eq!(count_operator(&pdf.doc, "Do"), 1);
    Ok(())
}

#[test]
fn test_box_size_options_change_the_wrapping() -> TestResult {
    let narrow = render_document(
        quote_values().into_iter().chain([("width", json!(200)), ("height", json!(400))]),
        None,
    )?;
    let wide = render_document(quote_values(), None)?;
    assert!(narrow.shown_text().len() > wide.shown_text().len());
    Ok(())
}

#[test]
fn test_fill_color_accepts_hex_strings() -> TestResult {
    let mut values = quote_values();
    values.push(("fill_color", json!("#ffffcc")));
    let pdf = render_document(values, None)?;
    assert_eq!(pdf.page_count(), 1);

    let mut bad = quote_values();
    bad.push(("fill_color", json!("ivory")));
    let err = render_document(bad, None).err().unwrap();
    assert_eq!(err.failed_stage(), Some("document_body"));
    Ok(())
}

#[test]
fn test_unknown_format_is_rejected() {
    let err = RenderRequest::new(&DOCUMENT, "xlsx")
        .options(quote_values())
        .render(&default_registry())
        .unwrap_err();
    assert!(matches!(err, RenderError::NoFormatterRegistered { .. }));
}

#[test]
fn test_custom_page_setup_through_a_registered_constructor() -> TestResult {
    let mut registry = folio::FormatterRegistry::new();
    register_formatters(&mut registry);
    registry.register(DOCUMENT.id(), PDF, || {
        Box::new(folio::document::pdf_formatter(
            PdfConfig::new()
                .with_page_size(folio::pdf::PageSize::A4)
                .with_compression(false),
        ))
    });

    let output = RenderRequest::new(&DOCUMENT, PDF)
        .options(quote_values())
        .render(&registry)?;
    let pdf = GeneratedPdf::from_bytes(output.into_bytes())?;

    assert_eq!(get_page_dimensions(&pdf.doc, 1), Some((595.0, 842.0)));
    assert!(pdf.contains_text("-- Ralph Waldo Emerson --"));
    Ok(())
}

#[test]
fn test_pdf_can_be_written_to_disk() -> TestResult {
    let pdf = render_document(quote_values(), None)?;
    let file = tempfile::NamedTempFile::new()?;
    std::fs::write(file.path(), &pdf.bytes)?;

    let reloaded = GeneratedPdf::from_bytes(std::fs::read(file.path())?)?;
    assert_eq!(reloaded.shown_text(), pdf.shown_text());
    Ok(())
}
