use flate2::read::ZlibDecoder;
use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};
use std::io::Read;

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decoded content stream bytes of every page, in page order.
pub fn page_contents(doc: &LopdfDocument) -> Vec<Vec<u8>> {
    let mut contents = Vec::new();
    for (_page_num, page_id) in doc.get_pages() {
        for content_id in doc.get_page_contents(page_id) {
            let Ok(stream) = doc.get_object(content_id).and_then(|obj| obj.as_stream()) else {
                continue;
            };
            let compressed = stream
                .dict
                .get(b"Filter")
                .and_then(|f| f.as_name())
                .map(|name| name == b"FlateDecode")
                .unwrap_or(false);
            if compressed {
                let mut decoded = Vec::new();
                ZlibDecoder::new(&stream.content[..])
                    .read_to_end(&mut decoded)
                    .expect("content stream is not valid zlib");
                contents.push(decoded);
            } else {
                contents.push(stream.content.clone());
            }
        }
    }
    contents
}

/// Strings drawn with the `Tj` operator, decoded as Latin-1.
pub fn shown_strings(doc: &LopdfDocument) -> Vec<String> {
    let mut strings = Vec::new();
    for bytes in page_contents(doc) {
        let content = Content::decode(&bytes).expect("content stream does not parse");
        for op in content.operations.iter().filter(|op| op.operator == "Tj") {
            if let Some(Object::String(text, _)) = op.operands.first() {
                strings.push(text.iter().map(|&b| b as char).collect());
            }
        }
    }
    strings
}

/// Number of operations with the given operator across all pages.
pub fn count_operator(doc: &LopdfDocument, operator: &str) -> usize {
    page_contents(doc)
        .iter()
        .filter_map(|bytes| Content::decode(bytes).ok())
        .map(|content| content.operations.iter().filter(|op| op.operator == operator).count())
        .sum()
}

/// Base font names referenced by font dictionaries in the file.
pub fn font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts: Vec<String> = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .filter(|dict| dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(&b"Font"[..]))
        .filter_map(|dict| dict.get(b"BaseFont").and_then(|f| f.as_name()).ok())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect();
    fonts.sort();
    fonts
}

/// Number of image XObjects in the file.
pub fn image_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            stream.dict.get(b"Subtype").and_then(|s| s.as_name()).ok() == Some(&b"Image"[..])
        })
        .count()
}

/// Get page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_num)?;
    let page_dict = doc.get_object(*page_id).ok()?.as_dict().ok()?;
    let media_box = page_dict.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() < 4 {
        return None;
    }
    let width = number(&media_box[2])? - number(&media_box[0])?;
    let height = number(&media_box[3])? - number(&media_box[1])?;
    Some((width, height))
}
