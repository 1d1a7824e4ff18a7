use crate::ExtractionError;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref SEL_BODY: Selector = Selector::parse("body").expect("valid selector");
}

/// Elements whose text never shows up on the rendered page.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line of text when rendered. Everything else is
/// inline and its text runs straight into its neighbours.
const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "details", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Extension as used for dispatch: everything after the last `.` of the file
/// name, or empty when the name has no `.`. Works on the raw name bytes, so
/// names that are not UTF-8 still dispatch on their extension.
pub fn extension(path: &Path) -> Cow<'_, str> {
    let Some(name) = path.file_name() else { return Cow::Borrowed("") };
    let bytes = name.as_encoded_bytes();
    match bytes.iter().rposition(|&b| b == b'.') {
        Some(dot) => String::from_utf8_lossy(&bytes[dot + 1..]),
        None => Cow::Borrowed(""),
    }
}

pub fn is_supported(path: &Path) -> bool {
    extension(path) == "html"
}

/// Plain text for a file's contents. Unsupported extensions yield "".
pub fn extract_text(path: &Path, bytes: &[u8]) -> String {
    if is_supported(path) {
        html_body_text(&String::from_utf8_lossy(bytes))
    } else {
        String::new()
    }
}

/// Read `path` and extract its text. A read failure is logged and treated as
/// an empty document so that it never stops a directory walk.
pub fn extract_file(path: &Path) -> String {
    match try_extract_file(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "extraction failed, skipping content"
            );
            String::new()
        }
    }
}

pub fn try_extract_file(path: &Path) -> Result<String, ExtractionError> {
    if !is_supported(path) {
        return Ok(String::new());
    }
    let bytes = fs::read(path)
        .map_err(|source| ExtractionError::Read { path: path.to_path_buf(), source })?;
    Ok(extract_text(path, &bytes))
}

/// Visible text of the `<body>`. Inline runs are concatenated as written,
/// block elements are separated by a space, and whitespace is collapsed.
/// Scripts, styles and templates are dropped.
pub fn html_body_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let Some(body) = doc.select(&SEL_BODY).next() else { return String::new() };

    let mut raw = String::new();
    push_visible_text(body, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_visible_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(child_el) => {
                let name = child_el.name();
                if HIDDEN.contains(&name) {
                    continue;
                }
                let block = BLOCK.contains(&name);
                if block {
                    out.push(' ');
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    push_visible_text(child_ref, out);
                }
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}
