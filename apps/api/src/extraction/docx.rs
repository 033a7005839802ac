//! DOCX adapter. A .docx file is a zip archive; the body lives in
//! `word/document.xml` as `<w:p>` paragraphs made of `<w:t>` text runs.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph properties are skipped whole: their `<w:tabs>` stop definitions
/// would otherwise read as tab characters. `<mc:Fallback>` is skipped too: Word
/// stores every text box twice, once under `<mc:Choice>` and once as a VML copy
/// under `<mc:Fallback>`, and only the first copy is read.
const TOKEN_PATTERN: &str = concat!(
    r"(?s)(?P<skip><w:pPr\b[^>]*/>|<w:pPr\b[^>]*>.*?</w:pPr>",
    r"|<mc:Fallback\b[^>]*/>|<mc:Fallback\b[^>]*>.*?</mc:Fallback>)",
    r"|(?P<pempty><w:p\b[^>]*/>)",
    r"|(?P<popen><w:p\b[^>]*>)",
    r"|(?P<pclose></w:p>)",
    r"|<w:t\b[^>]*/>",
    r"|<w:t\b[^>]*>(?P<text>[^<]*)</w:t>",
    r"|(?P<tab><w:tab\b[^>]*/>)",
    r"|(?P<brk><w:(?:br|cr)\b[^>]*/>)",
);

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("valid docx token regex"))
}

/// Paragraph text joined with newlines.
pub fn extract(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data)).context("not a zip archive")?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("missing {DOCUMENT_PART}"))?
        .read_to_string(&mut xml)
        .with_context(|| format!("unreadable {DOCUMENT_PART}"))?;

    Ok(paragraphs_from_xml(&xml).join("\n"))
}

/// Every `<w:p>` in document order, including empty ones. Paragraphs nested in
/// text boxes are emitted once, before the paragraph that contains them.
pub fn paragraphs_from_xml(xml: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();

    for caps in token_regex().captures_iter(xml) {
        if caps.name("skip").is_some() {
            continue;
        } else if caps.name("pempty").is_some() {
            paragraphs.push(String::new());
        } else if caps.name("popen").is_some() {
            open.push(String::new());
        } else if caps.name("pclose").is_some() {
            if let Some(paragraph) = open.pop() {
                paragraphs.push(paragraph);
            }
        } else if let Some(current) = open.last_mut() {
            if let Some(text) = caps.name("text") {
                current.push_str(&decode_entities(text.as_str()));
            } else if caps.name("tab").is_some() {
                current.push('\t');
            } else if caps.name("brk").is_some() {
                current.push('\n');
            }
        }
    }

    paragraphs
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
