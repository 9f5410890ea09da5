//! PowerPoint (`.pptx`) loading.
//!
//! A deck is a zip archive with one `ppt/slides/slideN.xml` part per slide.
//! Every `a:p` paragraph becomes a line. The slide title is the text of the
//! title placeholder (`<p:ph type="title"/>` or `ctrTitle`), falling back to
//! the first shape with text when a slide has no title placeholder.

use std::io::{Cursor, Read, Seek};

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};
use zip::ZipArchive;

use super::*;

lazy_static! {
  static ref SLIDE_PART: Regex = Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap();
}

/// Reads `.pptx` decks into [`Document`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxAnalyzer;

impl PptxAnalyzer {
  /// Creates an analyzer.
  pub fn new() -> Self { Self }

  /// Loads and analyzes the deck at `path`.
  pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    self.analyze_archive(path, ZipArchive::new(file)?)
  }

  /// Analyzes deck bytes that were already read from `path`.
  pub fn analyze_bytes(&self, path: &Path, bytes: &[u8]) -> Result<Document> {
    self.analyze_archive(path, ZipArchive::new(Cursor::new(bytes))?)
  }

  fn analyze_archive<R: Read + Seek>(
    &self,
    path: &Path,
    mut archive: ZipArchive<R>,
  ) -> Result<Document> {
    let mut parts: Vec<(u32, String)> = archive
      .file_names()
      .filter_map(|name| {
        let number = SLIDE_PART.captures(name)?.get(1)?.as_str().parse().ok()?;
        Some((number, name.to_string()))
      })
      .collect();
    parts.sort();

    let mut pages = Vec::with_capacity(parts.len());
    for (number, name) in parts {
      let mut xml = String::new();
      archive.by_name(&name)?.read_to_string(&mut xml)?;
      let page = parse_slide(number, &xml)?;
      trace!("Slide {number}: {:?}", page.title);
      pages.push(page);
    }

    debug!("Read {} slides from {}", pages.len(), path.display());
    Ok(Document::new(path, DocumentKind::Presentation, pages))
  }
}

/// Text gathered from one `p:sp` shape.
#[derive(Default)]
struct Shape {
  is_title:   bool,
  paragraphs: Vec<String>,
}

/// Parses a single slide part.
fn parse_slide(number: u32, xml: &str) -> Result<Page> {
  let mut reader = Reader::from_str(xml);

  let mut page = Page { number, ..Page::default() };
  let mut first_text: Option<String> = None;
  let mut shape: Option<Shape> = None;
  let mut paragraph: Option<String> = None;
  let mut in_text = false;

  loop {
    match reader.read_event()? {
      Event::Start(e) => match e.name().as_ref() {
        b"p:sp" => shape = Some(Shape::default()),
        b"p:ph" => mark_title(&e, shape.as_mut()),
        b"a:p" => paragraph = Some(String::new()),
        b"a:t" => in_text = true,
        _ => {},
      },
      Event::Empty(e) => match e.name().as_ref() {
        b"p:ph" => mark_title(&e, shape.as_mut()),
        b"a:br" =>
          if let Some(text) = paragraph.as_mut() {
            text.push('\n');
          },
        _ => {},
      },
      Event::Text(e) if in_text => {
        if let Some(text) = paragraph.as_mut() {
          text.push_str(&e.unescape().map_err(quick_xml::Error::from)?);
        }
      },
      Event::End(e) => match e.name().as_ref() {
        b"a:t" => in_text = false,
        b"a:p" =>
          if let Some(text) = paragraph.take() {
            let lines = split_lines(&text);
            match shape.as_mut() {
              Some(shape) => shape.paragraphs.extend(lines),
              // Paragraphs outside shapes (tables, graphic frames) still count as text.
              None => page.lines.extend(lines),
            }
          },
        b"p:sp" =>
          if let Some(shape) = shape.take() {
            if shape.paragraphs.is_empty() {
              continue;
            }
            let text = shape.paragraphs.join(" ");
            if shape.is_title && page.title.is_none() {
              page.title = Some(text.clone());
            }
            first_text.get_or_insert(text);
            page.lines.extend(shape.paragraphs);
          },
        _ => {},
      },
      Event::Eof => break,
      _ => {},
    }
  }

  if page.title.is_none() {
    page.title = first_text;
  }
  Ok(page)
}

fn mark_title(element: &BytesStart, shape: Option<&mut Shape>) {
  let Some(shape) = shape else { return };
  shape.is_title = element.attributes().flatten().any(|attr| {
    attr.key.as_ref() == b"type"
      && matches!(attr.value.as_ref(), b"title" | b"ctrTitle" | b"vertTitle")
  });
}
