//! Builders for small PDF and PPTX files used by the unit tests.

use std::io::Write;

use lopdf::{
  content::{Content, Operation},
  dictionary, Object, Stream, StringFormat,
};
use zip::{write::SimpleFileOptions, ZipWriter};

use super::*;

/// Writes a PDF with one text line per `BT`/`ET` block.
#[derive(Default)]
pub struct PdfFixture {
  pages:      Vec<Vec<String>>,
  info:       Option<(String, String)>,
  utf16_info: bool,
  signatures: Vec<(String, String)>,
}

impl PdfFixture {
  pub fn new() -> Self { Self::default() }

  pub fn page(mut self, lines: &[&str]) -> Self {
    self.pages.push(lines.iter().map(|line| line.to_string()).collect());
    self
  }

  pub fn info(mut self, title: &str, author: &str) -> Self {
    self.info = Some((title.to_string(), author.to_string()));
    self
  }

  /// Like [`PdfFixture::info`], with both strings written as UTF-16BE
  /// preceded by a byte order mark.
  pub fn utf16_info(mut self, title: &str, author: &str) -> Self {
    self.utf16_info = true;
    self.info(title, author)
  }

  pub fn signature(mut self, name: &str, date: &str) -> Self {
    self.signatures.push((name.to_string(), date.to_string()));
    self
  }

  pub fn write(self, path: &Path) {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
      "Type" => "Font",
      "Subtype" => "Type1",
      "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
      "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in &self.pages {
      let mut operations = Vec::new();
      for (i, line) in lines.iter().enumerate() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
        operations.push(Operation::new("Td", vec![72.into(), (720 - 16 * i as i64).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
        operations.push(Operation::new("ET", vec![]));
      }
      let content = Content { operations };
      let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
      let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
      });
      kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
      pages_id,
      Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
      }),
    );
    let catalog_id = doc.add_object(dictionary! {
      "Type" => "Catalog",
      "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some((title, author)) = &self.info {
      let text = |value: &str| {
        if self.utf16_info {
          let mut bytes = vec![0xFE, 0xFF];
          bytes.extend(value.encode_utf16().flat_map(u16::to_be_bytes));
          Object::String(bytes, StringFormat::Hexadecimal)
        } else {
          Object::string_literal(value)
        }
      };
      let info_id = doc.add_object(dictionary! {
        "Title" => text(title),
        "Author" => text(author),
      });
      doc.trailer.set("Info", info_id);
    }

    for (name, date) in &self.signatures {
      doc.add_object(dictionary! {
        "Type" => "Sig",
        "Filter" => "Adobe.PPKLite",
        "Name" => Object::string_literal(name.as_str()),
        "M" => Object::string_literal(date.as_str()),
        "Reason" => Object::string_literal("I am approving this document"),
      });
    }

    doc.save(path).unwrap();
  }
}

/// A slide: optional title placeholder text plus body paragraphs.
pub struct SlideFixture {
  pub title: Option<String>,
  pub body:  Vec<String>,
}

/// Writes a minimal PPTX with one `ppt/slides/slideN.xml` part per slide.
#[derive(Default)]
pub struct PptxFixture {
  slides: Vec<SlideFixture>,
}

impl PptxFixture {
  pub fn new() -> Self { Self::default() }

  pub fn slide(mut self, title: Option<&str>, body: &[&str]) -> Self {
    self.slides.push(SlideFixture {
      title: title.map(String::from),
      body:  body.iter().map(|line| line.to_string()).collect(),
    });
    self
  }

  pub fn write(self, path: &Path) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types/>"#).unwrap();

    // Written in reverse to check that slides are ordered by number.
    for (i, slide) in self.slides.iter().enumerate().rev() {
      zip.start_file(format!("ppt/slides/slide{}.xml", i + 1), options).unwrap();
      zip.write_all(slide_xml(slide).as_bytes()).unwrap();
    }
    zip.finish().unwrap();
  }
}

fn slide_xml(slide: &SlideFixture) -> String {
  let mut shapes = String::new();
  if let Some(title) = &slide.title {
    shapes.push_str(&format!(
      r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>"#,
      escape(title)
    ));
  }
  let paragraphs: String = slide
    .body
    .iter()
    .map(|line| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(line)))
    .collect();
  shapes.push_str(&format!(
    r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Body"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:txBody>{paragraphs}</p:txBody></p:sp>"#
  ));
  format!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>{shapes}</p:spTree></p:cSld></p:sld>"#
  )
}

fn escape(text: &str) -> String {
  text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
