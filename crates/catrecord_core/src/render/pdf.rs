//! Minimal single-page PDF output.
//!
//! The file layout is fixed: header, catalog, page tree, one page, one
//! standard Type1 font, one content stream, xref table and trailer.

use super::content::ContentStream;
use super::{DocumentRenderer, RenderResult};
use std::io::Write;

/// Media type accompanying rendered documents.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const PDF_VERSION: &str = "1.4";
const FONT_RESOURCE: &str = "F1";

const CATALOG_OBJ: u32 = 1;
const PAGES_OBJ: u32 = 2;
const PAGE_OBJ: u32 = 3;
const FONT_OBJ: u32 = 4;
const CONTENT_OBJ: u32 = 5;

/// Page geometry and text placement.
///
/// Coordinates are PDF points with the origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    /// Baseline of the first line.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Downward advance between consecutive lines.
    pub line_spacing: f64,
    /// One of the standard 14 PDF font names.
    pub font_name: &'static str,
    pub font_size: f64,
}

impl Default for PageLayout {
    /// US Letter, Times-Roman 12pt, first baseline at (100, 700), 15pt leading.
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            origin_x: 100.0,
            origin_y: 700.0,
            line_spacing: 15.0,
            font_name: "Times-Roman",
            font_size: 12.0,
        }
    }
}

/// `DocumentRenderer` producing PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PageLayout,
}

impl PdfRenderer {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    fn content_for(&self, lines: &[String]) -> ContentStream {
        let mut stream = ContentStream::new();
        stream
            .begin_text()
            .set_font(FONT_RESOURCE, self.layout.font_size)
            .move_text(self.layout.origin_x, self.layout.origin_y);
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                stream.move_text(0.0, -self.layout.line_spacing);
            }
            stream.show_text(line);
        }
        stream.end_text();
        stream
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render_lines(&self, lines: &[String]) -> RenderResult<Vec<u8>> {
        let content = self.content_for(lines);
        let mut writer = PdfWriter::new(Vec::new());

        writer.write_header()?;
        writer.write_object(
            CATALOG_OBJ,
            &format!("<< /Type /Catalog /Pages {PAGES_OBJ} 0 R >>"),
        )?;
        writer.write_object(
            PAGES_OBJ,
            &format!("<< /Type /Pages /Kids [{PAGE_OBJ} 0 R] /Count 1 >>"),
        )?;
        writer.write_object(
            PAGE_OBJ,
            &format!(
                "<< /Type /Page /Parent {PAGES_OBJ} 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /{FONT_RESOURCE} {FONT_OBJ} 0 R >> >> \
                 /Contents {CONTENT_OBJ} 0 R >>",
                self.layout.width, self.layout.height
            ),
        )?;
        writer.write_object(
            FONT_OBJ,
            &format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                self.layout.font_name
            ),
        )?;
        writer.write_stream_object(CONTENT_OBJ, content.as_bytes())?;
        writer.write_xref_and_trailer(CATALOG_OBJ)?;

        writer.finish()
    }
}

/// Low-level PDF file writer tracking object byte offsets.
struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// `(object number, byte offset)` in write order.
    offsets: Vec<(u32, u64)>,
}

impl<W: Write> PdfWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> RenderResult<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> RenderResult<()> {
        self.write_bytes(s.as_bytes())
    }

    fn write_header(&mut self) -> RenderResult<()> {
        self.write_str(&format!("%PDF-{PDF_VERSION}\n"))?;
        // Binary marker so transports treat the file as binary.
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    fn write_object(&mut self, obj_num: u32, body: &str) -> RenderResult<()> {
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{obj_num} 0 obj\n{body}\nendobj\n"))
    }

    fn write_stream_object(&mut self, obj_num: u32, data: &[u8]) -> RenderResult<()> {
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!(
            "{obj_num} 0 obj\n<< /Length {} >>\nstream\n",
            data.len()
        ))?;
        self.write_bytes(data)?;
        self.write_str("\nendstream\nendobj\n")
    }

    fn write_xref_and_trailer(&mut self, root: u32) -> RenderResult<()> {
        let xref_offset = self.position;
        let mut entries = self.offsets.clone();
        entries.sort_by_key(|(obj_num, _)| *obj_num);
        let size = entries.last().map_or(1, |(obj_num, _)| obj_num + 1);

        self.write_str(&format!("xref\n0 {size}\n"))?;
        self.write_str("0000000000 65535 f \n")?;
        let mut expected = 1u32;
        for (obj_num, offset) in entries {
            while expected < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected += 1;
            }
            self.write_str(&format!("{offset:010} 00000 n \n"))?;
            expected = obj_num + 1;
        }

        self.write_str(&format!(
            "trailer\n<< /Size {size} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        ))
    }

    fn finish(mut self) -> RenderResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
