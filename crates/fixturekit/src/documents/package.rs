//! WordprocessingML package writer.
//!
//! Emits the minimal set of parts Word and LibreOffice need to open a
//! document with title, heading, bullet and grid-table styling. Entry order
//! and timestamps are fixed so identical documents produce identical bytes.

use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::documents::model::{Alignment, Block, Document, Run, Table};
use crate::error::DocumentError;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// US Letter text width with 1.25" side margins, in twentieths of a point.
const TEXT_WIDTH_TWIPS: usize = 8640;

const BULLET_NUM_ID: &str = "1";

/// Serializes `doc` into DOCX bytes.
pub fn to_bytes(doc: &Document) -> Result<Vec<u8>, DocumentError> {
    let parts: [(&str, Vec<u8>); 7] = [
        ("[Content_Types].xml", content_types_xml()?),
        ("_rels/.rels", package_rels_xml()?),
        ("docProps/core.xml", core_xml(doc.title_text())?),
        ("word/_rels/document.xml.rels", document_rels_xml()?),
        ("word/document.xml", document_xml(doc)?),
        ("word/styles.xml", styles_xml()?),
        ("word/numbering.xml", numbering_xml()?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        zip.start_file(name, entry_options())
            .map_err(|e| DocumentError::Package(format!("Failed to add {}: {}", name, e)))?;
        zip.write_all(&bytes)
            .map_err(|e| DocumentError::Package(format!("Failed to write {}: {}", name, e)))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| DocumentError::Package(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Writes `doc` to `path`, replacing any existing file.
pub fn save(doc: &Document, path: &Path) -> Result<(), DocumentError> {
    let bytes = to_bytes(doc)?;
    std::fs::write(path, bytes).map_err(|e| DocumentError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

/// Thin event writer that tags errors with the part being written.
struct PartWriter {
    part: &'static str,
    writer: Writer<Vec<u8>>,
}

impl PartWriter {
    fn new(part: &'static str) -> Result<Self, DocumentError> {
        let mut this = Self {
            part,
            writer: Writer::new(Vec::new()),
        };
        this.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(this)
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), DocumentError> {
        self.writer
            .write_event(event)
            .map_err(|e| DocumentError::Xml {
                part: self.part.to_string(),
                message: e.to_string(),
            })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocumentError> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.emit(Event::Start(elem))
    }

    fn end(&mut self, name: &str) -> Result<(), DocumentError> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocumentError> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.emit(Event::Empty(elem))
    }

    fn text(&mut self, text: &str) -> Result<(), DocumentError> {
        self.emit(Event::Text(BytesText::new(text)))
    }

    /// `<name attrs>text</name>`
    fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), DocumentError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn content_types_xml() -> Result<Vec<u8>, DocumentError> {
    let mut w = PartWriter::new("[Content_Types].xml")?;
    w.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    w.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    w.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for (part, content_type) in [
        ("/word/document.xml", CT_DOCUMENT),
        ("/word/styles.xml", CT_STYLES),
        ("/word/numbering.xml", CT_NUMBERING),
        ("/docProps/core.xml", CT_CORE),
    ] {
        w.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    w.end("Types")?;
    Ok(w.finish())
}

fn relationships(
    part: &'static str,
    rels: &[(&str, &str, &str)],
) -> Result<Vec<u8>, DocumentError> {
    let mut w = PartWriter::new(part)?;
    w.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    for &(id, rel_type, target) in rels {
        w.empty(
            "Relationship",
            &[("Id", id), ("Type", rel_type), ("Target", target)],
        )?;
    }
    w.end("Relationships")?;
    Ok(w.finish())
}

fn package_rels_xml() -> Result<Vec<u8>, DocumentError> {
    relationships(
        "_rels/.rels",
        &[
            ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
            ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        ],
    )
}

fn document_rels_xml() -> Result<Vec<u8>, DocumentError> {
    relationships(
        "word/_rels/document.xml.rels",
        &[
            ("rId1", REL_STYLES, "styles.xml"),
            ("rId2", REL_NUMBERING, "numbering.xml"),
        ],
    )
}

fn core_xml(title: Option<&str>) -> Result<Vec<u8>, DocumentError> {
    let mut w = PartWriter::new("docProps/core.xml")?;
    w.start("cp:coreProperties", &[("xmlns:cp", NS_CORE), ("xmlns:dc", NS_DC)])?;
    if let Some(title) = title {
        w.leaf("dc:title", &[], title)?;
    }
    w.leaf("dc:creator", &[], env!("CARGO_PKG_NAME"))?;
    w.end("cp:coreProperties")?;
    Ok(w.finish())
}

fn document_xml(doc: &Document) -> Result<Vec<u8>, DocumentError> {
    let mut w = PartWriter::new("word/document.xml")?;
    w.start("w:document", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    w.start("w:body", &[])?;

    for block in doc.blocks() {
        match block {
            Block::Heading {
                text,
                level,
                alignment,
            } => write_heading(&mut w, text, *level, *alignment)?,
            Block::Paragraph(runs) => {
                w.start("w:p", &[])?;
                for run in runs {
                    write_run(&mut w, run)?;
                }
                w.end("w:p")?;
            }
            Block::Bullet(text) => write_bullet(&mut w, text)?,
            Block::Table(table) => write_table(&mut w, table)?,
        }
    }

    w.start("w:sectPr", &[])?;
    w.empty("w:pgSz", &[("w:w", "12240"), ("w:h", "15840")])?;
    w.empty(
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1800"),
            ("w:bottom", "1440"),
            ("w:left", "1800"),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    w.end("w:sectPr")?;

    w.end("w:body")?;
    w.end("w:document")?;
    Ok(w.finish())
}

fn heading_style(level: u8) -> String {
    if level == 0 {
        "Title".to_string()
    } else {
        format!("Heading{}", level)
    }
}

fn write_heading(
    w: &mut PartWriter,
    text: &str,
    level: u8,
    alignment: Alignment,
) -> Result<(), DocumentError> {
    let style = heading_style(level);
    w.start("w:p", &[])?;
    w.start("w:pPr", &[])?;
    w.empty("w:pStyle", &[("w:val", style.as_str())])?;
    if alignment == Alignment::Center {
        w.empty("w:jc", &[("w:val", "center")])?;
    }
    w.end("w:pPr")?;
    write_run(w, &Run::plain(text))?;
    w.end("w:p")
}

fn write_bullet(w: &mut PartWriter, text: &str) -> Result<(), DocumentError> {
    w.start("w:p", &[])?;
    w.start("w:pPr", &[])?;
    w.empty("w:pStyle", &[("w:val", "ListBullet")])?;
    w.start("w:numPr", &[])?;
    w.empty("w:ilvl", &[("w:val", "0")])?;
    w.empty("w:numId", &[("w:val", BULLET_NUM_ID)])?;
    w.end("w:numPr")?;
    w.end("w:pPr")?;
    write_run(w, &Run::plain(text))?;
    w.end("w:p")
}

fn write_run(w: &mut PartWriter, run: &Run) -> Result<(), DocumentError> {
    w.start("w:r", &[])?;
    if run.bold {
        w.start("w:rPr", &[])?;
        w.empty("w:b", &[])?;
        w.end("w:rPr")?;
    }
    for (i, segment) in run.text.split('\n').enumerate() {
        if i > 0 {
            w.empty("w:br", &[])?;
        }
        if !segment.is_empty() {
            w.leaf("w:t", &[("xml:space", "preserve")], segment)?;
        }
    }
    w.end("w:r")
}

fn write_table(w: &mut PartWriter, table: &Table) -> Result<(), DocumentError> {
    let columns = table.columns().max(1);
    let col_width = (TEXT_WIDTH_TWIPS / columns).to_string();

    w.start("w:tbl", &[])?;
    w.start("w:tblPr", &[])?;
    w.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
    w.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    w.empty("w:tblLook", &[("w:val", "04A0")])?;
    w.end("w:tblPr")?;

    w.start("w:tblGrid", &[])?;
    for _ in 0..columns {
        w.empty("w:gridCol", &[("w:w", col_width.as_str())])?;
    }
    w.end("w:tblGrid")?;

    for row in &table.rows {
        w.start("w:tr", &[])?;
        for cell in row {
            w.start("w:tc", &[])?;
            w.start("w:tcPr", &[])?;
            w.empty("w:tcW", &[("w:w", col_width.as_str()), ("w:type", "dxa")])?;
            w.end("w:tcPr")?;
            // A cell must hold at least one paragraph, even when empty.
            w.start("w:p", &[])?;
            if !cell.is_empty() {
                write_run(w, &Run::plain(cell.as_str()))?;
            }
            w.end("w:p")?;
            w.end("w:tc")?;
        }
        w.end("w:tr")?;
    }

    w.end("w:tbl")
}

fn styles_xml() -> Result<Vec<u8>, DocumentError> {
    let mut w = PartWriter::new("word/styles.xml")?;
    w.start("w:styles", &[("xmlns:w", NS_W)])?;

    w.start("w:docDefaults", &[])?;
    w.start("w:rPrDefault", &[])?;
    w.start("w:rPr", &[])?;
    w.empty(
        "w:rFonts",
        &[("w:ascii", "Calibri"), ("w:hAnsi", "Calibri"), ("w:cs", "Calibri")],
    )?;
    w.empty("w:sz", &[("w:val", "22")])?;
    w.end("w:rPr")?;
    w.end("w:rPrDefault")?;
    w.start("w:pPrDefault", &[])?;
    w.start("w:pPr", &[])?;
    w.empty("w:spacing", &[("w:after", "200"), ("w:line", "276"), ("w:lineRule", "auto")])?;
    w.end("w:pPr")?;
    w.end("w:pPrDefault")?;
    w.end("w:docDefaults")?;

    paragraph_style(&mut w, "Normal", "Normal", None, |_| Ok(()), |_| Ok(()))?;

    paragraph_style(
        &mut w,
        "Title",
        "Title",
        Some("Normal"),
        |w| {
            w.empty("w:spacing", &[("w:after", "300")])?;
            w.empty("w:contextualSpacing", &[])
        },
        |w| {
            w.empty("w:sz", &[("w:val", "52")])?;
            w.empty("w:color", &[("w:val", "17365D")])
        },
    )?;

    paragraph_style(
        &mut w,
        "Heading1",
        "heading 1",
        Some("Normal"),
        |w| {
            w.empty("w:keepNext", &[])?;
            w.empty("w:spacing", &[("w:before", "480"), ("w:after", "0")])?;
            w.empty("w:outlineLvl", &[("w:val", "0")])
        },
        |w| {
            w.empty("w:b", &[])?;
            w.empty("w:sz", &[("w:val", "28")])?;
            w.empty("w:color", &[("w:val", "365F91")])
        },
    )?;

    paragraph_style(
        &mut w,
        "ListBullet",
        "List Bullet",
        Some("Normal"),
        |w| {
            w.start("w:numPr", &[])?;
            w.empty("w:numId", &[("w:val", BULLET_NUM_ID)])?;
            w.end("w:numPr")?;
            w.empty("w:contextualSpacing", &[])
        },
        |_| Ok(()),
    )?;

    w.start("w:style", &[("w:type", "table"), ("w:styleId", "TableGrid")])?;
    w.empty("w:name", &[("w:val", "Table Grid")])?;
    w.start("w:tblPr", &[])?;
    w.start("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        w.empty(
            edge,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
        )?;
    }
    w.end("w:tblBorders")?;
    w.end("w:tblPr")?;
    w.end("w:style")?;

    w.end("w:styles")?;
    Ok(w.finish())
}

fn paragraph_style<P, R>(
    w: &mut PartWriter,
    id: &str,
    name: &str,
    based_on: Option<&str>,
    paragraph_props: P,
    run_props: R,
) -> Result<(), DocumentError>
where
    P: FnOnce(&mut PartWriter) -> Result<(), DocumentError>,
    R: FnOnce(&mut PartWriter) -> Result<(), DocumentError>,
{
    let mut attrs = vec![("w:type", "paragraph"), ("w:styleId", id)];
    if based_on.is_none() {
        attrs.push(("w:default", "1"));
    }
    w.start("w:style", &attrs)?;
    w.empty("w:name", &[("w:val", name)])?;
    if let Some(parent) = based_on {
        w.empty("w:basedOn", &[("w:val", parent)])?;
    }
    w.empty("w:qFormat", &[])?;
    w.start("w:pPr", &[])?;
    paragraph_props(w)?;
    w.end("w:pPr")?;
    w.start("w:rPr", &[])?;
    run_props(w)?;
    w.end("w:rPr")?;
    w.end("w:style")
}

fn numbering_xml() -> Result<Vec<u8>, DocumentError> {
    let mut w = PartWriter::new("word/numbering.xml")?;
    w.start("w:numbering", &[("xmlns:w", NS_W)])?;

    w.start("w:abstractNum", &[("w:abstractNumId", "0")])?;
    w.empty("w:multiLevelType", &[("w:val", "singleLevel")])?;
    w.start("w:lvl", &[("w:ilvl", "0")])?;
    w.empty("w:start", &[("w:val", "1")])?;
    w.empty("w:numFmt", &[("w:val", "bullet")])?;
    w.empty("w:lvlText", &[("w:val", "\u{2022}")])?;
    w.empty("w:lvlJc", &[("w:val", "left")])?;
    w.start("w:pPr", &[])?;
    w.empty("w:ind", &[("w:left", "360"), ("w:hanging", "360")])?;
    w.end("w:pPr")?;
    w.start("w:rPr", &[])?;
    w.empty("w:rFonts", &[("w:ascii", "Symbol"), ("w:hAnsi", "Symbol"), ("w:hint", "default")])?;
    w.end("w:rPr")?;
    w.end("w:lvl")?;
    w.end("w:abstractNum")?;

    w.start("w:num", &[("w:numId", BULLET_NUM_ID)])?;
    w.empty("w:abstractNumId", &[("w:val", "0")])?;
    w.end("w:num")?;

    w.end("w:numbering")?;
    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_has_required_parts() {
        let bytes = to_bytes(&Document::new().title("T")).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for required in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
            "docProps/core.xml",
        ] {
            assert!(names.contains(&required), "missing {}", required);
        }
    }

    #[test]
    fn test_same_document_same_bytes() {
        let doc = Document::new()
            .title("T")
            .heading("Section", 1)
            .bullets(["one", "two"])
            .table(&[("a", "b")]);
        assert_eq!(to_bytes(&doc).unwrap(), to_bytes(&doc).unwrap());
    }

    #[test]
    fn test_title_is_centered_with_title_style() {
        let bytes = to_bytes(&Document::new().title("BIG TITLE")).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/><w:jc w:val="center"/>"#));
        assert!(xml.contains("BIG TITLE"));

        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>BIG TITLE</dc:title>"));
    }

    #[test]
    fn test_newline_becomes_line_break() {
        let doc = Document::new().labeled(&[("Model: ", "Sarah Johnson\n")]);
        let xml = read_part(&to_bytes(&doc).unwrap(), "word/document.xml");
        assert!(xml.contains(
            r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Model: </w:t></w:r>"#
        ));
        assert!(xml.contains(r#"<w:t xml:space="preserve">Sarah Johnson</w:t><w:br/></w:r>"#));
    }

    #[test]
    fn test_bullets_reference_numbering() {
        let doc = Document::new().bullets(["first"]);
        let xml = read_part(&to_bytes(&doc).unwrap(), "word/document.xml");
        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
    }

    #[test]
    fn test_table_cells() {
        let doc = Document::new().table(&[("Name:", "Ann"), ("Age:", "")]);
        let xml = read_part(&to_bytes(&doc).unwrap(), "word/document.xml");
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 4);
        assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
        // the empty cell still carries a paragraph
        assert!(xml.contains("</w:tcPr><w:p></w:p></w:tc>"));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        std::fs::write(&path, b"stale").unwrap();

        save(&Document::new().title("Fresh"), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.docx");
        let result = save(&Document::new(), &path);
        assert!(matches!(result, Err(DocumentError::WriteFile { .. })));
    }
}
