//! Office Open XML workbooks.
//!
//! Only the first worksheet is read. Cell values are taken as stored:
//! shared and inline strings resolve to their text, numbers keep their
//! written form and booleans read as `TRUE` / `FALSE`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use mtpgen_xml::XmlElement;
use zip::ZipArchive;

use crate::{Error, Result, Table};

const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const FIRST_SHEET_FALLBACK: &str = "xl/worksheets/sheet1.xml";

/// Cells keyed by zero-based row, then zero-based column.
type Cells = BTreeMap<u32, BTreeMap<u32, String>>;

/// Read the first worksheet of the workbook at `path`.
pub(crate) fn read(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file).map_err(|message| Error::Workbook {
        path: path.to_path_buf(),
        message,
    })
}

fn read_from<R: Read + Seek>(reader: R) -> std::result::Result<Table, String> {
    let mut zip = ZipArchive::new(reader).map_err(|e| e.to_string())?;

    let shared = match read_part(&mut zip, SHARED_STRINGS)? {
        Some(xml) => shared_strings(&xml),
        None => Vec::new(),
    };

    let sheet_path = first_sheet_path(&mut zip)?;
    tracing::trace!(sheet = %sheet_path, shared = shared.len(), "reading worksheet");
    let sheet = read_part(&mut zip, &sheet_path)?
        .ok_or_else(|| format!("worksheet part {} is missing", sheet_path))?;

    Ok(into_table(sheet_cells(&sheet, &shared)?))
}

/// Parse a named part, or `None` when the archive does not contain it.
fn read_part<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
) -> std::result::Result<Option<XmlElement>, String> {
    let mut entry = match zip.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Cell text keeps its spaces (`xml:space="preserve"`)
    XmlElement::parse_preserving_whitespace(&bytes)
        .map(Some)
        .map_err(|e| format!("{}: {}", name, e))
}

/// Tag name without its namespace prefix.
fn local(tag: &str) -> &str {
    tag.rsplit(':').next().unwrap_or(tag)
}

fn children<'a>(element: &'a XmlElement, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
    element.children.iter().filter(move |c| local(&c.tag) == name)
}

fn child<'a>(element: &'a XmlElement, name: &str) -> Option<&'a XmlElement> {
    element.children.iter().find(|c| local(&c.tag) == name)
}

/// Resolve the part holding the first sheet listed in the workbook.
fn first_sheet_path<R: Read + Seek>(zip: &mut ZipArchive<R>) -> std::result::Result<String, String> {
    let rel_id = read_part(zip, WORKBOOK)?.and_then(|workbook| {
        let sheets = child(&workbook, "sheets")?;
        let sheet = children(sheets, "sheet").next()?;
        sheet
            .attributes
            .iter()
            .find(|(key, _)| local(key) == "id" && key.contains(':'))
            .map(|(_, value)| value.to_string())
    });

    let target = match (rel_id, read_part(zip, WORKBOOK_RELS)?) {
        (Some(id), Some(rels)) => children(&rels, "Relationship")
            .find(|rel| rel.attribute("Id") == Some(id.as_str()))
            .and_then(|rel| rel.attribute("Target"))
            .map(|target| match target.strip_prefix('/') {
                Some(absolute) => absolute.to_string(),
                None => format!("xl/{}", target),
            }),
        _ => None,
    };

    Ok(target.unwrap_or_else(|| FIRST_SHEET_FALLBACK.to_string()))
}

/// Texts of the shared string table, in index order.
fn shared_strings(sst: &XmlElement) -> Vec<String> {
    children(sst, "si").map(string_item_text).collect()
}

/// Text of a string item: a plain `<t>` or the runs of rich text.
/// Phonetic hints (`<rPh>`) are not part of the value.
fn string_item_text(item: &XmlElement) -> String {
    let mut text = String::new();
    for part in &item.children {
        match local(&part.tag) {
            "t" => text.push_str(part.content()),
            "r" => {
                if let Some(t) = child(part, "t") {
                    text.push_str(t.content());
                }
            }
            _ => {}
        }
    }
    text
}

fn sheet_cells(sheet: &XmlElement, shared: &[String]) -> std::result::Result<Cells, String> {
    let mut cells = Cells::new();
    let Some(data) = child(sheet, "sheetData") else {
        return Ok(cells);
    };

    let mut next_row = 0u32;
    for row in children(data, "row") {
        let row_index = match row.attribute("r") {
            Some(r) => r
                .parse::<u32>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| format!("invalid row number '{}'", r))?,
            None => next_row,
        };
        next_row = row_index + 1;

        let mut next_col = 0u32;
        let row_cells = cells.entry(row_index).or_default();
        for cell in children(row, "c") {
            let col_index = match cell.attribute("r") {
                Some(reference) => column_index(reference)
                    .ok_or_else(|| format!("invalid cell reference '{}'", reference))?,
                None => next_col,
            };
            next_col = col_index + 1;

            if let Some(value) = cell_value(cell, shared)? {
                row_cells.insert(col_index, value);
            }
        }
    }

    Ok(cells)
}

/// Zero-based column of an `A1`-style reference.
fn column_index(reference: &str) -> Option<u32> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }

    let mut col = 0u32;
    for letter in letters {
        col = col
            .checked_mul(26)?
            .checked_add(u32::from(letter.to_ascii_uppercase() - b'A') + 1)?;
    }
    Some(col - 1)
}

fn cell_value(cell: &XmlElement, shared: &[String]) -> std::result::Result<Option<String>, String> {
    let raw = child(cell, "v").map(XmlElement::content);

    let value = match cell.attribute("t") {
        Some("s") => {
            let Some(raw) = raw else { return Ok(None) };
            let index: usize = raw
                .trim()
                .parse()
                .map_err(|_| format!("invalid shared string index '{}'", raw))?;
            let text = shared
                .get(index)
                .ok_or_else(|| format!("shared string index {} out of range", index))?;
            Some(text.clone())
        }
        Some("inlineStr") => child(cell, "is").map(string_item_text),
        Some("b") => raw.map(|v| (if v.trim() == "1" { "TRUE" } else { "FALSE" }).to_string()),
        _ => raw.map(|v| v.trim().to_string()),
    };

    Ok(value)
}

/// First populated row becomes the header. Later rows keep their positions,
/// so blank rows in the sheet read as rows of empty cells.
fn into_table(cells: Cells) -> Table {
    let mut rows = cells.into_iter();
    let Some((header_index, header)) = rows.next() else {
        return Table::default();
    };

    let width = header.keys().next_back().map_or(0, |last| *last as usize + 1);
    let headers = dense_row(header, width);

    let mut table_rows = Vec::new();
    let mut expected = header_index + 1;
    for (index, row) in rows {
        while expected < index {
            table_rows.push(vec![String::new(); width]);
            expected += 1;
        }
        table_rows.push(dense_row(row, width));
        expected = index + 1;
    }

    // Trailing rows with formatting but no values are not data
    while table_rows
        .last()
        .is_some_and(|row| row.iter().all(String::is_empty))
    {
        table_rows.pop();
    }

    Table {
        headers,
        rows: table_rows,
    }
}

fn dense_row(row: BTreeMap<u32, String>, width: usize) -> Vec<String> {
    let mut dense = vec![String::new(); width];
    for (col, value) in row {
        if let Some(slot) = dense.get_mut(col as usize) {
            *slot = value;
        }
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Target="worksheets/sheet2.xml" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet"/>
  <Relationship Id="rId1" Target="/xl/worksheets/data.xml" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet"/>
</Relationships>"#;

    const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Labels" sheetId="1" r:id="rId1"/>
    <sheet name="Other" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#;

    const SST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>Labels</t></si>
  <si><t>-X1</t></si>
  <si><r><t>K1</t></r><r><rPr><b/></rPr><t>:A</t></r><rPh><t>ignored</t></rPh></si>
  <si><t>Note</t></si>
</sst>"#;

    const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>3</v></c><c r="B1" t="s"><v>0</v></c></row>
    <row r="2"><c r="B2" t="s"><v>1</v></c></row>
    <row r="4"><c r="A4" t="inlineStr"><is><t>x</t></is></c><c r="B4" t="s"><v>2</v></c></row>
    <row r="5"><c r="B5"><v>42</v></c></row>
    <row r="6"><c r="B6" t="b"><v>1</v></c></row>
    <row r="9"><c r="B9" s="1"/></row>
  </sheetData>
</worksheet>"#;

    fn workbook(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, xml) in parts {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("Z10"), Some(25));
        assert_eq!(column_index("AA3"), Some(26));
        assert_eq!(column_index("ab3"), Some(27));
        assert_eq!(column_index("12"), None);
    }

    #[test]
    fn test_read_first_sheet_via_relationships() {
        let bytes = workbook(&[
            (WORKBOOK, WORKBOOK_XML),
            (WORKBOOK_RELS, RELS),
            (SHARED_STRINGS, SST),
            ("xl/worksheets/data.xml", SHEET),
            ("xl/worksheets/sheet2.xml", "<worksheet><sheetData/></worksheet>"),
        ]);

        let table = read_from(Cursor::new(bytes)).unwrap();
        assert_eq!(table.headers, ["Note", "Labels"]);
        assert_eq!(
            table.column("Labels").unwrap(),
            ["-X1", "", "K1:A", "42", "TRUE"]
        );
        assert_eq!(table.column("Note").unwrap()[2], "x");
    }

    #[test]
    fn test_read_without_workbook_parts() {
        let sheet = r#"<worksheet><sheetData><row><c t="inlineStr"><is><t>Labels</t></is></c></row><row><c><v>7</v></c></row></sheetData></worksheet>"#;
        let bytes = workbook(&[(FIRST_SHEET_FALLBACK, sheet)]);

        let table = read_from(Cursor::new(bytes)).unwrap();
        assert_eq!(table.column("Labels").unwrap(), ["7"]);
    }

    #[test]
    fn test_preserved_spaces_kept() {
        let sheet = r#"<worksheet>
  <sheetData>
    <row r="1"><c r="A1" t="inlineStr"><is><t>Labels</t></is></c></row>
    <row r="2"><c r="A2" t="inlineStr"><is><t xml:space="preserve">  K1 </t></is></c></row>
    <row r="3"><c r="A3" t="s"><v>0</v></c></row>
    <row r="4"><c r="A4" t="inlineStr"><is><t xml:space="preserve">   </t></is></c></row>
  </sheetData>
</worksheet>"#;
        let sst = r#"<sst count="1" uniqueCount="1">
  <si><t xml:space="preserve"> -X1</t></si>
</sst>"#;
        let bytes = workbook(&[(FIRST_SHEET_FALLBACK, sheet), (SHARED_STRINGS, sst)]);

        let table = read_from(Cursor::new(bytes)).unwrap();
        assert_eq!(table.column("Labels").unwrap(), ["  K1 ", " -X1", "   "]);
    }

    #[test]
    fn test_empty_sheet() {
        let bytes = workbook(&[(FIRST_SHEET_FALLBACK, "<worksheet/>")]);
        let table = read_from(Cursor::new(bytes)).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_shared_index_out_of_range() {
        let sheet = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>5</v></c></row></sheetData></worksheet>"#;
        let bytes = workbook(&[(FIRST_SHEET_FALLBACK, sheet)]);
        let err = read_from(Cursor::new(bytes)).unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(read_from(Cursor::new(b"Labels\nA\n".to_vec())).is_err());
    }
}
