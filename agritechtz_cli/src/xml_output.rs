use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use agritechtz_api::CropPriceTable;

/// Turn a CSV header into a usable element name.
fn element_name(column: &str) -> String {
    let mut name: String = column
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Serialize the table as `<prices><price>...</price></prices>`, one child element per column.
pub fn prices_to_xml(table: &CropPriceTable) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if table.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("prices")))?;
    } else {
        let tags: Vec<String> = table.columns().iter().map(|c| element_name(c)).collect();

        writer.write_event(Event::Start(BytesStart::new("prices")))?;
        for row in table {
            writer.write_event(Event::Start(BytesStart::new("price")))?;
            for (column, tag) in table.columns().iter().zip(&tags) {
                if let Some(cell) = row.get(column) {
                    write_text_element(&mut writer, tag, &cell.to_string())?;
                }
            }
            writer.write_event(Event::End(BytesEnd::new("price")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("prices")))?;
    }

    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agritechtz_api::TableNormalizer;

    fn normalize(csv: &str) -> CropPriceTable {
        TableNormalizer::new().unwrap().normalize(csv).unwrap()
    }

    #[test]
    fn test_prices_xml_structure() {
        let table = normalize(
            "crop,region,district,ts,min price\nMaize,dar es saalam,Ilala,2023-10-01,750\n",
        );
        let xml = prices_to_xml(&table).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<prices>"));
        assert!(xml.contains("<price>"));
        assert!(xml.contains("<region>Dar-Es-Salaam</region>"));
        assert!(xml.contains("<ts>2023-10-01 00:00:00</ts>"));
        assert!(xml.contains("<min_price>750</min_price>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let table = normalize("crop,region,district,ts\nBeans & Peas,Kigoma,Kasulu,2023-10-03\n");
        let xml = prices_to_xml(&table).unwrap();
        assert!(xml.contains("<crop>Beans &amp; Peas</crop>"));
    }

    #[test]
    fn test_empty_table_is_empty_root() {
        let xml = prices_to_xml(&normalize("crop,region,district,ts\n")).unwrap();
        assert!(xml.contains("<prices/>"));
    }

    #[test]
    fn test_element_names() {
        assert_eq!(element_name("min price"), "min_price");
        assert_eq!(element_name("2023"), "_2023");
        assert_eq!(element_name("unit"), "unit");
    }
}
