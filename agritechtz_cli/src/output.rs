use std::io::Write;

use agritechtz_api::CropPriceTable;
use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

use crate::xml_output;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

// -- Row builders --

/// Every row rendered as text, in the table's column order.
fn build_price_rows(table: &CropPriceTable) -> Vec<Vec<String>> {
    table
        .iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|column| row.get(column).map(|cell| cell.to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}

fn build_table(table: &CropPriceTable) -> Table {
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().cloned());
    for row in build_price_rows(table) {
        builder.push_record(row);
    }
    builder.build()
}

// -- Table output --

pub fn print_prices_table(table: &CropPriceTable) {
    println!("{}", build_table(table));
}

// -- Markdown output --

pub fn print_prices_markdown(table: &CropPriceTable) {
    let mut rendered = build_table(table);
    rendered.with(Style::markdown());
    println!("{}", rendered);
}

// -- CSV output --

fn write_prices_csv<W: Write>(table: &CropPriceTable, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(table.columns())?;
    for row in build_price_rows(table) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_prices_csv(table: &CropPriceTable) -> Result<()> {
    write_prices_csv(table, std::io::stdout())
}

// -- XML output --

pub fn print_prices_xml(table: &CropPriceTable) -> Result<()> {
    println!("{}", xml_output::prices_to_xml(table)?);
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
