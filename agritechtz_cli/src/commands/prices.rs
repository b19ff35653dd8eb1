use agritechtz_api::{Client, CropPriceQuery};
use anyhow::Result;
use clap::Args;

use crate::output::{
    print_prices_csv, print_prices_markdown, print_prices_table, print_prices_xml, print_json,
    OutputFormat,
};

#[derive(Args)]
pub struct PricesArgs {
    /// Crop to include (repeatable or comma-separated, e.g. maize,rice)
    #[arg(long = "crop", value_delimiter = ',')]
    pub crops: Vec<String>,

    /// Region, or Region/District (repeatable, e.g. "Dodoma/Kongwa")
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Earliest date, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    /// Sort directives such as +ts or -crop (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub order_by: Vec<String>,
}

impl PricesArgs {
    fn to_query(&self) -> Result<CropPriceQuery> {
        let mut query = if self.crops.is_empty() {
            CropPriceQuery::new()
        } else {
            CropPriceQuery::of(&self.crops)
        };

        if !self.regions.is_empty() {
            query = query.in_regions(&self.regions)?;
        }
        if let Some(from) = &self.from {
            query = query.from_date(from)?;
        }
        if let Some(to) = &self.to {
            query = query.to_date(to)?;
        }
        if !self.order_by.is_empty() {
            query = query.order_by(&self.order_by);
        }

        Ok(query)
    }
}

pub async fn run(args: &PricesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.to_query()?;
    let table = query.build_with(client).await?;

    eprintln!("{} price records", table.len());

    match format {
        OutputFormat::Table => print_prices_table(&table),
        OutputFormat::Json => print_json(&table.rows()),
        OutputFormat::Csv => print_prices_csv(&table)?,
        OutputFormat::Markdown => print_prices_markdown(&table),
        OutputFormat::Xml => print_prices_xml(&table)?,
    }

    Ok(())
}
