use chrono::NaiveDate;

use crate::{
    client::{Client, CropPriceSource},
    normalize::TableNormalizer,
    table::CropPriceTable,
    Error,
};

use super::common::{DateInput, Query, QueryParams};

/// Filter criteria for a crop price request. `None` means "not filtered".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub crops: Option<Vec<String>>,
    pub regions: Option<Vec<String>>,
    /// Positionally paired with `regions` when present.
    pub districts: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Sign-prefixed sort directives (`+ts`, `-crop`), passed through as given.
    pub ordering: Option<Vec<String>>,
}

impl Query for FilterParams {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        insert_joined(&mut params, "crop_prices__in", self.crops.as_deref());
        insert_joined(&mut params, "region__in", self.regions.as_deref());
        insert_joined(&mut params, "district__in", self.districts.as_deref());
        if let Some(start_date) = self.start_date {
            params.insert("ts__gte", start_date.format("%Y-%m-%d").to_string());
        }
        if let Some(end_date) = self.end_date {
            params.insert("ts__lte", end_date.format("%Y-%m-%d").to_string());
        }
        insert_joined(&mut params, "ordering", self.ordering.as_deref());
        params
    }
}

fn insert_joined(params: &mut QueryParams, key: &'static str, values: Option<&[String]>) {
    let joined = values
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if !joined.is_empty() {
        params.insert(key, joined);
    }
}

/// Fluent builder for a crop price table.
///
/// ```no_run
/// # async fn run() -> Result<(), agritechtz_api::Error> {
/// use agritechtz_api::CropPriceQuery;
///
/// let table = CropPriceQuery::of(["maize"])
///     .in_regions(["Dodoma/Kongwa"])?
///     .from_date("2023-10-01")?
///     .to_date("2023-10-31")?
///     .order_by(["+ts"])
///     .build()
///     .await?;
/// println!("{} rows", table.len());
/// # Ok(())
/// # }
/// ```
///
/// Every setter replaces its field outright; calling one twice keeps only the
/// second value. Setters that validate input borrow the builder and return an
/// updated copy, so after an `Err` the original is still usable as it was. [`build`](Self::build) borrows the builder, so it can be
/// called again after further setter calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CropPriceQuery {
    params: FilterParams,
}

impl Query for CropPriceQuery {
    fn to_params(&self) -> QueryParams {
        self.params.to_params()
    }
}

impl CropPriceQuery {
    /// An empty query: no filters, server-side default ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a query for the given crops, in the given order.
    pub fn of<I, S>(crops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().with_crops(crops)
    }

    /// Current filter criteria.
    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn with_crops<I, S>(mut self, crops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.crops = Some(crops.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts results to regions, optionally narrowed to a district with
    /// `"Region/District"`.
    ///
    /// Either every spec in the call names a district or none does; a spec with
    /// more than one `/`, an empty half, or a mix of both shapes is rejected.
    pub fn in_regions<I, S>(&self, specs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = specs
            .into_iter()
            .map(|spec| split_region_spec(spec.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let with_district = parsed.iter().filter(|(_, d)| d.is_some()).count();
        if with_district != 0 && with_district != parsed.len() {
            return Err(Error::InvalidArgument(
                "cannot mix bare regions and 'Region/District' specs in one call".to_string(),
            ));
        }

        let (regions, districts): (Vec<String>, Vec<Option<String>>) = parsed.into_iter().unzip();
        let mut next = self.clone();
        next.params.districts = if with_district == 0 {
            None
        } else {
            districts.into_iter().collect()
        };
        next.params.regions = Some(regions);
        Ok(next)
    }

    /// Only prices recorded on or after this date.
    pub fn from_date(&self, value: impl Into<DateInput>) -> Result<Self, Error> {
        let start_date = value.into().resolve()?;
        let mut next = self.clone();
        next.params.start_date = Some(start_date);
        Ok(next)
    }

    /// Only prices recorded on or before this date.
    pub fn to_date(&self, value: impl Into<DateInput>) -> Result<Self, Error> {
        let end_date = value.into().resolve()?;
        let mut next = self.clone();
        next.params.end_date = Some(end_date);
        Ok(next)
    }

    /// Sort directives such as `"+ts"` or `"-crop"`. Field names are not checked;
    /// the server decides what it understands.
    pub fn order_by<I, S>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.ordering = Some(directives.into_iter().map(Into::into).collect());
        self
    }

    /// Fetches from the production endpoint and returns the normalized table.
    pub async fn build(&self) -> Result<CropPriceTable, Error> {
        self.build_with(&Client::new()).await
    }

    /// Same as [`build`](Self::build), reading from the given source.
    pub async fn build_with<S>(&self, source: &S) -> Result<CropPriceTable, Error>
    where
        S: CropPriceSource,
    {
        let params = self.to_params();
        let body = source.fetch(&params).await?;
        TableNormalizer::new()?.normalize(&body)
    }
}

fn split_region_spec(spec: &str) -> Result<(String, Option<String>), Error> {
    let invalid = || {
        Error::InvalidArgument(format!(
            "invalid region '{}'. Expected 'Region' or 'Region/District'",
            spec
        ))
    };

    let mut parts = spec.split('/').map(str::trim);
    let region = parts.next().unwrap_or_default();
    let district = parts.next();
    if parts.next().is_some() || region.is_empty() || district == Some("") {
        return Err(invalid());
    }
    Ok((region.to_string(), district.map(str::to_string)))
}
