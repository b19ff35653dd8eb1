//! Client for agricultural crop price exports.
//!
//! Build a [`CropPriceQuery`], call [`CropPriceQuery::build`], and get back a
//! [`CropPriceTable`] with parsed timestamps and canonical region names.

mod client;
mod config;
mod errors;
mod normalize;
mod query;
mod region;
mod table;
pub use self::client::{Client, CropPriceSource};
pub use self::config::{ClientConfig, CROP_PRICES_PATH, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::{BoxError, Error};
pub use self::normalize::{parse_timestamp, TableNormalizer};
pub use self::query::{CropPriceQuery, DateInput, FilterParams, Query, QueryParams};
pub use self::region::{canonicalize_region, RegionAliasError, RegionAliases};
pub use self::table::{Cell, CropPriceRecord, CropPriceTable, REQUIRED_COLUMNS};
