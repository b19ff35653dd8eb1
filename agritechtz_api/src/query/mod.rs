mod common;
pub use self::common::{DateInput, Query, QueryParams};

mod crop_price;
pub use self::crop_price::{CropPriceQuery, FilterParams};
