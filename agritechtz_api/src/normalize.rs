//! CSV parsing for crop price exports.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::{
    region::RegionAliases,
    table::{CropPriceRecord, CropPriceTable, REQUIRED_COLUMNS},
    Error,
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Turns a raw CSV export into a [`CropPriceTable`].
///
/// `ts` is parsed into a timestamp and `region` is canonicalized; all other
/// columns are kept as text.
#[derive(Clone, Debug)]
pub struct TableNormalizer {
    aliases: RegionAliases,
}

impl TableNormalizer {
    /// Normalizer using the embedded region alias table.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_aliases(RegionAliases::embedded()?))
    }

    pub fn with_aliases(aliases: RegionAliases) -> Self {
        Self { aliases }
    }

    /// Parses `data` (CSV with a header row). Accepts anything byte-like, so both
    /// response bodies and string literals work.
    pub fn normalize(&self, data: impl AsRef<[u8]>) -> Result<CropPriceTable, Error> {
        let data = data.as_ref();
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

        let mut reader = csv::Reader::from_reader(data);
        let headers = reader.headers().map_err(parse_error)?.clone();
        let columns = Columns::locate(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(parse_error)?;
            rows.push(self.to_record(&record, &headers, &columns)?);
        }

        tracing::debug!(rows = rows.len(), "normalized crop price export");
        Ok(CropPriceTable::new(
            headers.iter().map(|h| h.trim().to_string()).collect(),
            rows,
        ))
    }

    fn to_record(
        &self,
        record: &StringRecord,
        headers: &StringRecord,
        columns: &Columns,
    ) -> Result<CropPriceRecord, Error> {
        let field = |index: usize| record.get(index).unwrap_or_default();

        let raw_ts = field(columns.ts);
        let ts = parse_timestamp(raw_ts).ok_or_else(|| {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            tracing::error!("Unparsable ts '{}' on line {}", raw_ts, line);
            Error::ParseFailed(format!("line {}: invalid ts '{}'", line, raw_ts))
        })?;

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| !columns.is_required(*index))
            .map(|(index, header)| (header.trim().to_string(), field(index).to_string()))
            .collect::<BTreeMap<_, _>>();

        Ok(CropPriceRecord {
            crop: field(columns.crop).to_string(),
            region: self.aliases.resolve(field(columns.region)),
            district: field(columns.district).to_string(),
            ts,
            extra,
        })
    }
}

/// Positions of the required columns in the header row.
struct Columns {
    crop: usize,
    region: usize,
    district: usize,
    ts: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        if let Some(repeated) = headers.iter().map(str::trim).find(|h| !seen.insert(*h)) {
            return Err(Error::ParseFailed(format!("duplicate column '{}'", repeated)));
        }

        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::ParseFailed(format!("missing required column '{}'", name)))
        };
        let [crop, region, district, ts] = REQUIRED_COLUMNS;
        Ok(Self {
            crop: find(crop)?,
            region: find(region)?,
            district: find(district)?,
            ts: find(ts)?,
        })
    }

    fn is_required(&self, index: usize) -> bool {
        [self.crop, self.region, self.district, self.ts].contains(&index)
    }
}

fn parse_error(e: csv::Error) -> Error {
    tracing::error!("Malformed crop price CSV: {}", e);
    Error::ParseFailed(e.to_string())
}

/// Parses the timestamp shapes the export uses. Offsets are converted to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
