use agritechtz_api::{CropPriceQuery, DateInput, Error, FilterParams, Query, QueryParams};
use chrono::NaiveDate;
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/api/crop-prices/export/").unwrap()
}

fn params(pairs: &[(&'static str, &str)]) -> QueryParams {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

#[test]
fn empty_query_adds_nothing_to_url() {
    let url = CropPriceQuery::new().add_to_url(&base_url());
    assert_eq!(url.query(), None);
}

#[test]
fn crops_only() {
    let query = CropPriceQuery::of(["maize", "rice", "beans"]);
    assert_eq!(
        query.to_params(),
        params(&[("crop_prices__in", "maize,rice,beans")])
    );
}

#[test]
fn bare_regions_emit_no_district_key() {
    let query = CropPriceQuery::of(["maize"])
        .in_regions(["Dodoma", "Mbeya"])
        .unwrap();
    let encoded = query.to_params();
    assert_eq!(encoded["region__in"], "Dodoma,Mbeya");
    assert!(!encoded.contains_key("district__in"));
}

#[test]
fn paired_regions_and_districts_keep_positions() {
    let query = CropPriceQuery::new()
        .in_regions(["Dodoma/Kongwa", "Mbeya/Kyela"])
        .unwrap();
    let encoded = query.to_params();
    assert_eq!(encoded["region__in"], "Dodoma,Mbeya");
    assert_eq!(encoded["district__in"], "Kongwa,Kyela");
}

#[test]
fn invalid_region_spec_keeps_previous_filters() {
    let query = CropPriceQuery::of(["maize"]).in_regions(["Dodoma"]).unwrap();
    let err = query.in_regions(["a/b/c"]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(
        query.to_params(),
        params(&[("crop_prices__in", "maize"), ("region__in", "Dodoma")])
    );

    let query = query.in_regions(["Mbeya/Kyela"]).unwrap();
    assert_eq!(query.to_params()["district__in"], "Kyela");
}

#[test]
fn date_string_and_value_are_equivalent() {
    let from_string = CropPriceQuery::new().from_date("2023-10-01").unwrap();
    let from_value = CropPriceQuery::new()
        .from_date(NaiveDate::from_ymd_opt(2023, 10, 1).unwrap())
        .unwrap();
    assert_eq!(from_string, from_value);
    assert_eq!(from_string.to_params()["ts__gte"], "2023-10-01");
}

#[test]
fn date_input_accepts_owned_strings() {
    let owned = String::from("2023-10-31");
    let query = CropPriceQuery::new().to_date(&owned).unwrap().to_date(owned).unwrap();
    assert_eq!(query.params().end_date, NaiveDate::from_ymd_opt(2023, 10, 31));
    assert_eq!(
        DateInput::from("2023-10-31"),
        DateInput::Iso("2023-10-31".to_string())
    );
}

#[test]
fn later_setter_calls_overwrite() {
    let query = CropPriceQuery::of(["maize"])
        .with_crops(["rice"])
        .order_by(["+ts"])
        .order_by(["-crop"])
        .from_date("2023-01-01")
        .unwrap()
        .from_date("2023-02-01")
        .unwrap();
    assert_eq!(
        query.to_params(),
        params(&[
            ("crop_prices__in", "rice"),
            ("ordering", "-crop"),
            ("ts__gte", "2023-02-01"),
        ])
    );
}

#[test]
fn full_filter_set_encodes_exactly() {
    let filters = FilterParams {
        crops: Some(vec!["maize".into(), "rice".into()]),
        regions: Some(vec!["Region1".into()]),
        districts: Some(vec!["District1".into()]),
        start_date: NaiveDate::from_ymd_opt(2023, 10, 1),
        end_date: NaiveDate::from_ymd_opt(2023, 10, 31),
        ordering: Some(vec!["+ts".into(), "-crop".into()]),
    };
    assert_eq!(
        filters.to_params(),
        params(&[
            ("crop_prices__in", "maize,rice"),
            ("region__in", "Region1"),
            ("district__in", "District1"),
            ("ts__gte", "2023-10-01"),
            ("ts__lte", "2023-10-31"),
            ("ordering", "+ts,-crop"),
        ])
    );
}

#[test]
fn invalid_ordering_field_passes_through() {
    let url = CropPriceQuery::new()
        .order_by(["+invalid_field"])
        .add_to_url(&base_url());
    let (_, ordering) = url.query_pairs().find(|(k, _)| k == "ordering").unwrap();
    assert_eq!(ordering, "+invalid_field");
}
