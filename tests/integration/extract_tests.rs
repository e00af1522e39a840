//! Extraction tests against synthetic listing documents

use crate::common::{full_sail_page, minimal_sail_page, power_page};
use windward::extract::schema::{
    ALL_COLUMNS, EQUIPMENT_CATEGORIES, HULL_COLUMNS, PROPULSION_COLUMNS,
};
use windward::extract::{ExtractOutcome, Extractor, NULL_SENTINEL, SkipReason};

const URL: &str = "https://catalog.example/boats/42";

fn extract(html: &str) -> ExtractOutcome {
    Extractor::new().unwrap().extract(html, URL)
}

fn extract_record(html: &str) -> windward::Record {
    match extract(html) {
        ExtractOutcome::Complete(record) => record,
        ExtractOutcome::Skip(reason) => panic!("unexpected skip: {reason}"),
    }
}

fn skip_reason(html: &str) -> SkipReason {
    match extract(html) {
        ExtractOutcome::Skip(reason) => reason,
        ExtractOutcome::Complete(_) => panic!("expected a skip"),
    }
}

#[test]
fn test_full_page_identity_fields() {
    let record = extract_record(&full_sail_page(2));

    assert_eq!(record.get("origin"), Some(URL));
    assert_eq!(record.get("boat_type"), Some("Sloop"));
    assert_eq!(record.get("manufacturer"), Some("Acme"));
    assert_eq!(record.get("boatmodel"), Some("X42"));
    assert_eq!(record.get("title"), Some("2005 Acme X42"));
    assert_eq!(record.get("location"), Some("Palma de Mallorca, Spain"));
    assert_eq!(record.get("Broker"), Some("Baltic Brokers"));
    // Never populated by any page section
    assert_eq!(record.get("id"), Some(NULL_SENTINEL));
}

#[test]
fn test_price_pair_split() {
    let record = extract_record(&full_sail_page(0));

    assert_eq!(record.get("price_eu"), Some("€120,000"));
    // Parentheses stripped from the foreign-denominated component
    assert_eq!(record.get("price_us"), Some("US$128,000"));
}

#[test]
fn test_mechanical_details_mapped_by_label() {
    let record = extract_record(&full_sail_page(0));

    assert_eq!(record.get("engine"), Some("Yanmar 4JH45"));
    assert_eq!(record.get("year"), Some("2005"));
    // Labels absent from the strip stay sentinel; unknown labels are dropped
    assert_eq!(record.get("model"), Some(NULL_SENTINEL));
    assert_eq!(record.get("capacity"), Some(NULL_SENTINEL));
}

#[test]
fn test_description_and_other_details() {
    let record = extract_record(&full_sail_page(0));

    assert_eq!(record.get("description"), Some("A fine cruising sloop."));
    // Other Details keeps markup, collapsed to single spaces
    assert_eq!(record.get("other_details"), Some("<p>Sold as-is</p>"));
}

#[test]
fn test_features_joined_per_category() {
    let record = extract_record(&full_sail_page(0));

    assert_eq!(record.get("Rigging"), Some("Spinnaker pole | Lazy jacks"));
    for category in EQUIPMENT_CATEGORIES.iter().filter(|c| **c != "Rigging") {
        assert_eq!(record.get(category), Some(NULL_SENTINEL), "{category}");
    }
}

#[test]
fn test_propulsion_labels_mapped() {
    let record = extract_record(&full_sail_page(0));

    assert_eq!(record.get("Engine_Make"), Some("Yanmar"));
    assert_eq!(record.get("Fuel Type"), Some("Diesel"));
    assert_eq!(record.get("Engine Model"), Some(NULL_SENTINEL));
}

#[test]
fn test_specifications_with_valueless_label() {
    let record = extract_record(&full_sail_page(0));

    assert_eq!(record.get("Beam"), Some("4.2 m"));
    assert_eq!(record.get("Windlass"), Some(NULL_SENTINEL));
    for column in HULL_COLUMNS.iter().filter(|c| **c != "Beam") {
        assert_eq!(record.get(column), Some(NULL_SENTINEL), "{column}");
    }
}

#[test]
fn test_images_fill_indexed_slots() {
    let record = extract_record(&full_sail_page(2));

    assert_eq!(
        record.get("IMAGE_1"),
        Some("https://img.example/boat_1.jpg")
    );
    assert_eq!(record.get("IMAGE_1_ALT"), Some("View 1"));
    assert_eq!(
        record.get("IMAGE_2"),
        Some("https://img.example/boat_2.jpg")
    );
    assert_eq!(record.get("IMAGE_3"), Some(NULL_SENTINEL));
}

#[test]
fn test_gallery_capped_at_seventy_five_slots() {
    let record = extract_record(&full_sail_page(80));

    assert_eq!(
        record.get("IMAGE_75"),
        Some("https://img.example/boat_75.jpg")
    );
    assert_eq!(record.get("IMAGE_75_ALT"), Some("View 75"));
    // No column exists beyond slot 75, and the record stays schema-width
    assert_eq!(record.get("IMAGE_76"), None);
    assert_eq!(record.len(), ALL_COLUMNS.len());
}

#[test]
fn test_missing_image_alt_stays_sentinel() {
    let html = r#"
<ul class="breadcrumb"><li>Home</li><li>Boats</li><li>Sail</li><li>Sloop</li></ul>
<div class="embla__container">
  <div class="embla__slide"><img src="https://img.example/only.jpg"></div>
</div>"#;
    let record = extract_record(html);

    assert_eq!(record.get("IMAGE_1"), Some("https://img.example/only.jpg"));
    assert_eq!(record.get("IMAGE_1_ALT"), Some(NULL_SENTINEL));
}

#[test]
fn test_minimal_page_degrades_to_sentinels() {
    let record = extract_record(&minimal_sail_page());

    assert_eq!(record.get("boat_type"), Some("Sloop"));
    assert_eq!(record.get("manufacturer"), Some("Acme"));
    assert_eq!(record.get("boatmodel"), Some("X42"));

    // No Propulsion section: all ten propulsion columns are the sentinel
    for column in PROPULSION_COLUMNS.iter() {
        assert_eq!(record.get(column), Some(NULL_SENTINEL), "{column}");
    }
    assert_eq!(record.get("description"), Some(NULL_SENTINEL));
    assert_eq!(record.get("location"), Some(NULL_SENTINEL));
}

#[test]
fn test_every_record_covers_the_whole_schema() {
    for html in [
        full_sail_page(3),
        minimal_sail_page(),
    ] {
        let record = extract_record(&html);
        assert_eq!(record.len(), ALL_COLUMNS.len());
        for column in ALL_COLUMNS.iter() {
            let value = record.get(column).unwrap_or_else(|| {
                panic!("column {column} missing from record")
            });
            assert!(!value.is_empty(), "column {column} is blank");
        }
    }
}

#[test]
fn test_powered_vessel_is_skipped() {
    assert_eq!(skip_reason(&power_page()), SkipReason::PoweredVessel);
}

#[test]
fn test_shallow_breadcrumb_is_skipped() {
    let html = r#"<ul class="breadcrumb"><li>Home</li><li>Boats</li><li>Sail</li></ul>"#;
    assert_eq!(skip_reason(html), SkipReason::ShallowBreadcrumb);
}

#[test]
fn test_unrelated_category_is_skipped() {
    let html = r#"<ul class="breadcrumb">
        <li>Home</li><li>Boats</li><li>Canoes</li><li>Touring</li></ul>"#;
    assert_eq!(skip_reason(html), SkipReason::NotSailCategory);
}

#[test]
fn test_missing_breadcrumb_is_skipped() {
    assert_eq!(
        skip_reason("<html><body><h1>No trail</h1></body></html>"),
        SkipReason::MissingBreadcrumb
    );
}

#[test]
fn test_empty_document_is_skipped() {
    assert_eq!(skip_reason(""), SkipReason::MissingBreadcrumb);
}
