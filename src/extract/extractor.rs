//! Structured extraction engine
//!
//! Maps a listing page's loosely-structured document tree onto the fixed
//! record schema. The breadcrumb category gate runs before anything else;
//! after that every section is optional - a missing section degrades the
//! record to sentinel-filled columns, it never aborts the extraction.

use crate::extract::dom;
use crate::extract::schema::{
    column_for, image_alt_column, image_column, Record, DETAIL_LABELS, EQUIPMENT_CATEGORIES,
    FOREIGN_PRICE_MARKER, HULL_COLUMNS, MAX_IMAGE_SLOTS, NULL_SENTINEL, PROPULSION_LABELS,
};
use crate::{Result, WindwardError};
use scraper::{Html, Selector};
use std::fmt;

/// Why a fetched page produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No breadcrumb trail on the page (or an empty/unparsable document)
    MissingBreadcrumb,
    /// Breadcrumb has fewer than four levels
    ShallowBreadcrumb,
    /// Third breadcrumb level indicates a powered-vessel category
    PoweredVessel,
    /// Third breadcrumb level does not indicate a sailing-vessel category
    NotSailCategory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBreadcrumb => write!(f, "no breadcrumb trail"),
            Self::ShallowBreadcrumb => write!(f, "breadcrumb too shallow"),
            Self::PoweredVessel => write!(f, "powered-vessel category"),
            Self::NotSailCategory => write!(f, "not a sailing category"),
        }
    }
}

/// Result of extracting one document
#[derive(Debug)]
pub enum ExtractOutcome {
    /// A schema-complete record, ready for the sink
    Complete(Record),
    /// The page was filtered out, not an error
    Skip(SkipReason),
}

struct Selectors {
    breadcrumb: Selector,
    list_item: Selector,
    anchor: Selector,
    heading: Selector,
    location: Selector,
    price_section: Selector,
    paragraph: Selector,
    details: Selector,
    boat_details: Selector,
    detail_title: Selector,
    detail_value: Selector,
    summary: Selector,
    description_body: Selector,
    raw_html_body: Selector,
    details_wrapper: Selector,
    details_cell: Selector,
    cell_header: Selector,
    cell_content: Selector,
    label_span: Selector,
    value_span: Selector,
    broker: Selector,
    subheading: Selector,
    gallery: Selector,
    slide: Selector,
    image: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            breadcrumb: parse("ul.breadcrumb")?,
            list_item: parse("li")?,
            anchor: parse("a")?,
            heading: parse("h1")?,
            location: parse("p.style-module_content__tmQCh.style-module_content-6__CzZ47")?,
            price_section: parse(
                "div.style-module_priceSection__wa5Pn.style-module_tppPriceSection__7x-f4",
            )?,
            paragraph: parse("p")?,
            details: parse("div.details")?,
            boat_details: parse("div.style-module_boatDetails__2wKB2")?,
            detail_title: parse("h3.style-module_title__QGET2.style-module_title-9__QvhIY")?,
            detail_value: parse("p.style-module_content__tmQCh.style-module_content-15__m8Mqo")?,
            summary: parse("summary")?,
            description_body: parse("div.data-html-inner-wrapper")?,
            raw_html_body: parse("div.data-html")?,
            details_wrapper: parse("section.data-details-wrapper")?,
            details_cell: parse("div.data-details-cell")?,
            cell_header: parse("h4")?,
            cell_content: parse("div.data-details-cell-content")?,
            label_span: parse("span.null")?,
            value_span: parse("span.cell-content-value")?,
            broker: parse("div.style-module_listedByText__u6Ijx")?,
            subheading: parse("h3")?,
            gallery: parse("div.embla__container")?,
            slide: parse("div.embla__slide")?,
            image: parse("img")?,
        })
    }
}

fn parse(source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|_| WindwardError::Selector(source.to_string()))
}

/// Extraction engine holding the parsed selectors and label dictionaries
pub struct Extractor {
    selectors: Selectors,
    detail_labels: &'static [(&'static str, &'static str)],
    propulsion_labels: &'static [(&'static str, &'static str)],
    equipment_categories: &'static [&'static str],
    hull_labels: &'static [&'static str],
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new()?,
            detail_labels: &DETAIL_LABELS,
            propulsion_labels: &PROPULSION_LABELS,
            equipment_categories: &EQUIPMENT_CATEGORIES,
            hull_labels: &HULL_COLUMNS,
        })
    }

    /// Turns one fetched page into a record or a skip decision
    ///
    /// The breadcrumb category filter is a hard gate applied before any other
    /// extraction. Past it, each section contributes what it has; the record
    /// is sentinel-filled from construction, so missing sections simply leave
    /// their columns at the null sentinel.
    pub fn extract(&self, html: &str, source_url: &str) -> ExtractOutcome {
        let document = Html::parse_document(html);
        let sels = &self.selectors;

        // Category gate on the breadcrumb trail
        let Some(breadcrumb) = dom::first(&document, &sels.breadcrumb) else {
            return ExtractOutcome::Skip(SkipReason::MissingBreadcrumb);
        };
        let levels: Vec<_> = breadcrumb.select(&sels.list_item).collect();
        if levels.len() < 4 {
            return ExtractOutcome::Skip(SkipReason::ShallowBreadcrumb);
        }
        let category = dom::text_of(levels[2]);
        if category.contains("Power") {
            return ExtractOutcome::Skip(SkipReason::PoweredVessel);
        }
        if !category.contains("Sail") {
            return ExtractOutcome::Skip(SkipReason::NotSailCategory);
        }

        let mut record = Record::new(source_url);

        // Identity fields from breadcrumb levels 4-6, each optional
        record.set("boat_type", dom::text_of(levels[3]));
        if let Some(anchor) = levels.get(4).and_then(|li| dom::first_in(*li, &sels.anchor)) {
            if let Some(manufacturer) = dom::attr_of(anchor, "title") {
                record.set("manufacturer", manufacturer);
            }
        }
        if let Some(model) = levels.get(5) {
            record.set("boatmodel", dom::text_of(*model));
        }

        if let Some(heading) = dom::first(&document, &sels.heading) {
            record.set("title", dom::text_of(heading));
        }
        if let Some(location) = dom::first(&document, &sels.location) {
            record.set("location", dom::text_of(location));
        }

        self.extract_prices(&document, &mut record);
        self.extract_details(&document, &mut record);
        self.extract_description(&document, &mut record);
        self.extract_other_details(&document, &mut record);
        self.extract_features(&document, &mut record);
        self.extract_propulsion(&document, &mut record);
        self.extract_specifications(&document, &mut record);
        self.extract_broker(&document, &mut record);
        self.extract_images(&document, &mut record);

        ExtractOutcome::Complete(record)
    }

    /// Splits the combined price string into domestic and foreign components
    ///
    /// Tokens whose parenthesis-trimmed form starts with the foreign currency
    /// marker are the foreign price; all remaining tokens joined form the
    /// domestic price.
    fn extract_prices(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(section) = dom::first(document, &sels.price_section) else {
            return;
        };
        let Some(price) = dom::first_in(section, &sels.paragraph) else {
            return;
        };

        let text = dom::text_of(price);
        let mut domestic: Vec<&str> = Vec::new();
        let mut foreign = None;
        for token in text.split_whitespace() {
            let trimmed = token.trim_matches(|c| c == '(' || c == ')');
            if trimmed.starts_with(FOREIGN_PRICE_MARKER) {
                foreign = Some(trimmed.to_string());
            } else {
                domestic.push(token);
            }
        }

        if let Some(foreign) = foreign {
            record.set("price_us", foreign);
        }
        if !domestic.is_empty() {
            record.set("price_eu", domestic.join(" "));
        }
    }

    /// Mechanical summary strip: labeled h3 headings with a value paragraph
    fn extract_details(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(details) = dom::first(document, &sels.details) else {
            return;
        };
        let Some(strip) = dom::first_in(details, &sels.boat_details) else {
            return;
        };

        for title in strip.select(&sels.detail_title) {
            let label = dom::text_of(title);
            let Some(column) = column_for(self.detail_labels, &label) else {
                continue;
            };
            if let Some(value) = dom::find_next(document, title, &sels.detail_value) {
                record.set(column, dom::text_of(value));
            }
        }
    }

    fn extract_description(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(summary) = dom::first_with_text(document, &sels.summary, "Description") else {
            return;
        };
        if let Some(body) = dom::find_next(document, summary, &sels.description_body) {
            record.set("description", dom::text_of(body));
        }
    }

    /// Other Details keeps its inner markup, collapsed to single spaces
    fn extract_other_details(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(summary) = dom::first_with_text(document, &sels.summary, "Other Details") else {
            return;
        };
        if let Some(body) = dom::find_next(document, summary, &sels.raw_html_body) {
            let collapsed = body.inner_html().split_whitespace().collect::<Vec<_>>().join(" ");
            record.set("other_details", collapsed);
        }
    }

    /// Equipment categories: list items joined with a separator per category
    fn extract_features(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(summary) = dom::first_with_text(document, &sels.summary, "Features") else {
            return;
        };
        let Some(wrapper) = dom::find_next(document, summary, &sels.details_wrapper) else {
            return;
        };

        for cell in wrapper.select(&sels.details_cell) {
            let Some(header) = dom::first_in(cell, &sels.cell_header) else {
                continue;
            };
            let Some(content) = dom::first_in(cell, &sels.cell_content) else {
                continue;
            };

            let category = dom::text_of(header);
            if !self.equipment_categories.contains(&category.as_str()) {
                continue;
            }

            let items: Vec<String> = content
                .select(&sels.label_span)
                .map(|span| dom::text_of(span).replace(':', ""))
                .filter(|item| !item.is_empty())
                .collect();
            if !items.is_empty() {
                record.set(&category, items.join(" | "));
            }
        }
    }

    /// Propulsion: label/value span pairs mapped through the label dictionary
    fn extract_propulsion(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(summary) = dom::first_with_text(document, &sels.summary, "Propulsion") else {
            return;
        };
        let Some(content) = dom::find_next(document, summary, &sels.cell_content) else {
            return;
        };

        for row in content.select(&sels.paragraph) {
            let label = dom::first_in(row, &sels.label_span);
            let value = dom::first_in(row, &sels.value_span);
            let (Some(label), Some(value)) = (label, value) else {
                continue;
            };

            let key = dom::text_of(label).replace(':', "");
            if let Some(column) = column_for(self.propulsion_labels, &key) {
                record.set(column, dom::text_of(value));
            }
        }
    }

    /// Hull and performance specifications; a valueless label stays sentinel
    fn extract_specifications(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(summary) = dom::first_with_text(document, &sels.summary, "Specifications") else {
            return;
        };
        let Some(wrapper) = dom::find_next(document, summary, &sels.details_wrapper) else {
            return;
        };

        for cell in wrapper.select(&sels.details_cell) {
            let Some(content) = dom::first_in(cell, &sels.cell_content) else {
                continue;
            };
            for row in content.select(&sels.paragraph) {
                let Some(label) = dom::first_in(row, &sels.label_span) else {
                    continue;
                };
                let key = dom::text_of(label).replace(':', "");
                if !self.hull_labels.contains(&key.as_str()) {
                    continue;
                }
                match dom::first_in(row, &sels.value_span) {
                    Some(value) => record.set(&key, dom::text_of(value)),
                    None => record.set(&key, NULL_SENTINEL),
                };
            }
        }
    }

    fn extract_broker(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(listed_by) = dom::first(document, &sels.broker) else {
            return;
        };
        if let Some(name) = dom::find_next(document, listed_by, &sels.subheading) {
            record.set("Broker", dom::text_of(name));
        }
    }

    /// Walks the gallery in document order, filling up to 75 slots
    fn extract_images(&self, document: &Html, record: &mut Record) {
        let sels = &self.selectors;
        let Some(gallery) = dom::first(document, &sels.gallery) else {
            return;
        };

        for (slot, slide) in gallery.select(&sels.slide).enumerate() {
            let slot = slot + 1;
            if slot > MAX_IMAGE_SLOTS {
                break;
            }
            let Some(image) = dom::first_in(slide, &sels.image) else {
                continue;
            };
            let Some(source) = dom::attr_of(image, "src") else {
                continue;
            };
            record.set(&image_column(slot), source);
            if let Some(alt) = dom::attr_of(image, "alt") {
                record.set(&image_alt_column(slot), alt);
            }
        }
    }
}
