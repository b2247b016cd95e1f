use crate::filter::{Filter, FilterCondition, ALL_BRANDS};
use crate::{DeviceRecord, Error, Field, FieldKind, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Default number of cards shown per page
pub const DEFAULT_DISPLAY_LIMIT: usize = 40;

/// Default image for records without one
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x400?text=No+Image";

/// Presentation settings for browsing a catalog
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub display_limit: usize,
    pub all_brands_label: String,
    pub placeholder_image: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_DISPLAY_LIMIT,
            all_brands_label: ALL_BRANDS.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// Immutable, ordered collection of device records.
///
/// Built once at initialization and shared behind an `Arc`; there is no
/// mutation path.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<DeviceRecord>,
}

impl Catalog {
    pub fn new(records: Vec<DeviceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceRecord> {
        self.records.iter()
    }

    /// Sorted, deduplicated non-null values of a text field
    pub fn distinct_values(&self, field: Field) -> Result<Vec<String>> {
        if field.kind() != FieldKind::Text {
            return Err(Error::Configuration(format!(
                "field '{}' is numeric and has no distinct text values",
                field
            )));
        }

        let values: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|record| record.text(field))
            .filter(|value| !value.trim().is_empty())
            .collect();

        Ok(values.into_iter().map(str::to_string).collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a DeviceRecord;
    type IntoIter = std::slice::Iter<'a, DeviceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// An ordered view over catalog records, produced by filtering.
///
/// Filters applied to a selection only ever drop records; the survivors keep
/// their catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    records: Vec<&'a DeviceRecord>,
}

impl<'a> Selection<'a> {
    pub fn new(records: Vec<&'a DeviceRecord>) -> Self {
        Self { records }
    }

    pub fn all(catalog: &'a Catalog) -> Self {
        Self::new(catalog.iter().collect())
    }

    #[must_use]
    pub fn filter(self, filter: &dyn Filter) -> Self {
        let records = self
            .records
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        Self { records }
    }

    /// Keep records whose brand equals `brand`; [`ALL_BRANDS`] keeps everything
    #[must_use]
    pub fn by_brand(self, brand: &str) -> Self {
        match FilterCondition::brand(brand) {
            FilterCondition::Any => self,
            condition => self.filter(&condition),
        }
    }

    /// Keep records whose model contains `needle`, ignoring case
    #[must_use]
    pub fn name_contains(self, needle: &str) -> Self {
        match FilterCondition::name_contains(needle) {
            FilterCondition::Any => self,
            condition => self.filter(&condition),
        }
    }

    /// First `n` records in order
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.records.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a DeviceRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a DeviceRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn into_vec(self) -> Vec<&'a DeviceRecord> {
        self.records
    }
}

/// First `n` records of a selection
pub fn limit(selection: Selection<'_>, n: usize) -> Selection<'_> {
    selection.limit(n)
}

/// Inputs of one browse request
#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    /// Brand selection; `None` or [`ALL_BRANDS`] is unconstrained
    pub brand: Option<String>,
    pub search: String,
    /// Overrides the configured display limit
    pub limit: Option<usize>,
}

/// One page of browse results
#[derive(Debug, Clone, Serialize)]
pub struct BrowsePage<'a> {
    /// Matches before truncation
    pub total: usize,
    pub records: Vec<&'a DeviceRecord>,
}

/// Read-only query surface over a shared catalog
#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog: Arc<Catalog>,
    config: CatalogConfig,
}

impl CatalogStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, CatalogConfig::default())
    }

    pub fn with_config(catalog: Arc<Catalog>, config: CatalogConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn count(&self) -> usize {
        self.catalog.len()
    }

    pub fn all(&self) -> Selection<'_> {
        Selection::all(&self.catalog)
    }

    /// Sorted distinct values of a text field, by column name
    pub fn distinct_values(&self, field: &str) -> Result<Vec<String>> {
        self.catalog.distinct_values(field.parse()?)
    }

    /// Brand choices with the "all brands" label first
    pub fn brand_options(&self) -> Result<Vec<String>> {
        let mut options = vec![self.config.all_brands_label.clone()];
        options.extend(self.catalog.distinct_values(Field::Brand)?);
        Ok(options)
    }

    pub fn filter_by_brand(&self, brand: &str) -> Selection<'_> {
        self.all().by_brand(self.normalize_brand(brand))
    }

    pub fn filter_by_name_contains(&self, needle: &str) -> Selection<'_> {
        self.all().name_contains(needle)
    }

    /// Brand filter, then name filter, then truncation to the display limit
    pub fn browse(&self, query: &BrowseQuery) -> BrowsePage<'_> {
        let brand = query.brand.as_deref().unwrap_or(ALL_BRANDS);
        let condition = FilterCondition::brand(self.normalize_brand(brand))
            .and(FilterCondition::name_contains(&query.search));
        let matched = self.all().filter(&condition);
        let total = matched.len();
        let limit = query.limit.unwrap_or(self.config.display_limit);

        BrowsePage {
            total,
            records: matched.limit(limit).into_vec(),
        }
    }

    // A custom "all brands" label behaves like the built-in sentinel.
    fn normalize_brand<'b>(&self, brand: &'b str) -> &'b str {
        if brand == self.config.all_brands_label {
            ALL_BRANDS
        } else {
            brand
        }
    }
}
