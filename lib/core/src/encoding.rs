//! Append-only categorical encoding
//!
//! Maps the values of each categorical field (brand, OS, chipset) to dense
//! integer codes for the price model. A field's table is seeded on first use
//! from the catalog's sorted distinct values, so codes line up with a label
//! encoder fit on the same catalog. Values never seen before are appended with
//! the next code; existing codes never change.

use crate::{Catalog, Error, Field, Result};
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Bijection between the values of one field and their codes
#[derive(Debug, Clone, Default)]
pub struct EncodingTable {
    codes: AHashMap<String, u32>,
    values: Vec<String>,
}

impl EncodingTable {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for value in values {
            table.insert(value.into());
        }
        table
    }

    pub fn code(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn value(&self, code: u32) -> Option<&str> {
        self.values.get(code as usize).map(String::as_str)
    }

    /// Code of `value`, assigning the next one if it is new
    pub fn insert(&mut self, value: String) -> u32 {
        if let Some(code) = self.codes.get(&value) {
            return *code;
        }
        // Codes are dense, so the next code is max + 1 (or 0 when empty).
        let code = self.values.len() as u32;
        self.values.push(value.clone());
        self.codes.insert(value, code);
        code
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Shared encoder over all categorical fields of a catalog.
///
/// Safe to share across threads. New codes are minted under the write lock
/// after a re-check, so concurrent first sightings of a value agree on one code.
#[derive(Debug)]
pub struct CategoricalEncoder {
    catalog: Arc<Catalog>,
    tables: RwLock<AHashMap<Field, EncodingTable>>,
}

impl CategoricalEncoder {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            tables: RwLock::new(AHashMap::new()),
        }
    }

    /// Integer code for `value` in `field`, appending it if unseen
    pub fn encode(&self, field: &str, value: &str) -> Result<u32> {
        self.encode_field(Self::categorical(field)?, value)
    }

    pub fn encode_field(&self, field: Field, value: &str) -> Result<u32> {
        let field = Self::ensure_categorical(field)?;

        if let Some(code) = self
            .tables
            .read()
            .get(&field)
            .and_then(|table| table.code(value))
        {
            return Ok(code);
        }

        let mut tables = self.tables.write();
        let table = tables
            .entry(field)
            .or_insert_with(|| self.seed_table(field));
        if let Some(code) = table.code(value) {
            return Ok(code);
        }

        let code = table.insert(value.to_string());
        tracing::debug!(field = %field, value, code, "appended categorical code");
        Ok(code)
    }

    /// Value that was assigned `code` in `field`
    pub fn decode(&self, field: &str, code: u32) -> Result<String> {
        self.decode_field(Self::categorical(field)?, code)
    }

    pub fn decode_field(&self, field: Field, code: u32) -> Result<String> {
        let field = Self::ensure_categorical(field)?;

        if let Some(value) = self
            .tables
            .read()
            .get(&field)
            .and_then(|table| table.value(code).map(str::to_string))
        {
            return Ok(value);
        }

        let mut tables = self.tables.write();
        let table = tables
            .entry(field)
            .or_insert_with(|| self.seed_table(field));
        table
            .value(code)
            .map(str::to_string)
            .ok_or_else(|| Error::UnknownCode {
                field: field.to_string(),
                code,
            })
    }

    fn seed_table(&self, field: Field) -> EncodingTable {
        // Categorical fields are text fields, so this never fails.
        let values = self.catalog.distinct_values(field).unwrap_or_default();
        tracing::debug!(field = %field, values = values.len(), "seeded encoding table");
        EncodingTable::from_values(values)
    }

    fn categorical(name: &str) -> Result<Field> {
        Self::ensure_categorical(name.parse()?)
    }

    fn ensure_categorical(field: Field) -> Result<Field> {
        if field.is_categorical() {
            Ok(field)
        } else {
            Err(Error::Configuration(format!(
                "field '{}' is not categorical",
                field
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogStore, DeviceRecord};
    use std::thread;

    fn create_test_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(vec![
            DeviceRecord::new("Zeta", "Z1").with_platform("Android", "Dimensity"),
            DeviceRecord::new("Acme", "A1").with_platform("AcmeOS", "Snapdragon"),
            DeviceRecord::new("Acme", "A2").with_platform("Android", "Snapdragon"),
        ]))
    }

    fn table_len(encoder: &CategoricalEncoder, field: Field) -> usize {
        let mut tables = encoder.tables.write();
        tables
            .entry(field)
            .or_insert_with(|| encoder.seed_table(field))
            .len()
    }

    #[test]
    fn test_codes_follow_sorted_catalog_values() {
        let encoder = CategoricalEncoder::new(create_test_catalog());
        assert_eq!(encoder.encode("brand", "Acme").unwrap(), 0);
        assert_eq!(encoder.encode("brand", "Zeta").unwrap(), 1);
        assert_eq!(encoder.encode("Chipset", "Dimensity").unwrap(), 0);
        assert_eq!(encoder.encode("Chipset", "Snapdragon").unwrap(), 1);
    }

    #[test]
    fn test_encode_is_idempotent() {
        let encoder = CategoricalEncoder::new(create_test_catalog());
        let first = encoder.encode("OS", "Android").unwrap();
        let second = encoder.encode("OS", "Android").unwrap();
        assert_eq!(first, second);

        let fresh = encoder.encode("OS", "HarmonyOS").unwrap();
        assert_eq!(encoder.encode("OS", "HarmonyOS").unwrap(), fresh);
    }

    #[test]
    fn test_unseen_value_gets_next_code() {
        let catalog = create_test_catalog();
        let encoder = CategoricalEncoder::new(catalog.clone());

        let fresh = encoder.encode("brand", "Nokia").unwrap();
        assert_eq!(fresh, 2);
        assert_eq!(encoder.encode("brand", "Motorola").unwrap(), 3);
        assert_eq!(encoder.decode("brand", fresh).unwrap(), "Nokia");

        // the catalog's own listing is unaffected
        let store = CatalogStore::new(catalog);
        assert_eq!(store.distinct_values("brand").unwrap(), vec!["Acme", "Zeta"]);
    }

    #[test]
    fn test_decode_unknown_code() {
        let encoder = CategoricalEncoder::new(create_test_catalog());
        assert_eq!(encoder.decode("OS", 1).unwrap(), "Android");
        assert!(matches!(
            encoder.decode("OS", 7),
            Err(Error::UnknownCode { code: 7, .. })
        ));
    }

    #[test]
    fn test_non_categorical_fields_rejected() {
        let encoder = CategoricalEncoder::new(create_test_catalog());
        assert!(matches!(encoder.encode("model", "A1"), Err(Error::Configuration(_))));
        assert!(matches!(encoder.encode("RAM_GB", "8"), Err(Error::Configuration(_))));
        assert!(matches!(encoder.decode("nope", 0), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_empty_catalog_starts_at_zero() {
        let encoder = CategoricalEncoder::new(Arc::new(Catalog::default()));
        assert_eq!(table_len(&encoder, Field::Brand), 0);
        assert_eq!(encoder.encode("brand", "Acme").unwrap(), 0);
        assert_eq!(encoder.encode("brand", "Beta").unwrap(), 1);
    }

    #[test]
    fn test_concurrent_first_sightings_share_a_code() {
        let encoder = Arc::new(CategoricalEncoder::new(create_test_catalog()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let encoder = encoder.clone();
                thread::spawn(move || encoder.encode("brand", "Nokia").unwrap())
            })
            .collect();
        let codes: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(codes.iter().all(|&code| code == codes[0]));
        assert_eq!(table_len(&encoder, Field::Brand), 3);
    }

    #[test]
    fn test_encoding_table_insert() {
        let mut table = EncodingTable::from_values(["a", "b"]);
        assert_eq!(table.insert("b".to_string()), 1);
        assert_eq!(table.insert("c".to_string()), 2);
        assert_eq!(table.value(2), Some("c"));
        assert_eq!(table.len(), 3);
    }
}
