//! The product record produced for every successfully scraped page

use serde::{Deserialize, Serialize};

pub const CATEGORY_MISSING: &str = "category missing";
pub const NAME_MISSING: &str = "name missing";
pub const PRICE_MISSING: &str = "price missing";
pub const CHARACTERISTICS_MISSING: &str = "characteristics missing";
pub const SKU_MISSING: &str = "sku missing";
pub const DESCRIPTION_MISSING: &str = "description missing";
pub const EXTENDED_DESCRIPTION_MISSING: &str = "extended description missing";

/// Structured fields extracted from one product detail page
///
/// Every field is always populated: when the page lacks a field the
/// corresponding `*_MISSING` sentinel is stored instead. In JSON each field
/// is wrapped as `{"data": <value>}` under the key used by the catalog's
/// historical exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "CATEGORY", with = "data_field")]
    pub category: String,

    #[serde(rename = "Название", with = "data_field")]
    pub name: String,

    #[serde(rename = "Цена", with = "data_field")]
    pub price: String,

    /// Absolute image URLs in document order
    #[serde(rename = "Ссылки на изображения", with = "data_field")]
    pub images: Vec<String>,

    #[serde(rename = "Характеристики", with = "data_field")]
    pub characteristics: String,

    #[serde(rename = "Артикул", with = "data_field")]
    pub sku: String,

    #[serde(rename = "Описание", with = "data_field")]
    pub description: String,

    #[serde(rename = "Дополнительное описание", with = "data_field")]
    pub extended_description: String,
}

impl Default for ProductRecord {
    /// A record with every field set to its fallback
    fn default() -> Self {
        Self {
            category: CATEGORY_MISSING.to_string(),
            name: NAME_MISSING.to_string(),
            price: PRICE_MISSING.to_string(),
            images: Vec::new(),
            characteristics: CHARACTERISTICS_MISSING.to_string(),
            sku: SKU_MISSING.to_string(),
            description: DESCRIPTION_MISSING.to_string(),
            extended_description: EXTENDED_DESCRIPTION_MISSING.to_string(),
        }
    }
}

/// (De)serializes a value as `{"data": value}`
mod data_field {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct Wrapped<'a, T> {
        data: &'a T,
    }

    #[derive(Deserialize)]
    struct Owned<T> {
        data: T,
    }

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        Wrapped { data: value }.serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Owned::<T>::deserialize(deserializer).map(|owned| owned.data)
    }
}
