use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the device dataset.
///
/// Serde names follow the normalized dataset column names, so the same type
/// deserializes straight from CSV rows and serializes back to JSON for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub brand: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(rename = "RAM_GB", default)]
    pub ram_gb: Option<f64>,
    #[serde(rename = "battery_mAh", default)]
    pub battery_mah: Option<f64>,
    #[serde(rename = "primary_camera_MP", alias = "camera_MP", default)]
    pub camera_mp: Option<f64>,
    #[serde(rename = "weight_g", default)]
    pub weight_g: Option<f64>,
    #[serde(rename = "OS", default)]
    pub os: Option<String>,
    #[serde(rename = "Chipset", default)]
    pub chipset: Option<String>,
    #[serde(rename = "approx_price_EUR", default)]
    pub price_eur: Option<f64>,
    #[serde(rename = "img_url", default)]
    pub img_url: Option<String>,
}

impl DeviceRecord {
    #[must_use]
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: Some(model.into()),
            ram_gb: None,
            battery_mah: None,
            camera_mp: None,
            weight_g: None,
            os: None,
            chipset: None,
            price_eur: None,
            img_url: None,
        }
    }

    #[must_use]
    pub fn with_specs(mut self, specs: SpecVector) -> Self {
        self.ram_gb = Some(specs.ram_gb);
        self.battery_mah = Some(specs.battery_mah);
        self.camera_mp = Some(specs.camera_mp);
        self.weight_g = Some(specs.weight_g);
        self
    }

    #[must_use]
    pub fn with_platform(mut self, os: impl Into<String>, chipset: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self.chipset = Some(chipset.into());
        self
    }

    #[must_use]
    pub fn with_price(mut self, price_eur: f64) -> Self {
        self.price_eur = Some(price_eur);
        self
    }

    #[must_use]
    pub fn with_image(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = Some(img_url.into());
        self
    }

    /// Image URL, treating blank strings as absent.
    pub fn image_url(&self) -> Option<&str> {
        self.img_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn has_image(&self) -> bool {
        self.image_url().is_some()
    }

    /// "Brand Model" as shown on result cards.
    pub fn display_name(&self) -> String {
        match &self.model {
            Some(model) => format!("{} {}", self.brand, model),
            None => self.brand.clone(),
        }
    }

    /// The four numeric spec fields, or `None` if any is missing.
    pub fn specs(&self) -> Option<SpecVector> {
        Some(SpecVector {
            ram_gb: self.ram_gb?,
            battery_mah: self.battery_mah?,
            camera_mp: self.camera_mp?,
            weight_g: self.weight_g?,
        })
    }

    /// Value of a text field. Returns `None` for absent values and for numeric fields.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Brand => Some(self.brand.as_str()),
            Field::Model => self.model.as_deref(),
            Field::Os => self.os.as_deref(),
            Field::Chipset => self.chipset.as_deref(),
            Field::ImageUrl => self.image_url(),
            _ => None,
        }
    }

    /// Value of a numeric field. Returns `None` for absent values and for text fields.
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::RamGb => self.ram_gb,
            Field::BatteryMah => self.battery_mah,
            Field::CameraMp => self.camera_mp,
            Field::WeightG => self.weight_g,
            Field::PriceEur => self.price_eur,
            _ => None,
        }
    }
}

/// The numeric spec fields used for matching and prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecVector {
    pub ram_gb: f64,
    pub battery_mah: f64,
    pub camera_mp: f64,
    pub weight_g: f64,
}

impl SpecVector {
    pub fn new(ram_gb: f64, battery_mah: f64, camera_mp: f64, weight_g: f64) -> Self {
        Self {
            ram_gb,
            battery_mah,
            camera_mp,
            weight_g,
        }
    }

    /// Pairs of (field, value) in a fixed order
    pub fn entries(&self) -> [(Field, f64); 4] {
        [
            (Field::RamGb, self.ram_gb),
            (Field::BatteryMah, self.battery_mah),
            (Field::CameraMp, self.camera_mp),
            (Field::WeightG, self.weight_g),
        ]
    }
}

/// A dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Brand,
    Model,
    RamGb,
    BatteryMah,
    CameraMp,
    WeightG,
    Os,
    Chipset,
    PriceEur,
    ImageUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Brand,
        Field::Model,
        Field::RamGb,
        Field::BatteryMah,
        Field::CameraMp,
        Field::WeightG,
        Field::Os,
        Field::Chipset,
        Field::PriceEur,
        Field::ImageUrl,
    ];

    /// Fields that feed the price model as integer codes.
    pub const CATEGORICAL: [Field; 3] = [Field::Brand, Field::Os, Field::Chipset];

    /// Normalized column name in the dataset
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Brand => "brand",
            Field::Model => "model",
            Field::RamGb => "RAM_GB",
            Field::BatteryMah => "battery_mAh",
            Field::CameraMp => "primary_camera_MP",
            Field::WeightG => "weight_g",
            Field::Os => "OS",
            Field::Chipset => "Chipset",
            Field::PriceEur => "approx_price_EUR",
            Field::ImageUrl => "img_url",
        }
    }

    /// Other accepted names for the column
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::CameraMp => &["camera_MP"],
            _ => &[],
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::RamGb | Field::BatteryMah | Field::CameraMp | Field::WeightG | Field::PriceEur => {
                FieldKind::Number
            }
            _ => FieldKind::Text,
        }
    }

    pub fn is_categorical(self) -> bool {
        Self::CATEGORICAL.contains(&self)
    }

    /// Whether `name` is this field's column name or one of its aliases
    pub fn matches_name(self, name: &str) -> bool {
        self.column_name() == name || self.aliases().contains(&name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.matches_name(s))
            .ok_or_else(|| Error::unknown_field(s))
    }
}
