//! Product Catalog - Static Configuration Data
//!
//! Base prices and size presets are data, not computed logic. The catalog
//! ships with compiled-in defaults and can be overridden per product from a
//! directory of JSON entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::geometry::PhysicalSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Hoodie,
    TShirt,
}

impl ProductType {
    pub fn all() -> [ProductType; 2] {
        [ProductType::Hoodie, ProductType::TShirt]
    }

    /// Slug used in asset names and display labels.
    pub fn slug(&self) -> &'static str {
        match self {
            ProductType::Hoodie => "hoodie",
            ProductType::TShirt => "t-shirt",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for ProductType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hoodie" => Ok(ProductType::Hoodie),
            "t-shirt" => Ok(ProductType::TShirt),
            other => Err(CatalogError::UnknownProductType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductColor {
    White,
    Black,
}

impl fmt::Display for ProductColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductColor::White => "white",
            ProductColor::Black => "black",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeLabel {
    Xs,
    S,
    M,
    L,
    Xl,
}

impl SizeLabel {
    pub fn all() -> [SizeLabel; 5] {
        [SizeLabel::Xs, SizeLabel::S, SizeLabel::M, SizeLabel::L, SizeLabel::Xl]
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SizeLabel::Xs => "XS",
            SizeLabel::S => "S",
            SizeLabel::M => "M",
            SizeLabel::L => "L",
            SizeLabel::Xl => "XL",
        })
    }
}

/// One catalog entry: a product type with its base price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    pub product_type: ProductType,
    pub base_price: f64,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown product type: {0}")]
    UnknownProductType(String),

    #[error("Failed to read catalog entry: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog entry: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog registry - base prices and size presets
pub struct ProductCatalog {
    base_prices: BTreeMap<ProductType, f64>,
    size_presets: BTreeMap<SizeLabel, PhysicalSize>,
}

impl ProductCatalog {
    /// Compiled-in catalog: hoodie 600, t-shirt 300, presets XS through XL.
    pub fn new() -> Self {
        let base_prices = BTreeMap::from([
            (ProductType::Hoodie, 600.0),
            (ProductType::TShirt, 300.0),
        ]);
        let size_presets = BTreeMap::from([
            (SizeLabel::Xs, PhysicalSize::new(18.0, 24.0)),
            (SizeLabel::S, PhysicalSize::new(20.0, 26.0)),
            (SizeLabel::M, PhysicalSize::new(22.0, 28.0)),
            (SizeLabel::L, PhysicalSize::new(24.0, 30.0)),
            (SizeLabel::Xl, PhysicalSize::new(26.0, 32.0)),
        ]);
        Self { base_prices, size_presets }
    }

    /// Load base-price overrides from a directory of `*.json` product
    /// entries, on top of the compiled-in defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().map_or(false, |e| e == "json") {
                    let content = fs::read_to_string(&path)?;
                    let product: ProductEntry = serde_json::from_str(&content)?;
                    catalog.base_prices.insert(product.product_type, product.base_price);
                }
            }
        }
        Ok(catalog)
    }

    pub fn base_price(&self, product_type: ProductType) -> f64 {
        // Both variants are always present; defaults cover any gap.
        self.base_prices.get(&product_type).copied().unwrap_or_default()
    }

    pub fn size_preset(&self, label: SizeLabel) -> PhysicalSize {
        self.size_presets[&label]
    }

    pub fn entries(&self) -> Vec<ProductEntry> {
        self.base_prices
            .iter()
            .map(|(product_type, base_price)| ProductEntry {
                product_type: *product_type,
                base_price: *base_price,
            })
            .collect()
    }

    /// Mockup background asset name for a type/color pair, e.g.
    /// "hoodie-white". Resolution to an actual resource is the embedding
    /// context's concern.
    pub fn mockup_asset(&self, product_type: ProductType, color: ProductColor) -> String {
        format!("{}-{}", product_type, color)
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}
