//! Catalog product model.

use serde::{Deserialize, Serialize};

use autotienda_core::{Price, ProductId};

/// Brand marker of the legacy sentinel rows.
///
/// Older admin tooling made a category exist by inserting a fake product
/// with this brand. The gateway never creates such rows, but the catalog
/// service may still hold them, so the read side keeps tolerating them:
/// hidden from the grid, their `categoria` still counted.
pub const SENTINEL_MARCA: &str = "Z-Admin";

/// A product as stored by the autos service.
///
/// The collection predates any schema discipline, so everything beyond the
/// id tolerates absent or null fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub anio: i32,
    #[serde(default)]
    pub precio: Price,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub descripcion: Option<String>,
}

impl Product {
    /// Whether this row is a legacy category sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.marca == SENTINEL_MARCA
    }

    /// Whether this row belongs in the public catalog grid.
    ///
    /// Sentinels and rows without a brand or model are hidden.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        !self.is_sentinel() && !self.marca.trim().is_empty() && !self.modelo.trim().is_empty()
    }

    /// Display name, `"{marca} {modelo}"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.marca, self.modelo)
    }
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub marca: String,
    pub modelo: String,
    #[serde(default)]
    pub anio: i32,
    #[serde(default)]
    pub precio: Price,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub descripcion: Option<String>,
}
