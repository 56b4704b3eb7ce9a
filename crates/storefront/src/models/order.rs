//! Delivery form and order models.

use serde::{Deserialize, Serialize};

use autotienda_core::{OrderId, Price, ProductId, UserId};

use super::CartItem;

/// Delivery form collected at checkout.
///
/// Held only in the session between checkout and receipt; the full form is
/// stored verbatim so returning from the receipt loses nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryInfo {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub calle: String,
    #[serde(default)]
    pub departamento: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub comuna: String,
    #[serde(default)]
    pub indicaciones: String,
}

/// One line of an order document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "autoId")]
    pub auto_id: ProductId,
    #[serde(rename = "marcaModelo")]
    pub marca_modelo: String,
    #[serde(rename = "precioUnitario")]
    pub precio_unitario: Price,
    pub cantidad: u32,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            auto_id: item.auto_id,
            marca_modelo: item.producto.clone(),
            precio_unitario: item.precio,
            cantidad: item.cantidad,
        }
    }
}

/// Order document submitted to the ordenes service.
///
/// Built exactly once, at receipt confirmation; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(rename = "userId")]
    pub user_id: Option<UserId>,
    #[serde(rename = "nombreCliente")]
    pub nombre_cliente: String,
    #[serde(rename = "correoCliente")]
    pub correo_cliente: String,
    pub total: Price,
    pub items: Vec<OrderItem>,
    pub calle: String,
    pub comuna: String,
    pub region: String,
}

impl NewOrder {
    /// Assemble the order document from the session-held pipeline state.
    #[must_use]
    pub fn assemble(
        user_id: Option<UserId>,
        delivery: &DeliveryInfo,
        items: &[CartItem],
        total: Price,
    ) -> Self {
        Self {
            user_id,
            nombre_cliente: format!("{} {}", delivery.nombre, delivery.apellido)
                .trim()
                .to_string(),
            correo_cliente: delivery.correo.clone(),
            total,
            items: items.iter().map(OrderItem::from).collect(),
            calle: delivery.calle.clone(),
            comuna: delivery.comuna.clone(),
            region: delivery.region.clone(),
        }
    }
}

/// An order as read back from the ordenes service.
///
/// Older rows may miss fields, so everything past the totals is tolerant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: Option<OrderId>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(rename = "nombreCliente", default)]
    pub nombre_cliente: String,
    #[serde(rename = "correoCliente", default)]
    pub correo_cliente: String,
    #[serde(default)]
    pub total: Price,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub calle: String,
    #[serde(default)]
    pub comuna: String,
    #[serde(default)]
    pub region: String,
}
