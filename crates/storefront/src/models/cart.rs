//! Cart line and joined cart view models.
//!
//! A [`CartLine`] is the persisted (user, product, quantity) record owned by
//! the carrito service. A [`CartItem`] is one line joined with its catalog
//! product for display; the joined shape is never persisted back.

use serde::{Deserialize, Serialize};

use autotienda_core::{LineId, Price, ProductId, UserId};

use super::Product;

/// One persisted cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(rename = "autoId")]
    pub auto_id: ProductId,
    pub cantidad: u32,
}

/// Payload for creating a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartLine {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "autoId")]
    pub auto_id: ProductId,
    pub cantidad: u32,
}

/// Payload for updating a line's quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCantidad {
    pub cantidad: u32,
}

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub line_id: LineId,
    pub auto_id: ProductId,
    pub producto: String,
    pub precio: Price,
    pub imagen: Option<String>,
    pub cantidad: u32,
}

impl CartItem {
    /// Join one line with its product.
    #[must_use]
    pub fn join(line: &CartLine, product: &Product) -> Self {
        Self {
            line_id: line.id,
            auto_id: line.auto_id,
            producto: product.display_name(),
            precio: product.precio,
            imagen: product.imagen.clone(),
            cantidad: line.cantidad,
        }
    }

    /// Line subtotal: `precio * cantidad`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.precio.times(self.cantidad)
    }
}

/// The rendered cart: joined items plus the recomputed total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: Price,
    pub total_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
}

impl CartView {
    /// Message shown for a cart with no lines.
    pub const EMPTY_MESSAGE: &'static str = "No tienes productos en tu carrito.";

    /// Build the view from joined items, recomputing the total.
    ///
    /// The total is never cached; it is the sum of the line subtotals of
    /// whatever is currently displayed.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total: Price = items.iter().map(CartItem::subtotal).sum();
        let mensaje = items
            .is_empty()
            .then(|| Self::EMPTY_MESSAGE.to_string());
        Self {
            total,
            total_display: total.format_clp(),
            items,
            mensaje,
        }
    }

    /// Whether the pay action is available.
    #[must_use]
    pub fn can_pay(&self) -> bool {
        !self.items.is_empty() && !self.total.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(precio: i64, cantidad: u32) -> CartItem {
        CartItem {
            line_id: LineId::new(1),
            auto_id: ProductId::new(1),
            producto: "Audi A4".to_string(),
            precio: Price::new(precio),
            imagen: None,
            cantidad,
        }
    }

    #[test]
    fn empty_cart_reports_no_products_and_suspends_pay() {
        let view = CartView::from_items(Vec::new());
        assert!(view.items.is_empty());
        assert_eq!(view.total, Price::ZERO);
        assert_eq!(view.mensaje.as_deref(), Some(CartView::EMPTY_MESSAGE));
        assert!(!view.can_pay());
    }

    #[test]
    fn total_is_the_sum_of_line_subtotals() {
        let view = CartView::from_items(vec![item(60_000, 2), item(5_000, 3)]);
        assert_eq!(view.items[0].subtotal(), Price::new(120_000));
        assert_eq!(view.items[1].subtotal(), Price::new(15_000));
        assert_eq!(view.total, Price::new(135_000));
        assert!(view.can_pay());
    }

    #[test]
    fn stored_audi_example_formats_with_separators() {
        let view = CartView::from_items(vec![item(60_000, 2)]);
        assert_eq!(view.items[0].subtotal().format_clp(), "$120.000");
        assert_eq!(view.total_display, "$120.000");
    }

    #[test]
    fn join_takes_quantity_from_the_line_and_price_from_the_product() {
        let line = CartLine {
            id: LineId::new(4),
            user_id: Some(UserId::new(2)),
            auto_id: ProductId::new(9),
            cantidad: 3,
        };
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 9, "marca": "Toyota", "modelo": "Yaris", "precio": 8_000_000
        }))
        .unwrap();

        let joined = CartItem::join(&line, &product);
        assert_eq!(joined.producto, "Toyota Yaris");
        assert_eq!(joined.cantidad, 3);
        assert_eq!(joined.subtotal(), Price::new(24_000_000));
    }

    #[test]
    fn wire_names_match_the_carrito_service() {
        let line = NewCartLine {
            user_id: UserId::new(5),
            auto_id: ProductId::new(7),
            cantidad: 1,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"userId": 5, "autoId": 7, "cantidad": 1})
        );
    }
}
