//! Cart Collaborator Interface
//!
//! The core produces cart items and one-shot-delegates them; storage,
//! display, and checkout live outside. The sink is injected by reference so
//! tests can substitute a recording fake.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{ProductColor, SizeLabel};

/// The record handed to the cart on finalize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub size: SizeLabel,
    pub color: ProductColor,
    pub quantity: u32,
    /// Data reference of the uploaded design.
    pub image: String,
}

/// Receiving end of the cart handoff.
pub trait CartSink {
    fn add_item(&mut self, item: CartItem);
}

/// In-memory cart shared by the shop's views.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[CartItem] {
        &self.items
    }

    pub fn remove(&mut self, id: Uuid) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl CartSink for Cart {
    fn add_item(&mut self, item: CartItem) {
        self.items.push(item);
    }
}
