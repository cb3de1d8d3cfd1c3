use serde::Serialize;

use super::CartItem;
use crate::cart_actor::CartError;

/// The shopper's current selection: ordered lines with unique product ids.
///
/// Every mutation is computed into a fresh `Cart` so the caller can persist the
/// whole result before committing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored lines, keeping the first line seen for each id.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.amount > 0 && cart.find(item.id()).is_none() {
                cart.items.push(item);
            }
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, product_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    /// Sum of the amounts of every line.
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Returns a cart with `item` appended.
    ///
    /// # Errors
    /// `DuplicateItem` if the product already has a line; repeated adds go
    /// through [`Cart::with_amount`] instead.
    pub fn with_item(&self, item: CartItem) -> Result<Self, CartError> {
        if self.find(item.id()).is_some() {
            return Err(CartError::DuplicateItem(item.id()));
        }
        let mut items = self.items.clone();
        items.push(item);
        Ok(Self { items })
    }

    /// Returns a cart where the line for `product_id` holds `amount`.
    ///
    /// # Errors
    /// `NotFound` if the product has no line in this cart.
    pub fn with_amount(&self, product_id: u64, amount: u32) -> Result<Self, CartError> {
        let mut items = self.items.clone();
        let line = items
            .iter_mut()
            .find(|item| item.id() == product_id)
            .ok_or(CartError::NotFound(product_id))?;
        line.amount = amount;
        Ok(Self { items })
    }

    /// Returns a cart without the line for `product_id`.
    ///
    /// # Errors
    /// `NotFound` if the product has no line in this cart.
    pub fn without(&self, product_id: u64) -> Result<Self, CartError> {
        if self.find(product_id).is_none() {
            return Err(CartError::NotFound(product_id));
        }
        let items = self
            .items
            .iter()
            .filter(|item| item.id() != product_id)
            .cloned()
            .collect();
        Ok(Self { items })
    }
}
