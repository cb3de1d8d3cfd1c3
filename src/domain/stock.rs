use serde::{Deserialize, Serialize};

/// Units of a product available in the remote inventory.
///
/// Never cached: every quantity check fetches a fresh record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "id", alias = "productId")]
    pub product_id: u64,
    pub amount: u32,
}

impl Stock {
    pub fn new(product_id: u64, amount: u32) -> Self {
        Self { product_id, amount }
    }

    pub fn is_available(&self) -> bool {
        self.amount > 0
    }

    pub fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_id_spellings() {
        let by_id: Stock = serde_json::from_str(r#"{"id":3,"amount":7}"#).unwrap();
        let by_product_id: Stock = serde_json::from_str(r#"{"productId":3,"amount":7}"#).unwrap();
        assert_eq!(by_id, by_product_id);
        assert_eq!(by_id, Stock::new(3, 7));
    }

    #[test]
    fn empty_stock_is_unavailable() {
        assert!(!Stock::new(1, 0).is_available());
        assert!(Stock::new(1, 2).covers(2));
        assert!(!Stock::new(1, 2).covers(3));
    }
}
