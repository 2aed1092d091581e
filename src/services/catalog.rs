use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fixed item prices in coins. Could be loaded from configuration without
/// touching the purchase logic.
static PRICES: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    HashMap::from([
        ("t-shirt", 80),
        ("cup", 20),
        ("book", 50),
        ("pen", 10),
        ("powerbank", 200),
        ("hoody", 300),
        ("umbrella", 200),
        ("socks", 10),
        ("wallet", 50),
        ("pink-hoody", 500),
    ])
});

pub fn price_of(item: &str) -> Option<i32> {
    PRICES.get(item).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_items_have_prices() {
        assert_eq!(price_of("t-shirt"), Some(80));
        assert_eq!(price_of("pink-hoody"), Some(500));
        assert_eq!(price_of("pen"), Some(10));
    }

    #[test]
    fn unknown_item_has_no_price() {
        assert_eq!(price_of("car"), None);
        assert_eq!(price_of("T-Shirt"), None);
    }
}
