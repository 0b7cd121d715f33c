use std::collections::HashMap;

use crate::market_data::types::{AssetId, PriceSnapshot};

/// Last observed price per asset. Entries are only ever written from a
/// fetched snapshot and are never evicted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceMemory {
    last_seen: HashMap<AssetId, f64>,
}

impl PriceMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: &AssetId) -> Option<f64> {
        self.last_seen.get(asset).copied()
    }

    pub fn record(&mut self, asset: AssetId, price: f64) {
        self.last_seen.insert(asset, price);
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }
}

impl From<&PriceSnapshot> for PriceMemory {
    fn from(snapshot: &PriceSnapshot) -> Self {
        let mut memory = PriceMemory::new();
        for (asset, price) in snapshot.iter() {
            memory.record(asset.clone(), price);
        }
        memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_overwrites_previous_price() {
        let btc = AssetId::new("btc").unwrap();
        let mut memory = PriceMemory::new();
        assert!(memory.is_empty());

        memory.record(btc.clone(), 100.0);
        memory.record(btc.clone(), 101.0);

        assert_eq!(memory.get(&btc), Some(101.0));
        assert_eq!(memory.len(), 1);
    }
}
