use std::fmt;

/// Lowercase identifier used both to request and to report an asset.
#[derive(Debug, Clone, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    /// Normalizes to trimmed lowercase. Returns None for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let id = raw.trim().to_lowercase();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case label used on screen.
    pub fn display_name(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits a comma-separated list into asset ids, dropping blank entries.
pub fn parse_symbols(raw: &str) -> Vec<AssetId> {
    raw.split(',').filter_map(AssetId::new).collect()
}

/// Prices returned by one fetch, in the order the upstream listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    quotes: Vec<(AssetId, f64)>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, asset: AssetId, price: f64) {
        self.quotes.push((asset, price));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, f64)> {
        self.quotes.iter().map(|(asset, price)| (asset, *price))
    }

    pub fn get(&self, asset: &AssetId) -> Option<f64> {
        self.iter().find(|(a, _)| *a == asset).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<(AssetId, f64)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (AssetId, f64)>>(iter: I) -> Self {
        Self { quotes: iter.into_iter().collect() }
    }
}
