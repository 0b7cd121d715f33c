use crate::market_data::types::AssetId;

/// Result of evaluating one asset on one tick. Presentation-free.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLine {
    pub asset: AssetId,
    pub price: f64,
    /// Percent change since the previous tick, None when there is no usable
    /// previous price.
    pub change: Option<f64>,
    pub spike: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub lines: Vec<PriceLine>,
}

impl TickReport {
    pub fn spikes(&self) -> impl Iterator<Item = &PriceLine> {
        self.lines.iter().filter(|line| line.spike)
    }

    pub fn spike_count(&self) -> usize {
        self.spikes().count()
    }

    pub fn line_for(&self, asset: &AssetId) -> Option<&PriceLine> {
        self.lines.iter().find(|line| &line.asset == asset)
    }
}
