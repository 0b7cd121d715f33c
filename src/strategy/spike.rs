use crate::market_data::types::PriceSnapshot;
use crate::state::PriceMemory;

use super::report::{PriceLine, TickReport};

/// Compares each tick against the one before it and flags moves whose
/// magnitude reaches `spike_pct` percent.
#[derive(Debug, Clone, Copy)]
pub struct SpikeDetector {
    spike_pct: f64,
}

impl SpikeDetector {
    pub fn new(spike_pct: f64) -> Self {
        Self { spike_pct }
    }

    pub fn spike_pct(&self) -> f64 {
        self.spike_pct
    }

    /// Evaluates `snapshot` against `memory` and returns the updated memory
    /// with the report. Assets missing from the snapshot keep their old entry.
    pub fn process_tick(
        &self,
        mut memory: PriceMemory,
        snapshot: &PriceSnapshot,
    ) -> (PriceMemory, TickReport) {
        let mut report = TickReport::default();

        for (asset, price) in snapshot.iter() {
            // A zero previous price has no defined percent change.
            let change = memory
                .get(asset)
                .filter(|prev| *prev != 0.0)
                .map(|prev| percent_change(prev, price));
            let spike = change.is_some_and(|c| c.abs() >= self.spike_pct);

            report.lines.push(PriceLine {
                asset: asset.clone(),
                price,
                change,
                spike,
            });
            memory.record(asset.clone(), price);
        }

        (memory, report)
    }
}

pub fn percent_change(prev: f64, price: f64) -> f64 {
    (price - prev) / prev * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::types::AssetId;

    fn id(s: &str) -> AssetId {
        AssetId::new(s).unwrap()
    }

    fn snapshot(quotes: &[(&str, f64)]) -> PriceSnapshot {
        quotes.iter().map(|(a, p)| (id(a), *p)).collect()
    }

    #[test]
    fn first_tick_has_no_change() {
        let detector = SpikeDetector::new(1.0);
        let (memory, report) =
            detector.process_tick(PriceMemory::new(), &snapshot(&[("eth", 2000.1234)]));

        let line = report.line_for(&id("eth")).unwrap();
        assert_eq!(line.change, None);
        assert!(!line.spike);
        assert_eq!(memory.get(&id("eth")), Some(2000.1234));
    }

    #[test]
    fn two_percent_move_is_a_spike() {
        let detector = SpikeDetector::new(1.0);
        let history = PriceMemory::from(&snapshot(&[("btc", 100.0)]));
        let (memory, report) = detector.process_tick(history, &snapshot(&[("btc", 102.0)]));

        let line = report.line_for(&id("btc")).unwrap();
        assert!((line.change.unwrap() - 2.0).abs() < 1e-9);
        assert!(line.spike);
        assert_eq!(memory.get(&id("btc")), Some(102.0));
    }

    #[test]
    fn half_percent_move_is_not_a_spike() {
        let detector = SpikeDetector::new(1.0);
        let history = PriceMemory::from(&snapshot(&[("btc", 100.0)]));
        let (_, report) = detector.process_tick(history, &snapshot(&[("btc", 100.5)]));

        let line = report.line_for(&id("btc")).unwrap();
        assert!((line.change.unwrap() - 0.5).abs() < 1e-9);
        assert!(!line.spike);
        assert_eq!(report.spike_count(), 0);
    }

    #[test]
    fn threshold_is_inclusive_and_sign_agnostic() {
        let detector = SpikeDetector::new(25.0);
        let history = PriceMemory::from(&snapshot(&[("btc", 4.0), ("eth", 4.0)]));
        let (_, report) =
            detector.process_tick(history, &snapshot(&[("btc", 5.0), ("eth", 3.0)]));

        assert_eq!(report.line_for(&id("btc")).unwrap().change, Some(25.0));
        assert_eq!(report.line_for(&id("eth")).unwrap().change, Some(-25.0));
        assert_eq!(report.spike_count(), 2);
    }

    #[test]
    fn compares_against_previous_tick_not_baseline() {
        let detector = SpikeDetector::new(100.0);
        let memory = PriceMemory::new();
        let (memory, _) = detector.process_tick(memory, &snapshot(&[("sol", 100.0)]));
        let (memory, _) = detector.process_tick(memory, &snapshot(&[("sol", 200.0)]));
        let (_, report) = detector.process_tick(memory, &snapshot(&[("sol", 210.0)]));

        let change = report.line_for(&id("sol")).unwrap().change.unwrap();
        assert!((change - 5.0).abs() < 1e-9);
    }

    #[test]
    fn absent_assets_keep_their_memory() {
        let detector = SpikeDetector::new(1.0);
        let history = PriceMemory::from(&snapshot(&[("btc", 100.0), ("eth", 50.0)]));
        let (memory, report) = detector.process_tick(history, &snapshot(&[("btc", 101.0)]));

        assert_eq!(report.lines.len(), 1);
        assert_eq!(memory.get(&id("eth")), Some(50.0));
        assert_eq!(memory.get(&id("btc")), Some(101.0));
    }

    #[test]
    fn zero_previous_price_is_treated_as_no_history() {
        let detector = SpikeDetector::new(1.0);
        let history = PriceMemory::from(&snapshot(&[("dead", 0.0)]));
        let (memory, report) = detector.process_tick(history, &snapshot(&[("dead", 3.0)]));

        let line = report.line_for(&id("dead")).unwrap();
        assert_eq!(line.change, None);
        assert!(!line.spike);
        assert_eq!(memory.get(&id("dead")), Some(3.0));
    }

    #[test]
    fn lines_follow_snapshot_order() {
        let detector = SpikeDetector::new(1.0);
        let (_, report) = detector.process_tick(
            PriceMemory::new(),
            &snapshot(&[("sol", 1.0), ("btc", 2.0), ("eth", 3.0)]),
        );
        let order: Vec<&str> = report.lines.iter().map(|l| l.asset.as_str()).collect();
        assert_eq!(order, vec!["sol", "btc", "eth"]);
    }
}
