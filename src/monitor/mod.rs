//! The fetch → process → sleep loop.

use std::io::Write;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info, warn};

use crate::market_data::traits::PriceSource;
use crate::market_data::types::AssetId;
use crate::metrics::prometheus::{record_fetch, record_fetch_latency, record_spike};
use crate::output::{error_chain, Renderer};
use crate::state::PriceMemory;
use crate::strategy::SpikeDetector;

/// Pause between ticks. Swappable so tests can control time.
#[async_trait]
pub trait Delay: Send {
    async fn wait(&mut self, period: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&mut self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub ids: Vec<AssetId>,
    pub interval: Duration,
    pub spike_pct: f64,
    pub color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Processed { assets: usize, spikes: usize },
    Failed,
}

pub struct Monitor<S, D, W> {
    source: S,
    delay: D,
    sink: W,
    ids: Vec<AssetId>,
    interval: Duration,
    detector: SpikeDetector,
    renderer: Renderer,
    memory: PriceMemory,
}

impl<S, D, W> Monitor<S, D, W>
where
    S: PriceSource,
    D: Delay,
    W: Write,
{
    pub fn new(source: S, delay: D, sink: W, settings: MonitorSettings) -> Self {
        Self {
            source,
            delay,
            sink,
            ids: settings.ids,
            interval: settings.interval,
            detector: SpikeDetector::new(settings.spike_pct),
            renderer: Renderer::new(settings.color),
            memory: PriceMemory::new(),
        }
    }

    pub fn memory(&self) -> &PriceMemory {
        &self.memory
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// One fetch-and-process cycle. Fetch failures are reported on the sink
    /// and leave memory untouched; only a failing sink is an error.
    pub async fn tick(&mut self) -> std::io::Result<TickOutcome> {
        let started = Instant::now();
        let fetched = self.source.fetch(&self.ids).await;
        record_fetch_latency(self.source.name(), started.elapsed().as_secs_f64() * 1_000.0);

        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(err) => {
                record_fetch(self.source.name(), "error");
                warn!(source = self.source.name(), error = %error_chain(&err), "price fetch failed");
                writeln!(self.sink, "{}", self.renderer.error_line(&err))?;
                self.sink.flush()?;
                return Ok(TickOutcome::Failed);
            }
        };
        record_fetch(self.source.name(), "ok");

        let memory = std::mem::take(&mut self.memory);
        let (memory, report) = self.detector.process_tick(memory, &snapshot);
        self.memory = memory;

        let ts = Renderer::timestamp(Local::now());
        for line in self.renderer.render(&ts, &report) {
            writeln!(self.sink, "{line}")?;
        }
        self.sink.flush()?;

        for spike in report.spikes() {
            record_spike(spike.asset.as_str());
            info!(
                asset = %spike.asset,
                price = spike.price,
                change = ?spike.change,
                threshold = self.detector.spike_pct(),
                "spike detected"
            );
        }

        let outcome = TickOutcome::Processed {
            assets: report.lines.len(),
            spikes: report.spike_count(),
        };
        debug!(?outcome, tracked = self.memory.len(), "tick complete");
        Ok(outcome)
    }

    /// Ticks forever. The next fetch never starts before the previous one
    /// has finished and the interval has elapsed.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        info!(
            source = self.source.name(),
            assets = self.ids.len(),
            interval_secs = self.interval.as_secs(),
            spike_pct = self.detector.spike_pct(),
            "monitor started"
        );

        loop {
            self.tick().await?;
            self.delay.wait(self.interval).await;
        }
    }
}
