use tracing::warn;

use super::{AnalysisContext, Strategy, TrendMomentumStrategy};
use crate::domain::analyzer::AnalyzerConfig;
use crate::domain::signal::TradingSignal;

/// Ordered collection of enabled strategies.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured strategy names.
    ///
    /// Unknown names are logged and skipped.
    #[must_use]
    pub fn from_names(names: &[String], analyzer: &AnalyzerConfig) -> Self {
        let mut registry = Self::new();
        for name in names {
            match name.as_str() {
                TrendMomentumStrategy::NAME => {
                    registry.register(Box::new(TrendMomentumStrategy::new(analyzer.clone())));
                }
                unknown => {
                    warn!(strategy = unknown, "Unknown strategy in config, skipping");
                }
            }
        }
        registry
    }

    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    #[must_use]
    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// The highest-confidence signal and the strategy that produced it.
    ///
    /// Ties keep the strategy registered first.
    #[must_use]
    pub fn best(&self, ctx: &AnalysisContext<'_>) -> Option<(&'static str, TradingSignal)> {
        self.strategies
            .iter()
            .filter_map(|s| s.evaluate(ctx).map(|signal| (s.name(), signal)))
            .reduce(|best, next| {
                if next.1.confidence > best.1.confidence {
                    next
                } else {
                    best
                }
            })
    }
}
