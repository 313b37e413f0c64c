//! Trend-plus-momentum entry rule.
//!
//! Long when the short EMA is above the medium EMA, RSI is not
//! overbought and MACD is above its signal line. Short is the mirror
//! image. Stops and targets are placed at ATR multiples from the close.

use chrono::Utc;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::{AnalysisContext, Strategy};
use crate::domain::analyzer::AnalyzerConfig;
use crate::domain::signal::{Direction, IndicatorSnapshot, TradingSignal};

pub struct TrendMomentumStrategy {
    config: AnalyzerConfig,
}

impl TrendMomentumStrategy {
    pub const NAME: &'static str = "trend_momentum";

    #[must_use]
    pub const fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Direction implied by the indicators, long checked first.
    #[must_use]
    pub fn direction(&self, ind: &IndicatorSnapshot) -> Option<Direction> {
        if ind.ema_short > ind.ema_medium
            && ind.rsi < self.config.rsi_overbought
            && ind.macd > ind.macd_signal
        {
            Some(Direction::Long)
        } else if ind.ema_short < ind.ema_medium
            && ind.rsi > self.config.rsi_oversold
            && ind.macd < ind.macd_signal
        {
            Some(Direction::Short)
        } else {
            None
        }
    }
}

impl Strategy for TrendMomentumStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<TradingSignal> {
        let direction = self.direction(ctx.indicators)?;
        let price = ctx.last_close()?;

        let atr = ctx.indicators.atr;
        let stop_distance = Decimal::from_f64(atr * self.config.stop_loss_atr)?;
        let target_distance = Decimal::from_f64(atr * self.config.take_profit_atr)?;

        let (stop_loss, take_profit) = match direction {
            Direction::Long => (price - stop_distance, price + target_distance),
            Direction::Short => (price + stop_distance, price - target_distance),
        };

        Some(TradingSignal {
            symbol: ctx.symbol.to_string(),
            direction,
            price,
            entry: price,
            stop_loss,
            take_profit,
            confidence: self.config.confidence,
            timestamp: Utc::now(),
            indicators: *ctx.indicators,
        })
    }
}
