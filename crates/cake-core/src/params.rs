use crate::constants::*;
use crate::error::ParamsError;
use std::time::Duration;

/// Tunables for one page session. Defaults reproduce the stock experience.
#[derive(Clone, Debug)]
pub struct CakeParams {
    pub candle_count: usize,
    pub mic_threshold: f32,
    pub blow_sensitivity: f32,
    pub extinguish_scale: f32,
    pub confetti_duration: Duration,
    pub reveal_delay: Duration,
    pub balloon_interval: Duration,
    pub balloon_window: Duration,
    pub balloon_exit_y: f32,
    pub celebration_message: String,
}

impl Default for CakeParams {
    fn default() -> Self {
        Self {
            candle_count: CANDLE_COUNT,
            mic_threshold: MIC_THRESHOLD,
            blow_sensitivity: BLOW_SENSITIVITY,
            extinguish_scale: EXTINGUISH_SCALE,
            confetti_duration: Duration::from_millis(CONFETTI_DURATION_MS),
            reveal_delay: Duration::from_millis(REVEAL_DELAY_MS),
            balloon_interval: Duration::from_millis(BALLOON_SPAWN_INTERVAL_MS),
            balloon_window: Duration::from_millis(BALLOON_FLOW_WINDOW_MS),
            balloon_exit_y: BALLOON_EXIT_Y,
            celebration_message: CELEBRATION_MESSAGE.to_string(),
        }
    }
}

impl CakeParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.candle_count == 0 {
            return Err(ParamsError::NoCandles);
        }
        if self.candle_count > MAX_CANDLES {
            return Err(ParamsError::TooManyCandles {
                count: self.candle_count,
                max: MAX_CANDLES,
            });
        }
        positive("mic threshold", self.mic_threshold)?;
        positive("blow sensitivity", self.blow_sensitivity)?;
        positive("balloon exit height", self.balloon_exit_y)?;
        if !(0.0..1.0).contains(&self.extinguish_scale) {
            return Err(ParamsError::ExtinguishScale(self.extinguish_scale));
        }
        if self.balloon_interval.is_zero() {
            return Err(ParamsError::ZeroDuration {
                name: "balloon interval",
            });
        }
        if self.confetti_duration.is_zero() {
            return Err(ParamsError::ZeroDuration {
                name: "confetti duration",
            });
        }
        Ok(())
    }

    /// Number of balloons the spawner emits over its whole window.
    pub fn balloon_spawn_count(&self) -> u64 {
        (self.balloon_window.as_millis() / self.balloon_interval.as_millis().max(1)) as u64
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive { name, value })
    }
}
