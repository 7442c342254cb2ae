// Microphone level contract: one scalar pulled per frame.

/// Microphone lifecycle as seen by the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MicStatus {
    /// Permission not requested yet.
    #[default]
    Idle,
    Active,
    /// Permission refused or capture failed; blow detection stays off.
    Denied,
    /// Closed by the celebration.
    Released,
}

impl MicStatus {
    pub fn is_active(self) -> bool {
        self == MicStatus::Active
    }
}

/// Pollable average input energy. Must be a cheap, non-blocking read.
pub trait AudioLevelSource {
    /// Average energy of the latest buffered frame, or 0 when inactive.
    fn sample(&mut self) -> f32;
}

/// Source used before (or instead of) a microphone.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl AudioLevelSource for Silence {
    fn sample(&mut self) -> f32 {
        0.0
    }
}

/// Replays a fixed level; handy for driving the session without a device.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantLevel(pub f32);

impl AudioLevelSource for ConstantLevel {
    fn sample(&mut self) -> f32 {
        self.0
    }
}

/// Mean of a byte frequency buffer (0..=255 per bin).
#[inline]
pub fn average_energy(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}
