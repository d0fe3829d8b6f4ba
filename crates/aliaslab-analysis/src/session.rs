//! Playback glue: which rendering is live.
//!
//! An [`AliasSession`] owns an original recording and the engine. Moving the
//! rate control re-renders the live buffer; the original is never touched, so
//! the listener can always switch back to it.

use aliaslab_core::{Result, SignalBuffer};

use crate::alias::{AliasEngine, ResampleRequest};
use crate::tier::SeverityTier;

/// The original signal plus its rendering at the current target rate.
#[derive(Debug, Clone)]
pub struct AliasSession {
    engine: AliasEngine,
    original: SignalBuffer,
    live: SignalBuffer,
    target_rate: f32,
    tier: SeverityTier,
}

impl AliasSession {
    /// Start a session at the original's own rate (live = original).
    pub fn new(engine: AliasEngine, original: SignalBuffer) -> Self {
        let target_rate = original.sample_rate();
        let tier = engine.params().thresholds.select(target_rate);
        Self {
            engine,
            live: original.clone(),
            original,
            target_rate,
            tier,
        }
    }

    /// Re-render the live buffer at `rate`, choosing the tier from the rate.
    ///
    /// At or above the original rate the live buffer is the original itself.
    /// On error the session keeps its previous state.
    pub fn set_target_rate(&mut self, rate: f32) -> Result<&SignalBuffer> {
        let request = self.engine.request_for(rate);
        self.apply(request)
    }

    /// Re-render the live buffer for an explicit request.
    pub fn apply(&mut self, request: ResampleRequest) -> Result<&SignalBuffer> {
        self.live = self.engine.resample(&self.original, &request)?;
        self.target_rate = request.target_sample_rate;
        self.tier = request.tier;
        tracing::debug!(rate = self.target_rate, tier = %self.tier, "live buffer re-rendered");
        Ok(&self.live)
    }

    /// Buffer that should currently be playing.
    pub fn live(&self) -> &SignalBuffer {
        &self.live
    }

    /// Unprocessed recording.
    pub fn original(&self) -> &SignalBuffer {
        &self.original
    }

    /// Simulated rate of the live buffer.
    pub fn target_rate(&self) -> f32 {
        self.target_rate
    }

    /// Check whether the live buffer is a distorted rendering.
    pub fn is_aliased(&self) -> bool {
        self.target_rate < self.original.sample_rate()
    }

    /// Tier used for the live buffer.
    pub fn tier(&self) -> SeverityTier {
        self.tier
    }

    /// File name for exporting the live buffer: `aliased_{rate}Hz_{stem}.wav`.
    pub fn export_file_name(&self, stem: &str) -> String {
        format!("aliased_{}Hz_{stem}.wav", self.target_rate.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AliasSession {
        let tone: Vec<f32> = (0..4410).map(|i| (i as f32 * 0.7).sin()).collect();
        let original = SignalBuffer::mono(44100.0, tone).unwrap();
        AliasSession::new(AliasEngine::default(), original)
    }

    #[test]
    fn starts_on_original() {
        let s = session();
        assert_eq!(s.live(), s.original());
        assert_eq!(s.target_rate(), 44100.0);
        assert!(!s.is_aliased());
        assert_eq!(s.tier(), SeverityTier::Standard);
    }

    #[test]
    fn rerenders_and_restores() {
        let mut s = session();
        s.set_target_rate(8000.0).unwrap();
        assert!(s.is_aliased());
        assert_eq!(s.tier(), SeverityTier::Extreme);
        assert_ne!(s.live(), s.original());
        assert_eq!(s.live().len(), s.original().len());

        s.set_target_rate(48000.0).unwrap();
        assert_eq!(s.live(), s.original());
    }

    #[test]
    fn invalid_rate_keeps_state() {
        let mut s = session();
        s.set_target_rate(12000.0).unwrap();
        let before = s.live().clone();
        assert!(s.set_target_rate(0.0).is_err());
        assert_eq!(s.target_rate(), 12000.0);
        assert_eq!(s.live(), &before);
    }

    #[test]
    fn explicit_tier_is_kept() {
        let mut s = session();
        s.apply(ResampleRequest::with_tier(22050.0, SeverityTier::Extreme))
            .unwrap();
        assert_eq!(s.tier(), SeverityTier::Extreme);
        assert_eq!(s.target_rate(), 22050.0);
    }

    #[test]
    fn export_name() {
        let mut s = session();
        s.set_target_rate(8000.0).unwrap();
        assert_eq!(s.export_file_name("speech"), "aliased_8000Hz_speech.wav");
    }
}
