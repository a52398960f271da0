//! Per-channel cascaded-tap echo.

/*
Cascaded Taps
=============

Each output channel runs two delays in series. The second delay is fed from
the first one's attenuated output, not from the dry input:

    x ──┬──────────────────────── ×G6 ─────────────┐
        │                                          ▼
        └─→ [ tap A ] ─→ ×G3 ──┬──────────────→ ( sum ) ──┐
                               │                          ▼
                               └─→ [ tap B ] ─→ ×G1 ──→ ( sum ) ─→ out

So an impulse comes out three times:

    t = 0        G6        dry
    t = A        G3        first echo
    t = A + B    G3 × G1   second echo, through both delays

Tap lengths come from the channel's switch position n (0..=3):

    tap A = n × 10 ms          0, 480, 960, 1440 samples at 48 kHz
    tap B = (n + 1) × 3 ms     144, 288, 432, 576 samples

With the delay switched off both taps pass their input through, which
collapses the three paths onto the same instant but keeps every gain stage
and every saturating sum in place.
*/

use crate::{
    dsp::{
        delay::DelayLine,
        gain::GainStage,
        mix::sum,
    },
    fx::panel::MAX_SWITCH_STATE,
    SAMPLE_RATE,
};

/// Coarse tap step per switch position, in milliseconds.
pub const TAP_A_STEP_MS: f64 = 10.0;
/// Fine tap step per switch position, in milliseconds.
pub const TAP_B_STEP_MS: f64 = 3.0;

/// Convert milliseconds to a whole number of samples at [`SAMPLE_RATE`].
#[inline]
pub fn ms_to_samples(ms: f64) -> usize {
    (ms * SAMPLE_RATE as f64 / 1000.0).round().max(0.0) as usize
}

/// Coarse delay length for a switch position.
pub fn delay_samples_a(switch_state: u32) -> usize {
    let n = switch_state.min(MAX_SWITCH_STATE);
    ms_to_samples(n as f64 * TAP_A_STEP_MS)
}

/// Fine delay length for a switch position.
pub fn delay_samples_b(switch_state: u32) -> usize {
    let n = switch_state.min(MAX_SWITCH_STATE);
    ms_to_samples((n + 1) as f64 * TAP_B_STEP_MS)
}

/// Two delay lines plus the gain/sum network for one output channel.
pub struct ChannelPipeline {
    tap_a: DelayLine,
    tap_b: DelayLine,
}

impl ChannelPipeline {
    pub fn new() -> Self {
        Self {
            tap_a: DelayLine::new(),
            tap_b: DelayLine::new(),
        }
    }

    /// Reset both taps to silence with the lengths for `switch_state`.
    pub fn configure(&mut self, switch_state: u32) {
        self.tap_a.configure(delay_samples_a(switch_state));
        self.tap_b.configure(delay_samples_b(switch_state));
    }

    /// Process one dry sample. With `delay_enabled` false the taps are
    /// bypassed and keep their state.
    #[inline]
    pub fn process(&mut self, x: f64, delay_enabled: bool) -> f64 {
        let dry = GainStage::Minus6Db.apply(x);

        let scaled1 = GainStage::Minus3Db.apply(self.tap_a.process(x, delay_enabled));
        let partial = sum(dry, scaled1);

        let scaled2 = GainStage::Minus1Db.apply(self.tap_b.process(scaled1, delay_enabled));
        sum(partial, scaled2)
    }

    /// Samples until the cascaded echo of an input has played out.
    pub fn echo_tail(&self) -> usize {
        self.tap_a.latency() + self.tap_b.latency()
    }

    /// Coarse tap (switch × 10 ms).
    pub fn tap_a(&self) -> &DelayLine {
        &self.tap_a
    }

    /// Fine tap ((switch + 1) × 3 ms).
    pub fn tap_b(&self) -> &DelayLine {
        &self.tap_b
    }
}

impl Default for ChannelPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::gain::{G1, G3, G6};

    #[test]
    fn test_delay_lengths_per_switch() {
        let expected = [(0, 144), (480, 288), (960, 432), (1440, 576)];
        for (n, &(a, b)) in expected.iter().enumerate() {
            assert_eq!(delay_samples_a(n as u32), a, "tap A, switch {n}");
            assert_eq!(delay_samples_b(n as u32), b, "tap B, switch {n}");
        }
    }

    #[test]
    fn test_switch_above_range_uses_longest_delays() {
        assert_eq!(delay_samples_a(12), 1440);
        assert_eq!(delay_samples_b(12), 576);
    }

    #[test]
    fn test_ms_to_samples_rounds() {
        assert_eq!(ms_to_samples(10.0), 480);
        assert_eq!(ms_to_samples(0.01), 0);
        assert_eq!(ms_to_samples(0.0105), 1);
    }

    #[test]
    fn test_impulse_produces_dry_and_two_echoes() {
        let mut pipeline = ChannelPipeline::new();
        pipeline.configure(1);

        let out: Vec<f64> = (0..1000)
            .map(|i| pipeline.process(if i == 0 { 1.0 } else { 0.0 }, true))
            .collect();

        assert_eq!(out[0], G6);
        assert_eq!(out[480], G3);
        assert_eq!(out[768], G3 * G1);
        for (i, &sample) in out.iter().enumerate() {
            if ![0, 480, 768].contains(&i) {
                assert_eq!(sample, 0.0, "unexpected output at sample {i}");
            }
        }
    }

    #[test]
    fn test_second_tap_is_fed_by_first() {
        // Switch 0: tap A has zero length and therefore a full ring of latency,
        // so nothing reaches tap B before then either.
        let mut pipeline = ChannelPipeline::new();
        pipeline.configure(0);

        let out: Vec<f64> = (0..2048 + 200)
            .map(|i| pipeline.process(if i == 0 { 1.0 } else { 0.0 }, true))
            .collect();

        assert_eq!(out[0], G6);
        assert_eq!(out[144], 0.0);
        assert_eq!(out[2048], G3);
        assert_eq!(out[2048 + 144], G3 * G1);
    }

    #[test]
    fn test_echo_tail_reaches_last_echo() {
        let expected = [2048 + 144, 480 + 288, 960 + 432, 1440 + 576];
        for (n, &tail) in expected.iter().enumerate() {
            let mut pipeline = ChannelPipeline::new();
            pipeline.configure(n as u32);
            assert_eq!(pipeline.echo_tail(), tail, "switch {n}");

            let out: Vec<f64> = (0..=tail)
                .map(|i| pipeline.process(if i == 0 { 1.0 } else { 0.0 }, true))
                .collect();
            assert_eq!(out[tail], G3 * G1, "switch {n}");
        }
    }

    #[test]
    fn test_bypassed_delay_keeps_gain_structure() {
        let mut pipeline = ChannelPipeline::new();
        pipeline.configure(2);

        for &x in &[0.3, -0.2, 0.05, 0.0, -0.45] {
            let expected = sum(sum(x * G6, x * G3), x * G3 * G1);
            assert_eq!(pipeline.process(x, false), expected);
        }
    }

    #[test]
    fn test_bypassed_delay_saturates() {
        let mut pipeline = ChannelPipeline::new();
        pipeline.configure(0);

        assert_eq!(pipeline.process(0.9, false), 0.99999999);
        assert_eq!(pipeline.process(-0.9, false), -1.0);
    }

    #[test]
    fn test_bypass_leaves_taps_untouched() {
        let mut pipeline = ChannelPipeline::new();
        pipeline.configure(3);
        pipeline.process(0.5, true);
        let a = (pipeline.tap_a().write_pos(), pipeline.tap_a().read_pos());
        let b = (pipeline.tap_b().write_pos(), pipeline.tap_b().read_pos());

        for _ in 0..10 {
            pipeline.process(0.7, false);
        }

        assert_eq!((pipeline.tap_a().write_pos(), pipeline.tap_a().read_pos()), a);
        assert_eq!((pipeline.tap_b().write_pos(), pipeline.tap_b().read_pos()), b);
    }
}
