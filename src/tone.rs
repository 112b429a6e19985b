//! Tone generator for the feedback buzzer.
//!
//! Pure logic over a hardware timer capability. The timer is assumed to run
//! a toggle-on-compare output: the compare value picks the pitch, starting
//! and stopping the counter gates the sound.
//!
//! Repeated requests for the same frequency touch no registers, so a held
//! button produces one continuous tone instead of a click per tick.

/// Reference clock the compare values are computed against, in Hz.
pub const TONE_CLOCK_HZ: u32 = 8_000_000;

/// Effective prescale between the reference clock and the output, including
/// the factor of two from the toggle output.
pub const TONE_PRESCALE: u32 = 128;

/// Lowest frequency the generator will program.
pub const TONE_MIN_HZ: u32 = 1;

/// Highest frequency the generator will program. At this rate the zero-based
/// compare register reaches its smallest useful value.
pub const TONE_MAX_HZ: u32 = 31_250;

/// Timer capability the generator drives.
///
/// A thin wrapper over one hardware timer channel. Implementations do plain
/// register writes and hold no policy.
pub trait PulseTimer {
    /// Let the counter run (sound on, at the programmed rate).
    fn start(&mut self);

    /// Gate the counter (sound off, compare retained).
    fn stop(&mut self);

    /// Program the zero-based compare value that sets the output rate.
    fn set_compare(&mut self, compare: u16);

    /// Reset the counter so the next period starts from zero.
    fn reset(&mut self);
}

/// Compare value for a requested frequency.
///
/// The request is clamped to the representable range, then
/// `clock / (prescale * hz) - 1` gives the zero-based register value.
/// Out-of-range requests saturate rather than fail.
#[inline]
pub fn compare_for(freq_hz: u32) -> u16 {
    let hz = freq_hz.clamp(TONE_MIN_HZ, TONE_MAX_HZ);
    (TONE_CLOCK_HZ / (TONE_PRESCALE * hz) - 1) as u16
}

/// Idempotent tone generator.
///
/// Owns the currently requested frequency and only reprograms the timer
/// when the request actually changes. A request of 0 Hz is the silence
/// sentinel: the counter stops and the compare register is parked at its
/// maximum.
pub struct ToneGen<T: PulseTimer> {
    timer: T,
    current_hz: u32,
}

impl<T: PulseTimer> ToneGen<T> {
    /// Wrap a timer channel. The generator starts silent.
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            current_hz: 0,
        }
    }

    /// Request a tone, 0 for silence.
    ///
    /// No-op when the request equals the current frequency. On any change
    /// the counter is reset so the new tone starts from a clean phase.
    pub fn set_tone(&mut self, freq_hz: u32) {
        if freq_hz == self.current_hz {
            return;
        }

        if freq_hz == 0 {
            self.timer.stop();
            self.timer.set_compare(u16::MAX);
        } else {
            self.timer.start();
            self.timer.set_compare(compare_for(freq_hz));
        }

        self.timer.reset();
        self.current_hz = freq_hz;
    }

    /// Currently requested frequency, 0 when silent.
    #[inline]
    pub fn current(&self) -> u32 {
        self.current_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingTimer {
        running: bool,
        compare: u16,
        compare_writes: u32,
        resets: u32,
    }

    impl PulseTimer for CountingTimer {
        fn start(&mut self) {
            self.running = true;
        }

        fn stop(&mut self) {
            self.running = false;
        }

        fn set_compare(&mut self, compare: u16) {
            self.compare = compare;
            self.compare_writes += 1;
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn gen() -> ToneGen<CountingTimer> {
        ToneGen::new(CountingTimer::default())
    }

    #[test]
    fn test_compare_formula() {
        // 8 MHz / (128 * 50 Hz) = 1250, zero-based
        assert_eq!(compare_for(50), 1249);
        assert_eq!(compare_for(1), 62_499);
        assert_eq!(compare_for(31_250), 1);
    }

    #[test]
    fn test_out_of_range_saturates() {
        // Above the maximum behaves exactly like the maximum
        assert_eq!(compare_for(31_251), compare_for(31_250));
        assert_eq!(compare_for(u32::MAX), compare_for(31_250));
    }

    #[test]
    fn test_idempotent_requests() {
        let mut tone = gen();

        tone.set_tone(440);
        tone.set_tone(440);
        tone.set_tone(440);

        assert_eq!(tone.timer.compare_writes, 1);
        assert_eq!(tone.timer.resets, 1);
        assert!(tone.timer.running);
        assert_eq!(tone.current(), 440);
    }

    #[test]
    fn test_zero_silences_and_parks_compare() {
        let mut tone = gen();

        tone.set_tone(440);
        assert!(tone.timer.running);

        tone.set_tone(0);
        assert!(!tone.timer.running);
        assert_eq!(tone.timer.compare, u16::MAX);
        assert_eq!(tone.current(), 0);

        // Already silent: nothing more happens
        let writes = tone.timer.compare_writes;
        tone.set_tone(0);
        assert_eq!(tone.timer.compare_writes, writes);
    }

    #[test]
    fn test_change_resets_phase() {
        let mut tone = gen();

        tone.set_tone(440);
        tone.set_tone(880);

        assert_eq!(tone.timer.resets, 2);
        assert_eq!(tone.timer.compare, compare_for(880));
    }

    #[test]
    fn test_starts_silent_and_zero_request_is_noop() {
        let mut tone = gen();

        // Fresh generator already sits at 0: requesting 0 touches nothing
        tone.set_tone(0);
        assert_eq!(tone.timer.compare_writes, 0);
        assert_eq!(tone.timer.resets, 0);
    }
}
