use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

/// A5, classic alarm pitch
const ALARM_FREQ: f32 = 880.0;

/// Repeating alarm pulse: beep (0.1s) - pause - beep (0.1s), once per second,
/// as a square wave. Infinite; the sink is stopped on acknowledgment.
pub struct AlarmBeep {
    sample_rate: u32,
    num_sample: usize,
}

impl AlarmBeep {
    pub fn new() -> Self {
        Self {
            sample_rate: 44100,
            num_sample: 0,
        }
    }
}

impl Iterator for AlarmBeep {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let period = self.sample_rate as usize;
        let t = (self.num_sample % period) as f32 / self.sample_rate as f32;
        self.num_sample = self.num_sample.wrapping_add(1);

        let audible = t < 0.1 || (0.21..0.31).contains(&t);
        if !audible {
            return Some(0.0);
        }

        let square = if (2.0 * PI * ALARM_FREQ * t).sin() >= 0.0 {
            1.0
        } else {
            -1.0
        };

        Some(square * 0.3) // Lower amplitude to prevent clipping
    }
}

impl Source for AlarmBeep {
    fn current_frame_len(&self) -> Option<usize> {
        None // Infinite stream
    }

    fn channels(&self) -> u16 {
        1 // Mono
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None // Infinite
    }
}
