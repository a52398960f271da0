//! Fixed-capacity circular delay line.

/*
Delay Line
==========

A delay line remembers the last N samples and hands them back N steps later.
The storage is a ring: one cursor writes, one cursor reads, and both walk
forward together so the gap between them never changes.

    index:   0   1   2   3   4   5   6   7
           ┌───┬───┬───┬───┬───┬───┬───┬───┐
           │   │   │ W │   │   │   │ R │   │     capacity = 8
           └───┴───┴───┴───┴───┴───┴───┴───┘     delay    = 4
                     │               ▲
                     └── 4 forward ──┘ (wrapping)

Measured in the forward (write) direction, R sits `delay` slots behind W:
the value under R is the one written `delay` steps ago.


Read Before Write
-----------------

Every step:

    1. out = buffer[read]
    2. buffer[write] = in
    3. read += 1, write += 1   (each wraps to 0 at capacity)

Reading first matters. With a delay of 0 the cursors share a slot, so the
read still returns the old contents (written `capacity` steps ago) rather
than the sample that was just stored.


Bypass
------

When the delay is switched off the input passes straight through and the
ring is left alone: neither cursor moves and no slot is overwritten. Turning
the delay back on resumes from exactly where it stopped, including whatever
audio was still in flight.
*/

use crate::DELAY_CAPACITY;

pub struct DelayLine {
    buffer: Vec<f64>,
    write_pos: usize,
    read_pos: usize,
    delay_samples: usize,
}

impl DelayLine {
    /// Create a delay line with [`DELAY_CAPACITY`] slots and zero delay.
    pub fn new() -> Self {
        Self::with_capacity(DELAY_CAPACITY)
    }

    /// Create a delay line with `capacity` slots (at least one).
    ///
    /// This is the only allocation the delay line ever makes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut delay = Self {
            buffer: vec![0.0; capacity.max(1)],
            write_pos: 0,
            read_pos: 0,
            delay_samples: 0,
        };
        delay.configure(0);
        delay
    }

    /// Clear the buffer and place the cursors `delay_samples` apart.
    ///
    /// Lengths beyond `capacity - 1` are clamped. Safe to call any number of
    /// times; every call is a full reset.
    pub fn configure(&mut self, delay_samples: usize) {
        let capacity = self.buffer.len();
        self.delay_samples = delay_samples.min(capacity - 1);
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.read_pos = (capacity - self.delay_samples) % capacity;
    }

    /// Advance one sample: return the delayed value, then store `input`.
    #[inline]
    pub fn step(&mut self, input: f64) -> f64 {
        let output = self.buffer[self.read_pos];
        self.buffer[self.write_pos] = input;

        self.write_pos += 1;
        if self.write_pos == self.buffer.len() {
            self.write_pos = 0;
        }
        self.read_pos += 1;
        if self.read_pos == self.buffer.len() {
            self.read_pos = 0;
        }

        output
    }

    /// Step when `enabled`, otherwise pass `input` through with state frozen.
    #[inline]
    pub fn process(&mut self, input: f64, enabled: bool) -> f64 {
        if !enabled {
            return input;
        }
        self.step(input)
    }

    /// Run a whole buffer through the delay in place.
    pub fn render(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.step(*sample);
        }
    }

    /// Zero the buffer, keeping the configured delay length.
    pub fn reset(&mut self) {
        self.configure(self.delay_samples);
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Steps between storing a sample and reading it back. A zero-length
    /// delay takes a full trip around the ring.
    pub fn latency(&self) -> usize {
        if self.delay_samples == 0 {
            self.buffer.len()
        } else {
            self.delay_samples
        }
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// Forward distance from the write cursor to the read cursor.
    pub fn cursor_distance(&self) -> usize {
        let capacity = self.buffer.len();
        (self.write_pos + capacity - self.read_pos) % capacity
    }
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::new()
    }
}
