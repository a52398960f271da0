//! Channel × sample storage shared between a host and the engine.

use crate::MAX_CHANNELS;

/// A host-owned table of `MAX_CHANNELS` rows, each `block_size` samples long.
///
/// The engine reads rows 0 and 1 and writes its results back in place. It
/// never resizes the table.
pub trait ChannelTable {
    fn block_size(&self) -> usize;

    fn channel(&self, ch: usize) -> &[f64];

    fn channel_mut(&mut self, ch: usize) -> &mut [f64];
}

/// Owned six-row sample table, allocated once.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    rows: [Vec<f64>; MAX_CHANNELS],
    block_size: usize,
}

impl SampleTable {
    pub fn new(block_size: usize) -> Self {
        Self {
            rows: std::array::from_fn(|_| vec![0.0; block_size]),
            block_size,
        }
    }

    /// Copy `samples` into the start of a row, zero-filling the remainder.
    pub fn fill_channel(&mut self, ch: usize, samples: &[f64]) {
        let row = &mut self.rows[ch];
        let n = samples.len().min(row.len());
        row[..n].copy_from_slice(&samples[..n]);
        row[n..].fill(0.0);
    }

    /// Zero every row.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(0.0);
        }
    }

    pub fn rows(&self) -> &[Vec<f64>; MAX_CHANNELS] {
        &self.rows
    }
}

impl ChannelTable for SampleTable {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn channel(&self, ch: usize) -> &[f64] {
        &self.rows[ch]
    }

    fn channel_mut(&mut self, ch: usize) -> &mut [f64] {
        &mut self.rows[ch]
    }
}

/// Plain row arrays work too. The two input rows set the block size; the
/// engine never writes past the end of a shorter output row.
impl ChannelTable for [Vec<f64>; MAX_CHANNELS] {
    fn block_size(&self) -> usize {
        self[0].len().min(self[1].len())
    }

    fn channel(&self, ch: usize) -> &[f64] {
        &self[ch]
    }

    fn channel_mut(&mut self, ch: usize) -> &mut [f64] {
        &mut self[ch]
    }
}
