//! Moving-average filter over the most recent samples of one quantity

/// Fixed-capacity circular buffer producing a running arithmetic mean
///
/// The buffer is overwritten circularly once `N` samples have been pushed,
/// so `average()` always covers at most the `N` most recent samples. Before
/// the first push it reports the filter's `no_data` sentinel instead of a
/// mean of zero elements.
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    buffer: [f32; N],
    count: usize,
    cursor: usize,
    no_data: f32,
}

impl<const N: usize> MovingAverage<N> {
    const NON_EMPTY_WINDOW: () = assert!(
        N > 0,
        "moving average window must hold at least one sample"
    );

    pub fn new(no_data: f32) -> Self {
        let () = Self::NON_EMPTY_WINDOW;
        Self {
            buffer: [0.0; N],
            count: 0,
            cursor: 0,
            no_data,
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.buffer[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    pub fn average(&self) -> f32 {
        if self.count == 0 {
            return self.no_data;
        }

        // Until the buffer wraps the valid samples are exactly 0..count
        let sum: f64 = self.buffer[..self.count]
            .iter()
            .map(|&sample| f64::from(sample))
            .sum();
        (sum / self.count as f64) as f32
    }

    pub fn sample_count(&self) -> usize {
        self.count
    }
}
