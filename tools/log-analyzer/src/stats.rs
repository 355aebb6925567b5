//! Fixed-size bucket counters and the busiest/quietest scans over them.

/// Counter array indexed by a bounded time field. Length is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCounts {
  counts: Vec<u64>,
}

impl BucketCounts {
  pub fn new(len: usize) -> Self {
    Self {
      counts: vec![0; len],
    }
  }

  pub fn len(&self) -> usize {
    self.counts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  pub fn as_slice(&self) -> &[u64] {
    &self.counts
  }

  /// Increment one bucket. Returns `false` (and changes nothing) if `index` is out of range.
  #[must_use]
  pub fn record(&mut self, index: usize) -> bool {
    match self.counts.get_mut(index) {
      Some(count) => {
        *count += 1;
        true
      }
      None => false,
    }
  }

  pub fn total(&self) -> u64 {
    self.counts.iter().sum()
  }

  /// Index of the largest bucket; the first one wins ties. All-zero counts give 0.
  pub fn busiest(&self) -> usize {
    let mut max = 0;
    let mut busiest = 0;
    for (i, &count) in self.counts.iter().enumerate() {
      if count > max {
        max = count;
        busiest = i;
      }
    }
    busiest
  }

  /// Index of the smallest bucket, seeded from bucket 0; the first one wins ties.
  pub fn quietest(&self) -> usize {
    let mut min = self.counts.first().copied().unwrap_or(0);
    let mut quietest = 0;
    for (i, &count) in self.counts.iter().enumerate() {
      if count < min {
        min = count;
        quietest = i;
      }
    }
    quietest
  }

  /// Window start `i` whose adjacent pair sum is largest.
  ///
  /// Each window `i < len - 2` takes the larger of pairs `(i, i+1)` and
  /// `(i+1, i+2)`. The last window `len - 2` holds only the final pair. The
  /// result moves on `>=`, so the latest of equal windows wins.
  pub fn busiest_pair(&self) -> usize {
    let n = self.counts.len();
    if n < 2 {
      return 0;
    }
    let c = &self.counts;
    let mut largest = 0;
    let mut start = 0;
    for i in 0..=n - 2 {
      let sum = if i < n - 2 {
        (c[i] + c[i + 1]).max(c[i + 1] + c[i + 2])
      } else {
        c[i] + c[i + 1]
      };
      if sum >= largest {
        largest = sum;
        start = i;
      }
    }
    start
  }
}
