//! Offset-addressable enumeration of a sampling grid.

use crate::domain::SamplingDomain;

/// Default number of grid samples per batch.
pub const DEFAULT_BATCH_LIMIT: u64 = 1000;

/// Enumerate up to `limit` grid samples `(lon, lat)` starting at `offset`.
///
/// Pure and deterministic. Returns fewer points at the tail of the grid and
/// nothing once `offset` reaches the total sample count.
pub fn generate_grid(domain: &SamplingDomain, offset: u64, limit: u64) -> Vec<(f64, f64)> {
    let total = domain.total_samples();
    if offset >= total || limit == 0 {
        return Vec::new();
    }

    let end = offset.saturating_add(limit).min(total);
    let lon_count = domain.lon_count();

    (offset..end)
        .map(|pos| {
            let lon = domain.min_lon + (pos % lon_count) as f64 * domain.step;
            let lat = domain.min_lat + (pos / lon_count) as f64 * domain.step;
            (lon, lat)
        })
        .collect()
}

/// A contiguous window of grid samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Linear index of the first point.
    pub offset: u64,
    /// Requested window size. `points` may be shorter at the tail.
    pub limit: u64,
    pub points: Vec<(f64, f64)>,
}

impl Batch {
    /// Generate the batch at `offset` for a domain.
    pub fn generate(domain: &SamplingDomain, offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            points: generate_grid(domain, offset, limit),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Iterator over all batches of a domain in increasing offset order.
#[derive(Debug, Clone)]
pub struct GridBatches {
    domain: SamplingDomain,
    limit: u64,
    offset: u64,
    total: u64,
}

impl GridBatches {
    pub fn new(domain: SamplingDomain, limit: u64) -> Self {
        Self {
            total: domain.total_samples(),
            domain,
            limit,
            offset: 0,
        }
    }
}

impl Iterator for GridBatches {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.limit == 0 || self.offset >= self.total {
            return None;
        }
        let batch = Batch::generate(&self.domain, self.offset, self.limit);
        self.offset = self.offset.saturating_add(self.limit);
        Some(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_square() {
        let domain = SamplingDomain::new(0.0, 1.0, 0.0, 1.0, 1.0);
        let points = generate_grid(&domain, 0, 100);
        assert_eq!(points, vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let domain = SamplingDomain::new(0.0, 1.0, 0.0, 1.0, 1.0);
        assert!(generate_grid(&domain, 4, 10).is_empty());
        assert!(generate_grid(&domain, 1_000, 10).is_empty());
    }

    #[test]
    fn test_tail_batch_is_short() {
        let domain = SamplingDomain::new(0.0, 1.0, 0.0, 1.0, 1.0);
        let batch = Batch::generate(&domain, 3, 1000);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.points[0], (1.0, 1.0));
        assert_eq!(batch.limit, 1000);
    }

    #[test]
    fn test_batches_iterator_offsets() {
        let domain = SamplingDomain::new(0.0, 2.0, 0.0, 2.0, 1.0);
        let offsets: Vec<u64> = GridBatches::new(domain, 4).map(|b| b.offset).collect();
        assert_eq!(offsets, vec![0, 4, 8]);
    }
}
