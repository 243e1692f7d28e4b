//! Properties of grid enumeration across whole domains and batch splits.

use std::collections::HashSet;

use projvis_common::{generate_grid, GridBatches, SamplingDomain};

fn key(point: &(f64, f64)) -> (u64, u64) {
    (point.0.to_bits(), point.1.to_bits())
}

// ============================================================================
// Enumeration tests
// ============================================================================

#[test]
fn test_enumerates_every_sample_once() {
    let domain = SamplingDomain::new(-30.0, 30.0, -45.0, 45.0, 2.5);
    let total = domain.total_samples();
    assert_eq!(total, domain.lon_count() * domain.lat_count());
    assert_eq!(domain.lon_count(), 37);
    assert_eq!(domain.lat_count(), 25);

    let points = generate_grid(&domain, 0, total);
    assert_eq!(points.len() as u64, total);

    let unique: HashSet<_> = points.iter().map(key).collect();
    assert_eq!(unique.len() as u64, total);
}

#[test]
fn test_fractional_step_hits_upper_bound() {
    let domain = SamplingDomain::new(0.0, 0.7, 0.0, 0.7, 0.1);
    assert_eq!(domain.lon_count(), 8);

    let points = generate_grid(&domain, 0, domain.total_samples());
    let (last_lon, last_lat) = *points.last().unwrap();
    assert!((last_lon - 0.7).abs() < 1e-9);
    assert!((last_lat - 0.7).abs() < 1e-9);
}

#[test]
fn test_step_larger_than_range() {
    let domain = SamplingDomain::new(0.0, 0.5, 0.0, 0.5, 1.0);
    assert_eq!(generate_grid(&domain, 0, 10), vec![(0.0, 0.0)]);
}

// ============================================================================
// Batching tests
// ============================================================================

#[test]
fn test_concatenated_batches_match_single_call() {
    let domain = SamplingDomain::new(-90.0, 90.0, -180.0, 180.0, 3.0);
    let total = domain.total_samples();
    let whole = generate_grid(&domain, 0, total);

    for limit in [1, 7, 1000, total, total + 5] {
        let concatenated: Vec<(f64, f64)> = GridBatches::new(domain, limit)
            .flat_map(|batch| batch.points)
            .collect();
        assert_eq!(concatenated, whole, "limit {}", limit);
    }
}

#[test]
fn test_idempotent() {
    let domain = SamplingDomain::new(10.0, 20.0, 30.0, 50.0, 0.25);
    let total = domain.total_samples();
    assert_eq!(generate_grid(&domain, 0, total), generate_grid(&domain, 0, total));
}

#[test]
fn test_batch_count() {
    let domain = SamplingDomain::full_globe(1.0);
    // 361 * 181 = 65341 samples, 66 batches of 1000.
    assert_eq!(domain.total_samples(), 65_341);
    assert_eq!(GridBatches::new(domain, 1000).count(), 66);
}
