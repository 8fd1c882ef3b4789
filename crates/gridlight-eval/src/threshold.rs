use gridlight_core::Raster;

/// Mark cells whose distance to the network is at most `threshold`.
///
/// A distance raster with 0 on the network and a threshold of 0 gives back
/// exactly the network cells. Infinite and NaN distances are never marked.
pub fn threshold_distances(distances: &Raster<f64>, threshold: f64) -> Raster<bool> {
    distances.map(|_, &d| d <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_cells_within_threshold() {
        let d = Raster::from_rows(vec![
            vec![0.0, 0.5, 1.0],
            vec![f64::INFINITY, 2.0, f64::NAN],
        ])
        .unwrap();
        let exact = threshold_distances(&d, 0.0);
        assert_eq!(exact.as_slice(), &[true, false, false, false, false, false]);
        let loose = threshold_distances(&d, 1.0);
        assert_eq!(loose.as_slice(), &[true, true, true, false, false, false]);
    }
}
