// SPDX-License-Identifier: MIT

/// Calculates the straight-line (euclidean) distance between two positions
/// in normalized coordinate space. Both positions are expected as fractions
/// of the map extent, in the `[0, 1]` range; the result is in the same
/// unit-less space and must be multiplied by [Graph::metric_scale](crate::Graph::metric_scale)
/// to obtain a real-world distance.
pub fn euclidean_distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = (x2 - x1) as f64;
    let dy = (y2 - y1) as f64;
    (dx * dx + dy * dy).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean() {
        assert_eq!(euclidean_distance(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(euclidean_distance(0.0, 0.0, 0.3, 0.4), 0.5);
        assert_eq!(
            euclidean_distance(0.1, 0.2, 0.4, 0.6),
            euclidean_distance(0.4, 0.6, 0.1, 0.2),
        );
    }
}
