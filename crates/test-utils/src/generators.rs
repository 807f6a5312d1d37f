//! Test data generators for synthetic thermal grids.
//!
//! These generators create predictable, verifiable sample patterns with
//! known minimum and maximum values, so normalized output can be checked
//! exactly.

/// Creates a grid that repeats `values` in row-major order.
///
/// # Example
///
/// ```
/// use test_utils::create_repeating_grid;
///
/// let grid = create_repeating_grid(4, 4, &[0.0, 85.0, 170.0, 255.0]);
/// assert_eq!(grid.len(), 16);
/// assert_eq!(grid[5], 85.0);
/// ```
pub fn create_repeating_grid(width: usize, height: usize, values: &[f64]) -> Vec<f64> {
    assert!(!values.is_empty(), "values must not be empty");
    (0..width * height).map(|i| values[i % values.len()]).collect()
}

/// Creates a horizontal ramp from `min` (left column) to `max` (right column).
///
/// Every row is identical. With `width >= 2` the first column is exactly
/// `min` and the last exactly `max`.
pub fn create_ramp_grid(width: usize, height: usize, min: f64, max: f64) -> Vec<f64> {
    let span = (width.max(2) - 1) as f64;
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(min + (max - min) * col as f64 / span);
        }
    }
    data
}

/// Creates a land-surface-temperature-like grid in Kelvin.
///
/// Values range from 280K (top-left) to 320K (bottom-right).
pub fn create_surface_temperature_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x_factor = col as f64 / width.max(1) as f64;
            let y_factor = row as f64 / height.max(1) as f64;
            data.push(280.0 + x_factor * 20.0 + y_factor * 20.0);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a ramp grid with non-finite values at the given `(col, row)` positions.
///
/// Positions cycle through NaN, +inf and -inf so every kind is exercised.
pub fn create_grid_with_non_finite(
    width: usize,
    height: usize,
    positions: &[(usize, usize)],
) -> Vec<f64> {
    let mut data = create_ramp_grid(width, height, 0.0, 100.0);
    let specials = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
    for (i, &(col, row)) in positions.iter().enumerate() {
        if col < width && row < height {
            data[row * width + col] = specials[i % specials.len()];
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_repeating_grid() {
        let grid = create_repeating_grid(3, 2, &[1.0, 2.0]);
        assert_eq!(grid, vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_create_ramp_grid_endpoints() {
        let grid = create_ramp_grid(5, 2, -10.0, 30.0);
        assert_eq!(grid[0], -10.0);
        assert_eq!(grid[4], 30.0);
        assert_eq!(grid[5], -10.0);
    }

    #[test]
    fn test_create_surface_temperature_grid() {
        let grid = create_surface_temperature_grid(100, 100);
        assert_eq!(grid.len(), 10000);
        let min = grid.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = grid.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(min >= 280.0);
        assert!(max <= 320.0);
    }

    #[test]
    fn test_create_grid_with_non_finite() {
        let grid = create_grid_with_non_finite(10, 10, &[(0, 0), (5, 5), (9, 9)]);
        assert!(grid[0].is_nan());
        assert_eq!(grid[55], f64::INFINITY);
        assert_eq!(grid[99], f64::NEG_INFINITY);
        assert!(grid[1].is_finite());
    }
}
