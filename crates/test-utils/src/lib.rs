//! Shared test utilities for the Aether workspace.
//!
//! Helpers shared by the workspace's tests:
//! - Synthetic sample grids with known min/max
//! - In-memory GeoTIFF fixtures built with the `tiff` encoder
//! - Approximate-equality and pixel assertions
//!
//! # Usage
//!
//! As a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! and in a test file:
//!
//! ```ignore
//! use test_utils::{fixtures, assert_pixel_eq};
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Assert two numbers differ by at most `tolerance`, comparing as f64.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(outcome.metadata.bounds.north, 34.1, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected) = ($actual as f64, $expected as f64);
        let tolerance = $tolerance as f64;
        if !((actual - expected).abs() <= tolerance) {
            panic!(
                "assertion failed: {:?} is not within {:?} of {:?}",
                actual, tolerance, expected
            );
        }
    }};
}

/// Assert that anything with public `r`, `g`, `b`, `a` fields matches an
/// `(r, g, b, a)` tuple.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_pixel_eq;
///
/// assert_pixel_eq!(Palette::FourBand.colorize(0.0), (0, 0, 255, 255));
/// ```
#[macro_export]
macro_rules! assert_pixel_eq {
    ($pixel:expr, ($r:expr, $g:expr, $b:expr, $a:expr)) => {{
        let pixel = $pixel;
        let actual = (pixel.r, pixel.g, pixel.b, pixel.a);
        let expected: (u8, u8, u8, u8) = ($r, $g, $b, $a);
        if actual != expected {
            panic!(
                "assertion failed: pixel mismatch\n  actual: `{:?}`,\n expected: `{:?}`",
                actual, expected
            );
        }
    }};
    ($pixel:expr, ($r:expr, $g:expr, $b:expr, $a:expr), $($arg:tt)+) => {{
        let pixel = $pixel;
        let actual = (pixel.r, pixel.g, pixel.b, pixel.a);
        let expected: (u8, u8, u8, u8) = ($r, $g, $b, $a);
        if actual != expected {
            panic!(
                "assertion failed: pixel mismatch\n  actual: `{:?}`,\n expected: `{:?}`: {}",
                actual, expected, format!($($arg)+)
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    struct Px {
        r: u8,
        g: u8,
        b: u8,
        a: u8,
    }

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(300.15, 300.1500001, 1e-6);
        assert_approx_eq!(255.0f32, 255.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(f64::NAN, 0.0, 1.0);
    }

    #[test]
    fn test_assert_pixel_eq_passes() {
        assert_pixel_eq!(Px { r: 1, g: 2, b: 3, a: 255 }, (1, 2, 3, 255));
    }

    #[test]
    #[should_panic(expected = "pixel mismatch")]
    fn test_assert_pixel_eq_fails() {
        assert_pixel_eq!(Px { r: 1, g: 2, b: 3, a: 255 }, (1, 2, 4, 255), "value {}", 7);
    }
}
