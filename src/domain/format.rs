//! Formatting of transforms for the tree dump.

use itertools::Itertools;

use crate::domain::transform::{row_major, Transform};

/// Explicit formatting configuration for `Transformer::print_tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Digits after the decimal point
    pub precision: usize,
    /// Spaces per tree level
    pub indent_width: usize,
    /// Print values that round to zero as `0.0000` instead of `-0.0000`
    pub clean_zeros: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            indent_width: 3,
            clean_zeros: true,
        }
    }
}

impl PrintOptions {
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }

    pub fn coefficient(&self, value: f64) -> String {
        let precision = self.precision;
        if self.clean_zeros {
            let scale = 10f64.powi(precision as i32);
            if (value * scale).round() == 0.0 {
                return format!("{:.precision$}", 0.0);
            }
        }
        format!("{value:.precision$}")
    }

    /// The 16 coefficients in row-major order, space separated.
    pub fn coefficients(&self, matrix: &Transform) -> String {
        row_major(matrix)
            .iter()
            .map(|v| self.coefficient(*v))
            .join(" ")
    }
}
