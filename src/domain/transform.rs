//! Homogeneous transform constructors.
//!
//! All matrices are 4x4 with the rotation in the upper-left 3x3 block, the
//! translation in the last column and `[0, 0, 0, 1]` as the bottom row.
//! Angles are in radians, positive counter-clockwise (right-handed).

use nalgebra::{Matrix4, Vector3, Vector4};

/// Homogeneous transform matrix.
pub type Transform = Matrix4<f64>;

/// Point in a frame's coordinates.
pub type Point = Vector3<f64>;

/// Create a translation matrix.
pub fn trans(x: f64, y: f64, z: f64) -> Transform {
    let mut matrix = Transform::identity();
    matrix[(0, 3)] = x;
    matrix[(1, 3)] = y;
    matrix[(2, 3)] = z;
    matrix
}

/// Create a rotation matrix around the x-axis.
pub fn rot_x(theta: f64) -> Transform {
    let (sin, cos) = theta.sin_cos();
    let mut matrix = Transform::identity();
    matrix[(1, 1)] = cos;
    matrix[(1, 2)] = -sin;
    matrix[(2, 1)] = sin;
    matrix[(2, 2)] = cos;
    matrix
}

/// Create a rotation matrix around the y-axis.
pub fn rot_y(theta: f64) -> Transform {
    let (sin, cos) = theta.sin_cos();
    let mut matrix = Transform::identity();
    matrix[(0, 0)] = cos;
    matrix[(0, 2)] = sin;
    matrix[(2, 0)] = -sin;
    matrix[(2, 2)] = cos;
    matrix
}

/// Create a rotation matrix around the z-axis.
pub fn rot_z(theta: f64) -> Transform {
    let (sin, cos) = theta.sin_cos();
    let mut matrix = Transform::identity();
    matrix[(0, 0)] = cos;
    matrix[(0, 1)] = -sin;
    matrix[(1, 0)] = sin;
    matrix[(1, 1)] = cos;
    matrix
}

/// Append the homogeneous coordinate `1.0`.
pub fn to_homogeneous(point: &Point) -> Vector4<f64> {
    Vector4::new(point.x, point.y, point.z, 1.0)
}

/// Drop the homogeneous coordinate.
pub fn from_homogeneous(v: &Vector4<f64>) -> Point {
    Point::new(v.x, v.y, v.z)
}

/// Row-major view of the 16 coefficients.
pub fn row_major(matrix: &Transform) -> [f64; 16] {
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = matrix[(row, col)];
        }
    }
    out
}

/// Build a transform from row-major rows, as written in definition files.
pub fn from_rows(rows: &[[f64; 4]; 4]) -> Transform {
    Transform::from_fn(|row, col| rows[row][col])
}
