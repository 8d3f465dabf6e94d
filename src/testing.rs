//! Testing helpers.

use assert_float_eq::*;

use crate::linear::Matrix;
use crate::probs::SliceExt;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

pub fn assert_matrix_f64_absolute(expected: &Matrix<f64>, actual: &Matrix<f64>, epsilon: f64) {
    assert_eq!(expected.rows(), actual.rows(), "row counts do not match");
    assert_eq!(expected.cols(), actual.cols(), "column counts do not match");
    for (&expected, &actual) in expected.flatten().iter().zip(actual.flatten()) {
        assert_float_absolute_eq!(expected, actual, epsilon);
    }
}

pub fn assert_sums_to(expected: f64, values: &[f64], epsilon: f64) {
    assert_float_absolute_eq!(expected, values.sum(), epsilon);
}
