//! Assertion utilities for robot testing
//!
//! Positions come out of spring integration and gamma-space blending, so
//! most checks compare within a tolerance.

use sidesheet_ui_graphics::{Color, Rect};

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that every channel of `actual` is within `tolerance` of `expected`.
pub fn assert_color_approx_eq(actual: Color, expected: Color, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.r(), expected.r(), tolerance, &format!("{} - red", msg));
    assert_approx_eq(actual.g(), expected.g(), tolerance, &format!("{} - green", msg));
    assert_approx_eq(actual.b(), expected.b(), tolerance, &format!("{} - blue", msg));
    assert_approx_eq(actual.a(), expected.a(), tolerance, &format!("{} - alpha", msg));
}

/// Assert that a rectangle contains a point.
pub fn assert_rect_contains_point(rect: Rect, x: f32, y: f32, msg: &str) {
    assert!(
        rect.contains(x, y),
        "{}: point ({}, {}) not in rect {:?}",
        msg,
        x,
        y,
        rect
    );
}

/// Assert that `values` never decrease.
pub fn assert_non_decreasing(values: &[f32], msg: &str) {
    for (index, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] >= pair[0],
            "{}: value fell from {} to {} at index {}",
            msg,
            pair[0],
            pair[1],
            index + 1
        );
    }
}
