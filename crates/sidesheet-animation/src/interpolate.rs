//! Range mapping helper used by the visual mappers.

/// Maps `value` from `input` onto `output` linearly, continuing the line
/// past the range endpoints.
///
/// A degenerate input range or a NaN `value` yields `output.0`.
pub fn interpolate(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let span = input.1 - input.0;
    if span.abs() <= f32::EPSILON || value.is_nan() {
        return output.0;
    }
    output.0 + (output.1 - output.0) * (value - input.0) / span
}
