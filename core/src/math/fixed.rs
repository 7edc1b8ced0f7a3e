/// Formats `value` with exactly `digits` decimals following the JavaScript
/// `Number.prototype.toFixed` contract.
///
/// Rust rounds exact decimal ties to even; `toFixed` picks the larger
/// magnitude, so exact ties are rounded away from zero here.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    // -0 prints without a sign.
    let value = if value == 0.0 { 0.0 } else { value };

    let magnitude = value.abs();
    let scale = 10f64.powi(digits as i32);
    let scaled = magnitude * scale;
    let exact = magnitude.mul_add(scale, -scaled) == 0.0;
    if !exact || scaled.fract() != 0.5 {
        return format!("{:.*}", digits, value);
    }

    let units = format!("{:.0}", scaled.ceil());
    let padded = format!("{:0>width$}", units, width = digits + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - digits);
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}
