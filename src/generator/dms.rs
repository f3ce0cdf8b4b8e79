//! Degrees/minutes/seconds and EXIF rational encoding

/// Split a decimal degree value into whole degrees, whole minutes and
/// seconds. Each step truncates.
///
/// Positive values only, the hemisphere is handled by the caller.
pub fn dec_to_dms(degrees: f64) -> (u32, u32, f64) {
    let deg = degrees.trunc();

    let minutes = (degrees - deg) * 60.0;
    let min = minutes.trunc();

    let sec = (minutes - min) * 60.0;

    (deg as u32, min as u32, sec)
}

pub fn dms_to_dec(deg: u32, min: u32, sec: f64) -> f64 {
    deg as f64 + (min as f64 * 60.0 + sec) / 3600.0
}

/// Rational representation of a positive number, with up to six
/// decimals, eg.: 10.463 -> `10463/1000`
pub fn format_as_rational(number: f64) -> String {
    if number == 0.0 {
        return "0/1".to_string();
    }

    let rendered = format!("{:.6}", number);
    let trimmed = rendered.trim_end_matches('0');
    let (int_portion, frac_portion) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    let numerator = format!("{}{}", int_portion.trim_start_matches('0'), frac_portion);
    if numerator.is_empty() {
        return "0/1".to_string();
    }

    format!("{}/{}", numerator, 10u64.pow(frac_portion.len() as u32))
}
