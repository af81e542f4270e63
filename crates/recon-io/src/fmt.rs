//! `%.17g`-style float formatting for the text codecs.
//!
//! 17 significant digits are enough to round-trip any f64 exactly.

/// Format with `sig` significant digits, trimming trailing zeros.
pub(crate) fn fmt_g(value: f64, sig: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }
    let exp = value.abs().log10().floor() as i32;
    if exp < -4 || exp >= sig as i32 {
        let s = format!("{:.*e}", sig.saturating_sub(1), value);
        match s.split_once('e') {
            Some((mantissa, exponent)) => {
                let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                format!("{mantissa}e{exponent}")
            }
            None => s,
        }
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        let s = format!("{value:.decimals$}");
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        }
    }
}

/// Format a float for the text format (17 significant digits).
pub(crate) fn fmt_f64(value: f64) -> String {
    fmt_g(value, 17)
}
