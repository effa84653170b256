//! Case-shift rule for key labels.

/// Returns `true` for a label made of exactly one alphabetic character.
///
/// Only such labels take part in shifting; `"Tab"`, `"1"` and `"{"` never do.
pub fn is_shiftable(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// Label for `key` with shift or caps lock applied.
///
/// When `upper` is set, a single alphabetic character is upper-cased.  Every
/// other label is returned unchanged.
pub fn shift_label(key: &str, upper: bool) -> String {
    if upper && is_shiftable(key) {
        key.to_uppercase()
    } else {
        key.to_string()
    }
}
