//! Identifier normalization for generated type and field names.

/// Convert a table or column name into a capitalized Go identifier
/// (e.g., "cp___hello_12jiu" -> "CpHello12Jiu").
///
/// Every run of ASCII letters starts with an upper-case letter and continues
/// in lower case. Digits are kept verbatim and start a new segment, so the
/// letter after a digit is capitalized. Any other character is dropped and
/// only acts as a segment boundary.
pub fn to_capital_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seg_start = true;

    for ch in raw.chars() {
        if ch.is_ascii_alphabetic() {
            if seg_start {
                out.push(ch.to_ascii_uppercase());
                seg_start = false;
            } else {
                out.push(ch.to_ascii_lowercase());
            }
        } else if ch.is_ascii_digit() {
            out.push(ch);
            seg_start = true;
        } else {
            seg_start = true;
        }
    }

    out
}
