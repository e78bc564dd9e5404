//! Conversions between the two text encodings the message path understands.
//!
//! Narrow text is UTF-8 (`String`), wide text is UTF-16 code units (`Vec<u16>`).

/// Encodes UTF-8 text as UTF-16 code units.
///
/// Supplementary characters become surrogate pairs (two units), which is what
/// `WM_CHAR` and `KEYEVENTF_UNICODE` expect.
pub fn to_wide(text: &str) -> Vec<u16> {
    if text.is_empty() {
        return Vec::new();
    }
    text.encode_utf16().collect()
}

/// Decodes UTF-16 code units into UTF-8 text.
///
/// Input that is not valid UTF-16 (an unpaired surrogate) yields an empty
/// string; callers tolerate degraded text rather than aborting.
pub fn to_narrow(units: &[u16]) -> String {
    if units.is_empty() {
        return String::new();
    }
    String::from_utf16(units).unwrap_or_default()
}

/// Encodes UTF-8 text as a NUL terminated UTF-16 buffer for `*W` API calls.
pub fn to_wide_nul(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}
