//! Greek tax identification numbers (AFM).

/// Canonical AFM written into every Greek `issuer`.
pub const VALID_ISSUER_AFM: &str = "090000045";

/// Canonical AFM written into every Greek `counterpart`.
pub const VALID_COUNTERPART_AFM: &str = "094014201";

/// Country code that marks a party as Greek.
pub const GREECE: &str = "GR";

/// Check an AFM by format and check digit (no network call).
///
/// An AFM is nine ASCII digits. The first eight are weighted with
/// 2^8 … 2^1; the sum modulo 11, then modulo 10, must equal the ninth.
pub fn is_valid_afm(afm: &str) -> bool {
    let bytes = afm.as_bytes();
    if bytes.len() != 9 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let sum: u32 = bytes[..8]
        .iter()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') << (8 - i))
        .sum();

    (sum % 11) % 10 == u32::from(bytes[8] - b'0')
}
