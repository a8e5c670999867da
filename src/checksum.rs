// 🔢 Check Digit - CRC32-mod-10 over field content
//
// COMPATIBILITY WARNING: this is NOT the ICAO 9303 check digit. The real
// standard weights a numeric mapping of each character by the repeating
// 7-3-1 sequence. The record corpus this tool exchanges data with was
// produced with a CRC-32 (zlib polynomial) reduced modulo 10, so that exact
// algorithm is reproduced here. Digits computed by this module will NOT
// match the check digits printed on real travel documents.

/// Compute the check digit for a field: CRC-32 of the UTF-8 bytes, mod 10.
///
/// Total and deterministic; defined for any string, including the empty
/// string (whose digit is 0, since CRC-32 of no bytes is 0).
pub fn check_digit(input: &str) -> u8 {
    (crc32fast::hash(input.as_bytes()) % 10) as u8
}

// ============================================================================
// TESTS
// ============================================================================
