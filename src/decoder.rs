// 🔍 Decoder - two fixed-width MRZ lines → parsed record
//
// A structural parser, not a validator: the four embedded check digits are
// surfaced as data and never recomputed here. The only validation is the
// precondition gate (two 44-character ASCII lines), which fails SOFTLY with
// a sentinel value. The one hard failure is a line 1 without a usable name
// separator, which would otherwise mean slicing out of range.

use crate::checksum::check_digit;
use crate::record::{DataGroup, DecodedDocument, NameGroup, FILLER, LINE_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name separator between last and first name on line 1
const NAME_SEPARATOR: &str = "<<";

/// Offset on line 1 where the name field begins (after type + country)
const NAME_OFFSET: usize = 5;

// ============================================================================
// ERRORS AND OUTCOMES
// ============================================================================

/// MalformedLineError - line 1 carries no usable `<<` name separator
///
/// Raised when the separator is missing entirely or sits inside the
/// document-type/country region (before offset 5), where the field layout
/// leaves no room for a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLineError {
    pub line: String,
    pub reason: String,
}

impl fmt::Display for MalformedLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed MRZ line 1: {} (line: {:?})", self.reason, self.line)
    }
}

impl std::error::Error for MalformedLineError {}

/// Decoded - decode outcome
///
/// `Invalid` is a sentinel, not an error: a payload that fails the length
/// gate decodes to this value and the caller carries on. Promoting it to a
/// hard error would change the batch-processing contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Document(ParsedMrz),
    Invalid { reason: String },
}

impl Decoded {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Decoded::Invalid { .. })
    }
}

// ============================================================================
// PARSED RECORD
// ============================================================================

/// ParsedMrz - every positional field of a well-formed pair of lines,
/// check-digit characters included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMrz {
    pub document_type: char,
    pub issuing_country: String,
    pub last_name: String,
    /// Fillers replaced by spaces, outer whitespace trimmed
    pub first_name: String,
    /// Raw 9-character field, fillers kept
    pub passport_number: String,
    pub passport_number_check: char,
    pub nationality: String,
    pub birth_date: String,
    pub birth_date_check: char,
    pub sex: char,
    pub expiry_date: String,
    pub expiry_date_check: char,
    /// Trailing fillers stripped
    pub personal_number: String,
    pub personal_number_check: char,
}

impl ParsedMrz {
    /// Recompute the four check digits and compare with the embedded ones.
    ///
    /// This is the caller-side verification path the decoder itself never
    /// takes. The personal number is re-padded to its encoded width before
    /// checksumming, mirroring the encoder.
    pub fn check_digits_match(&self) -> bool {
        let personal_field: String = self
            .personal_number
            .chars()
            .chain(std::iter::repeat(FILLER))
            .take(14)
            .collect();

        self.passport_number_check == digit_char(check_digit(&self.passport_number))
            && self.birth_date_check == digit_char(check_digit(&self.birth_date))
            && self.expiry_date_check == digit_char(check_digit(&self.expiry_date))
            && self.personal_number_check == digit_char(check_digit(&personal_field))
    }

    /// Regroup into the external two-group shape used by the record files
    pub fn into_document(self) -> DecodedDocument {
        DecodedDocument {
            line1: NameGroup {
                issuing_country: self.issuing_country,
                last_name: self.last_name,
                given_name: self.first_name,
            },
            line2: DataGroup {
                passport_number: self.passport_number,
                country_code: self.nationality,
                birth_date: self.birth_date,
                sex: self.sex.to_string(),
                expiration_date: self.expiry_date,
                personal_number: self.personal_number,
            },
        }
    }
}

fn digit_char(digit: u8) -> char {
    char::from(b'0' + digit)
}

// ============================================================================
// DECODER
// ============================================================================

/// Decode a `;`-joined payload of two MRZ lines.
///
/// With more than one delimiter, the first segment is line 1 and the LAST
/// segment is line 2; anything between is ignored. A payload whose lines
/// are not exactly 44 ASCII characters yields `Decoded::Invalid`. A line 1
/// without a usable name separator is the one hard error.
pub fn decode(payload: &str) -> Result<Decoded, MalformedLineError> {
    let line1 = payload.split(';').next().unwrap_or(payload);
    let line2 = payload.rsplit(';').next().unwrap_or(payload);

    // Precondition gate. ASCII is checked first so the fixed offsets below
    // are safe as byte offsets; the MRZ alphabet is A-Z0-9< anyway.
    if !line1.is_ascii() || !line2.is_ascii() {
        return Ok(Decoded::Invalid {
            reason: "Invalid Passport Details: non-ASCII content".to_string(),
        });
    }
    if line1.len() != LINE_WIDTH || line2.len() != LINE_WIDTH {
        return Ok(Decoded::Invalid {
            reason: format!(
                "Invalid Passport Details: expected two {}-character lines, got {} and {}",
                LINE_WIDTH,
                line1.len(),
                line2.len()
            ),
        });
    }

    let separator = match line1.find(NAME_SEPARATOR) {
        Some(pos) if pos >= NAME_OFFSET => pos,
        Some(pos) => {
            return Err(MalformedLineError {
                line: line1.to_string(),
                reason: format!("name separator at offset {pos}, inside the country code region"),
            })
        }
        None => {
            return Err(MalformedLineError {
                line: line1.to_string(),
                reason: "missing '<<' name separator".to_string(),
            })
        }
    };

    let parsed = ParsedMrz {
        document_type: byte_at(line1, 0),
        issuing_country: line1[2..5].to_string(),
        last_name: line1[NAME_OFFSET..separator].to_string(),
        first_name: line1[separator + 2..]
            .replace(FILLER, " ")
            .trim()
            .to_string(),
        passport_number: line2[0..9].to_string(),
        passport_number_check: byte_at(line2, 9),
        nationality: line2[10..13].to_string(),
        birth_date: line2[13..19].to_string(),
        birth_date_check: byte_at(line2, 19),
        sex: byte_at(line2, 20),
        expiry_date: line2[21..27].to_string(),
        expiry_date_check: byte_at(line2, 27),
        personal_number: line2[28..43].trim_end_matches(FILLER).to_string(),
        personal_number_check: byte_at(line2, 43),
    };

    Ok(Decoded::Document(parsed))
}

/// Single character at a fixed offset of an ASCII-checked line
fn byte_at(line: &str, index: usize) -> char {
    char::from(line.as_bytes()[index])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DOE_PAYLOAD: &str = "P<UTODOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<;1234567892UTO9001011M25010161234567890<<<<<5";

    fn doe_parsed() -> ParsedMrz {
        match decode(DOE_PAYLOAD).unwrap() {
            Decoded::Document(parsed) => parsed,
            Decoded::Invalid { reason } => panic!("unexpected invalid: {reason}"),
        }
    }

    #[test]
    fn test_decode_reference_payload() {
        let parsed = doe_parsed();
        assert_eq!(parsed.document_type, 'P');
        assert_eq!(parsed.issuing_country, "UTO");
        assert_eq!(parsed.last_name, "DOE");
        assert_eq!(parsed.first_name, "JOHN");
        assert_eq!(parsed.passport_number, "123456789");
        assert_eq!(parsed.nationality, "UTO");
        assert_eq!(parsed.birth_date, "900101");
        assert_eq!(parsed.sex, 'M');
        assert_eq!(parsed.expiry_date, "250101");
        assert_eq!(parsed.personal_number, "1234567890");
    }

    #[test]
    fn test_decode_surfaces_check_digits_without_verifying() {
        let parsed = doe_parsed();
        assert_eq!(parsed.passport_number_check, '2');
        assert_eq!(parsed.birth_date_check, '1');
        assert_eq!(parsed.expiry_date_check, '6');
        // The embedded digit is 5 although the CRC digit for the padded
        // personal number is 6: decode surfaces it verbatim, and only the
        // explicit verification helper notices the mismatch.
        assert_eq!(parsed.personal_number_check, '5');
        assert!(!parsed.check_digits_match());
    }

    #[test]
    fn test_check_digits_match_on_encoder_output() {
        let payload = "P<UTOGUPTA<<SUNIL<VIRENDRA<<<<<<<<<<<<<<<<<<;W458967452UTO9001011M2501016ZE184226B<<<<<<4";
        match decode(payload).unwrap() {
            Decoded::Document(parsed) => assert!(parsed.check_digits_match()),
            Decoded::Invalid { reason } => panic!("unexpected invalid: {reason}"),
        }
    }

    #[test]
    fn test_into_document_regroups_and_renames() {
        let doc = doe_parsed().into_document();
        assert_eq!(doc.line1.issuing_country, "UTO");
        assert_eq!(doc.line1.last_name, "DOE");
        assert_eq!(doc.line1.given_name, "JOHN");
        assert_eq!(doc.line2.passport_number, "123456789");
        assert_eq!(doc.line2.country_code, "UTO");
        assert_eq!(doc.line2.birth_date, "900101");
        assert_eq!(doc.line2.sex, "M");
        assert_eq!(doc.line2.expiration_date, "250101");
        assert_eq!(doc.line2.personal_number, "1234567890");
    }

    #[test]
    fn test_decode_multi_name_first_name() {
        let payload = "P<UTOGUPTA<<SUNIL<VIRENDRA<<<<<<<<<<<<<<<<<<;W458967452UTO9001011M2501016ZE184226B<<<<<<4";
        match decode(payload).unwrap() {
            Decoded::Document(parsed) => {
                // Fillers inside the name become spaces, padding is trimmed
                assert_eq!(parsed.first_name, "SUNIL VIRENDRA");
                assert_eq!(parsed.last_name, "GUPTA");
            }
            Decoded::Invalid { reason } => panic!("unexpected invalid: {reason}"),
        }
    }

    #[test]
    fn test_decode_short_lines_is_soft_invalid() {
        let outcome = decode("PUTO<<DOE<<JOHN<<<<<<<<<<;123456789UTO900101M250101").unwrap();
        assert!(outcome.is_invalid());
    }

    #[test]
    fn test_decode_short_line2_only_is_soft_invalid() {
        let payload = format!("{};{}", "P<UTODOE<<JOHN".to_owned() + &"<".repeat(30), "TOOSHORT");
        let outcome = decode(&payload).unwrap();
        match outcome {
            Decoded::Invalid { reason } => {
                assert!(reason.contains("44"));
                assert!(reason.contains("Invalid Passport Details"));
            }
            Decoded::Document(_) => panic!("expected invalid"),
        }
    }

    #[test]
    fn test_decode_empty_payload_is_soft_invalid() {
        assert!(decode("").unwrap().is_invalid());
    }

    #[test]
    fn test_decode_non_ascii_is_soft_invalid() {
        // 44 characters but multi-byte content must not panic on slicing
        let line = "Ü".repeat(44);
        let payload = format!("{line};{line}");
        assert!(decode(&payload).unwrap().is_invalid());
    }

    #[test]
    fn test_decode_missing_separator_is_hard_error() {
        let line1 = "P<UTODOE<JOHN".to_owned() + &"X".repeat(31);
        let line2 = "1234567892UTO9001011M25010161234567890<<<<<5";
        let err = decode(&format!("{line1};{line2}")).unwrap_err();
        assert!(err.reason.contains("missing"));
        assert!(err.to_string().contains("malformed MRZ line 1"));
    }

    #[test]
    fn test_decode_separator_inside_country_region_is_hard_error() {
        let line1 = "P<<TODOE<JOHN".to_owned() + &"X".repeat(31);
        let line2 = "1234567892UTO9001011M25010161234567890<<<<<5";
        let err = decode(&format!("{line1};{line2}")).unwrap_err();
        assert!(err.reason.contains("country code region"));
    }

    #[test]
    fn test_decode_separator_at_name_offset_gives_empty_last_name() {
        let line1 = format!("P<UTO<<ABC{}", "<".repeat(34));
        let line2 = "1234567892UTO9001011M25010161234567890<<<<<5";
        match decode(&format!("{line1};{line2}")).unwrap() {
            Decoded::Document(parsed) => {
                assert_eq!(parsed.last_name, "");
                assert_eq!(parsed.first_name, "ABC");
            }
            Decoded::Invalid { reason } => panic!("unexpected invalid: {reason}"),
        }
    }

    #[test]
    fn test_decode_takes_first_and_last_segments() {
        let line1 = "P<UTODOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<";
        let line2 = "1234567892UTO9001011M25010161234567890<<<<<5";
        let payload = format!("{line1};IGNORED MIDDLE SEGMENT;{line2}");
        match decode(&payload).unwrap() {
            Decoded::Document(parsed) => assert_eq!(parsed.passport_number, "123456789"),
            Decoded::Invalid { reason } => panic!("unexpected invalid: {reason}"),
        }
    }

    #[test]
    fn test_decode_personal_number_strips_trailing_fillers_only() {
        let line1 = "P<UTODOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<";
        // Personal number field holds "AB123" + fillers
        let line2 = "1234567892UTO9001011M2501016AB123<<<<<<<<<<5";
        match decode(&format!("{line1};{line2}")).unwrap() {
            Decoded::Document(parsed) => assert_eq!(parsed.personal_number, "AB123"),
            Decoded::Invalid { reason } => panic!("unexpected invalid: {reason}"),
        }
    }
}
