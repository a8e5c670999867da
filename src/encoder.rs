// ✍️ Encoder - structured record → two fixed-width MRZ lines
//
// Pure transform: reads the record, never mutates it. Defaults are the
// caller's concern (`MrzRecord::resolve_defaults`).

use crate::checksum::check_digit;
use crate::record::{MrzLines, MrzRecord, FILLER, LINE_WIDTH};
use std::fmt;

/// Encoded width of the passport number field on line 2
const PASSPORT_NUMBER_WIDTH: usize = 9;

/// Encoded width of the personal number field on line 2
const PERSONAL_NUMBER_WIDTH: usize = 14;

// ============================================================================
// MISSING FIELD ERROR
// ============================================================================

/// MissingFieldError - every absent required field, collected in one pass
///
/// Callers get the complete list, not just the first hit, so a form or a
/// batch job can report everything that needs fixing at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFieldError {
    pub fields: Vec<&'static str>,
}

impl fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing required fields: {}", self.fields.join(", "))
    }
}

impl std::error::Error for MissingFieldError {}

// ============================================================================
// SANITIZATION
// ============================================================================

/// Sanitize a name field: uppercase, spaces and hyphens become fillers.
///
/// Lossy: once encoded, "ANNE-MARIE" and "ANNE MARIE" are the same line.
pub fn sanitize_name(name: &str) -> String {
    name.to_uppercase().replace([' ', '-'], "<")
}

/// Right-pad with fillers to `width`, truncating anything longer.
fn fixed_width(value: &str, width: usize) -> String {
    value
        .chars()
        .chain(std::iter::repeat(FILLER))
        .take(width)
        .collect()
}

fn require<'a>(
    field: &'a Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> &'a str {
    match field {
        Some(value) => value,
        None => {
            missing.push(name);
            ""
        }
    }
}

// ============================================================================
// ENCODER
// ============================================================================

/// Encode a record into the two MRZ lines.
///
/// All ten fields must be present; any absence fails with a
/// `MissingFieldError` naming every absent field. Present-but-empty values
/// are accepted and encoded as-is.
///
/// Line 2 is guaranteed 44 characters (its variable sub-fields are padded
/// or truncated to fixed widths). Line 1 is padded to 44 but NOT truncated:
/// a long enough name silently yields an over-length line, which the
/// decoder's length gate will then reject. Dates, sex, and country codes
/// are encoded as given; keeping them to their nominal widths is the
/// caller's responsibility.
pub fn encode(record: &MrzRecord) -> Result<MrzLines, MissingFieldError> {
    let mut missing = Vec::new();

    // Check order fixes the order fields appear in the error message
    let first_name = require(&record.first_name, "first_name", &mut missing);
    let last_name = require(&record.last_name, "last_name", &mut missing);
    let passport_number = require(&record.passport_number, "passport_number", &mut missing);
    let nationality = require(&record.nationality, "nationality", &mut missing);
    let birth_date = require(&record.birth_date, "birth_date", &mut missing);
    let sex = require(&record.sex, "sex", &mut missing);
    let expiry_date = require(&record.expiry_date, "expiry_date", &mut missing);
    let personal_number = require(&record.personal_number, "personal_number", &mut missing);
    let document_type = require(&record.document_type, "document_type", &mut missing);
    let issuing_country = require(&record.issuing_country, "issuing_country", &mut missing);

    if !missing.is_empty() {
        return Err(MissingFieldError { fields: missing });
    }

    // Line 1: type, filler, issuing state, LAST<<FIRST, fillers to 44
    let mut line1 = format!(
        "{}{}{}{}<<{}",
        document_type,
        FILLER,
        issuing_country,
        sanitize_name(last_name),
        sanitize_name(first_name),
    );
    let used = line1.chars().count();
    if used < LINE_WIDTH {
        line1.extend(std::iter::repeat(FILLER).take(LINE_WIDTH - used));
    }

    // Line 2: four checksummed fields at fixed offsets. The passport and
    // personal number digits cover the padded/truncated field value; the
    // date digits cover the value as given.
    let passport_field = fixed_width(passport_number, PASSPORT_NUMBER_WIDTH);
    let personal_field = fixed_width(personal_number, PERSONAL_NUMBER_WIDTH);

    let mut line2 = format!(
        "{}{}{}{}{}{}{}{}{}",
        passport_field,
        check_digit(&passport_field),
        nationality,
        birth_date,
        check_digit(birth_date),
        sex,
        expiry_date,
        check_digit(expiry_date),
        personal_field,
    );
    let used = line2.chars().count();
    if used < LINE_WIDTH - 1 {
        line2.extend(std::iter::repeat(FILLER).take(LINE_WIDTH - 1 - used));
    }
    // 44th character: digit over the padded personal number, not the line
    line2.push(char::from(b'0' + check_digit(&personal_field)));

    Ok(MrzLines { line1, line2 })
}

// ============================================================================
// TESTS
// ============================================================================
