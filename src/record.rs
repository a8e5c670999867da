// 🛂 Record Model - structured and wire forms of an MRZ document
//
// Both forms are transient values: constructed per call, owned entirely by
// the caller, no shared state between calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Padding and name-separator character of the MRZ alphabet
pub const FILLER: char = '<';

/// Width of each MRZ line (passport type "P", two-line variant)
pub const LINE_WIDTH: usize = 44;

// ============================================================================
// STRUCTURED FORM (encoder input)
// ============================================================================

/// MrzRecord - the structured form fed to the encoder
///
/// Every field is optional at the type level; `encoder::encode` rejects a
/// record with any absent field, naming all of them at once. `None` means
/// "not supplied", which is different from present-but-empty (`Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzRecord {
    /// Document type, single character ("P" for passport)
    pub document_type: Option<String>,
    /// Issuing state, 3-letter code
    pub issuing_country: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    /// Up to 9 significant characters; longer values are truncated on encode
    pub passport_number: Option<String>,
    /// Holder nationality, 3-letter code
    pub nationality: Option<String>,
    /// YYMMDD, treated as an opaque fixed-width string
    pub birth_date: Option<String>,
    /// "M", "F" or "<" for unspecified
    pub sex: Option<String>,
    /// YYMMDD, treated as an opaque fixed-width string
    pub expiry_date: Option<String>,
    /// Up to 14 significant characters, may be empty
    pub personal_number: Option<String>,
}

impl MrzRecord {
    pub fn new() -> Self {
        MrzRecord::default()
    }

    /// Builder pattern: set document type
    pub fn with_document_type(mut self, document_type: String) -> Self {
        self.document_type = Some(document_type);
        self
    }

    /// Builder pattern: set issuing country
    pub fn with_issuing_country(mut self, issuing_country: String) -> Self {
        self.issuing_country = Some(issuing_country);
        self
    }

    /// Builder pattern: set last name
    pub fn with_last_name(mut self, last_name: String) -> Self {
        self.last_name = Some(last_name);
        self
    }

    /// Builder pattern: set first name
    pub fn with_first_name(mut self, first_name: String) -> Self {
        self.first_name = Some(first_name);
        self
    }

    /// Builder pattern: set passport number
    pub fn with_passport_number(mut self, passport_number: String) -> Self {
        self.passport_number = Some(passport_number);
        self
    }

    /// Builder pattern: set nationality
    pub fn with_nationality(mut self, nationality: String) -> Self {
        self.nationality = Some(nationality);
        self
    }

    /// Builder pattern: set birth date
    pub fn with_birth_date(mut self, birth_date: String) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Builder pattern: set sex
    pub fn with_sex(mut self, sex: String) -> Self {
        self.sex = Some(sex);
        self
    }

    /// Builder pattern: set expiry date
    pub fn with_expiry_date(mut self, expiry_date: String) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Builder pattern: set personal number
    pub fn with_personal_number(mut self, personal_number: String) -> Self {
        self.personal_number = Some(personal_number);
        self
    }

    /// Return a new record with the two defaultable fields resolved:
    /// `document_type` falls back to "P", `sex` to "<".
    ///
    /// Consumes and returns rather than mutating in place, so a caller's
    /// record is never changed behind its back. Fields that are already
    /// present keep their value, including present-but-empty ones.
    pub fn resolve_defaults(mut self) -> Self {
        if self.document_type.is_none() {
            self.document_type = Some("P".to_string());
        }
        if self.sex.is_none() {
            self.sex = Some(FILLER.to_string());
        }
        self
    }
}

// ============================================================================
// WIRE FORM (encoder output)
// ============================================================================

/// MrzLines - the two fixed-width text lines printed on a document
///
/// Line 2 is always 44 characters. Line 1 can exceed 44 for very long
/// names: the encoder deliberately does not truncate it (see encoder docs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzLines {
    pub line1: String,
    pub line2: String,
}

impl MrzLines {
    /// Delimiter used when both lines travel as a single payload string
    pub const PAYLOAD_DELIMITER: char = ';';

    /// Single-string payload form, as stored in the encoded record files
    pub fn payload(&self) -> String {
        format!("{}{}{}", self.line1, Self::PAYLOAD_DELIMITER, self.line2)
    }
}

impl fmt::Display for MrzLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.line1, self.line2)
    }
}

// ============================================================================
// DECODED FORM (external two-group shape)
// ============================================================================
//
// The decoded JSON contract groups fields by source line and renames two of
// them relative to the encoder input: `nationality` becomes `country_code`
// and `expiry_date` becomes `expiration_date`. The renames are part of the
// external contract; `store::encode_document` is the one place that maps
// between the two schemas.

/// Line 1 fields of a decoded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameGroup {
    pub issuing_country: String,
    pub last_name: String,
    pub given_name: String,
}

/// Line 2 fields of a decoded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataGroup {
    pub passport_number: String,
    pub country_code: String,
    pub birth_date: String,
    pub sex: String,
    pub expiration_date: String,
    /// Absent in some source files; treated as empty
    #[serde(default)]
    pub personal_number: String,
}

/// DecodedDocument - decoder output as persisted in the record files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedDocument {
    pub line1: NameGroup,
    pub line2: DataGroup,
}

// ============================================================================
// TESTS
// ============================================================================
