// MRZ Codec - Core Library
// Encode/decode for the ICAO 9303 machine-readable zone, passport type "P",
// two-line 44-character variant. Exposes all modules for use in the CLI
// and tests.
//
// NOTE: check digits are CRC32-mod-10, NOT the ICAO 7-3-1 algorithm. This
// matches the record corpus the tool exchanges data with, and will not
// interoperate with real passport check digits. See src/checksum.rs.

pub mod checksum;
pub mod country;
pub mod decoder;
pub mod encoder;
pub mod perf;
pub mod record;
pub mod store;

// Re-export commonly used types
pub use checksum::check_digit;
pub use country::CountryCodeRegistry;
pub use decoder::{decode, Decoded, MalformedLineError, ParsedMrz};
pub use encoder::{encode, sanitize_name, MissingFieldError};
pub use perf::{batch_sizes, measure_performance, PerfRow};
pub use record::{
    DataGroup, DecodedDocument, MrzLines, MrzRecord, NameGroup, FILLER, LINE_WIDTH,
};
pub use store::{
    encode_document, load_decoded, load_encoded, process_decoding, process_encoding,
    DecodeReport, DecodedEntry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // The codec is pure and owns no shared state; concurrent callers must
    // see exactly what a serial caller sees.
    #[test]
    fn test_concurrent_calls_match_serial_results() {
        let record = MrzRecord::new()
            .with_document_type("P".to_string())
            .with_issuing_country("UTO".to_string())
            .with_last_name("GUPTA".to_string())
            .with_first_name("SUNIL VIRENDRA".to_string())
            .with_passport_number("W45896745".to_string())
            .with_nationality("UTO".to_string())
            .with_birth_date("900101".to_string())
            .with_sex("M".to_string())
            .with_expiry_date("250101".to_string())
            .with_personal_number("ZE184226B".to_string());

        let serial = encode(&record).unwrap();
        let payload = serial.payload();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let record = record.clone();
                let payload = payload.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let lines = encode(&record).unwrap();
                        assert_eq!(lines.payload(), payload);
                        match decode(&payload).unwrap() {
                            Decoded::Document(parsed) => {
                                assert_eq!(parsed.last_name, "GUPTA")
                            }
                            Decoded::Invalid { reason } => {
                                panic!("unexpected invalid: {reason}")
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
