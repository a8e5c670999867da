// 📂 Record Store - JSON containers and the two batch pipelines
//
// The persisted shapes are the external contract of the tool:
//   { "records_decoded": [ {line1: {...}, line2: {...}}, ... ] }
//   { "records_encoded": [ "LINE1;LINE2", ... ] }
// This module is also the single adapter between the decoded two-group
// schema (country_code / expiration_date) and the encoder's input schema
// (nationality / expiry_date).

use crate::decoder::{decode, Decoded};
use crate::encoder::encode;
use crate::record::{DecodedDocument, MrzRecord};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

// ============================================================================
// CONTAINERS
// ============================================================================

#[derive(Deserialize)]
struct DecodedContainer {
    records_decoded: Vec<DecodedDocument>,
}

#[derive(Deserialize)]
struct EncodedContainer {
    records_encoded: Vec<String>,
}

/// One entry of a decoded output container: either a document or the
/// invalid-input sentinel message, serialized as a bare string (the shape
/// consumers of these files already expect).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DecodedEntry {
    Document(DecodedDocument),
    Invalid(String),
}

/// Load the `records_decoded` array from a container file
pub fn load_decoded(path: &Path) -> Result<Vec<DecodedDocument>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let container: DecodedContainer = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(container.records_decoded)
}

/// Load the `records_encoded` array from a container file
pub fn load_encoded(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let container: EncodedContainer = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(container.records_encoded)
}

fn save_container<T: Serialize>(path: &Path, container: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), container)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    Ok(())
}

// ============================================================================
// SCHEMA ADAPTER
// ============================================================================

/// Encode one decoded-shape document into its `;`-joined payload.
///
/// This is the mapping point between the two field namings: `country_code`
/// feeds the encoder's `nationality`, `expiration_date` its `expiry_date`.
/// The document type is fixed to "P" (the container shape does not carry
/// one) and a missing personal number encodes as empty.
pub fn encode_document(doc: &DecodedDocument) -> Result<String> {
    let record = MrzRecord::new()
        .with_document_type("P".to_string())
        .with_issuing_country(doc.line1.issuing_country.clone())
        .with_last_name(doc.line1.last_name.clone())
        .with_first_name(doc.line1.given_name.clone())
        .with_passport_number(doc.line2.passport_number.clone())
        .with_nationality(doc.line2.country_code.clone())
        .with_birth_date(doc.line2.birth_date.clone())
        .with_sex(doc.line2.sex.clone())
        .with_expiry_date(doc.line2.expiration_date.clone())
        .with_personal_number(doc.line2.personal_number.clone());

    let lines = encode(&record)?;
    Ok(lines.payload())
}

// ============================================================================
// BATCH PIPELINES
// ============================================================================

/// Tally of one decoding pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    pub decoded: usize,
    pub invalid: usize,
}

/// Encode every record of a decoded container into an encoded container.
/// Returns the number of records written.
pub fn process_encoding(input: &Path, output: &Path) -> Result<usize> {
    let documents = load_decoded(input)?;

    let mut encoded = Vec::with_capacity(documents.len());
    for (index, doc) in documents.iter().enumerate() {
        let payload = encode_document(doc)
            .with_context(|| format!("Failed to encode record {}", index))?;
        encoded.push(payload);
    }

    #[derive(Serialize)]
    struct Output {
        records_encoded: Vec<String>,
    }
    save_container(output, &Output { records_encoded: encoded })?;
    Ok(documents.len())
}

/// Decode every payload of an encoded container into a decoded container.
///
/// Payloads that fail the length gate land in the output as their sentinel
/// message (soft failure, the batch keeps going); a payload whose line 1
/// has no name separator aborts the pass (hard failure).
pub fn process_decoding(input: &Path, output: &Path) -> Result<DecodeReport> {
    let payloads = load_encoded(input)?;

    let mut report = DecodeReport { decoded: 0, invalid: 0 };
    let mut entries = Vec::with_capacity(payloads.len());
    for (index, payload) in payloads.iter().enumerate() {
        let outcome = decode(payload)
            .with_context(|| format!("Failed to decode record {}", index))?;
        match outcome {
            Decoded::Document(parsed) => {
                report.decoded += 1;
                entries.push(DecodedEntry::Document(parsed.into_document()));
            }
            Decoded::Invalid { reason } => {
                report.invalid += 1;
                entries.push(DecodedEntry::Invalid(reason));
            }
        }
    }

    #[derive(Serialize)]
    struct Output {
        records_decoded: Vec<DecodedEntry>,
    }
    save_container(output, &Output { records_decoded: entries })?;
    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
