// ⏱️ Performance Measurement - batch timing ladder for encode/decode
//
// Times the two pure transforms over growing slices of the record corpus
// and writes one CSV row per batch size. Timing uses the monotonic clock;
// the transforms allocate nothing shared, so the figures scale linearly.

use crate::decoder::decode;
use crate::store::{encode_document, load_decoded, load_encoded};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// One CSV row of the performance ladder
#[derive(Debug, Clone, Serialize)]
pub struct PerfRow {
    pub num_records: usize,
    pub encode_seconds: f64,
    pub decode_seconds: f64,
    pub encode_micros_per_record: f64,
    pub decode_micros_per_record: f64,
}

/// Batch sizes measured: 100, then 1000 to 10000 in thousands
pub fn batch_sizes() -> Vec<usize> {
    std::iter::once(100)
        .chain((1..=10).map(|i| i * 1000))
        .collect()
}

/// Run the timing ladder over the two container files and write the CSV.
///
/// Batch sizes are clamped to the number of available records; ladder
/// steps beyond the corpus size are skipped rather than re-measured.
pub fn measure_performance(
    decoded_path: &Path,
    encoded_path: &Path,
    output_csv: &Path,
) -> Result<Vec<PerfRow>> {
    let documents = load_decoded(decoded_path)?;
    let payloads = load_encoded(encoded_path)?;

    let mut rows: Vec<PerfRow> = Vec::new();
    for size in batch_sizes() {
        let encode_count = size.min(documents.len());
        let decode_count = size.min(payloads.len());
        if encode_count == 0 || decode_count == 0 {
            break;
        }
        // Clamped ladder steps repeat the largest batch; measure it once
        if let Some(last) = rows.last() {
            if last.num_records == encode_count.max(decode_count) {
                break;
            }
        }

        let start = Instant::now();
        for doc in documents.iter().take(encode_count) {
            encode_document(doc)
                .context("encode pass failed during performance measurement")?;
        }
        let encode_seconds = start.elapsed().as_secs_f64();

        let start = Instant::now();
        for payload in payloads.iter().take(decode_count) {
            decode(payload)
                .context("decode pass failed during performance measurement")?;
        }
        let decode_seconds = start.elapsed().as_secs_f64();

        rows.push(PerfRow {
            num_records: encode_count.max(decode_count),
            encode_seconds,
            decode_seconds,
            encode_micros_per_record: encode_seconds * 1e6 / encode_count as f64,
            decode_micros_per_record: decode_seconds * 1e6 / decode_count as f64,
        });
    }

    let mut writer = csv::Writer::from_path(output_csv)
        .with_context(|| format!("Failed to create CSV file: {}", output_csv.display()))?;
    for row in &rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================
