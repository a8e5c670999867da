use anyhow::Result;
use std::env;
use std::path::Path;
use std::process;

use mrz_codec::{measure_performance, process_decoding, process_encoding};

const DEFAULT_DECODED_IN: &str = "records_decoded.json";
const DEFAULT_ENCODED_IN: &str = "records_encoded.json";
const DEFAULT_ENCODED_OUT: &str = "records_encoded_prog.json";
const DEFAULT_DECODED_OUT: &str = "records_decoded_prog.json";
const DEFAULT_PERF_CSV: &str = "performance_results.csv";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("encode") => {
            run_encode(arg_or(&args, 2, DEFAULT_DECODED_IN), arg_or(&args, 3, DEFAULT_ENCODED_OUT))?;
        }
        Some("decode") => {
            run_decode(arg_or(&args, 2, DEFAULT_ENCODED_IN), arg_or(&args, 3, DEFAULT_DECODED_OUT))?;
        }
        Some("bench") => {
            run_bench(
                arg_or(&args, 2, DEFAULT_DECODED_IN),
                arg_or(&args, 3, DEFAULT_ENCODED_IN),
                arg_or(&args, 4, DEFAULT_PERF_CSV),
            )?;
        }
        Some(other) => {
            eprintln!("❌ Unknown mode: {}", other);
            eprintln!("   Usage: mrz-codec [encode|decode|bench] [paths...]");
            process::exit(1);
        }
        None => {
            // Default run: both passes over the default files
            run_encode(DEFAULT_DECODED_IN, DEFAULT_ENCODED_OUT)?;
            run_decode(DEFAULT_ENCODED_IN, DEFAULT_DECODED_OUT)?;
        }
    }

    Ok(())
}

fn arg_or<'a>(args: &'a [String], index: usize, default: &'a str) -> &'a str {
    args.get(index).map(String::as_str).unwrap_or(default)
}

fn run_encode(input: &str, output: &str) -> Result<()> {
    println!("🛂 MRZ Encoding - {} → {}", input, output);
    let written = process_encoding(Path::new(input), Path::new(output))?;
    println!("✓ Encoded {} records, saved to {}", written, output);
    Ok(())
}

fn run_decode(input: &str, output: &str) -> Result<()> {
    println!("🛂 MRZ Decoding - {} → {}", input, output);
    let report = process_decoding(Path::new(input), Path::new(output))?;
    println!(
        "✓ Decoded {} records ({} invalid), saved to {}",
        report.decoded + report.invalid,
        report.invalid,
        output
    );
    Ok(())
}

fn run_bench(decoded: &str, encoded: &str, csv: &str) -> Result<()> {
    println!("⏱️  MRZ Benchmark - {} + {} → {}", decoded, encoded, csv);
    let rows = measure_performance(Path::new(decoded), Path::new(encoded), Path::new(csv))?;
    for row in &rows {
        println!(
            "✓ {:>6} records: encode {:.6}s ({:.2} µs/record), decode {:.6}s ({:.2} µs/record)",
            row.num_records,
            row.encode_seconds,
            row.encode_micros_per_record,
            row.decode_seconds,
            row.decode_micros_per_record,
        );
    }
    println!("✓ Performance results saved to {}", csv);
    Ok(())
}
