//! Utility functions for the CLI.

use adahuff_adaptive::CodecStats;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Summary of one run, printed with `--verbose` or `--json`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub mode: &'static str,
    pub input: String,
    pub output: String,
    pub input_bytes: u64,
    pub output_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    pub distinct_symbols: usize,
    pub escapes: u64,
    pub end_marker: bool,
}

impl RunSummary {
    pub fn new(encode: bool, input: &Path, output: &Path, stats: &CodecStats) -> Self {
        let (mode, input_bytes, output_bytes) = if encode {
            ("encode", stats.uncompressed_bytes, stats.compressed_bytes)
        } else {
            ("decode", stats.compressed_bytes, stats.uncompressed_bytes)
        };

        Self {
            mode,
            input: input.display().to_string(),
            output: output.display().to_string(),
            input_bytes,
            output_bytes,
            ratio: stats.ratio(),
            distinct_symbols: stats.distinct_symbols,
            escapes: stats.escapes,
            end_marker: stats.end_marker,
        }
    }
}

/// Print a run summary as a small table.
pub fn print_summary(summary: &RunSummary) {
    println!("{} -> {} ({})", summary.input, summary.output, summary.mode);
    println!("{}", "-".repeat(40));
    println!("{:<18} {:>12}", "Input bytes", summary.input_bytes);
    println!("{:<18} {:>12}", "Output bytes", summary.output_bytes);
    match summary.ratio {
        Some(ratio) => println!("{:<18} {:>11.1}%", "Ratio", ratio),
        None => println!("{:<18} {:>12}", "Ratio", "-"),
    }
    println!("{:<18} {:>12}", "Distinct symbols", summary.distinct_symbols);
    println!("{:<18} {:>12}", "Escapes", summary.escapes);
    if summary.end_marker {
        println!("{:<18} {:>12}", "End marker", "yes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_direction() {
        let stats = CodecStats {
            uncompressed_bytes: 100,
            compressed_bytes: 40,
            escapes: 3,
            distinct_symbols: 3,
            end_marker: false,
        };

        let encode = RunSummary::new(true, Path::new("a"), Path::new("b"), &stats);
        assert_eq!((encode.input_bytes, encode.output_bytes), (100, 40));
        assert_eq!(encode.ratio, Some(40.0));

        let decode = RunSummary::new(false, Path::new("b"), Path::new("a"), &stats);
        assert_eq!(decode.mode, "decode");
        assert_eq!((decode.input_bytes, decode.output_bytes), (40, 100));
    }

    #[test]
    fn test_summary_json_skips_missing_ratio() {
        let summary = RunSummary::new(
            true,
            Path::new("empty"),
            Path::new("empty.ah"),
            &CodecStats::default(),
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["mode"], "encode");
        assert_eq!(json["input_bytes"], 0);
        assert!(json.get("ratio").is_none());
    }
}
