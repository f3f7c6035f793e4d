//! Per-run statistics.

/// Counters collected over one encode or decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecStats {
    /// Size of the uncompressed side, in bytes (one byte per symbol).
    pub uncompressed_bytes: u64,
    /// Size of the compressed side, in bytes.
    pub compressed_bytes: u64,
    /// Symbols sent as escape code plus raw byte, the first byte included.
    pub escapes: u64,
    /// Distinct byte values seen.
    pub distinct_symbols: usize,
    /// Whether the stream carried an explicit end marker.
    pub end_marker: bool,
}

impl CodecStats {
    /// Compressed size as a percentage of the uncompressed size.
    ///
    /// Returns `None` for empty input.
    pub fn ratio(&self) -> Option<f64> {
        (self.uncompressed_bytes > 0)
            .then(|| self.compressed_bytes as f64 / self.uncompressed_bytes as f64 * 100.0)
    }
}
