//! Codec configuration.

/// When the encoder appends the end-of-stream marker.
///
/// The marker is the escape code followed by a zero literal. Decoders stop
/// on it, so it keeps the zero padding of the last byte from being decoded
/// as a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndMarker {
    /// Only when the padding would otherwise decode as a symbol.
    #[default]
    Auto,
    /// After every non-empty input.
    Always,
}

/// Adaptive Huffman codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// End-of-stream marker policy (encoder only).
    pub end_marker: EndMarker,
    /// Maximum decoded size in bytes (decoder only); `None` is unlimited.
    pub max_output: Option<u64>,
}

impl CodecConfig {
    /// Shortest output; decodes any stream without an output cap.
    pub const DEFAULT: Self = Self {
        end_marker: EndMarker::Auto,
        max_output: None,
    };

    /// Every non-empty stream ends with an explicit end marker.
    pub const STRICT_TERMINATION: Self = Self {
        end_marker: EndMarker::Always,
        max_output: None,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the end-of-stream marker policy.
    pub fn with_end_marker(mut self, end_marker: EndMarker) -> Self {
        self.end_marker = end_marker;
        self
    }

    /// Cap the decoded output at `limit` bytes.
    pub fn with_max_output(mut self, limit: u64) -> Self {
        self.max_output = Some(limit);
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
