//! AdaHuff CLI - adaptive Huffman compression from the command line.
//!
//! Compresses or decompresses one file into another in a single pass.

mod utils;

use adahuff_adaptive::{AdaptiveDecoder, AdaptiveEncoder, CodecConfig, CodecStats, EndMarker};
use clap::{ArgGroup, Parser, ValueEnum};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use utils::{RunSummary, create_progress_bar, print_summary};

#[derive(Parser, Debug)]
#[command(name = "adahuff")]
#[command(author, version, about = "Adaptive Huffman compressor and decompressor")]
#[command(long_about = "
AdaHuff compresses a byte stream in one pass with an adaptive Huffman code.
No frequency table is stored: the decoder rebuilds the code from the data.

Examples:
  adahuff notes.txt notes.ah --encode
  adahuff notes.ah notes.txt --decode
  adahuff big.log big.ah --encode --progress -v
  adahuff big.ah big.log --decode --max-output 1000000000
")]
#[command(group(ArgGroup::new("mode").required(true).args(["encode", "decode"])))]
struct Cli {
    /// File to read
    input: PathBuf,

    /// File to write (created or truncated)
    output: PathBuf,

    /// Compress INPUT into OUTPUT
    #[arg(short, long)]
    encode: bool,

    /// Decompress INPUT into OUTPUT
    #[arg(short, long)]
    decode: bool,

    /// When to append an explicit end-of-stream marker
    #[arg(long, value_enum, default_value = "auto")]
    end_marker: EndMarkerArg,

    /// Stop decoding with an error after this many output bytes
    #[arg(long, value_name = "BYTES")]
    max_output: Option<u64>,

    /// Print a run summary
    #[arg(short, long)]
    verbose: bool,

    /// Print the run summary as JSON (machine-readable)
    #[arg(short, long)]
    json: bool,

    /// Show a progress bar over the input
    #[arg(short, long)]
    progress: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EndMarkerArg {
    /// Only when the final padding bits would decode as a symbol
    Auto,
    /// After every non-empty input
    Always,
}

impl From<EndMarkerArg> for EndMarker {
    fn from(arg: EndMarkerArg) -> Self {
        match arg {
            EndMarkerArg::Auto => EndMarker::Auto,
            EndMarkerArg::Always => EndMarker::Always,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Encode,
    Decode,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.encode { Mode::Encode } else { Mode::Decode }
    }

    fn config(&self) -> CodecConfig {
        let config = CodecConfig::new().with_end_marker(self.end_marker.into());
        match self.max_output {
            Some(limit) => config.with_max_output(limit),
            None => config,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = open_input(&cli.input)?;
    let output = create_output(&cli.output)?;

    let input_len = input.metadata()?.len();
    let pb = create_progress_bar(input_len, cli.progress);
    let reader = pb.wrap_read(BufReader::new(input));
    let writer = BufWriter::new(output);

    let mode = cli.mode();
    let stats = process(mode, cli.config(), reader, writer)?;
    pb.finish_and_clear();

    let summary = RunSummary::new(mode == Mode::Encode, &cli.input, &cli.output, &stats);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if cli.verbose {
        print_summary(&summary);
    }

    Ok(())
}

/// Run one encode or decode pass from `reader` to `writer`.
fn process<R: std::io::Read, W: std::io::Write>(
    mode: Mode,
    config: CodecConfig,
    reader: R,
    writer: W,
) -> adahuff_core::Result<CodecStats> {
    match mode {
        Mode::Encode => AdaptiveEncoder::new(config).encode(reader, writer),
        Mode::Decode => AdaptiveDecoder::new(config).decode(reader, writer),
    }
}

fn open_input(path: &Path) -> Result<File, String> {
    File::open(path).map_err(|e| format!("cannot open input '{}': {}", path.display(), e))
}

fn create_output(path: &Path) -> Result<File, String> {
    File::create(path).map_err(|e| format!("cannot create output '{}': {}", path.display(), e))
}
