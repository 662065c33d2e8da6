//! Command-line driver: segment text given as an argument or read line by line
//! from standard input.

use std::error::Error;
use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use thai_newmm::{Dictionary, Engine, Segmenter, Token};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    List,
    Wakati,
    Detail,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "list" => Ok(Self::List),
            "wakati" => Ok(Self::Wakati),
            "detail" => Ok(Self::Detail),
            _ => Err("expected one of: list, wakati, detail"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "thai-newmm", about = "Segments Thai text into words")]
struct Args {
    /// Text to segment. Reads lines from stdin when omitted.
    text: Option<String>,

    /// Word list, one word per line. Defaults to the built-in list.
    #[clap(short = 'd', long)]
    dict: Option<PathBuf>,

    /// Fail when the word list cannot be read instead of using the built-in one.
    #[clap(long)]
    strict: bool,

    /// Token separator for the wakati format.
    #[clap(short = 's', long, default_value = "|")]
    separator: String,

    /// Output format. Choices are list, wakati, and detail.
    #[clap(long, default_value = "wakati")]
    format: Format,

    /// Leave space and tab runs out of the output.
    #[clap(long)]
    drop_whitespace: bool,

    /// Token ceiling per line. 0 disables it.
    #[clap(long)]
    max_tokens: Option<usize>,

    /// Segmentation engine.
    #[clap(long, default_value = "newmm")]
    engine: String,

    /// Log dictionary loading and fallbacks.
    #[clap(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let engine: Engine = args.engine.parse()?;
    debug!(%engine, "engine selected");

    let dict = match (&args.dict, args.strict) {
        (Some(path), true) => Dictionary::try_load(path)?,
        (path, _) => Dictionary::load(path.as_deref()),
    };

    let mut builder = Segmenter::builder()
        .dictionary(dict)
        .keep_whitespace(!args.drop_whitespace);
    if let Some(limit) = args.max_tokens {
        builder = builder.max_tokens((limit > 0).then_some(limit));
    }
    let segmenter = builder.build();

    let is_tty = io::stdout().is_terminal();
    let mut out = BufWriter::new(io::stdout().lock());

    if let Some(text) = &args.text {
        let tokens = segmenter.segment(text)?;
        write_tokens(&mut out, &tokens, args.format, &args.separator)?;
        out.flush()?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let tokens = segmenter.segment(&line)?;
        write_tokens(&mut out, &tokens, args.format, &args.separator)?;
        if is_tty {
            out.flush()?;
        }
    }
    out.flush()?;

    Ok(())
}

fn write_tokens<W: Write>(
    out: &mut W,
    tokens: &[Token<'_>],
    format: Format,
    separator: &str,
) -> io::Result<()> {
    match format {
        Format::List => {
            out.write_all(b"[")?;
            for (i, t) in tokens.iter().enumerate() {
                if i != 0 {
                    out.write_all(b", ")?;
                }
                write_quoted(out, t.surface())?;
            }
            out.write_all(b"]\n")
        }
        Format::Wakati => {
            for (i, t) in tokens.iter().enumerate() {
                if i != 0 {
                    out.write_all(separator.as_bytes())?;
                }
                out.write_all(t.surface().as_bytes())?;
            }
            out.write_all(b"\n")
        }
        Format::Detail => {
            for t in tokens {
                let range = t.range_byte();
                writeln!(
                    out,
                    "{}..{}\t{}\t{}",
                    range.start,
                    range.end,
                    t.kind().as_str(),
                    t.surface()
                )?;
            }
            out.write_all(b"\n")
        }
    }
}

// Single-quoted, with the escapes a Python list literal needs.
fn write_quoted<W: Write>(out: &mut W, s: &str) -> io::Result<()> {
    out.write_all(b"'")?;
    for c in s.chars() {
        match c {
            '\'' => out.write_all(b"\\'")?,
            '\\' => out.write_all(b"\\\\")?,
            '\t' => out.write_all(b"\\t")?,
            '\n' => out.write_all(b"\\n")?,
            '\r' => out.write_all(b"\\r")?,
            c => write!(out, "{c}")?,
        }
    }
    out.write_all(b"'")
}
