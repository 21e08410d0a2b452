use std::{
    ffi::OsString,
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, FromArgMatches, Parser};
use env_logger::Env;
use log::{debug, error, info};

use crate::{
    codec::{self, Summary},
    error::CompressionError,
    nibble_stream::{NibbleReader, NibbleWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

impl Direction {
    pub fn program_name(self) -> &'static str {
        match self {
            Direction::Compress => "compress",
            Direction::Decompress => "decompress",
        }
    }

    pub fn usage(self) -> String {
        format!("Usage:  {} INFILE -o OUTFILE", self.program_name())
    }
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about = "Packs text into 4-bit codes", long_about = None)]
pub struct Args {
    #[arg(value_name = "INFILE")]
    pub input: PathBuf,
    #[arg(short, value_name = "OUTFILE")]
    pub output: PathBuf,
}

const EXPECTED_ARGUMENTS: usize = 4;
const OUTPUT_FLAG: &str = "-o";

/// Accepts exactly `PROGRAM INFILE -o OUTFILE`; clap's looser forms such as
/// `-oOUTFILE` or `-o=OUTFILE` are rejected before parsing.
pub fn parse_args<I, T>(direction: Direction, args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = args.into_iter().map(Into::into).collect::<Vec<OsString>>();
    let mut command = Args::command().name(direction.program_name());

    let wants_info = args
        .iter()
        .skip(1)
        .any(|arg| matches!(arg.to_str(), Some("-h" | "--help" | "-V" | "--version")));
    if !wants_info {
        if args.len() != EXPECTED_ARGUMENTS {
            return Err(command.error(
                ErrorKind::WrongNumberOfValues,
                format!(
                    "expected {} arguments, got {}",
                    EXPECTED_ARGUMENTS - 1,
                    args.len().saturating_sub(1)
                ),
            ));
        }
        if args[2] != OUTPUT_FLAG {
            return Err(command.error(
                ErrorKind::UnknownArgument,
                format!("expected {OUTPUT_FLAG} before OUTFILE, got {:?}", args[2]),
            ));
        }
    }

    let matches = command.try_get_matches_from(args)?;
    Args::from_arg_matches(&matches)
}

/// Opens both files, runs the codec and closes both files again.
///
/// Open failures surface as [`CompressionError::OpenFailure`] inside the
/// returned [`anyhow::Error`]; anything that goes wrong mid-stream is fatal and
/// carries the path being processed as context.
pub fn run(direction: Direction, args: &Args) -> anyhow::Result<Summary> {
    match direction {
        Direction::Compress => {
            let input = File::open(&args.input)
                .map(BufReader::new)
                .map_err(|source| CompressionError::open_failure(&args.input, source))?;
            debug!("reading {}", args.input.display());

            let mut output = NibbleWriter::create(&args.output)
                .map_err(|source| CompressionError::open_failure(&args.output, source))?;
            debug!("writing {}", args.output.display());

            let summary = codec::compress(input, &mut output)
                .with_context(|| format!("failed to compress {}", args.input.display()))?;
            output
                .close()
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            Ok(summary)
        }
        Direction::Decompress => {
            let mut input = NibbleReader::open(&args.input)
                .map_err(|source| CompressionError::open_failure(&args.input, source))?;
            debug!("reading {}", args.input.display());

            let output = File::create(&args.output)
                .map(BufWriter::new)
                .map_err(|source| CompressionError::open_failure(&args.output, source))?;
            debug!("writing {}", args.output.display());

            let summary = codec::decompress(&mut input, output)
                .with_context(|| format!("failed to decompress {}", args.input.display()))?;
            input.close();
            Ok(summary)
        }
    }
}

/// Entry point shared by the `compress` and `decompress` binaries.
///
/// Exits with status 1 on malformed arguments or an unopenable file, after
/// printing the usage line.
pub fn main(direction: Direction) -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let args = match parse_args(direction, std::env::args_os()) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let message = err.to_string();
            let err = CompressionError::MalformedArguments(
                message.lines().next().unwrap_or_default().to_owned(),
            );
            error!("{err}");
            println!("{}", direction.usage());
            return ExitCode::FAILURE;
        }
    };

    match run(direction, &args) {
        Ok(summary) => {
            report(direction, &summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            if err.downcast_ref::<CompressionError>().is_some() {
                println!("{}", direction.usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn report(direction: Direction, summary: &Summary) {
    info!(
        "{}: {} bytes in, {} bytes out ({} direct codes, {} escapes)",
        direction.program_name(),
        summary.bytes_in,
        summary.bytes_out,
        summary.direct_codes,
        summary.escapes
    );
    if let Some(ratio) = summary.ratio() {
        info!("ratio: {:.1}%", ratio * 100.0);
    }
}
