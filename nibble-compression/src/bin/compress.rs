use std::process::ExitCode;

use nibble_compression::cli::{self, Direction};

fn main() -> ExitCode {
    cli::main(Direction::Compress)
}
