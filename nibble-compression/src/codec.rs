use std::io::{self, Read, Write};

use log::{debug, warn};

use crate::{
    code_table::{byte_for, code_for},
    nibble::Nibble,
    nibble_stream::{NibbleReader, NibbleWriter},
};

/// Counters gathered during a single compress or decompress run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub direct_codes: u64,
    pub escapes: u64,
    /// The stream ended on an escape marker with nothing after it, which is
    /// how an odd nibble count gets padded.
    pub trailing_padding: bool,
    /// The stream ended between the two data nibbles of an escape.
    pub truncated_escape: bool,
}

impl Summary {
    pub fn ratio(&self) -> Option<f64> {
        if self.bytes_in == 0 {
            return None;
        }
        Some(self.bytes_out as f64 / self.bytes_in as f64)
    }
}

pub fn compress<R: Read, W: Write>(
    input: R,
    output: &mut NibbleWriter<W>,
) -> io::Result<Summary> {
    let mut summary = Summary::default();
    let nibbles_before = output.nibbles_written();

    for byte in input.bytes() {
        let byte = byte?;
        summary.bytes_in += 1;

        match code_for(byte) {
            Some(code) => {
                output.write_nibble(code)?;
                summary.direct_codes += 1;
            }
            None => {
                let (high, low) = Nibble::split(byte);
                output.write_nibble(Nibble::ESCAPE)?;
                output.write_nibble(high)?;
                output.write_nibble(low)?;
                summary.escapes += 1;
            }
        }
    }

    summary.bytes_out = (output.nibbles_written() - nibbles_before).div_ceil(2);
    Ok(summary)
}

enum DecodeState {
    ExpectCode,
    ExpectEscapeHigh,
    ExpectEscapeLow(Nibble),
}

pub fn decompress<R: Read, W: Write>(
    input: &mut NibbleReader<R>,
    mut output: W,
) -> io::Result<Summary> {
    let mut summary = Summary::default();
    let nibbles_before = input.nibbles_read();
    let mut state = DecodeState::ExpectCode;

    loop {
        let nibble = match input.read_nibble()? {
            Some(nibble) => nibble,
            None => break,
        };

        state = match state {
            DecodeState::ExpectCode => match byte_for(nibble) {
                Some(byte) => {
                    output.write_all(&[byte])?;
                    summary.direct_codes += 1;
                    summary.bytes_out += 1;
                    DecodeState::ExpectCode
                }
                None => DecodeState::ExpectEscapeHigh,
            },
            DecodeState::ExpectEscapeHigh => DecodeState::ExpectEscapeLow(nibble),
            DecodeState::ExpectEscapeLow(high) => {
                output.write_all(&[Nibble::join(high, nibble)])?;
                summary.escapes += 1;
                summary.bytes_out += 1;
                DecodeState::ExpectCode
            }
        };
    }

    match state {
        DecodeState::ExpectCode => {}
        DecodeState::ExpectEscapeHigh => {
            debug!("stream ended on an escape marker, treating it as padding");
            summary.trailing_padding = true;
        }
        DecodeState::ExpectEscapeLow(high) => {
            warn!("stream ended inside an escape sequence (high nibble {high}), dropping it");
            summary.truncated_escape = true;
        }
    }

    summary.bytes_in = (input.nibbles_read() - nibbles_before).div_ceil(2);
    output.flush()?;
    Ok(summary)
}

pub fn compress_bytes(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut compressed = Vec::new();
    let mut writer = NibbleWriter::new(&mut compressed);
    compress(input, &mut writer)?;
    writer.close()?;
    Ok(compressed)
}

pub fn decompress_bytes(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut reader = NibbleReader::new(input);
    let mut decompressed = Vec::new();
    decompress(&mut reader, &mut decompressed)?;
    Ok(decompressed)
}
