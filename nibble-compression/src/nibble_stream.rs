use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::nibble::Nibble;

/// Reads a byte stream 4 bits at a time, high nibble first.
pub struct NibbleReader<R> {
    inner: R,
    pending: Option<Nibble>,
    nibbles_read: u64,
}

impl NibbleReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> NibbleReader<R> {
    pub fn new(inner: R) -> Self {
        NibbleReader {
            inner,
            pending: None,
            nibbles_read: 0,
        }
    }

    /// Returns `Ok(None)` once the underlying stream is exhausted, and keeps
    /// returning it on every later call.
    pub fn read_nibble(&mut self) -> io::Result<Option<Nibble>> {
        if let Some(low) = self.pending.take() {
            self.nibbles_read += 1;
            return Ok(Some(low));
        }

        let byte = match read_byte(&mut self.inner)? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        let (high, low) = Nibble::split(byte);
        self.pending = Some(low);
        self.nibbles_read += 1;
        Ok(Some(high))
    }

    pub fn pending(&self) -> Option<Nibble> {
        self.pending
    }

    pub fn nibbles_read(&self) -> u64 {
        self.nibbles_read
    }

    /// Any buffered low nibble is discarded.
    pub fn close(self) {}
}

fn read_byte<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut buffer = [0; 1];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buffer[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Writes nibbles in pairs; the first nibble of a pair becomes the high half
/// of the emitted byte.
///
/// An odd trailing nibble is padded with a zero low half when the writer is
/// closed. Dropping the writer does the same, but swallows any I/O error, so
/// prefer [`NibbleWriter::close`].
// `Drop` needs `W: Write`, and a `Drop` impl must repeat the struct's bounds.
pub struct NibbleWriter<W: Write> {
    inner: W,
    pending: Option<Nibble>,
    nibbles_written: u64,
}

impl NibbleWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> NibbleWriter<W> {
    pub fn new(inner: W) -> Self {
        NibbleWriter {
            inner,
            pending: None,
            nibbles_written: 0,
        }
    }

    pub fn write_nibble(&mut self, nibble: Nibble) -> io::Result<()> {
        self.nibbles_written += 1;
        match self.pending.take() {
            Some(high) => self.inner.write_all(&[Nibble::join(high, nibble)]),
            None => {
                self.pending = Some(nibble);
                Ok(())
            }
        }
    }

    pub fn pending(&self) -> Option<Nibble> {
        self.pending
    }

    pub fn nibbles_written(&self) -> u64 {
        self.nibbles_written
    }

    pub fn close(mut self) -> io::Result<()> {
        self.flush_pending()?;
        self.inner.flush()
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        match self.pending.take() {
            Some(high) => self.inner.write_all(&[Nibble::join(high, Nibble::PADDING)]),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for NibbleWriter<W> {
    fn drop(&mut self) {
        if self.pending.is_some() {
            let _ = self.flush_pending().and_then(|_| self.inner.flush());
        }
    }
}
