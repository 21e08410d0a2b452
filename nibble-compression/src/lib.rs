pub mod cli;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod nibble;
pub mod nibble_stream;

pub use codec::{compress, compress_bytes, decompress, decompress_bytes, Summary};
pub use error::CompressionError;
pub use nibble::Nibble;
pub use nibble_stream::{NibbleReader, NibbleWriter};
