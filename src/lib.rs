pub mod config;
pub mod cursor;
pub mod encoding;
pub mod error;
pub mod scalar;

pub use config::{CursorConfig, DecodeMode};
pub use cursor::{ByteCursor, ByteLen, Origin};
pub use encoding::TextEncoding;
pub use error::{CursorError, Result};
pub use scalar::{Endian, ScalarKind, Value};
