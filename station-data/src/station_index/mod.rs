//! Station index document reader.
//!
//! The station index is a PDF whose pages list CRS codes next to their
//! canonical station names. Names read from it take precedence over the
//! names in the geodata.

mod error;
mod extract;
mod pdf;

pub use error::IndexError;
pub use extract::{CodeNameTable, LINE_BREAK, PositionedFragment};
pub use pdf::{document_pages, fragments_from_operations, read_pages};
