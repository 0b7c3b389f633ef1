//! Scrape QuickJS opcode numbers out of `quickjs-opcode.h`.
//!
//! Every `DEF(name, ...)` (or `def(name, ...)`) line declares one opcode, and
//! its code is its position among those lines. See [`OpcodeTable`].

pub mod error;
pub mod number;
pub mod query;
mod scan;
pub mod table;

pub use error::{MissingSourceFile, UnknownName};
pub use number::Int;
pub use query::Query;
pub use table::OpcodeTable;
