use std::io::{self, Write};

use log::debug;

use crate::{
    number::{self, Int},
    table::OpcodeTable,
};

/// CLI lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// No argument: dump the whole table.
    ListAll,
    /// Code → prefixed name.
    Code(Int),
    /// Prefixed name → code.
    Name(String),
}

impl Query {
    pub fn new(arg: Option<&str>) -> Self {
        let Some(arg) = arg else {
            return Query::ListAll;
        };

        match number::parse_int(arg) {
            Ok(code) => Query::Code(code),
            Err(e) => {
                debug!("treating {arg:?} as a name: {e}");
                Query::Name(arg.to_owned())
            }
        }
    }

    /// Lookup misses are printed to `out` too. They aren't errors.
    pub fn execute(&self, table: &OpcodeTable, out: &mut impl Write) -> io::Result<()> {
        match self {
            Query::ListAll => write!(out, "{table}"),
            Query::Code(code) => writeln!(out, "{}", table.lookup_code(code)),
            Query::Name(name) => match table.name_to_opcode(name) {
                Ok(code) => writeln!(out, "{code}"),
                Err(e) => writeln!(out, "{e}"),
            },
        }
    }
}
