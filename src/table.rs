use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::{self, prelude::*, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, trace, warn};

use crate::{
    error::{MissingSourceFile, UnknownName},
    number::Int,
    scan::{self, Line},
};

/// Prepended to every captured name.
pub const PREFIX: &str = "OP_";

/// Bidirectional opcode lookup, built once from a header and then read-only.
///
/// Codes are assigned by position: the i-th `DEF` line gets code i. Repeated
/// names are *not* merged. Each occurrence gets its own code, and the reverse
/// table ends up pointing at the last one.
#[derive(Debug, Clone, Default)]
pub struct OpcodeTable {
    /// Forward table. Index is the code.
    names: Vec<String>,
    /// Reverse table.
    codes: HashMap<String, usize>,
}

impl OpcodeTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| MissingSourceFile {
            path: path.to_owned(),
            source,
        })?;
        debug!("scanning {}", path.display());
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to read {}", path.display()))
    }

    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let names: Vec<String> = reader
            .lines()
            .filter_map_ok(|line| match scan::classify(&line) {
                Line::Opcode { name } => Some(name.to_owned()),
                Line::Directive => {
                    trace!("skipping directive: {line:?}");
                    None
                }
                Line::Other => None,
            })
            .collect::<io::Result<_>>()?;
        Ok(Self::from_names(names))
    }

    /// Build from bare (unprefixed) names, in code order.
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| format!("{PREFIX}{}", n.as_ref()))
            .collect();

        let mut codes = HashMap::with_capacity(names.len());
        for (code, name) in names.iter().enumerate() {
            if let Some(prev) = codes.insert(name.clone(), code) {
                warn!("duplicate opcode {name}: code {prev} is shadowed by {code}");
            }
        }

        debug!("{} opcodes, {} distinct names", names.len(), codes.len());
        Self { names, codes }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Never fails: codes with no entry come back as `UNKNOWN_OP_<code>`.
    pub fn opcode_to_name(&self, code: i64) -> String {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.names.get(idx))
            .cloned()
            .unwrap_or_else(|| unknown_code(code))
    }

    /// [`Self::opcode_to_name`] for literals of any size.
    pub fn lookup_code(&self, code: &Int) -> String {
        match code {
            Int::Small(n) => self.opcode_to_name(*n),
            Int::Big(_) => unknown_code(code),
        }
    }

    /// Look up a prefixed name, e.g. `OP_push_i32`.
    pub fn name_to_opcode(&self, name: &str) -> Result<usize, UnknownName> {
        self.codes.get(name).copied().ok_or_else(|| UnknownName {
            name: name.to_owned(),
        })
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names.iter().map(String::as_str).enumerate()
    }
}

fn unknown_code(code: impl fmt::Display) -> String {
    format!("UNKNOWN_{PREFIX}{code}")
}

/// One `<name> = <code>,` line per entry.
impl fmt::Display for OpcodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (code, name) in self.iter() {
            writeln!(f, "{name} = {code},")?;
        }
        Ok(())
    }
}
