//! Line classification for opcode headers.
//!
//! QuickJS declares its opcodes one per line, e.g.
//!
//! ```text
//! DEF(       push_i32, 5, 0, 1, i32)
//! def(      get_loc0, 1, 0, 1, none_loc) /* short opcode */
//! ```
//!
//! Anything spanning more than one line is not recognized.

use once_cell::sync::Lazy;
use regex::Regex;

/// Substrings that mark a line as a preprocessor directive, wherever they
/// appear in it.
const DIRECTIVE_MARKERS: [&str; 6] = ["#if", "#elif", "#else", "#endif", "#define", "#undef"];

static DEF_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:DEF|def)\(\s*([A-Za-z0-9_]+)\s*,").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Skipped, even if it would otherwise match.
    Directive,
    /// A `DEF(name, ...)` invocation.
    Opcode { name: &'a str },
    Other,
}

pub fn classify(line: &str) -> Line<'_> {
    if is_directive(line) {
        return Line::Directive;
    }
    match opcode_name(line) {
        Some(name) => Line::Opcode { name },
        None => Line::Other,
    }
}

fn is_directive(line: &str) -> bool {
    line.trim_start().starts_with('#') || DIRECTIVE_MARKERS.iter().any(|m| line.contains(m))
}

fn opcode_name(line: &str) -> Option<&str> {
    let caps = DEF_LINE.captures(line)?;
    caps.get(1).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("DEF(PUSH_0, 1, 0, 1, none)", "PUSH_0")]
    #[test_case("DEF(       push_i32, 5, 0, 1, i32)", "push_i32"; "padded name")]
    #[test_case("  DEF(nop, 1, 0, 0, none)", "nop"; "leading whitespace")]
    #[test_case("\tDEF(nop , 1, 0, 0, none)", "nop"; "space before comma")]
    #[test_case("def(  get_loc8, 2, 0, 1, loc8)", "get_loc8"; "lowercase def")]
    #[test_case("DEF(invalid, 1, 0, 0, none) /* never emitted */", "invalid"; "trailing comment")]
    #[test_case("DEF(a, 1) DEF(b, 2)", "a"; "first match wins")]
    fn opcode(line: &str, expected: &str) {
        assert_eq!(classify(line), Line::Opcode { name: expected });
    }

    #[test_case("#ifdef DEF")]
    #[test_case("#endif  /* DEF */")]
    #[test_case("  #undef def"; "indented directive")]
    #[test_case("#define def(id, size, n_pop, n_push, f) DEF(id, size, n_pop, n_push, f)"; "define")]
    #[test_case("# if SHORT_OPCODES"; "hash then space")]
    #[test_case("#include \"quickjs.h\""; "include")]
    #[test_case("DEF(shadowed, 1, 0, 0, none) // #if 0"; "marker after match")]
    fn directive(line: &str) {
        assert_eq!(classify(line), Line::Directive);
    }

    #[test_case("")]
    #[test_case("   "; "blank")]
    #[test_case("/* push values */"; "comment")]
    #[test_case("// DEF(commented_out, 1, 0, 0, none)"; "line comment")]
    #[test_case("FMT(none_int)"; "format macro")]
    #[test_case("DEF(no_separator)"; "missing comma")]
    #[test_case("DEF(, 1, 0, 0, none)"; "empty name")]
    #[test_case("DEF (nop, 1, 0, 0, none)"; "space before paren")]
    #[test_case("XDEF(nop, 1, 0, 0, none)"; "prefixed macro")]
    #[test_case("Def(nop, 1, 0, 0, none)"; "mixed case macro")]
    #[test_case("DEF(bad-name, 1)"; "hyphen in name")]
    fn other(line: &str) {
        assert_eq!(classify(line), Line::Other);
    }
}
