use std::fmt;

use anyhow::{bail, ensure, Result};

/// A parsed integer literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Int {
    Small(i64),
    /// Doesn't fit in an `i64`. Kept as its decimal rendering, sign included.
    Big(String),
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Int::Small(n) => write!(f, "{n}"),
            Int::Big(digits) => f.write_str(digits),
        }
    }
}

/// Parse an integer literal, picking the base from an optional `0x`, `0o` or
/// `0b` prefix (any case). Surrounding whitespace, a leading sign and single
/// underscores between digits are accepted.
///
/// Decimal literals with a leading zero (`012`) are rejected, except for
/// all-zero ones like `00`. There's no size limit: anything past `i64` comes
/// back as [`Int::Big`].
pub fn parse_int(s: &str) -> Result<Int> {
    let s = s.trim();
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (radix, mut digits) = split_radix(unsigned);
    if radix != 10 {
        // `0x_ff` is fine.
        if let Some(rest) = digits.strip_prefix('_') {
            digits = rest;
        }
    }

    ensure!(!digits.is_empty(), "no digits in {s:?}");
    ensure!(
        !digits.starts_with('_') && !digits.ends_with('_') && !digits.contains("__"),
        "misplaced underscore in {s:?}"
    );

    let mut cleaned = String::with_capacity(digits.len() + 1);
    if negative {
        cleaned.push('-');
    }
    for c in digits.chars().filter(|&c| c != '_') {
        ensure!(
            c.is_digit(radix),
            "not a base-{radix} digit: {c:?} (in {s:?})"
        );
        cleaned.push(c);
    }

    let magnitude = cleaned.trim_start_matches('-');
    if radix == 10 && magnitude.starts_with('0') && magnitude.chars().any(|c| c != '0') {
        bail!("leading zeros in decimal literal {s:?}");
    }

    // Every character is a valid digit by now, so the only way to fail is overflow.
    match i64::from_str_radix(&cleaned, radix) {
        Ok(n) => Ok(Int::Small(n)),
        Err(_) => {
            let sign = if negative { "-" } else { "" };
            Ok(Int::Big(format!("{sign}{}", to_decimal(magnitude, radix))))
        }
    }
}

fn split_radix(s: &str) -> (u32, &str) {
    let prefix = s.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &s[2..]),
        Some("0o") => (8, &s[2..]),
        Some("0b") => (2, &s[2..]),
        _ => (10, s),
    }
}

/// Schoolbook base conversion of validated digits, in base-10^9 limbs.
fn to_decimal(digits: &str, radix: u32) -> String {
    const LIMB: u64 = 1_000_000_000;

    // Little-endian.
    let mut limbs: Vec<u64> = vec![0];
    for d in digits.chars().filter_map(|c| c.to_digit(radix)) {
        let mut carry = u64::from(d);
        for limb in &mut limbs {
            let v = *limb * u64::from(radix) + carry;
            *limb = v % LIMB;
            carry = v / LIMB;
        }
        while carry > 0 {
            limbs.push(carry % LIMB);
            carry /= LIMB;
        }
    }

    let mut out = String::new();
    let mut rev = limbs.iter().rev();
    if let Some(top) = rev.next() {
        out.push_str(&top.to_string());
    }
    for limb in rev {
        out.push_str(&format!("{limb:09}"));
    }
    out
}
