// bases.rs - Nucleotide base codes and ambiguity resolution

/// Unambiguous bases in code order: A, G, C, T
pub const BASES: [u8; 4] = [b'A', b'G', b'C', b'T'];

/// Code for an alignment gap (never resolvable)
pub const GAP: u8 = 4;

/// Code for a fully unknown base (`N` or `?`)
pub const MISSING: u8 = 15;

/// First ambiguity code (`M`)
pub const FIRST_AMBIGUOUS: u8 = 5;

const A: u8 = 0;
const G: u8 = 1;
const C: u8 = 2;
const T: u8 = 3;

// Indexed by base code; the entry for the gap code is never handed out.
static COMPATIBLE: [&[u8]; 16] = [
    &[A],
    &[G],
    &[C],
    &[T],
    &[],
    &[A, C],       // M
    &[A, G],       // R
    &[A, T],       // W
    &[G, C],       // S
    &[C, T],       // Y
    &[G, T],       // K
    &[G, C, T],    // B
    &[A, G, T],    // D
    &[A, C, T],    // H
    &[A, G, C],    // V
    &[A, G, C, T], // N
];

/// Convert a sequence character into its base code.
///
/// Returns `None` for characters outside the IUPAC alphabet.
pub fn encode(ch: u8) -> Option<u8> {
    let code = match ch.to_ascii_uppercase() {
        b'A' => 0,
        b'G' => 1,
        b'C' => 2,
        b'T' | b'U' => 3,
        b'-' => GAP,
        b'M' => 5,
        b'R' => 6,
        b'W' => 7,
        b'S' => 8,
        b'Y' => 9,
        b'K' => 10,
        b'B' => 11,
        b'D' => 12,
        b'H' => 13,
        b'V' => 14,
        b'N' | b'?' => MISSING,
        _ => return None,
    };
    Some(code)
}

/// True for the four unambiguous base codes
#[inline]
pub fn is_resolved(code: u8) -> bool {
    code < GAP
}

/// True for ambiguity codes, including fully missing data
#[inline]
pub fn is_ambiguous(code: u8) -> bool {
    (FIRST_AMBIGUOUS..=MISSING).contains(&code)
}

/// Set of unambiguous bases compatible with `code`.
///
/// Singletons for 0-3, two to four bases for ambiguity codes, `None` for the
/// gap code (and anything out of range).
#[inline]
pub fn resolve(code: u8) -> Option<&'static [u8]> {
    match code {
        GAP => None,
        c if (c as usize) < COMPATIBLE.len() => Some(COMPATIBLE[c as usize]),
        _ => None,
    }
}
