// patterns.rs - Site-pattern classes and the 256-cell partition table

use serde::{Deserialize, Serialize};

/// Number of site-pattern classes for four taxa
pub const NUM_PATTERNS: usize = 15;

/// Column names of the pattern classes, in output order.
///
/// Letters give the resolved base of (outgroup, P1, Hybrid, P2); equal letters
/// mean equal bases.
pub const PATTERN_NAMES: [&str; NUM_PATTERNS] = [
    "AAAA", "AAAB", "AABA", "AABB", "AABC", "ABAA", "ABAB", "ABAC", "ABBA", "BAAA", "ABBC", "CABC",
    "BACA", "BCAA", "ABCD",
];

pub const AAAA: usize = 0;
pub const AAAB: usize = 1;
pub const AABA: usize = 2;
pub const AABB: usize = 3;
pub const AABC: usize = 4;
pub const ABAA: usize = 5;
pub const ABAB: usize = 6;
pub const ABAC: usize = 7;
pub const ABBA: usize = 8;
pub const BAAA: usize = 9;
pub const ABBC: usize = 10;
pub const CABC: usize = 11;
pub const BACA: usize = 12;
pub const BCAA: usize = 13;
pub const ABCD: usize = 14;

/// Largest tolerated relative gap between pattern total and observations
pub const CONSISTENCY_TOLERANCE: f64 = 1e-4;

const fn classify(out: usize, p1: usize, hyb: usize, p2: usize) -> u8 {
    let op1 = out == p1;
    let ohy = out == hyb;
    let op2 = out == p2;
    let p1hy = p1 == hyb;
    let p1p2 = p1 == p2;
    let hyp2 = hyb == p2;

    let class = if op1 && ohy && op2 {
        AAAA
    } else if op1 && ohy {
        AAAB
    } else if op1 && op2 {
        AABA
    } else if op1 && hyp2 {
        AABB
    } else if op1 {
        AABC
    } else if ohy && op2 {
        ABAA
    } else if ohy && p1p2 {
        ABAB
    } else if ohy {
        ABAC
    } else if op2 && p1hy {
        ABBA
    } else if p1hy && p1p2 {
        BAAA
    } else if p1hy {
        ABBC
    } else if op2 {
        CABC
    } else if p1p2 {
        BACA
    } else if hyp2 {
        BCAA
    } else {
        ABCD
    };
    class as u8
}

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut row = 0;
    while row < 16 {
        let mut col = 0;
        while col < 16 {
            table[row * 16 + col] = classify(row / 4, row % 4, col / 4, col % 4);
            col += 1;
        }
        row += 1;
    }
    table
}

/// Pattern class of every count-matrix cell, indexed `row * 16 + col` where
/// `row = out*4 + p1` and `col = hyb*4 + p2`.
pub static PATTERN_TABLE: [u8; 256] = build_table();

/// The fifteen pattern-class sums of one quartet
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternCounts {
    pub values: [f64; NUM_PATTERNS],
}

impl PatternCounts {
    /// Collapse a 16×16 count matrix into the fifteen class sums
    pub fn from_cells(cells: &[[f64; 16]; 16]) -> Self {
        let mut values = [0.0; NUM_PATTERNS];
        for (row, cols) in cells.iter().enumerate() {
            for (col, &count) in cols.iter().enumerate() {
                values[PATTERN_TABLE[row * 16 + col] as usize] += count;
            }
        }
        Self { values }
    }

    #[inline]
    pub fn get(&self, pattern: usize) -> f64 {
        self.values[pattern]
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Relative difference between the pattern total and the observation count
    pub fn residual(&self, observations: f64) -> f64 {
        (self.total() / observations - 1.0).abs()
    }

    /// True when the sums account for all observations within tolerance
    pub fn is_consistent(&self, observations: f64) -> bool {
        observations > 0.0 && self.residual(observations) <= CONSISTENCY_TOLERANCE
    }

    /// Patterson's D statistic, `(ABBA - ABAB) / (ABBA + ABAB)`
    pub fn abba_baba(&self) -> f64 {
        let abba = self.get(ABBA);
        let abab = self.get(ABAB);
        (abba - abab) / (abba + abab)
    }
}
