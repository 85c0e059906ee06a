//! The (174,87) parity graph as static adjacency tables.
//!
//! 174 variable nodes (87 message bits followed by 87 parity bits) against
//! 87 check nodes. The parity block is a staircase: check `c` covers parity
//! bit `c` and, for `c > 0`, parity bit `c - 1`, which lets the encoder
//! produce parity in a single forward pass. Message variables have degree
//! exactly 3; no two variables share more than one check.
//!
//! `NM`/`NRW` and `MN` are inverses of one another and are validated against
//! each other in the tests below.

/// Total coded bits.
pub const N: usize = 174;
/// Message bits.
pub const K: usize = 87;
/// Parity checks.
pub const M: usize = N - K;

/// Maximum variable nodes on one check.
pub const MAX_ROW_VARS: usize = 7;
/// Maximum checks on one variable.
pub const NCW: usize = 3;

/// Belief-propagation iteration cap.
pub const BP_MAX_ITERATIONS: usize = 25;

/// Check-node row weights: number of variable nodes on each of the 87 checks.
pub const NRW: [usize; 87] = [
    4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 4, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 6, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 6, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 4, 5, 5, 5, 5, 5, 5,
    5, 5, 5,
];

/// Check-to-variable adjacency: `NM[c]` lists the variable nodes on check `c`
/// (first `NRW[c]` entries valid, remainder zero-padded).
pub const NM: [[u8; 7]; 87] = [
    [ 28,  38,  62,  87,   0,   0,   0],
    [ 18,  34,  64,  87,  88,   0,   0],
    [ 21,  41,  60,  88,  89,   0,   0],
    [ 10,  37,  74,  89,  90,   0,   0],
    [ 20,  48,  73,  90,  91,   0,   0],
    [ 16,  30,  71,  91,  92,   0,   0],
    [ 27,  46,  83,  92,  93,   0,   0],
    [ 13,  54,  71,  93,  94,   0,   0],
    [  5,  31,  61,  94,  95,   0,   0],
    [  0,  43,  67,  95,  96,   0,   0],
    [  5,  35,  59,  96,  97,   0,   0],
    [ 28,  45,  77,  97,  98,   0,   0],
    [  1,  56,  66,  98,  99,   0,   0],
    [ 22,  29,  85,  99, 100,   0,   0],
    [  8,  45,  58, 100, 101,   0,   0],
    [ 14,  56,  68, 101, 102,   0,   0],
    [ 26,  41,  76, 102, 103,   0,   0],
    [ 12,  36,  67, 103, 104,   0,   0],
    [ 28,  34,  70, 104, 105,   0,   0],
    [  9,  52,  75, 105, 106,   0,   0],
    [  7,  38,  58, 106, 107,   0,   0],
    [ 18,  43, 107, 108,   0,   0,   0],
    [  4,  52,  85, 108, 109,   0,   0],
    [ 13,  57,  65, 109, 110,   0,   0],
    [ 16,  29,  84, 110, 111,   0,   0],
    [  3,  30,  65, 111, 112,   0,   0],
    [ 23,  40,  78, 112, 113,   0,   0],
    [ 27,  57,  69, 113, 114,   0,   0],
    [ 25,  52,  67, 114, 115,   0,   0],
    [  3,  50,  61, 115, 116,   0,   0],
    [  2,  33,  66, 116, 117,   0,   0],
    [ 16,  45,  61, 117, 118,   0,   0],
    [ 12,  46,  76, 118, 119,   0,   0],
    [ 22,  55,  69, 119, 120,   0,   0],
    [  1,  49,  70,  86, 120, 121,   0],
    [ 24,  33,  76, 121, 122,   0,   0],
    [  2,  40,  73, 122, 123,   0,   0],
    [ 11,  44,  72, 123, 124,   0,   0],
    [ 22,  32,  80, 124, 125,   0,   0],
    [ 18,  48,  81, 125, 126,   0,   0],
    [ 15,  46,  82, 126, 127,   0,   0],
    [  1,  54,  68, 127, 128,   0,   0],
    [  4,  32,  77, 128, 129,   0,   0],
    [ 21,  55,  71, 129, 130,   0,   0],
    [  8,  51,  83, 130, 131,   0,   0],
    [ 15,  57,  73, 131, 132,   0,   0],
    [ 12,  48,  72, 132, 133,   0,   0],
    [  0,  32,  83, 133, 134,   0,   0],
    [ 15,  41,  75, 134, 135,   0,   0],
    [  2,  35,  60, 135, 136,   0,   0],
    [  9,  37,  79, 136, 137,   0,   0],
    [ 26,  55,  80, 137, 138,   0,   0],
    [  6,  47,  81, 138, 139,   0,   0],
    [ 25,  43,  86, 139, 140,   0,   0],
    [  5,  42,  62, 140, 141,   0,   0],
    [ 17,  50,  69, 141, 142,   0,   0],
    [ 20,  51,  77, 142, 143,   0,   0],
    [  0,  53,  74, 143, 144,   0,   0],
    [ 23,  36,  75, 144, 145,   0,   0],
    [ 19,  31,  62, 145, 146,   0,   0],
    [  6,  30,  60, 146, 147,   0,   0],
    [ 21,  56,  63, 147, 148,   0,   0],
    [ 10,  44,  78, 148, 149,   0,   0],
    [ 19,  40,  79, 149, 150,   0,   0],
    [  7,  34,  63, 150, 151,   0,   0],
    [ 11,  47,  85, 151, 152,   0,   0],
    [ 26,  53,  84, 152, 153,   0,   0],
    [ 17,  31,  80,  86, 153, 154,   0],
    [ 14,  37,  59, 154, 155,   0,   0],
    [  7,  39,  66, 155, 156,   0,   0],
    [ 13,  42,  79, 156, 157,   0,   0],
    [ 17,  39,  64, 157, 158,   0,   0],
    [ 24,  49,  59, 158, 159,   0,   0],
    [ 27,  39,  58, 159, 160,   0,   0],
    [ 20,  49,  74, 160, 161,   0,   0],
    [ 19,  51,  78, 161, 162,   0,   0],
    [ 23,  54,  82, 162, 163,   0,   0],
    [ 25,  44, 163, 164,   0,   0,   0],
    [ 14,  50,  65, 164, 165,   0,   0],
    [ 11,  33,  81, 165, 166,   0,   0],
    [  9,  53,  64, 166, 167,   0,   0],
    [  6,  35,  82, 167, 168,   0,   0],
    [ 10,  47,  63, 168, 169,   0,   0],
    [  8,  29,  70, 169, 170,   0,   0],
    [  4,  36,  72, 170, 171,   0,   0],
    [ 24,  38,  68, 171, 172,   0,   0],
    [  3,  42,  84, 172, 173,   0,   0],
];

/// Variable-to-check adjacency: `MN[v]` lists the checks incident to variable
/// `v`; unused slots hold the sentinel -1 (parity variables have degree 2 or 1).
pub const MN: [[i16; 3]; 174] = [
    [  9,  47,  57],
    [ 12,  34,  41],
    [ 30,  36,  49],
    [ 25,  29,  86],
    [ 22,  42,  84],
    [  8,  10,  54],
    [ 52,  60,  81],
    [ 20,  64,  69],
    [ 14,  44,  83],
    [ 19,  50,  80],
    [  3,  62,  82],
    [ 37,  65,  79],
    [ 17,  32,  46],
    [  7,  23,  70],
    [ 15,  68,  78],
    [ 40,  45,  48],
    [  5,  24,  31],
    [ 55,  67,  71],
    [  1,  21,  39],
    [ 59,  63,  75],
    [  4,  56,  74],
    [  2,  43,  61],
    [ 13,  33,  38],
    [ 26,  58,  76],
    [ 35,  72,  85],
    [ 28,  53,  77],
    [ 16,  51,  66],
    [  6,  27,  73],
    [  0,  11,  18],
    [ 13,  24,  83],
    [  5,  25,  60],
    [  8,  59,  67],
    [ 38,  42,  47],
    [ 30,  35,  79],
    [  1,  18,  64],
    [ 10,  49,  81],
    [ 17,  58,  84],
    [  3,  50,  68],
    [  0,  20,  85],
    [ 69,  71,  73],
    [ 26,  36,  63],
    [  2,  16,  48],
    [ 54,  70,  86],
    [  9,  21,  53],
    [ 37,  62,  77],
    [ 11,  14,  31],
    [  6,  32,  40],
    [ 52,  65,  82],
    [  4,  39,  46],
    [ 34,  72,  74],
    [ 29,  55,  78],
    [ 44,  56,  75],
    [ 19,  22,  28],
    [ 57,  66,  80],
    [  7,  41,  76],
    [ 33,  43,  51],
    [ 12,  15,  61],
    [ 23,  27,  45],
    [ 14,  20,  73],
    [ 10,  68,  72],
    [  2,  49,  60],
    [  8,  29,  31],
    [  0,  54,  59],
    [ 61,  64,  82],
    [  1,  71,  80],
    [ 23,  25,  78],
    [ 12,  30,  69],
    [  9,  17,  28],
    [ 15,  41,  85],
    [ 27,  33,  55],
    [ 18,  34,  83],
    [  5,   7,  43],
    [ 37,  46,  84],
    [  4,  36,  45],
    [  3,  57,  74],
    [ 19,  48,  58],
    [ 16,  32,  35],
    [ 11,  42,  56],
    [ 26,  62,  75],
    [ 50,  63,  70],
    [ 38,  51,  67],
    [ 39,  52,  79],
    [ 40,  76,  81],
    [  6,  44,  47],
    [ 24,  66,  86],
    [ 13,  22,  65],
    [ 34,  53,  67],
    [  0,   1,  -1],
    [  1,   2,  -1],
    [  2,   3,  -1],
    [  3,   4,  -1],
    [  4,   5,  -1],
    [  5,   6,  -1],
    [  6,   7,  -1],
    [  7,   8,  -1],
    [  8,   9,  -1],
    [  9,  10,  -1],
    [ 10,  11,  -1],
    [ 11,  12,  -1],
    [ 12,  13,  -1],
    [ 13,  14,  -1],
    [ 14,  15,  -1],
    [ 15,  16,  -1],
    [ 16,  17,  -1],
    [ 17,  18,  -1],
    [ 18,  19,  -1],
    [ 19,  20,  -1],
    [ 20,  21,  -1],
    [ 21,  22,  -1],
    [ 22,  23,  -1],
    [ 23,  24,  -1],
    [ 24,  25,  -1],
    [ 25,  26,  -1],
    [ 26,  27,  -1],
    [ 27,  28,  -1],
    [ 28,  29,  -1],
    [ 29,  30,  -1],
    [ 30,  31,  -1],
    [ 31,  32,  -1],
    [ 32,  33,  -1],
    [ 33,  34,  -1],
    [ 34,  35,  -1],
    [ 35,  36,  -1],
    [ 36,  37,  -1],
    [ 37,  38,  -1],
    [ 38,  39,  -1],
    [ 39,  40,  -1],
    [ 40,  41,  -1],
    [ 41,  42,  -1],
    [ 42,  43,  -1],
    [ 43,  44,  -1],
    [ 44,  45,  -1],
    [ 45,  46,  -1],
    [ 46,  47,  -1],
    [ 47,  48,  -1],
    [ 48,  49,  -1],
    [ 49,  50,  -1],
    [ 50,  51,  -1],
    [ 51,  52,  -1],
    [ 52,  53,  -1],
    [ 53,  54,  -1],
    [ 54,  55,  -1],
    [ 55,  56,  -1],
    [ 56,  57,  -1],
    [ 57,  58,  -1],
    [ 58,  59,  -1],
    [ 59,  60,  -1],
    [ 60,  61,  -1],
    [ 61,  62,  -1],
    [ 62,  63,  -1],
    [ 63,  64,  -1],
    [ 64,  65,  -1],
    [ 65,  66,  -1],
    [ 66,  67,  -1],
    [ 67,  68,  -1],
    [ 68,  69,  -1],
    [ 69,  70,  -1],
    [ 70,  71,  -1],
    [ 71,  72,  -1],
    [ 72,  73,  -1],
    [ 73,  74,  -1],
    [ 74,  75,  -1],
    [ 75,  76,  -1],
    [ 76,  77,  -1],
    [ 77,  78,  -1],
    [ 78,  79,  -1],
    [ 79,  80,  -1],
    [ 80,  81,  -1],
    [ 81,  82,  -1],
    [ 82,  83,  -1],
    [ 83,  84,  -1],
    [ 84,  85,  -1],
    [ 85,  86,  -1],
    [ 86,  -1,  -1],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_inverse() {
        // Every NM entry appears in the corresponding MN row and vice versa
        for c in 0..M {
            for j in 0..NRW[c] {
                let v = NM[c][j] as usize;
                assert!(
                    MN[v].iter().any(|&x| x == c as i16),
                    "check {} lists variable {} but not vice versa",
                    c,
                    v
                );
            }
        }
        for v in 0..N {
            for &c in MN[v].iter().filter(|&&c| c >= 0) {
                let c = c as usize;
                assert!(
                    NM[c][..NRW[c]].iter().any(|&x| x as usize == v),
                    "variable {} lists check {} but not vice versa",
                    v,
                    c
                );
            }
        }
    }

    #[test]
    fn test_degree_bounds() {
        for c in 0..M {
            assert!(NRW[c] <= MAX_ROW_VARS);
        }
        for v in 0..K {
            // Message variables have degree exactly 3
            assert!(MN[v].iter().all(|&c| c >= 0), "message variable {}", v);
        }
        for v in K..N {
            let degree = MN[v].iter().filter(|&&c| c >= 0).count();
            assert!((1..=2).contains(&degree), "parity variable {}", v);
        }
    }

    #[test]
    fn test_staircase_parity_block() {
        for c in 0..M {
            let row = &NM[c][..NRW[c]];
            assert!(row.contains(&((K + c) as u8)), "check {} misses its parity bit", c);
            if c > 0 {
                assert!(row.contains(&((K + c - 1) as u8)), "check {} misses the previous parity bit", c);
            }
        }
    }
}
