//! LDPC(174,87) error correction.
//!
//! **Encoding**: 87 message bits gain 87 parity bits by direct application
//! of the parity constraints; the staircase parity block makes this a single
//! forward pass with no back-substitution.
//!
//! **Decoding**: sum-product belief propagation over the sparse bipartite
//! graph in [`constants`], with soft input (LLRs, positive favoring bit 1)
//! and early termination on a zero syndrome.

pub mod constants;
mod decode;
mod encode;

pub use constants::{BP_MAX_ITERATIONS, K, M, N};
pub use decode::{decode, BpDecode};
pub use encode::encode;

use bitvec::prelude::*;

/// Count unsatisfied parity checks for a hard-decision codeword.
pub fn syndrome_weight(codeword: &BitSlice<u8, Msb0>) -> usize {
    assert_eq!(codeword.len(), N, "codeword must be {} bits", N);
    let mut ncheck = 0;
    for c in 0..M {
        let mut parity = false;
        for j in 0..constants::NRW[c] {
            parity ^= codeword[constants::NM[c][j] as usize];
        }
        if parity {
            ncheck += 1;
        }
    }
    ncheck
}
