//! LDPC encoder.

use bitvec::prelude::*;

use super::constants::*;

/// Encode 87 message bits into a 174-bit codeword.
///
/// The codeword is the message followed by 87 parity bits. Parity is
/// produced by walking the checks in row order: check `c` determines parity
/// bit `c` from the message bits and the previously determined parity bit
/// on that row, so one pass suffices.
///
/// # Arguments
/// * `message` - 87-bit message as a BitSlice
/// * `codeword` - output buffer for the 174-bit codeword
pub fn encode(message: &BitSlice<u8, Msb0>, codeword: &mut BitSlice<u8, Msb0>) {
    assert_eq!(message.len(), K, "message must be {} bits", K);
    assert_eq!(codeword.len(), N, "codeword must be {} bits", N);

    codeword[..K].copy_from_bitslice(message);

    for c in 0..M {
        let own = (K + c) as u8;
        let mut parity = false;
        for j in 0..NRW[c] {
            let v = NM[c][j];
            if v != own {
                parity ^= codeword[v as usize];
            }
        }
        codeword.set(K + c, parity);
    }
}
