//! Belief-propagation (sum-product) decoder.
//!
//! Internally the messages are carried as `log(P0/P1)`, the domain in which
//! the check update is the plain tanh product identity
//! `tov = 2·atanh(∏ tanh(toc/2))` for every check degree. The public LLRs
//! are positive-favors-1, so the input is negated on entry and the hard
//! decision reads bit 1 from a negative total belief.

use bitvec::prelude::*;
use tracing::trace;

use super::constants::*;
use crate::error::Js8Error;

/// LLR clip applied before the `tanh` half: keeps `atanh` finite.
const LLR_CLIP: f64 = 19.07;

/// Guard on the check-update product magnitude.
const PRODUCT_CLIP: f64 = 0.999_999_999_999;

/// Outcome of a belief-propagation pass.
#[derive(Debug, Clone)]
pub struct BpDecode {
    /// Unsatisfied checks at termination; 0 means a valid codeword.
    pub ncheck: usize,
    /// Iterations consumed.
    pub iterations: usize,
    /// The 87 recovered message bits.
    pub message: BitVec<u8, Msb0>,
    /// The full 174-bit hard decision.
    pub codeword: BitVec<u8, Msb0>,
}

impl BpDecode {
    /// True when every parity check is satisfied.
    pub fn converged(&self) -> bool {
        self.ncheck == 0
    }
}

/// Decode 174 LLRs (positive favoring bit 1) by sum-product message passing.
///
/// Runs at most [`BP_MAX_ITERATIONS`] passes. Each pass updates the
/// check-to-variable messages, takes a hard decision on the total bit
/// beliefs, and exits early once the syndrome is clean. On exhaustion the
/// result carries the remaining unsatisfied-check count; the caller decides
/// whether a partial result is acceptable.
///
/// Internally works in f64; inputs are clipped to ±19.07 so the `atanh`
/// half of the check update cannot overflow.
pub fn decode(llr: &[f32]) -> Result<BpDecode, Js8Error> {
    if llr.len() != N {
        return Err(Js8Error::InvalidParameter { what: "LLR vector must have 174 entries" });
    }

    // Working copy in log(P0/P1): negate the positive-favors-1 input.
    let llr: Vec<f64> =
        llr.iter().map(|&x| (-(x as f64)).clamp(-LLR_CLIP, LLR_CLIP)).collect();

    // toc[c][j]: variable-to-check message on check c's j-th slot.
    // tov[v][i]: check-to-variable message on variable v's i-th slot.
    let mut toc = [[0.0f64; MAX_ROW_VARS]; M];
    let mut tov = [[0.0f64; NCW]; N];
    let mut zn = [0.0f64; N];

    for c in 0..M {
        for j in 0..NRW[c] {
            toc[c][j] = llr[NM[c][j] as usize];
        }
    }

    let mut codeword = BitVec::<u8, Msb0>::repeat(false, N);
    let mut ncheck = M;

    for iter in 0..BP_MAX_ITERATIONS {
        // Check update: product of tanh over the other variables on the row.
        for v in 0..N {
            for (i, &c) in MN[v].iter().enumerate() {
                if c < 0 {
                    continue;
                }
                let c = c as usize;
                let mut product = 1.0f64;
                for j in 0..NRW[c] {
                    if NM[c][j] as usize != v {
                        product *= (toc[c][j] / 2.0).tanh();
                    }
                }
                let product = product.clamp(-PRODUCT_CLIP, PRODUCT_CLIP);
                tov[v][i] = 2.0 * product.atanh();
            }
        }

        // Hard decision on the total belief per bit (log(P0/P1) < 0 ⇒ 1).
        for v in 0..N {
            zn[v] = llr[v] + tov[v].iter().sum::<f64>();
            codeword.set(v, zn[v] < 0.0);
        }

        // Syndrome check.
        ncheck = 0;
        for c in 0..M {
            let mut parity = false;
            for j in 0..NRW[c] {
                parity ^= codeword[NM[c][j] as usize];
            }
            if parity {
                ncheck += 1;
            }
        }
        if ncheck == 0 {
            trace!(iterations = iter, "BP converged");
            return Ok(BpDecode {
                ncheck: 0,
                iterations: iter,
                message: codeword[..K].to_bitvec(),
                codeword,
            });
        }

        // Variable update: total belief minus this check's own contribution.
        for c in 0..M {
            for j in 0..NRW[c] {
                let v = NM[c][j] as usize;
                let slot = MN[v].iter().position(|&x| x == c as i16).unwrap_or(0);
                toc[c][j] = zn[v] - tov[v][slot];
            }
        }
    }

    trace!(ncheck, "BP exhausted without convergence");
    Ok(BpDecode {
        ncheck,
        iterations: BP_MAX_ITERATIONS,
        message: codeword[..K].to_bitvec(),
        codeword,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ldpc::encode;

    fn llrs_for(codeword: &BitSlice<u8, Msb0>, magnitude: f32) -> Vec<f32> {
        codeword.iter().by_vals().map(|b| if b { magnitude } else { -magnitude }).collect()
    }

    #[test]
    fn test_check_update_sign_per_degree() {
        // A check constrains its bits to even parity, so with every other
        // incident bit leaning the same way, the outgoing message must lean
        // toward the XOR of those bits regardless of how many there are.
        // Exercised indirectly: one uncertain bit among strong correct ones
        // must be pulled to the codeword value on the first pass, for both
        // a zero codeword (XOR of ones = 0 cases) and a dense one.
        for pattern in [0usize, 1] {
            let mut message_storage = [0u8; 11];
            let message = &mut message_storage.view_bits_mut::<Msb0>()[..K];
            if pattern == 1 {
                for i in 0..K {
                    message.set(i, i % 2 == 0);
                }
            }
            let mut codeword_storage = [0u8; 22];
            let codeword = &mut codeword_storage.view_bits_mut::<Msb0>()[..N];
            encode(message, codeword);

            let mut llr = llrs_for(codeword, 6.0);
            // Erase one bit entirely; only the check messages can restore it
            llr[50] = 0.0;
            let result = decode(&llr).unwrap();
            assert!(result.converged(), "pattern {}: ncheck {}", pattern, result.ncheck);
            assert_eq!(result.codeword[50], codeword[50], "pattern {}", pattern);
        }
    }

    #[test]
    fn test_decode_perfect_codeword() {
        let mut message_storage = [0u8; 11];
        let message = &mut message_storage.view_bits_mut::<Msb0>()[..K];
        for i in [2usize, 9, 20, 41, 55, 83] {
            message.set(i, true);
        }
        let mut codeword_storage = [0u8; 22];
        let codeword = &mut codeword_storage.view_bits_mut::<Msb0>()[..N];
        encode(message, codeword);

        let llr = llrs_for(codeword, 10.0);
        let result = decode(&llr).unwrap();
        assert!(result.converged());
        assert_eq!(result.iterations, 0, "clean input should decode immediately");
        assert_eq!(&result.message[..], &message[..]);
        assert_eq!(&result.codeword[..], &codeword[..]);
    }

    #[test]
    fn test_decode_two_weak_flips() {
        // All-zero codeword; flip bits 0 and 100 and mark them low-confidence
        let codeword = BitVec::<u8, Msb0>::repeat(false, N);
        let mut received = codeword.clone();
        received.set(0, true);
        received.set(100, true);

        let mut llr = llrs_for(&received, 4.0);
        llr[0] = llr[0].signum() * 1.0;
        llr[100] = llr[100].signum() * 1.0;

        let result = decode(&llr).unwrap();
        assert!(result.converged(), "ncheck = {}", result.ncheck);
        assert!(result.iterations < BP_MAX_ITERATIONS);
        assert!(result.message.not_any());
        assert!(result.codeword.not_any());
    }

    #[test]
    fn test_decode_strong_flips() {
        let mut message_storage = [0u8; 11];
        let message = &mut message_storage.view_bits_mut::<Msb0>()[..K];
        for i in (0..K).step_by(5) {
            message.set(i, true);
        }
        let mut codeword_storage = [0u8; 22];
        let codeword = &mut codeword_storage.view_bits_mut::<Msb0>()[..N];
        encode(message, codeword);

        let mut received = codeword.to_bitvec();
        for i in [12usize, 90, 150] {
            let flipped = !received[i];
            received.set(i, flipped);
        }
        let mut llr = llrs_for(&received, 4.0);
        for i in [12usize, 90, 150] {
            llr[i] = llr[i].signum() * 1.0;
        }

        let result = decode(&llr).unwrap();
        assert!(result.converged());
        assert_eq!(&result.codeword[..], &codeword[..]);
    }

    /// Gaussian-channel LLRs for the codeword of the message with bits set
    /// at every third position (sigma 0.65). Thirteen of the 174 hard
    /// decisions are wrong going in, so the decoder must run several real
    /// message-passing iterations; a sign error anywhere in the check
    /// update diverges instead of converging.
    #[test]
    fn test_decode_noisy_channel_llrs() {
        let llr: Vec<f32> = vec![
            2.593, -9.002, -2.768, 6.014, -6.229, -5.588, 1.139, 0.282, -9.806, 3.798,
            -6.031, -2.264, 5.350, -4.667, -8.080, 6.803, -5.753, -8.423, 6.753, -4.233,
            -5.465, 4.625, -5.524, -3.691, -4.112, -1.123, -5.348, 6.468, -7.289, -5.486,
            0.126, -8.954, -1.597, 5.874, -7.172, -4.600, 6.963, -7.460, -4.614, 8.958,
            -8.415, -1.286, 5.782, -4.379, -10.024, 6.875, -3.722, -2.565, 0.317, -0.272,
            -2.758, 1.616, -9.900, -6.936, 4.799, -5.267, -6.830, 8.350, -4.363, -2.799,
            -1.084, -4.807, -6.214, 5.942, -2.774, -7.360, -0.145, -6.217, -0.383, 4.770,
            -7.362, -4.829, 2.614, 3.042, -3.608, 5.281, -7.974, -2.659, 9.020, -1.036,
            -5.525, 2.432, -7.955, -3.755, 6.503, -7.717, 1.241, -2.575, 4.646, 1.891,
            2.781, -4.554, 2.374, -5.613, 6.687, 3.683, -6.394, -4.253, 5.625, -4.697,
            3.082, 3.254, 2.484, 3.258, 4.236, 2.160, 4.349, 3.427, -2.247, -6.989,
            4.026, -5.281, -3.950, 1.962, -9.854, -6.236, 2.776, -3.511, 2.580, 6.714,
            -7.364, -6.310, -5.989, -5.332, 6.920, 6.241, -1.790, 2.245, -2.293, -1.062,
            -4.876, -6.153, -0.966, 3.034, -8.478, -3.408, 7.306, 1.687, -2.337, -7.573,
            -11.026, 7.656, -3.895, 4.156, -7.761, -8.950, -4.274, 5.152, 0.274, -5.612,
            -4.226, 3.101, -1.970, 1.501, -7.469, -6.417, -4.831, 3.166, -6.178, 3.425,
            0.547, 2.684, 1.207, -12.774, -3.990, -5.687, -5.944, 6.878, -3.983, 4.661,
            11.061, 0.206, -2.493, 7.726,
        ];
        assert_eq!(llr.len(), N);

        let mut message_storage = [0u8; 11];
        let message = &mut message_storage.view_bits_mut::<Msb0>()[..K];
        for i in (0..K).step_by(3) {
            message.set(i, true);
        }
        let mut codeword_storage = [0u8; 22];
        let codeword = &mut codeword_storage.view_bits_mut::<Msb0>()[..N];
        encode(message, codeword);

        let hard_errors = (0..N).filter(|&v| (llr[v] > 0.0) != codeword[v]).count();
        assert!(hard_errors >= 10, "vector lost its errors: {}", hard_errors);

        let result = decode(&llr).unwrap();
        assert!(result.converged(), "ncheck = {}", result.ncheck);
        assert!(result.iterations >= 1, "must take real iterations");
        assert_eq!(&result.codeword[..], &codeword[..]);
        assert_eq!(&result.message[..], &message[..]);
    }

    #[test]
    fn test_decode_garbage_reports_failure() {
        // Alternating strong LLRs are nowhere near a codeword
        let llr: Vec<f32> =
            (0..N).map(|i| if i % 2 == 0 { 8.0 } else { -8.0 }).collect();
        let result = decode(&llr).unwrap();
        assert!(result.ncheck > 0);
        assert_eq!(result.iterations, BP_MAX_ITERATIONS);
    }

    #[test]
    fn test_decode_handles_saturated_llrs() {
        // Inputs beyond the clip must not produce NaN or infinite messages
        let codeword = BitVec::<u8, Msb0>::repeat(false, N);
        let llr = llrs_for(&codeword, 1000.0);
        let result = decode(&llr).unwrap();
        assert!(result.converged());
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(decode(&[0.0; 100]).is_err());
    }
}
