//! Transmit-side encoder: payload text to a 79-tone frame.
//!
//! Pipeline: pad to 12 characters → pack with frame type and CRC-12 →
//! LDPC-encode to 174 bits → lay out the frame: Costas pilots at symbol
//! positions 0, 36 and 72, codeword bits three-per-symbol MSB-first in the
//! two data runs (message bits in the first run, parity in the second).

use bitvec::prelude::*;

use crate::alphabet::pad_payload;
use crate::constants::{Mode, N, ND, NN};
use crate::error::Js8Error;
use crate::frame;
use crate::ldpc;

/// Encode `message` as a NORMAL-mode tone sequence.
///
/// Messages shorter than 12 characters are padded with `'-'`; longer ones
/// fail with `LengthError`, characters outside the alphabet with
/// `InvalidCharacter`, and `frame_type > 7` with `InvalidParameter`.
pub fn encode(message: &str, frame_type: u8) -> Result<[u8; NN], Js8Error> {
    encode_for_mode(message, frame_type, Mode::Normal)
}

/// Encode `message` with the Costas variant of the given mode.
pub fn encode_for_mode(message: &str, frame_type: u8, mode: Mode) -> Result<[u8; NN], Js8Error> {
    let payload = pad_payload(message)?;
    let packed = frame::pack(&payload, frame_type)?;
    let message_bits = frame::to_bits(&packed);

    let mut codeword_storage = [0u8; 22];
    let codeword = &mut codeword_storage.view_bits_mut::<Msb0>()[..N];
    ldpc::encode(&message_bits, codeword);

    Ok(tones_from_codeword(codeword, mode))
}

/// Map a 174-bit codeword onto the 79-symbol frame for `mode`.
pub fn tones_from_codeword(codeword: &BitSlice<u8, Msb0>, mode: Mode) -> [u8; NN] {
    assert_eq!(codeword.len(), N, "codeword must be {} bits", N);
    let costas = mode.params().costas_tones();

    let mut tones = [0u8; NN];
    tones[0..7].copy_from_slice(&costas[0]);
    tones[36..43].copy_from_slice(&costas[1]);
    tones[72..79].copy_from_slice(&costas[2]);

    let mut position = 7;
    for j in 0..ND {
        if j == 29 {
            position += 7; // skip the middle pilot
        }
        let i = 3 * j;
        tones[position] = (u8::from(codeword[i]) << 2)
            | (u8::from(codeword[i + 1]) << 1)
            | u8::from(codeword[i + 2]);
        position += 1;
    }
    tones
}
