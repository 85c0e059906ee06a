//! JS8 frame packing and unpacking.
//!
//! A frame is 11 bytes carrying 87 bits (the last bit of byte 10 is unused):
//!
//! - Bytes 0..9: the 12-character payload, four characters to three bytes via
//!   `word = (c0 << 18) | (c1 << 12) | (c2 << 6) | c3`, stored big-endian.
//! - Byte 9, top 3 bits: the frame type.
//! - Byte 9 bottom 5 bits + byte 10 top 7 bits: the 12-bit CRC, computed over
//!   all 11 bytes with the CRC field zeroed, then embedded.

use bitvec::prelude::*;

use crate::alphabet::{pack_char, unpack_char, PAYLOAD_LEN};
use crate::constants::K;
use crate::crc;
use crate::error::Js8Error;

/// Bytes per frame.
pub const FRAME_BYTES: usize = 11;

/// Pack a 12-character payload and 3-bit frame type into an 11-byte frame.
pub fn pack(payload: &str, frame_type: u8) -> Result<[u8; FRAME_BYTES], Js8Error> {
    if frame_type > 7 {
        return Err(Js8Error::InvalidParameter { what: "frame type out of range" });
    }
    let chars: Vec<char> = payload.chars().collect();
    if chars.len() != PAYLOAD_LEN {
        return Err(Js8Error::LengthError { len: chars.len() });
    }

    let mut frame = [0u8; FRAME_BYTES];
    for (quad, out) in chars.chunks_exact(4).zip(frame.chunks_exact_mut(3)) {
        let word = (pack_char(quad[0])? as u32) << 18
            | (pack_char(quad[1])? as u32) << 12
            | (pack_char(quad[2])? as u32) << 6
            | pack_char(quad[3])? as u32;
        out[0] = (word >> 16) as u8;
        out[1] = (word >> 8) as u8;
        out[2] = word as u8;
    }

    frame[9] = (frame_type & 0x07) << 5;
    let crc = crc::checksum(&frame);
    frame[9] |= ((crc >> 7) & 0x1F) as u8;
    frame[10] = ((crc & 0x7F) << 1) as u8;
    Ok(frame)
}

/// Unpack a frame into its payload text and frame type.
///
/// Fails with `CrcMismatch` if the recomputed checksum disagrees with the
/// embedded one.
pub fn unpack(frame: &[u8; FRAME_BYTES]) -> Result<(String, u8), Js8Error> {
    if expected_checksum(frame) != embedded_checksum(frame) {
        return Err(Js8Error::CrcMismatch);
    }

    let mut text = String::with_capacity(PAYLOAD_LEN);
    for triple in frame[..9].chunks_exact(3) {
        let word =
            (triple[0] as u32) << 16 | (triple[1] as u32) << 8 | triple[2] as u32;
        for k in 0..4 {
            text.push(unpack_char(((word >> (18 - 6 * k)) & 0x3F) as u8));
        }
    }
    Ok((text, frame[9] >> 5))
}

/// The 12-bit checksum stored in a frame.
pub fn embedded_checksum(frame: &[u8; FRAME_BYTES]) -> u16 {
    ((frame[9] & 0x1F) as u16) << 7 | (frame[10] >> 1) as u16
}

/// The checksum a frame should carry: recomputed with the CRC field zeroed.
pub fn expected_checksum(frame: &[u8; FRAME_BYTES]) -> u16 {
    let mut cleared = *frame;
    cleared[9] &= 0xE0;
    cleared[10] = 0;
    crc::checksum(&cleared)
}

/// View a frame as its 87 message bits, MSB-first.
pub fn to_bits(frame: &[u8; FRAME_BYTES]) -> BitVec<u8, Msb0> {
    frame.view_bits::<Msb0>()[..K].to_bitvec()
}

/// Rebuild the 11-byte frame from 87 message bits.
pub fn from_bits(bits: &BitSlice<u8, Msb0>) -> [u8; FRAME_BYTES] {
    assert_eq!(bits.len(), K, "frame payload must be {} bits", K);
    let mut frame = [0u8; FRAME_BYTES];
    frame.view_bits_mut::<Msb0>()[..K].copy_from_bitslice(bits);
    frame
}
