//! JS8 weak-signal modem core.
//!
//! Implements the signal-processing and coding heart of a JS8 receive and
//! transmit chain: candidate detection against a fitted noise baseline,
//! Costas-array synchronization, coherent 8-FSK demodulation to soft bits,
//! LDPC(174,87) belief-propagation decoding, and the symmetric transmit
//! path from a 12-character payload down to a 79-tone frame.
//!
//! The FFT engine is a pluggable collaborator (see [`spectrum`]); everything
//! else is self-contained.

pub mod alphabet;
pub mod baseline;
pub mod candidate;
pub mod constants;
pub mod crc;
pub mod decoder;
pub mod demod;
pub mod downmix;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod ldpc;
pub mod modulation;
pub mod spectrum;
pub mod sync;
pub mod tracing_init;
pub mod wav;

pub use constants::Mode;
pub use decoder::{DecodedMessage, Decoder};
pub use encoder::encode;
pub use error::Js8Error;
