use snafu::Snafu;

/// Errors surfaced by the modem core.
///
/// Only `InvalidParameter` escapes the decode entry point; the receive-side
/// kinds (`CrcMismatch`, `DecodeFailed`, `SyncFailed`) are recovered inside
/// the candidate loop and cause the offending candidate to be skipped.
#[derive(Debug, Snafu, Clone, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum Js8Error {
    /// Character outside the 64-symbol JS8 alphabet
    #[snafu(display("invalid character '{ch}' in message"))]
    InvalidCharacter { ch: char },

    /// Payload longer than one frame
    #[snafu(display("message too long: {len} characters (max 12)"))]
    LengthError { len: usize },

    /// Frame checksum failed after decode
    #[snafu(display("frame CRC mismatch"))]
    CrcMismatch,

    /// Belief propagation exhausted its iterations without a valid codeword
    #[snafu(display("LDPC decode failed with {ncheck} unsatisfied checks"))]
    DecodeFailed { ncheck: usize },

    /// Best Costas correlation stayed below the sync threshold
    #[snafu(display("Costas sync failed (best score {score:.2})"))]
    SyncFailed { score: f32 },

    /// Malformed argument at an API entry point
    #[snafu(display("invalid parameter: {what}"))]
    InvalidParameter { what: &'static str },
}
