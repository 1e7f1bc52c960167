//! Fixed host-bound reply strings.
//!
//! Exact bytes real terminals answer these queries with.

/// Primary Device Attributes reply. Fixed per the terminal this crate
/// models; not derived from the live screen/mode state.
pub const PRIMARY_DA: &[u8] = b"\x1b[?60;1;6;9;15c";

/// Secondary Device Attributes: terminal type 1 (VT220), firmware
/// version 1, no ROM cartridge.
pub const SECONDARY_DA: &[u8] = b"\x1b[>1;1;0c";

/// Answerback for `ENQ` (`0x05`): a single `ACK` byte by convention; no
/// answerback string is configured.
pub const ENQ_REPLY: &[u8] = &[0x06];

/// `DSR 5` reply: operating status, always "OK".
pub const DSR_OK: &[u8] = b"\x1b[0n";
