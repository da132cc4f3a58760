//! Witness programs of versions 1 through 16, allowed once
//! `option_shutdown_anysegwit` is negotiated: `OP_1` through `OP_16` followed
//! by a single push of 2 to 40 bytes.
//!
//! Version 0 is deliberately not accepted here. Its standard forms are exactly
//! P2WPKH and P2WSH, which [`crate::template`] matches with their fixed lengths.

use crate::opcode::Opcode;

pub const MIN_WITNESS_PROGRAM_LEN: usize = 2;
pub const MAX_WITNESS_PROGRAM_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessProgram<'a> {
    version: u8,
    program: &'a [u8],
}

impl<'a> WitnessProgram<'a> {
    /// Always in `1..=16`.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn program(&self) -> &'a [u8] {
        self.program
    }
}

pub fn parse_witness_program(script: &[u8]) -> Option<WitnessProgram<'_>> {
    let [version_op, push_len, program @ ..] = script else {
        return None;
    };

    let version = match (Opcode { opcode: *version_op }).witness_version() {
        Some(v @ 1..=16) => v,
        _ => return None,
    };

    // the push must be all of the rest of the script
    let push_len = *push_len as usize;
    if program.len() != push_len {
        return None;
    }
    if !(MIN_WITNESS_PROGRAM_LEN..=MAX_WITNESS_PROGRAM_LEN).contains(&push_len) {
        return None;
    }

    Some(WitnessProgram { version, program })
}

pub fn is_valid_witness_program(script: &[u8]) -> bool {
    parse_witness_program(script).is_some()
}
