//! Checks whether a scriptpubkey offered in a channel `shutdown` message is
//! one the negotiated features allow.

pub mod cursor;
pub mod op_return;
pub mod opcode;
pub mod script;
mod shutdown;
pub mod template;
pub mod util;
pub mod witness;

pub use crate::{
    op_return::{is_valid_op_return, op_return_payload},
    script::{ParseAsmError, ParseScriptError, ParsedScript, ScriptElem, assemble},
    shutdown::{
        ShutdownFeatures, ShutdownScriptKind, classify_shutdown_script,
        valid_shutdown_scriptpubkey, valid_shutdown_scriptpubkey_with,
    },
    template::{ScriptClassifier, StandardScript, StandardTemplates},
    witness::{WitnessProgram, is_valid_witness_program, parse_witness_program},
};
