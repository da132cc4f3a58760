//! The bounded `OP_RETURN` form allowed once `option_simple_close` is negotiated:
//!
//! * `OP_RETURN` followed by `6` to `75` inclusive, then exactly that many bytes
//! * `OP_RETURN OP_PUSHDATA1` followed by `76` to `80`, then exactly that many bytes

use crate::cursor::Cursor;
use crate::opcode::{MAX_DIRECT_PUSH, opcodes};

pub const MIN_OP_RETURN_PAYLOAD: u8 = 6;
pub const MAX_OP_RETURN_PAYLOAD: u8 = 80;

/// Returns the pushed payload if `script` is an acceptable `OP_RETURN` output.
pub fn op_return_payload(script: &[u8]) -> Option<&[u8]> {
    let mut cursor = Cursor::new(script);

    if cursor.read_u8() != opcodes::OP_RETURN.opcode {
        return None;
    }

    let len = match cursor.read_u8() {
        v @ MIN_OP_RETURN_PAYLOAD..=MAX_DIRECT_PUSH => v,
        v if v == opcodes::OP_PUSHDATA1.opcode => match cursor.read_u8() {
            v2 @ 76..=MAX_OP_RETURN_PAYLOAD => v2,
            _ => return None,
        },
        _ => return None,
    };

    // the push has to be the whole rest of the script
    if cursor.remaining() != len as usize {
        return None;
    }
    Some(cursor.rest())
}

pub fn is_valid_op_return(script: &[u8]) -> bool {
    op_return_payload(script).is_some()
}
