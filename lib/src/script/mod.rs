pub mod convert;

use self::convert::encode_int;
use crate::cursor::Cursor;
use crate::opcode::{Opcode, opcodes};
use crate::util::{HexDecodeError, decode_hex};
use core::fmt;
use core::num::IntErrorKind;
use core::ops::Deref;

pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptElem<'a> {
    Op(Opcode),
    Bytes(&'a [u8]),
}

impl fmt::Display for ScriptElem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Op(opcode) => write!(f, "{opcode}"),
            Self::Bytes(bytes) => {
                write!(f, "<")?;
                for &byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, ">")
            }
        }
    }
}

/// A script split into opcodes and data pushes, borrowing the pushed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScript<'a>(Vec<ScriptElem<'a>>);

impl<'a> ParsedScript<'a> {
    /// Unlike a script interpreter this does not stop at unknown opcodes,
    /// they are kept as [`ScriptElem::Op`]. Only truncated pushes are errors.
    pub fn parse_from_bytes(bytes: &'a [u8]) -> Result<Self, ParseScriptError> {
        let mut cursor = Cursor::new(bytes);
        let mut elems = Vec::new();

        while !cursor.is_empty() {
            let opcode = Opcode {
                opcode: cursor.read_u8(),
            };

            let len = if let Some(len) = opcode.push_bytes_len() {
                len
            } else if let Some(n) = opcode.pushdata_length() {
                let Some(push_size) = cursor.read_bytes(n) else {
                    return Err(ParseScriptError::UnexpectedEndPushdataLength(opcode));
                };
                let mut buf = [0u8; 4];
                buf[..n].copy_from_slice(push_size);
                u32::from_le_bytes(buf) as usize
            } else {
                elems.push(ScriptElem::Op(opcode));
                continue;
            };

            let available = cursor.remaining();
            let Some(data) = cursor.read_bytes(len) else {
                return Err(ParseScriptError::UnexpectedEnd(len, available));
            };
            elems.push(ScriptElem::Bytes(data));
        }

        Ok(Self(elems))
    }
}

impl<'a> Deref for ParsedScript<'a> {
    type Target = [ScriptElem<'a>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ParsedScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in self.iter() {
            if first {
                first = false;
            } else {
                write!(f, " ")?;
            }
            write!(f, "{e}")?;
        }

        Ok(())
    }
}

/// Assembles whitespace separated asm into script bytes.
///
/// Integers from -1 to 16 become `OP_1NEGATE`, `OP_0` and `OP_1` to `OP_16`,
/// larger ones are pushed as script numbers. `<hex>` pushes data with the
/// shortest push opcode. Anything else is looked up as an opcode name.
pub fn assemble(asm: &str) -> Result<Vec<u8>, ParseAsmError> {
    let mut ret = Vec::new();

    for token in asm.split_ascii_whitespace() {
        match token.parse::<i64>().map_err(|err| err.kind().clone()) {
            Ok(0) => ret.push(opcodes::OP_0.opcode),
            Ok(n @ -1..=16) => ret.push((opcodes::OP_1.opcode as i64 - 1 + n) as u8),
            Ok(n @ -0x7fffffff..=0x7fffffff) => push_data(&mut ret, &encode_int(n))?,
            Ok(_) | Err(IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                return Err(ParseAsmError::IntegerOutOfRange);
            }
            Err(_) => {
                if let Some(hex) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                    push_data(&mut ret, &decode_hex(hex)?)?;
                } else if let Some(opcode) = Opcode::from_name(token) {
                    if opcode.pushdata_length().is_some() {
                        return Err(ParseAsmError::ExplicitPushdata);
                    }
                    ret.push(opcode.opcode);
                } else {
                    return Err(ParseAsmError::UnknownOpcode(token.to_owned()));
                }
            }
        }
    }

    Ok(ret)
}

fn push_data(script: &mut Vec<u8>, data: &[u8]) -> Result<(), ParseAsmError> {
    match data.len() {
        len @ 0..=75 => script.push(len as u8),
        len @ 76..=255 => {
            script.push(opcodes::OP_PUSHDATA1.opcode);
            script.push(len as u8);
        }
        len @ 256..=MAX_SCRIPT_ELEMENT_SIZE => {
            script.push(opcodes::OP_PUSHDATA2.opcode);
            script.extend(u16::to_le_bytes(len as u16));
        }
        _ => return Err(ParseAsmError::DataPushTooLarge),
    }
    script.extend_from_slice(data);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseScriptError {
    UnexpectedEndPushdataLength(Opcode),
    UnexpectedEnd(usize, usize),
}

impl fmt::Display for ParseScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndPushdataLength(opcode) => {
                write!(f, "{opcode} with incomplete push length")
            }
            Self::UnexpectedEnd(expected, actual) => write!(
                f,
                "invalid push length, expected {expected} bytes but got {actual}"
            ),
        }
    }
}

impl std::error::Error for ParseScriptError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAsmError {
    IntegerOutOfRange,
    DataPushTooLarge,
    UnknownOpcode(String),
    ExplicitPushdata,
    HexDecodeError(HexDecodeError),
}

impl From<HexDecodeError> for ParseAsmError {
    fn from(value: HexDecodeError) -> Self {
        Self::HexDecodeError(value)
    }
}

impl fmt::Display for ParseAsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerOutOfRange => write!(f, "integer out of range"),
            Self::DataPushTooLarge => write!(f, "data push too large"),
            Self::UnknownOpcode(token) => write!(f, "unknown opcode {token}"),
            Self::ExplicitPushdata => {
                write!(f, "OP_PUSHDATA opcodes are not allowed in asm script")
            }
            Self::HexDecodeError(err) => write!(f, "hex decode error: {err}"),
        }
    }
}

impl std::error::Error for ParseAsmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(match self {
            Self::HexDecodeError(err) => err,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble() {
        assert_eq!(assemble("").unwrap(), Vec::<u8>::new());
        assert_eq!(assemble("0 -1 1 16").unwrap(), vec![0x00, 0x4f, 0x51, 0x60]);
        assert_eq!(assemble("17").unwrap(), vec![0x01, 0x11]);
        assert_eq!(assemble("-128").unwrap(), vec![0x02, 0x80, 0x80]);
        assert_eq!(
            assemble("OP_RETURN <0102030405 06>").unwrap_err(),
            ParseAsmError::UnknownOpcode("<0102030405".to_owned())
        );
        assert_eq!(
            assemble("return <010203040506>").unwrap(),
            vec![0x6a, 0x06, 1, 2, 3, 4, 5, 6]
        );
        assert_eq!(
            assemble("dup hash160 <0000000000000000000000000000000000000000> equalverify checksig")
                .unwrap()
                .len(),
            25
        );
    }

    #[test]
    fn test_assemble_push_sizes() {
        let hex = "ab".repeat(80);
        let script = assemble(&format!("OP_RETURN <{hex}>")).unwrap();
        assert_eq!(&script[..3], &[0x6a, 0x4c, 80]);
        assert_eq!(script.len(), 83);

        let hex = "ab".repeat(300);
        let script = assemble(&format!("<{hex}>")).unwrap();
        assert_eq!(&script[..3], &[0x4d, 0x2c, 0x01]);

        let hex = "ab".repeat(521);
        assert_eq!(
            assemble(&format!("<{hex}>")).unwrap_err(),
            ParseAsmError::DataPushTooLarge
        );
        assert_eq!(assemble("<>").unwrap(), vec![0x00]);
    }

    #[test]
    fn test_assemble_errors() {
        assert_eq!(
            assemble("2147483648").unwrap_err(),
            ParseAsmError::IntegerOutOfRange
        );
        assert_eq!(
            assemble("99999999999999999999").unwrap_err(),
            ParseAsmError::IntegerOutOfRange
        );
        assert_eq!(
            assemble("OP_PUSHDATA1").unwrap_err(),
            ParseAsmError::ExplicitPushdata
        );
        assert_eq!(
            assemble("<abc>").unwrap_err(),
            ParseAsmError::HexDecodeError(HexDecodeError::OddAmountOfHexCharacters(3))
        );
    }

    #[test]
    fn test_parse_from_bytes() {
        let bytes = [0x00, 0x02, 0xaa, 0xbb, 0x6a, 0x7e];
        let script = ParsedScript::parse_from_bytes(&bytes).unwrap();
        assert_eq!(
            *script,
            [
                ScriptElem::Op(opcodes::OP_0),
                ScriptElem::Bytes(&[0xaa, 0xbb]),
                ScriptElem::Op(opcodes::OP_RETURN),
                ScriptElem::Op(Opcode { opcode: 0x7e }),
            ]
        );
        assert_eq!(script.to_string(), "OP_0 <aabb> OP_RETURN OP_UNKNOWN<0x7e>");

        let bytes = [0x6a, 0x4c, 0x02, 0x01, 0x02];
        let script = ParsedScript::parse_from_bytes(&bytes).unwrap();
        assert_eq!(script.to_string(), "OP_RETURN <0102>");
    }

    #[test]
    fn test_parse_from_bytes_truncated() {
        assert_eq!(
            ParsedScript::parse_from_bytes(&[0x14, 0x00]).unwrap_err(),
            ParseScriptError::UnexpectedEnd(20, 1)
        );
        assert_eq!(
            ParsedScript::parse_from_bytes(&[0x4d, 0x01]).unwrap_err(),
            ParseScriptError::UnexpectedEndPushdataLength(opcodes::OP_PUSHDATA2)
        );
        assert_eq!(
            ParsedScript::parse_from_bytes(&[0x6a, 0x4c]).unwrap_err(),
            ParseScriptError::UnexpectedEndPushdataLength(opcodes::OP_PUSHDATA1)
        );
    }
}
