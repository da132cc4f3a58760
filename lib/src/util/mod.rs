use core::fmt;
use core::fmt::Write;

pub fn encode_hex(bytes: &[u8]) -> String {
    let mut ret = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // writing to a String never fails
        let _ = write!(ret, "{byte:02x}");
    }
    ret
}

fn decode_hex_digit(d: u8) -> Option<u8> {
    match d {
        b'0'..=b'9' => Some(d - b'0'),
        b'A'..=b'F' => Some(d - b'A' + 0xa),
        b'a'..=b'f' => Some(d - b'a' + 0xa),
        _ => None,
    }
}

pub fn decode_hex(hex: &str) -> Result<Vec<u8>, HexDecodeError> {
    let hex = hex.as_bytes();
    if hex.len() % 2 != 0 {
        return Err(HexDecodeError::OddAmountOfHexCharacters(hex.len()));
    }

    hex.chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let high = decode_hex_digit(pair[0])
                .ok_or(HexDecodeError::InvalidCharacter(2 * i, pair[0]))?;
            let low = decode_hex_digit(pair[1])
                .ok_or(HexDecodeError::InvalidCharacter(2 * i + 1, pair[1]))?;
            Ok((high << 4) | low)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexDecodeError {
    OddAmountOfHexCharacters(usize),
    InvalidCharacter(usize, u8),
}

impl fmt::Display for HexDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::OddAmountOfHexCharacters(amount) => write!(
                f,
                "string contains an odd amount ({amount}) of hex characters"
            ),
            Self::InvalidCharacter(pos, digit) => {
                write!(
                    f,
                    "invalid character \"{}\" (0x{digit:02x}) at byte {pos}",
                    match digit {
                        32..=126 => digit as char,
                        _ => char::REPLACEMENT_CHARACTER,
                    }
                )
            }
        }
    }
}

impl std::error::Error for HexDecodeError {}
