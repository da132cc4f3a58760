use core::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Opcode {
    pub opcode: u8,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "OP_UNKNOWN<0x{:02x}>", self.opcode),
        }
    }
}

macro_rules! opcodes {
    ($($k:ident: $v:literal),* $(,)?) => {
        pub mod opcodes {
            use super::Opcode;

            $(
                #[allow(dead_code)]
                pub const $k: Opcode = Opcode { opcode: $v };
            )*
        }

        impl Opcode {
            const LONGEST_NAME_LENGTH: usize = {
                let mut max = 0;

                $(
                    let len = stringify!($k).len();
                    if max < len {
                        max = len;
                    }
                )*

                max
            };

            fn from_name_exact_unprefixed(name_bytes: &[u8]) -> Option<Self> {
                $(
                    if name_bytes == &stringify!($k).as_bytes()[3..] {
                        Some(Opcode { opcode: $v })
                    } else
                )* {
                    None
                }
            }

            /// First listed name wins for opcodes with aliases.
            pub fn name(self) -> Option<&'static str> {
                match self.opcode {
                    $(
                        #[allow(unreachable_patterns)]
                        $v => Some(stringify!($k)),
                    )*
                    _ => None,
                }
            }
        }
    };
}

// Only the opcodes that show up in shutdown scripts and their neighbours.
opcodes! {
    // push value
    OP_0: 0x00,
    OP_FALSE: 0x00,
    OP_PUSHDATA1: 0x4c,
    OP_PUSHDATA2: 0x4d,
    OP_PUSHDATA4: 0x4e,
    OP_1NEGATE: 0x4f,
    OP_1: 0x51,
    OP_TRUE: 0x51,
    OP_2: 0x52,
    OP_3: 0x53,
    OP_4: 0x54,
    OP_5: 0x55,
    OP_6: 0x56,
    OP_7: 0x57,
    OP_8: 0x58,
    OP_9: 0x59,
    OP_10: 0x5a,
    OP_11: 0x5b,
    OP_12: 0x5c,
    OP_13: 0x5d,
    OP_14: 0x5e,
    OP_15: 0x5f,
    OP_16: 0x60,

    // control
    OP_NOP: 0x61,
    OP_VERIFY: 0x69,
    OP_RETURN: 0x6a,

    // stack
    OP_DROP: 0x75,
    OP_DUP: 0x76,

    // bit logic
    OP_EQUAL: 0x87,
    OP_EQUALVERIFY: 0x88,

    // crypto
    OP_RIPEMD160: 0xa6,
    OP_SHA256: 0xa8,
    OP_HASH160: 0xa9,
    OP_HASH256: 0xaa,
    OP_CHECKSIG: 0xac,
    OP_CHECKSIGVERIFY: 0xad,
    OP_CHECKMULTISIG: 0xae,
    OP_CHECKMULTISIGVERIFY: 0xaf,

    // expansion
    OP_CHECKLOCKTIMEVERIFY: 0xb1,
    OP_CHECKSEQUENCEVERIFY: 0xb2,

    // BIP 342
    OP_CHECKSIGADD: 0xba,

    OP_INVALIDOPCODE: 0xff,

    // aliases
    OP_CLTV: 0xb1,
    OP_CSV: 0xb2,
}

/// Largest length a single direct push opcode (`0x01..=0x4b`) can carry.
pub const MAX_DIRECT_PUSH: u8 = 75;

impl Opcode {
    /// Opcodes that push data mapped to the length of the following number that indicated the push size.
    /// Returns Some(length) for OP_PUSHDATA(1|2|4) and None for others.
    pub fn pushdata_length(&self) -> Option<usize> {
        Some(match *self {
            opcodes::OP_PUSHDATA1 => 1,
            opcodes::OP_PUSHDATA2 => 2,
            opcodes::OP_PUSHDATA4 => 4,
            _ => return None,
        })
    }

    /// Length of the data pushed by a direct push opcode, these have no name.
    pub fn push_bytes_len(&self) -> Option<usize> {
        match self.opcode {
            n @ 1..=MAX_DIRECT_PUSH => Some(n as usize),
            _ => None,
        }
    }

    /// Witness version encoded by this opcode, `OP_0` and `OP_1` through `OP_16`.
    pub fn witness_version(&self) -> Option<u8> {
        match *self {
            opcodes::OP_0 => Some(0),
            op if op >= opcodes::OP_1 && op <= opcodes::OP_16 => {
                Some(op.opcode - opcodes::OP_1.opcode + 1)
            }
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        const ASCII_UPPERCASE_MASK: u8 = !(1 << 5);

        let mut name = name.as_bytes();

        match name.split_first_chunk() {
            Some((&[a, b, c], tail))
                if a & ASCII_UPPERCASE_MASK == b'O'
                    && b & ASCII_UPPERCASE_MASK == b'P'
                    && c == b'_' =>
            {
                name = tail;
            }
            _ => {}
        }

        let mut buf = [0; Self::LONGEST_NAME_LENGTH - 3];
        let buf = buf.get_mut(..name.len())?;
        buf.copy_from_slice(name);
        buf.make_ascii_uppercase();

        Self::from_name_exact_unprefixed(buf)
    }
}
