//! Standard output templates: P2PKH, P2SH, P2WPKH and P2WSH.
//!
//! Every matcher wants the exact template and nothing after it, and yields
//! the embedded hash on a match.

use crate::opcode::opcodes;
use bitcoin_hashes::{Hash, hash160, sha256};
use core::fmt;

const OP_PUSHBYTES_20: u8 = 0x14;
const OP_PUSHBYTES_32: u8 = 0x20;

/// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`
pub fn is_p2pkh(script: &[u8]) -> Option<hash160::Hash> {
    match script {
        [dup, hash160_op, OP_PUSHBYTES_20, hash @ .., equalverify, checksig]
            if *dup == opcodes::OP_DUP.opcode
                && *hash160_op == opcodes::OP_HASH160.opcode
                && *equalverify == opcodes::OP_EQUALVERIFY.opcode
                && *checksig == opcodes::OP_CHECKSIG.opcode =>
        {
            hash160::Hash::from_slice(hash).ok()
        }
        _ => None,
    }
}

/// `OP_HASH160 <20 bytes> OP_EQUAL`
pub fn is_p2sh(script: &[u8]) -> Option<hash160::Hash> {
    match script {
        [hash160_op, OP_PUSHBYTES_20, hash @ .., equal]
            if *hash160_op == opcodes::OP_HASH160.opcode
                && *equal == opcodes::OP_EQUAL.opcode =>
        {
            hash160::Hash::from_slice(hash).ok()
        }
        _ => None,
    }
}

/// `OP_0 <20 bytes>`
pub fn is_p2wpkh(script: &[u8]) -> Option<hash160::Hash> {
    match script {
        [version, OP_PUSHBYTES_20, hash @ ..] if *version == opcodes::OP_0.opcode => {
            hash160::Hash::from_slice(hash).ok()
        }
        _ => None,
    }
}

/// `OP_0 <32 bytes>`
pub fn is_p2wsh(script: &[u8]) -> Option<sha256::Hash> {
    match script {
        [version, OP_PUSHBYTES_32, hash @ ..] if *version == opcodes::OP_0.opcode => {
            sha256::Hash::from_slice(hash).ok()
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardScript {
    P2pkh(hash160::Hash),
    P2sh(hash160::Hash),
    P2wpkh(hash160::Hash),
    P2wsh(sha256::Hash),
}

impl StandardScript {
    /// P2PKH and P2SH, which predate segwit.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::P2pkh(_) | Self::P2sh(_))
    }

    pub fn hash_bytes(&self) -> &[u8] {
        match self {
            Self::P2pkh(hash) | Self::P2sh(hash) | Self::P2wpkh(hash) => hash.as_ref(),
            Self::P2wsh(hash) => hash.as_ref(),
        }
    }
}

impl fmt::Display for StandardScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P2pkh(hash) => write!(f, "p2pkh({hash})"),
            Self::P2sh(hash) => write!(f, "p2sh({hash})"),
            Self::P2wpkh(hash) => write!(f, "p2wpkh({hash})"),
            Self::P2wsh(hash) => write!(f, "p2wsh({hash})"),
        }
    }
}

/// Tells which standard template, if any, a script matches.
pub trait ScriptClassifier {
    fn classify(&self, script: &[u8]) -> Option<StandardScript>;
}

impl<F> ScriptClassifier for F
where
    F: Fn(&[u8]) -> Option<StandardScript>,
{
    fn classify(&self, script: &[u8]) -> Option<StandardScript> {
        self(script)
    }
}

/// The real template matchers of this module.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardTemplates;

impl ScriptClassifier for StandardTemplates {
    fn classify(&self, script: &[u8]) -> Option<StandardScript> {
        is_p2pkh(script)
            .map(StandardScript::P2pkh)
            .or_else(|| is_p2sh(script).map(StandardScript::P2sh))
            .or_else(|| is_p2wpkh(script).map(StandardScript::P2wpkh))
            .or_else(|| is_p2wsh(script).map(StandardScript::P2wsh))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn p2pkh_script(hash: &[u8; 20]) -> Vec<u8> {
        let mut script = vec![0x76, 0xa9, 0x14];
        script.extend_from_slice(hash);
        script.extend_from_slice(&[0x88, 0xac]);
        script
    }

    pub(crate) fn p2sh_script(hash: &[u8; 20]) -> Vec<u8> {
        let mut script = vec![0xa9, 0x14];
        script.extend_from_slice(hash);
        script.push(0x87);
        script
    }

    pub(crate) fn p2wpkh_script(hash: &[u8; 20]) -> Vec<u8> {
        let mut script = vec![0x00, 0x14];
        script.extend_from_slice(hash);
        script
    }

    pub(crate) fn p2wsh_script(hash: &[u8; 32]) -> Vec<u8> {
        let mut script = vec![0x00, 0x20];
        script.extend_from_slice(hash);
        script
    }

    #[test]
    fn test_p2pkh() {
        let hash = hash160::Hash::hash(b"pubkey");
        let script = p2pkh_script(&hash.to_byte_array());
        assert_eq!(script.len(), 25);
        assert_eq!(is_p2pkh(&script), Some(hash));
        assert_eq!(is_p2sh(&script), None);

        assert_eq!(is_p2pkh(&script[..24]), None);
        let mut extended = script.clone();
        extended.push(0x00);
        assert_eq!(is_p2pkh(&extended), None);
        let mut wrong_push = script.clone();
        wrong_push[2] = 0x15;
        assert_eq!(is_p2pkh(&wrong_push), None);
    }

    #[test]
    fn test_p2sh() {
        let hash = hash160::Hash::hash(b"redeem script");
        let script = p2sh_script(&hash.to_byte_array());
        assert_eq!(script.len(), 23);
        assert_eq!(is_p2sh(&script), Some(hash));
        assert_eq!(is_p2pkh(&script), None);
        assert_eq!(is_p2sh(&script[..22]), None);
    }

    #[test]
    fn test_p2wpkh() {
        let hash = hash160::Hash::hash(b"pubkey");
        let script = p2wpkh_script(&hash.to_byte_array());
        assert_eq!(is_p2wpkh(&script), Some(hash));
        assert_eq!(is_p2wsh(&script), None);
        assert_eq!(is_p2wpkh(&script[..21]), None);

        let mut v1 = script.clone();
        v1[0] = 0x51;
        assert_eq!(is_p2wpkh(&v1), None);
    }

    #[test]
    fn test_p2wsh() {
        let hash = sha256::Hash::hash(b"witness script");
        let script = p2wsh_script(&hash.to_byte_array());
        assert_eq!(is_p2wsh(&script), Some(hash));
        assert_eq!(is_p2wpkh(&script), None);
        assert_eq!(is_p2wsh(&script[..33]), None);
    }

    #[test]
    fn test_empty() {
        assert_eq!(is_p2pkh(&[]), None);
        assert_eq!(is_p2sh(&[]), None);
        assert_eq!(is_p2wpkh(&[]), None);
        assert_eq!(is_p2wsh(&[]), None);
        assert_eq!(StandardTemplates.classify(&[]), None);
    }

    #[test]
    fn test_standard_templates() {
        let hash = [7; 20];
        assert!(matches!(
            StandardTemplates.classify(&p2pkh_script(&hash)),
            Some(StandardScript::P2pkh(_))
        ));
        assert!(matches!(
            StandardTemplates.classify(&p2sh_script(&hash)),
            Some(StandardScript::P2sh(_))
        ));
        assert!(matches!(
            StandardTemplates.classify(&p2wpkh_script(&hash)),
            Some(StandardScript::P2wpkh(_))
        ));
        assert!(matches!(
            StandardTemplates.classify(&p2wsh_script(&[7; 32])),
            Some(StandardScript::P2wsh(_))
        ));
        assert!(StandardTemplates.classify(&p2sh_script(&hash)).unwrap().is_legacy());
        assert_eq!(
            StandardTemplates.classify(&p2wpkh_script(&hash)).unwrap().hash_bytes(),
            &hash
        );
    }
}
