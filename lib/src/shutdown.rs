//! Which scriptpubkeys a peer may close a channel to.
//!
//! From BOLT #2, the `scriptpubkey` in `shutdown` is one of:
//! 1. `OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG` (P2PKH), or
//! 2. `OP_HASH160 <20> OP_EQUAL` (P2SH), or
//! 3. `OP_0 <20>` (P2WPKH), or
//! 4. `OP_0 <32>` (P2WSH), or
//! 5. if `option_shutdown_anysegwit`: a witness program of version 1 to 16, or
//! 6. if `option_simple_close`: a bounded `OP_RETURN`.
//!
//! The first two are only accepted when old style scripts are allowed.

use crate::op_return::is_valid_op_return;
use crate::template::{ScriptClassifier, StandardScript, StandardTemplates};
use crate::witness::parse_witness_program;
use core::fmt;
use log::trace;

/// Negotiated capabilities that widen the set of acceptable scripts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownFeatures {
    /// Witness programs of version 1 through 16.
    pub anysegwit: bool,
    /// P2PKH and P2SH.
    pub allow_oldstyle: bool,
    /// `OP_RETURN` with a 6 to 80 byte payload.
    pub option_simple_close: bool,
}

impl ShutdownFeatures {
    pub fn new(anysegwit: bool, allow_oldstyle: bool, option_simple_close: bool) -> Self {
        Self {
            anysegwit,
            allow_oldstyle,
            option_simple_close,
        }
    }

    pub fn all() -> Self {
        Self::new(true, true, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownScriptKind {
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
    WitnessProgram { version: u8 },
    OpReturn,
}

impl From<StandardScript> for ShutdownScriptKind {
    fn from(script: StandardScript) -> Self {
        match script {
            StandardScript::P2pkh(_) => Self::P2pkh,
            StandardScript::P2sh(_) => Self::P2sh,
            StandardScript::P2wpkh(_) => Self::P2wpkh,
            StandardScript::P2wsh(_) => Self::P2wsh,
        }
    }
}

impl fmt::Display for ShutdownScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P2pkh => write!(f, "p2pkh"),
            Self::P2sh => write!(f, "p2sh"),
            Self::P2wpkh => write!(f, "p2wpkh"),
            Self::P2wsh => write!(f, "p2wsh"),
            Self::WitnessProgram { version } => write!(f, "witness v{version}"),
            Self::OpReturn => write!(f, "op_return"),
        }
    }
}

/// Tells which rule accepts `script`, checking them in the order the rules
/// are listed in the module docs. `None` means the script is not acceptable.
pub fn classify_shutdown_script<C: ScriptClassifier + ?Sized>(
    classifier: &C,
    script: &[u8],
    features: ShutdownFeatures,
) -> Option<ShutdownScriptKind> {
    let kind = match classifier.classify(script) {
        Some(standard) if standard.is_legacy() && !features.allow_oldstyle => {
            trace!("{standard} needs old style shutdown scripts to be allowed");
            None
        }
        Some(standard) => Some(standard.into()),
        None => None,
    };

    let kind = kind
        .or_else(|| {
            features
                .anysegwit
                .then(|| parse_witness_program(script))
                .flatten()
                .map(|program| ShutdownScriptKind::WitnessProgram {
                    version: program.version(),
                })
        })
        .or_else(|| {
            (features.option_simple_close && is_valid_op_return(script))
                .then_some(ShutdownScriptKind::OpReturn)
        });

    match kind {
        Some(kind) => trace!("shutdown scriptpubkey accepted as {kind}"),
        None => trace!(
            "shutdown scriptpubkey of {} bytes rejected with {features:?}",
            script.len()
        ),
    }

    kind
}

pub fn valid_shutdown_scriptpubkey_with<C: ScriptClassifier + ?Sized>(
    classifier: &C,
    script: &[u8],
    features: ShutdownFeatures,
) -> bool {
    classify_shutdown_script(classifier, script, features).is_some()
}

pub fn valid_shutdown_scriptpubkey(script: &[u8], features: ShutdownFeatures) -> bool {
    valid_shutdown_scriptpubkey_with(&StandardTemplates, script, features)
}
