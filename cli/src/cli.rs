use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputType {
    Hex,
    Asm,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Script encoding
    pub input_type: InputType,

    /// Scriptpubkey
    pub input: String,

    /// option_shutdown_anysegwit was negotiated
    #[arg(long)]
    pub anysegwit: bool,

    /// Accept P2PKH and P2SH
    #[arg(long)]
    pub allow_oldstyle: bool,

    /// option_simple_close was negotiated
    #[arg(long)]
    pub simple_close: bool,
}
