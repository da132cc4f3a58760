mod cli;

use self::cli::{Args, InputType};

use clap::Parser;
use log::debug;
use shutdown_script::util::{decode_hex, encode_hex};
use shutdown_script::{
    ParsedScript, ShutdownFeatures, StandardTemplates, assemble, classify_shutdown_script,
};
use std::error::Error;
use std::process::ExitCode;

fn read_script(args: &Args) -> Result<Vec<u8>, Box<dyn Error>> {
    Ok(match args.input_type {
        InputType::Hex => {
            let hex: String = args
                .input
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            decode_hex(&hex)?
        }
        InputType::Asm => assemble(&args.input)?,
    })
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let features = ShutdownFeatures::new(args.anysegwit, args.allow_oldstyle, args.simple_close);
    debug!("checking with {features:?}");

    let script = match read_script(&args) {
        Ok(script) => script,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    println!("hex: {}", encode_hex(&script));
    match ParsedScript::parse_from_bytes(&script) {
        Ok(parsed) => println!("script: {parsed}"),
        Err(err) => println!("script: unparsable ({err})"),
    }

    match classify_shutdown_script(&StandardTemplates, &script, features) {
        Some(kind) => {
            println!("accepted ({kind})");
            ExitCode::SUCCESS
        }
        None => {
            println!("rejected");
            ExitCode::FAILURE
        }
    }
}
