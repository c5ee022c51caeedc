//! Command line interface for mkcmd

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use clap::Parser;

use crate::encoder::CmdEncoder;
use crate::error::{CmdError, Result};
use crate::record::ModuleName;
use crate::VERSION;

/// Command line arguments for mkcmd
#[derive(Parser, Debug)]
#[command(name = "mkcmd")]
#[command(version = VERSION)]
#[command(about = "Convert a raw binary into a TRS-80 CMD load module", long_about = None)]
pub struct Args {
    /// Raw binary to encode
    pub input: PathBuf,

    /// CMD image to create
    pub output: PathBuf,

    /// Memory address the binary loads at (hexadecimal)
    #[arg(value_parser = parse_hex_u16)]
    pub start_address: u16,

    /// Execution entry address (hexadecimal)
    #[arg(value_parser = parse_hex_u16)]
    pub exec_address: u16,

    /// Module name for the header (default: output file name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - only output errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print image information after creation
    #[arg(long)]
    pub print_info: bool,
}

/// Parse hexadecimal string to u16
///
/// Addresses are hexadecimal with or without a `0x` prefix; there is no
/// decimal fallback.
fn parse_hex_u16(s: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    if s.starts_with("0x") || s.starts_with("0X") {
        u16::from_str_radix(&s[2..], 16)
    } else {
        u16::from_str_radix(s, 16)
    }
}

/// Main CLI handler
pub fn run_cli(args: Args) -> Result<()> {
    let verbose = args.verbose && !args.quiet;

    let name = match &args.name {
        Some(name) => ModuleName::new(name),
        None => ModuleName::from_path(&args.output),
    };

    if verbose {
        eprintln!("Creating CMD image...");
        eprintln!("Module name: {}", name);
        eprintln!("Load address: 0x{:04x}", args.start_address);
        eprintln!("Entry point: 0x{:04x}", args.exec_address);
        eprintln!("Loading data from: {}", args.input.display());
    }

    let input = File::open(&args.input).map_err(|e| CmdError::input_open(&args.input, e))?;

    if verbose {
        eprintln!("Writing image to: {}", args.output.display());
    }

    let output = File::create(&args.output).map_err(|e| CmdError::output_open(&args.output, e))?;

    let encoder = CmdEncoder::new(name, args.start_address, args.exec_address);
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let stats = encoder
        .encode(&mut reader, &mut writer)
        .map_err(|e| match e {
            CmdError::Read(source) => CmdError::input_read(&args.input, source),
            CmdError::Write(source) => CmdError::output_write(&args.output, source),
            other => other,
        })?;

    if !args.quiet {
        eprintln!("CMD image created successfully: {}", args.output.display());
        eprintln!("Image size: {} bytes", stats.image_len());
    }

    if args.print_info && !args.quiet {
        println!();
        println!("Module: {}", encoder.name());
        println!(
            "Load Address: 0x{:04x} Entry Point: 0x{:04x}",
            encoder.load_address(),
            encoder.entry_point()
        );
        println!(
            "Size: {} bytes ({} load blocks)",
            stats.payload_len, stats.blocks
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_u16() {
        assert_eq!(parse_hex_u16("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_u16("0X1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_u16("2000").unwrap(), 0x2000);
        assert_eq!(parse_hex_u16("feed").unwrap(), 0xFEED);
        assert_eq!(parse_hex_u16("0").unwrap(), 0);
        assert_eq!(parse_hex_u16("ffff").unwrap(), 0xFFFF);
    }

    #[test]
    fn test_parse_hex_u16_rejects_bad_input() {
        assert!(parse_hex_u16("10000").is_err());
        assert!(parse_hex_u16("wxyz").is_err());
        assert!(parse_hex_u16("").is_err());
        assert!(parse_hex_u16("0x").is_err());
        assert!(parse_hex_u16("-1").is_err());
    }

    #[test]
    fn test_args_parsing() {
        let args =
            Args::try_parse_from(&["mkcmd", "game.bin", "game.cmd", "3000", "3000"]).unwrap();

        assert_eq!(args.input, PathBuf::from("game.bin"));
        assert_eq!(args.output, PathBuf::from("game.cmd"));
        assert_eq!(args.start_address, 0x3000);
        assert_eq!(args.exec_address, 0x3000);
        assert_eq!(args.name, None);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.print_info);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::try_parse_from(&[
            "mkcmd",
            "-n",
            "menu",
            "--verbose",
            "--print-info",
            "game.bin",
            "game.cmd",
            "0x8000",
            "0x8003",
        ])
        .unwrap();

        assert_eq!(args.name.as_deref(), Some("menu"));
        assert!(args.verbose);
        assert!(args.print_info);
        assert_eq!(args.start_address, 0x8000);
        assert_eq!(args.exec_address, 0x8003);
    }

    #[test]
    fn test_args_reject_bad_address() {
        let result = Args::try_parse_from(&["mkcmd", "a.bin", "a.cmd", "wxyz", "2000"]);
        assert!(result.is_err());

        let result = Args::try_parse_from(&["mkcmd", "a.bin", "a.cmd", "2000", "10000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_require_all_positionals() {
        let result = Args::try_parse_from(&["mkcmd", "a.bin", "a.cmd", "2000"]);
        assert!(result.is_err());
    }
}
