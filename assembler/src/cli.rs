use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pebble::utils::write_program;

use crate::codegen;

#[derive(Parser)]
#[command(
    name = "pebble-asm",
    version,
    about = "Assemble pebble assembly source into a bytecode program"
)]
pub struct Cli {
    /// Assembly source file (.pasm)
    pub input: PathBuf,

    /// Output bytecode file (defaults to the input with a .pbc extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Assemble the input file and write the binary program.
pub fn run(cli: Cli) -> Result<()> {
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("could not read {}", cli.input.display()))?;

    let program = codegen::translate(&source)?;

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("pbc"));
    write_program(&program, &output)
        .with_context(|| format!("could not write {}", output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use pebble::bytecode::{OpCode, Parser as BytecodeParser};

    #[test]
    fn test_run_assembles_to_requested_output() {
        let mut source_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(source_file, "push 2\npush 3\nmult").expect("Failed to write source");

        let output_file = NamedTempFile::new().expect("Failed to create temp file");
        let cli = Cli {
            input: source_file.path().to_path_buf(),
            output: Some(output_file.path().to_path_buf()),
        };
        run(cli).unwrap();

        let bytes = fs::read(output_file.path()).unwrap();
        let program = BytecodeParser::parse_bytes(&bytes).unwrap();

        assert_eq!(program.len(), 4);
        assert_eq!(program.get(2).unwrap().decode(), Some(OpCode::Mul));
        assert_eq!(program.get(3).unwrap().decode(), Some(OpCode::Halt));
    }

    #[test]
    fn test_run_reports_translation_errors() {
        let mut source_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(source_file, "jmp nowhere").expect("Failed to write source");

        let cli = Cli {
            input: source_file.path().to_path_buf(),
            output: None,
        };
        let error = run(cli).unwrap_err();
        assert!(error.to_string().contains("undefined label"));
    }
}
