//! Utility functions for the pebble runtime

use std::fs::File;
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::bytecode::{Instruction, Program, RECORD_SIZE};

/// Encode a program into its flat binary form: one fixed-width record per
/// instruction, no header. The exact inverse of
/// [`Parser::parse_bytes`](crate::bytecode::Parser::parse_bytes).
pub fn encode_program(program: &Program) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(program.len() * RECORD_SIZE);
    for instruction in program.instructions() {
        let mut record = [0u8; RECORD_SIZE];
        record[0] = instruction.opcode;
        BigEndian::write_i64(&mut record[1..], instruction.operand);
        bytes.extend_from_slice(&record);
    }
    bytes
}

/// Write a program to a file in its binary form
pub fn write_program<P: AsRef<Path>>(program: &Program, path: P) -> Result<(), IoError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for instruction in program.instructions() {
        writer.write_u8(instruction.opcode)?;
        writer.write_i64::<BigEndian>(instruction.operand)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render one instruction as assembly text.
pub fn format_instruction(instruction: &Instruction) -> String {
    match instruction.decode() {
        Some(opcode) if opcode.has_operand() => {
            format!("{} {}", opcode.mnemonic(), instruction.operand)
        }
        Some(opcode) => opcode.mnemonic().to_string(),
        // Not an opcode; keep the line as a comment so the file stays
        // reassemblable.
        None => format!("# unknown opcode 0x{:02X}", instruction.opcode),
    }
}

/// Render a whole program as assembly text, one statement per line.
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();
    for instruction in program.instructions() {
        output.push_str(&format_instruction(instruction));
        output.push('\n');
    }
    output
}
