use std::io::{Error as IoError, Read};

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

use crate::bytecode::{Instruction, Program, PROGRAM_CAPACITY, RECORD_SIZE};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(#[from] IoError),

    #[error("truncated record: {0} trailing bytes (record size is {RECORD_SIZE})")]
    TruncatedRecord(usize),

    #[error("program capacity exceeded: {0} instructions (capacity is {PROGRAM_CAPACITY})")]
    CapacityExceeded(usize),
}

pub struct Parser;

impl Parser {
    /// Parse a binary program from a reader (file, memory buffer, etc.)
    pub fn parse<R: Read>(reader: &mut R) -> Result<Program, ParseError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse_bytes(&bytes)
    }

    /// Parse a binary program from a flat byte buffer.
    ///
    /// The format is a headerless sequence of fixed-width records: one tag
    /// byte followed by a big-endian operand word. The buffer length must be
    /// an exact multiple of [`RECORD_SIZE`]. Tag bytes are not validated
    /// here; an unrecognized tag faults at execution time instead.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Program, ParseError> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(ParseError::TruncatedRecord(bytes.len() % RECORD_SIZE));
        }

        let count = bytes.len() / RECORD_SIZE;
        if count > PROGRAM_CAPACITY {
            return Err(ParseError::CapacityExceeded(count));
        }

        let mut program = Program::new();
        for record in bytes.chunks_exact(RECORD_SIZE) {
            let operand = BigEndian::read_i64(&record[1..]);
            program
                .push(Instruction::from_raw(record[0], operand))
                .map_err(|_| ParseError::CapacityExceeded(count))?;
        }

        Ok(program)
    }
}
