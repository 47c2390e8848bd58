//! Two-pass translation from scanned statements to a pebble program.
//!
//! The translator makes a single forward scan, emitting instructions as it
//! goes. A symbolic operand whose label is not yet known is emitted with a
//! placeholder operand of 0 and recorded as a deferred operand; after the
//! scan (and the implicit trailing `halt`) every deferred operand is
//! backpatched from the label table. Patches are independent of each other,
//! so resolution order does not matter.

use std::collections::HashMap;

use pebble::bytecode::{Instruction, OpCode, Program, Word};

use crate::error::{AsmError, AsmErrorKind};
use crate::lexer::{self, Statement};

/// Maximum number of label definitions in one assembly unit.
pub const LABEL_CAPACITY: usize = 1024;

/// Maximum number of unresolved symbolic operands in one assembly unit.
pub const DEFERRED_OPERAND_CAPACITY: usize = 1024;

/// A forward reference awaiting backpatching: the instruction at
/// `patch_address` gets the resolved address of `label`.
struct DeferredOperand {
    patch_address: usize,
    label: String,
    line_number: usize,
}

/// Translate assembly source into a program.
pub fn translate(source: &str) -> Result<Program, AsmError> {
    let statements = lexer::scan(source)?;

    let mut program = Program::new();
    let mut labels: HashMap<String, Word> = HashMap::new();
    let mut deferred: Vec<DeferredOperand> = Vec::new();
    let mut last_line = 0;

    for statement in &statements {
        last_line = statement.line_number;

        if let Some(name) = statement.label {
            if labels.contains_key(name) {
                return Err(AsmError::new(
                    statement.line_number,
                    AsmErrorKind::DuplicateLabel(name.to_string()),
                ));
            }
            if labels.len() >= LABEL_CAPACITY {
                return Err(AsmError::new(
                    statement.line_number,
                    AsmErrorKind::LabelTableFull,
                ));
            }
            labels.insert(name.to_string(), program.len() as Word);
        }

        let mnemonic = match statement.mnemonic {
            Some(mnemonic) => mnemonic,
            None => continue,
        };

        let opcode = opcode_for(mnemonic).ok_or_else(|| {
            AsmError::new(
                statement.line_number,
                AsmErrorKind::UnknownInstruction(mnemonic.to_string()),
            )
        })?;

        let instruction = build_instruction(opcode, mnemonic, statement, &mut program, &mut deferred)?;
        program.push(instruction).map_err(|_| {
            AsmError::new(statement.line_number, AsmErrorKind::ProgramCapacityExceeded)
        })?;
    }

    // Every program falls off its end into a halt
    program
        .push(Instruction::new(OpCode::Halt))
        .map_err(|_| AsmError::new(last_line, AsmErrorKind::ProgramCapacityExceeded))?;

    for entry in &deferred {
        let address = labels.get(&entry.label).ok_or_else(|| {
            AsmError::new(
                entry.line_number,
                AsmErrorKind::UndefinedLabel(entry.label.clone()),
            )
        })?;
        if let Some(instruction) = program.get_mut(entry.patch_address) {
            instruction.operand = *address;
        }
    }

    Ok(program)
}

fn build_instruction(
    opcode: OpCode,
    mnemonic: &str,
    statement: &Statement<'_>,
    program: &mut Program,
    deferred: &mut Vec<DeferredOperand>,
) -> Result<Instruction, AsmError> {
    if !opcode.has_operand() {
        if statement.operand.is_some() {
            return Err(AsmError::new(
                statement.line_number,
                AsmErrorKind::UnexpectedOperand(mnemonic.to_string()),
            ));
        }
        return Ok(Instruction::new(opcode));
    }

    let token = statement.operand.ok_or_else(|| {
        AsmError::new(
            statement.line_number,
            AsmErrorKind::MissingOperand(mnemonic.to_string()),
        )
    })?;

    if token.starts_with(|c: char| c.is_ascii_digit()) {
        // A numeric literal must parse in full; a trailing non-digit is a
        // malformed operand, not a shorter number.
        let value = token.parse::<Word>().map_err(|_| {
            AsmError::new(
                statement.line_number,
                AsmErrorKind::InvalidOperand(token.to_string()),
            )
        })?;
        return Ok(Instruction::new(opcode).with_operand(value));
    }

    if !lexer::is_identifier(token) {
        return Err(AsmError::new(
            statement.line_number,
            AsmErrorKind::InvalidOperand(token.to_string()),
        ));
    }

    if deferred.len() >= DEFERRED_OPERAND_CAPACITY {
        return Err(AsmError::new(
            statement.line_number,
            AsmErrorKind::DeferredOperandTableFull,
        ));
    }
    deferred.push(DeferredOperand {
        patch_address: program.len(),
        label: token.to_string(),
        line_number: statement.line_number,
    });
    Ok(Instruction::new(opcode))
}

/// Mnemonic lookup. Case-sensitive; both spellings of each aliased mnemonic
/// are accepted.
fn opcode_for(mnemonic: &str) -> Option<OpCode> {
    match mnemonic {
        "nop" => Some(OpCode::Nop),
        "halt" => Some(OpCode::Halt),
        "print_debug" => Some(OpCode::PrintDebug),
        "push" => Some(OpCode::Push),
        "dup" | "duplicate" => Some(OpCode::Dup),
        "plus" | "add" => Some(OpCode::Add),
        "minus" | "sub" => Some(OpCode::Sub),
        "mult" | "mul" => Some(OpCode::Mul),
        "div" => Some(OpCode::Div),
        "jmp" | "jump" => Some(OpCode::Jump),
        "jump_if" => Some(OpCode::JumpIf),
        "eq" | "equal" => Some(OpCode::Equal),
        _ => None,
    }
}
