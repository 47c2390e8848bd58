use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::bytecode::{Parser, Program};
use crate::runtime::{RuntimeConfig, RuntimeResult};
use crate::utils;
use crate::vm::{Fault, Machine};

/// The Runtime is the main entry point for loading and executing programs
pub struct Runtime {
    config: RuntimeConfig,
}

/// The outcome of running a program: the finished machine plus the fault
/// that stopped it, if execution did not end in a clean halt or step-limit
/// cutoff. The machine is handed back so callers can inspect the stack
/// either way.
pub struct Execution {
    pub machine: Machine,
    pub fault: Option<Fault>,
}

impl Runtime {
    /// Create a new runtime with default configuration
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Create a new runtime with custom configuration
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Load a binary program from a file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> RuntimeResult<Program> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let program = Parser::parse(&mut reader)?;

        if self.config.debug_mode {
            println!("Loaded program: {} instructions", program.len());
        }

        Ok(program)
    }

    /// Load a binary program from a file and execute it
    pub fn execute_file<P: AsRef<Path>>(&self, path: P) -> RuntimeResult<Execution> {
        let program = self.load_file(path)?;
        Ok(self.execute_program(program))
    }

    /// Execute a program under the configured step limit, tracing each
    /// instruction first if tracing is enabled.
    pub fn execute_program(&self, program: Program) -> Execution {
        let mut machine = Machine::new(program);

        let fault = if self.config.trace {
            self.run_traced(&mut machine)
        } else {
            machine.run(self.config.step_limit).err()
        };

        Execution { machine, fault }
    }

    fn run_traced(&self, machine: &mut Machine) -> Option<Fault> {
        let mut remaining = self.config.step_limit;
        while !machine.is_halted() {
            if remaining == Some(0) {
                break;
            }
            if let Some(instruction) = machine.current_instruction() {
                println!("{}", utils::format_instruction(&instruction));
            }
            if let Err(fault) = machine.step() {
                return Some(fault);
            }
            if let Some(steps) = remaining.as_mut() {
                *steps -= 1;
            }
        }
        None
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
