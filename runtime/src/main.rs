use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use pebble::runtime::{Runtime, RuntimeConfig};
use pebble::utils;

#[derive(Parser)]
#[command(name = "pebble", version, about = "Execute or disassemble pebble bytecode programs")]
struct Cli {
    /// Bytecode program to load (.pbc)
    input: PathBuf,

    /// Maximum number of instructions to execute
    #[arg(short, long)]
    limit: Option<u64>,

    /// Print each instruction before it executes
    #[arg(short, long)]
    trace: bool,

    /// Print the program as assembly text instead of executing it
    #[arg(short, long)]
    disassemble: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = RuntimeConfig::default()
        .with_trace(cli.trace)
        .with_step_limit(cli.limit);
    let runtime = Runtime::with_config(config);

    if cli.disassemble {
        match runtime.load_file(&cli.input) {
            Ok(program) => print!("{}", utils::disassemble(&program)),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    match runtime.execute_file(&cli.input) {
        Ok(execution) => {
            if let Err(e) = execution.machine.dump_stack(&mut io::stdout()) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            if let Some(fault) = execution.fault {
                eprintln!("Error: {}", fault);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
