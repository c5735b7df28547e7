mod console;
mod wren;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use console::{ConsoleChars, ConsoleController, ConsoleNumberDisplay, ConsoleScreen};
use wren::asm;

/// Multiplies two small constants by repeated addition and shows the product
/// on the number display.
const DEMO: &str = "\
// demo: multiply a by b, show the product
define a 6
define b 7

ldi r1 a
ldi r2 b
.loop
add r3 r1 r3
dec r2
brh nz .loop
ldi r4 show_number
str r4 r3
hlt
";

#[derive(Parser)]
#[command(name = "wrenasm", about = "Assemble and run programs for an 8-bit computer")]
struct Cli {
    /// Assembly source file; runs a built-in demo when omitted
    file: Option<PathBuf>,

    /// Stop after this many cycles if the program never halts
    #[arg(long, default_value_t = 1_000_000)]
    max_cycles: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = match &cli.file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => DEMO.to_string(),
    };

    let mut machine = asm::assemble(
        &source,
        Box::new(ConsoleChars::new()),
        Box::new(ConsoleNumberDisplay::new()),
        Box::new(ConsoleScreen::new()),
        Box::new(ConsoleController),
    )?;
    info!("assembled {} instructions", machine.program_len());

    let mut cycles = 0u64;
    while !machine.is_halted() {
        if cycles >= cli.max_cycles {
            warn!("cycle cap of {} reached before halt", cli.max_cycles);
            break;
        }
        machine.cycle()?;
        cycles += 1;
    }

    info!("stopped after {cycles} cycles at pc {}", machine.pc());
    Ok(())
}
