//! Demo CLI: loads a flat binary or minimal iNES image, wires up a
//! `Cpu`/`Bus`/`MasterClock`, runs it to completion or an instruction
//! limit, optionally printing a disassembly trace, then prints final
//! register/flag state.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use structopt::StructOpt;

use nes_cpu_core::bus::Bus;
use nes_cpu_core::cartridge::Cartridge;
use nes_cpu_core::clock::{MasterClock, CPU_DIVISOR};
use nes_cpu_core::cpu::Cpu;
use nes_cpu_core::disassemble::disassemble_at;
use nes_cpu_core::log;

#[derive(Debug, StructOpt)]
#[structopt(name = "nes-cpu-trace", about = "Run a 6502 program and trace its execution.")]
struct CliOptions {
    /// Path to a flat binary (loaded at $8000) or an iNES (.nes) image.
    #[structopt(parse(from_os_str))]
    program: PathBuf,

    /// Stop after this many instructions instead of running forever.
    #[structopt(short, long)]
    max_ticks: Option<u64>,

    /// Print a disassembly line for every instruction as it runs.
    #[structopt(short, long)]
    trace: bool,
}

fn main() {
    let options = CliOptions::from_args();

    let bytes = match fs::read(&options.program) {
        Ok(bytes) => bytes,
        Err(error) => {
            log::error(&format!(
                "failed to read {}: {}",
                options.program.display(),
                error
            ));
            process::exit(1);
        }
    };

    let bus = Bus::new_shared();

    if bytes.starts_with(b"NES\x1A") {
        match Cartridge::from_ines_bytes(&bytes) {
            Ok(cartridge) => cartridge.load_into(&bus, None),
            Err(error) => {
                log::error(&format!("{}", error));
                process::exit(1);
            }
        }
    } else {
        let cartridge = Cartridge::from_flat_prg(bytes);
        cartridge.load_into(&bus, Some(0x8000));
    }

    let mut cpu = Cpu::new(bus);
    cpu.max_ticks = options.max_ticks;
    let cpu = Rc::new(RefCell::new(cpu));

    let mut clock = MasterClock::new();
    let trace = options.trace;
    let cpu_for_tick = Rc::clone(&cpu);
    // The CPU is the master clock's only registered child here; the PPU's
    // register stub has nothing worth scheduling for this demo.
    clock.add_child(CPU_DIVISOR, move || {
        let mut cpu = cpu_for_tick.borrow_mut();
        if trace {
            let line = disassemble_at(&cpu, cpu.pc);
            println!("{}", line);
        }
        cpu.tick();
    });

    loop {
        clock.tick();
        let done = {
            let cpu = cpu.borrow();
            match cpu.max_ticks {
                Some(max_ticks) => cpu.tick_count >= max_ticks,
                None => false,
            }
        };
        if done {
            break;
        }
    }

    let cpu = cpu.borrow();
    println!(
        "A={:02X} X={:02X} Y={:02X} PC={:04X} SP={:02X} P={:08b}",
        cpu.a, cpu.x, cpu.y, cpu.pc, cpu.s, cpu.p
    );
}
