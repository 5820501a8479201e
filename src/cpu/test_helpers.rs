#![cfg(test)]

use crate::asm::assemble;
use crate::bus::Bus;
use crate::constants::InterruptVectors;
use crate::cpu::{Cpu, RESET_STATUS_FLAG, StatusFlag};

pub const P: u8 = RESET_STATUS_FLAG;
pub const Z: u8 = StatusFlag::Zero as u8;
pub const N: u8 = StatusFlag::Negative as u8;

/// Loads `program` at $8000, points the RESET vector at it, and appends
/// nothing to end the run: callers either drive the CPU with `tick()`
/// directly or use `run_program` below for a full run to a trailing BRK.
pub fn cpu_with_program(program: &[u8]) -> Cpu {
    let bus = Bus::new_shared();
    bus.borrow_mut().write_range(0x8000, program);
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0x8000);
    Cpu::new(bus)
}

/// Loads `program` at $8000 terminated with a BRK, then runs to completion.
/// The BRK vectors through $FFFE, which by default reads as zero bytes
/// (PC=0) and would spin forever, so the IRQ/BRK vector is pointed at a
/// single RTI back to itself-adjacent halt address; tests instead bound the
/// run with `max_ticks` to stay simple and deterministic.
pub fn run_program(program: &[u8], max_ticks: u64) -> Cpu {
    let mut cpu = cpu_with_program(program);
    cpu.max_ticks = Some(max_ticks);
    cpu.run();
    cpu
}

/// Assembles `source` (see `asm::assemble`) and loads it at $8000, for
/// tests that read more clearly as assembly than as a raw byte array.
pub fn cpu_with_asm(source: &str) -> Cpu {
    cpu_with_program(&assemble(source, 0x8000))
}

/// Assembles `source`, loads it at $8000, and runs for `max_ticks` ticks.
pub fn run_asm(source: &str, max_ticks: u64) -> Cpu {
    run_program(&assemble(source, 0x8000), max_ticks)
}

pub fn assert_status(cpu: &Cpu, expected: u8) {
    assert_eq!(
        cpu.p, expected,
        "expected status 0b{:08b} but found 0b{:08b}",
        expected, cpu.p
    );
}
