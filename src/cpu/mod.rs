use crate::constants::{memory_range, InterruptVectors};
use crate::interrupts::InterruptLines;
use crate::log;

use crate::bus::SharedBus;

mod opcodes;
mod ops_arith;
mod ops_control;
mod ops_transfer;

#[cfg(test)]
mod test_helpers;

// Test must be after test_helpers, rustfmt tries to move things around.
#[cfg(test)]
mod test;

pub use opcodes::{Mode, MNEMONIC_TABLE, MODE_TABLE};

/// The flags that make up the `P` status register, in hardware bit order.
#[rustfmt::skip]
pub enum StatusFlag {
    Carry            = 0b0000_0001,
    Zero             = 0b0000_0010,
    InterruptDisable = 0b0000_0100,
    Decimal          = 0b0000_1000,
    Break            = 0b0001_0000,
    Unused           = 0b0010_0000,
    Overflow         = 0b0100_0000,
    Negative         = 0b1000_0000,
}

/// Power-on/reset value of `P`: interrupts disabled, the unused and break
/// bits set, everything else clear.
pub const RESET_STATUS_FLAG: u8 = 0b0011_0100;

/// This struct implements the MOS Technology 6502 central processing unit,
/// the NES's "2A03" variant (decimal mode present in hardware but never
/// exercised: the NES wiring leaves it disabled).
///
/// http://www.6502.org/
/// https://en.wikipedia.org/wiki/MOS_Technology_6502
/// http://wiki.nesdev.com/w/index.php/CPU
pub struct Cpu {
    pub bus: SharedBus,
    /// "A" register, the accumulator. Most arithmetic and logical results
    /// land here.
    pub a: u8,
    /// "X" register. General purpose, and the index used by most indexed
    /// addressing modes.
    pub x: u8,
    /// "Y" register.
    pub y: u8,
    /// "PC" - Program counter. Wraps modulo 2^16.
    pub pc: u16,
    /// "S" - Stack pointer. The hardware stack lives at $0100-$01FF; the
    /// 6502 uses a descending stack, so `s` points at the next free slot.
    pub s: u8,
    /// "P" - Status register. See `StatusFlag` for the bit layout.
    pub p: u8,
    /// Cycles spent on the instruction most recently dispatched, including
    /// any page-boundary penalty. Reset to 0 at the start of every `tick()`.
    pub cycles: u8,
    pub tick_count: u64,
    /// External interrupt lines, sampled once per instruction boundary.
    pub interrupts: InterruptLines,
    /// Stop running after this many ticks. Used by tests and the demo
    /// binary's instruction-count limit; `None` means run forever.
    pub max_ticks: Option<u64>,
}

impl Cpu {
    /// Builds a CPU and performs a cold reset: `pc` loads from the RESET
    /// vector and `s` is set to $FD with no warm-reset adjustment, matching
    /// power-on behavior.
    pub fn new(bus: SharedBus) -> Cpu {
        let mut cpu = Cpu {
            bus,
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            s: 0xFD,
            p: RESET_STATUS_FLAG,
            cycles: 0,
            tick_count: 0,
            interrupts: InterruptLines::new(),
            max_ticks: None,
        };
        cpu.reset(false);
        cpu
    }

    /// Re-enters reset, the way re-inserting a cartridge or pulling the
    /// RESET line low mid-run would. Reloads `pc` from the RESET vector and
    /// sets `I`. `warm` selects between cold power-on (`s = $FD`) and a warm
    /// reset, which instead subtracts 3 from the current `s` modulo 256 (the
    /// stack pointer "remembers" the 3 bytes a real 6502 tries to push while
    /// RESET is held low, since writes are suppressed but the pointer still
    /// moves).
    pub fn reset(&mut self, warm: bool) {
        self.pc = self.bus.borrow().read_u16(InterruptVectors::Reset as u16);
        if warm {
            self.s = self.s.wrapping_sub(3);
        } else {
            self.s = 0xFD;
        }
        self.p |= StatusFlag::InterruptDisable as u8;
    }

    /// Read the byte at `pc` and advance `pc` by one.
    fn next_u8(&mut self) -> u8 {
        let value = self.bus.borrow().read_u8(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Read the little-endian word at `pc` and advance `pc` by two.
    fn next_u16(&mut self) -> u16 {
        let value = self.bus.borrow().read_u16(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    /// Runs until `predicate` holds, ticking one instruction (or interrupt
    /// entry) at a time. Useful for tests that want to stop on a condition
    /// rather than an instruction count.
    pub fn run_until<F>(&mut self, predicate: F)
    where
        F: Fn(&Cpu) -> bool,
    {
        while !predicate(self) {
            self.tick();
        }
    }

    /// Runs the CPU until `max_ticks` is reached, if set. There is no
    /// dedicated stop opcode; callers that want a bounded run set
    /// `max_ticks` or use `run_until`.
    pub fn run(&mut self) {
        loop {
            self.tick();
            if let Some(max_ticks) = self.max_ticks {
                if self.tick_count >= max_ticks {
                    break;
                }
            }
        }
    }

    /// Advances the CPU by one instruction, or by one interrupt-entry
    /// sequence if a line is asserted and due to be serviced. Mirrors
    /// `MasterClock`'s child-callback shape so a `Cpu` can be registered
    /// directly as a clock child.
    pub fn tick(&mut self) {
        self.tick_count += 1;
        self.cycles = 0;

        if self.interrupts.take_nmi() {
            self.enter_interrupt(InterruptVectors::NonMaskableInterrupt as u16, false);
            return;
        }
        if self.interrupts.is_irq_asserted() && !self.is_status_flag_set(StatusFlag::InterruptDisable) {
            self.enter_interrupt(InterruptVectors::IrqOrBrk as u16, false);
            return;
        }

        let pc_at_fetch = self.pc;
        let opcode = self.next_u8();
        let opcode_index = opcode as usize;

        self.cycles += opcodes::BASE_CYCLES_TABLE[opcode_index];
        let mode = opcodes::MODE_TABLE[opcode_index];

        match opcodes::HANDLER_TABLE[opcode_index] {
            Some(handler) => handler(self, mode),
            None => {
                log::warn(&format!(
                    "unknown opcode ${:02X} at ${:04X}",
                    opcode, pc_at_fetch
                ));
            }
        }
    }

    /// Pushes PC (high byte first) and P (with B/U forced per `is_brk`),
    /// sets I, and loads PC from `vector`. Used for NMI, IRQ, and BRK; the
    /// only difference between BRK and a hardware interrupt is that BRK has
    /// already advanced PC past its signature byte before this runs, and
    /// pushes with both B and U set instead of B clear.
    fn enter_interrupt(&mut self, vector: u16, is_brk: bool) {
        self.push_stack_u16(self.pc);
        let mut flags = self.p | (StatusFlag::Unused as u8);
        if is_brk {
            flags |= StatusFlag::Break as u8;
        } else {
            flags &= !(StatusFlag::Break as u8);
        }
        self.push_stack_u8(flags);
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        self.pc = self.bus.borrow().read_u16(vector);
        self.cycles += 7;
    }

    /// Services a BRK instruction: identical to a hardware interrupt entry,
    /// except the return address pushed is PC+1 past the signature byte
    /// (the byte BRK already skips for its padding operand) and the pushed
    /// flags have B forced to 1.
    fn brk_sequence(&mut self) {
        self.pc = self.pc.wrapping_add(1);
        self.enter_interrupt(InterruptVectors::IrqOrBrk as u16, true);
    }

    // -- addressing mode resolution -----------------------------------

    /// Resolves the effective address for every mode except `Implicit` and
    /// `Accumulator`, which have no address and must be special-cased by
    /// the caller.
    ///
    /// Source for the mode descriptions: http://www.emulator101.com/6502-addressing-modes.html
    fn operand_address(&mut self, mode: Mode) -> u16 {
        match mode {
            Mode::Absolute => self.next_u16(),
            Mode::AbsoluteX => {
                let base = self.next_u16();
                let address = base.wrapping_add(self.x as u16);
                self.incur_extra_cycle_on_page_boundary(base, address);
                address
            }
            Mode::AbsoluteY => {
                let base = self.next_u16();
                let address = base.wrapping_add(self.y as u16);
                self.incur_extra_cycle_on_page_boundary(base, address);
                address
            }
            Mode::Immediate => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                address
            }
            // Indirect JMP page-boundary bug: if the pointer's low byte is
            // $FF, the high byte is re-read from the *same* page instead of
            // wrapping into the next one.
            Mode::Indirect => {
                let pointer = self.next_u16();
                self.read_u16_page_wrapped(pointer)
            }
            Mode::IndirectX => {
                let zero_page_base = self.next_u8().wrapping_add(self.x);
                self.read_u16_zero_page_wrapped(zero_page_base)
            }
            Mode::IndirectY => {
                let zero_page_base = self.next_u8();
                let base = self.read_u16_zero_page_wrapped(zero_page_base);
                let address = base.wrapping_add(self.y as u16);
                self.incur_extra_cycle_on_page_boundary(base, address);
                address
            }
            // Branches only; the offset is relative to the address right
            // after the one-byte operand.
            Mode::Relative => {
                let offset = self.next_u8() as i8;
                let base = self.pc;
                let address = base.wrapping_add(offset as u16);
                self.incur_extra_cycle_on_page_boundary(base, address);
                address
            }
            Mode::ZeroPage => self.next_u8() as u16,
            // 6502 bug, faithfully kept: zero-page indexing never leaves
            // page zero. `base + X` wraps within the u8 space.
            Mode::ZeroPageX => self.next_u8().wrapping_add(self.x) as u16,
            Mode::ZeroPageY => self.next_u8().wrapping_add(self.y) as u16,
            Mode::Implicit | Mode::Accumulator => {
                panic!("{:?} has no operand address", mode)
            }
        }
    }

    /// Reads a 16-bit pointer from `address`, with the indirect-JMP
    /// page-boundary bug: the high byte wraps within the same page as the
    /// low byte rather than crossing into the next one.
    fn read_u16_page_wrapped(&self, address: u16) -> u16 {
        let low = self.bus.borrow().read_u8(address) as u16;
        let high_address = (address & 0xFF00) | (address.wrapping_add(1) & 0x00FF);
        let high = self.bus.borrow().read_u8(high_address) as u16;
        (high << 8) | low
    }

    /// Reads a 16-bit pointer out of the zero page starting at `base`,
    /// wrapping the high byte read within page zero instead of crossing
    /// into the stack page. Used by Indirect,X and Indirect,Y.
    fn read_u16_zero_page_wrapped(&self, base: u8) -> u16 {
        let low = self.bus.borrow().read_u8(base as u16) as u16;
        let high = self.bus.borrow().read_u8(base.wrapping_add(1) as u16) as u16;
        (high << 8) | low
    }

    fn incur_extra_cycle_on_page_boundary(&mut self, base_address: u16, offset_address: u16) {
        let base_page = base_address & 0xFF00;
        let offset_page = offset_address & 0xFF00;
        if base_page != offset_page {
            self.cycles += 1;
        }
    }

    /// Returns the address and current value for every mode but
    /// `Accumulator`, which has no address: callers that need to write the
    /// result back (read-modify-write instructions) dispatch on `None` to
    /// target `self.a` instead of the bus.
    fn operand(&mut self, mode: Mode) -> (Option<u16>, u8) {
        if mode == Mode::Accumulator {
            return (None, self.a);
        }
        let address = self.operand_address(mode);
        let value = self.bus.borrow().read_u8(address);
        (Some(address), value)
    }

    /// Convenience for instructions that only ever read a memory/immediate
    /// operand and never need to write it back (loads, arithmetic, compares).
    fn operand_value(&mut self, mode: Mode) -> u8 {
        self.operand(mode).1
    }

    /// Read-modify-write helper shared by ASL/LSR/ROL/ROR/INC/DEC: resolves
    /// the operand once, applies `op` to get the new value, and writes it
    /// back to wherever it came from (the accumulator or the bus).
    fn rmw<F: FnOnce(&mut Cpu, u8) -> u8>(&mut self, mode: Mode, op: F) {
        let (address, value) = self.operand(mode);
        let result = op(self, value);
        match address {
            Some(address) => self.bus.borrow_mut().write_u8(address, result),
            None => self.a = result,
        }
    }

    // -- flags -----------------------------------------------------------

    fn set_status_flag(&mut self, flag: StatusFlag, value: bool) {
        if value {
            self.p |= flag as u8;
        } else {
            self.p &= !(flag as u8);
        }
    }

    fn is_status_flag_set(&self, flag: StatusFlag) -> bool {
        let bit = flag as u8;
        self.p & bit == bit
    }

    /// N and Z are derived from the result value alone, and this pair is
    /// updated together by nearly every instruction.
    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_status_flag(StatusFlag::Zero, value == 0);
        self.set_status_flag(StatusFlag::Negative, value & 0b1000_0000 != 0);
    }

    fn carry(&self) -> u8 {
        if self.is_status_flag_set(StatusFlag::Carry) {
            1
        } else {
            0
        }
    }

    // -- stack -------------------------------------------------------------

    fn push_stack_u8(&mut self, value: u8) {
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.bus.borrow_mut().write_u8(address, value);
        self.s = self.s.wrapping_sub(1);
    }

    fn pull_stack_u8(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.bus.borrow().read_u8(address)
    }

    fn push_stack_u16(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push_stack_u8(high);
        self.push_stack_u8(low);
    }

    fn pull_stack_u16(&mut self) -> u16 {
        let low = self.pull_stack_u8() as u16;
        let high = self.pull_stack_u8() as u16;
        (high << 8) | low
    }
}
