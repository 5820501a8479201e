//! Loads, stores, and register-to-register transfers. None of these touch
//! the Overflow or Carry flags; TXS is the one transfer that updates no
//! flags at all (the stack pointer is not a value instructions branch on).

use super::{Cpu, Mode};

/// Load register A
/// Flags: N Z
pub fn lda(cpu: &mut Cpu, mode: Mode) {
    cpu.a = cpu.operand_value(mode);
    cpu.update_zero_and_negative_flags(cpu.a);
}

/// Store register A
pub fn sta(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    cpu.bus.borrow_mut().write_u8(address, cpu.a);
}

/// Load register X
/// Flags: N Z
pub fn ldx(cpu: &mut Cpu, mode: Mode) {
    cpu.x = cpu.operand_value(mode);
    cpu.update_zero_and_negative_flags(cpu.x);
}

/// Store register X
pub fn stx(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    cpu.bus.borrow_mut().write_u8(address, cpu.x);
}

/// Load register Y
/// Flags: N Z
pub fn ldy(cpu: &mut Cpu, mode: Mode) {
    cpu.y = cpu.operand_value(mode);
    cpu.update_zero_and_negative_flags(cpu.y);
}

/// Store register Y
pub fn sty(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    cpu.bus.borrow_mut().write_u8(address, cpu.y);
}

/// Transfer A to X
/// Flags: N Z
pub fn tax(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative_flags(cpu.x);
}

/// Transfer X to A
/// Flags: N Z
pub fn txa(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.x;
    cpu.update_zero_and_negative_flags(cpu.a);
}

/// Transfer A to Y
/// Flags: N Z
pub fn tay(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative_flags(cpu.y);
}

/// Transfer Y to A
/// Flags: N Z
pub fn tya(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.y;
    cpu.update_zero_and_negative_flags(cpu.a);
}

/// Transfer stack pointer to X
/// Flags: N Z
pub fn tsx(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.s;
    cpu.update_zero_and_negative_flags(cpu.x);
}

/// Transfer X to stack pointer. Unlike every other transfer, this does not
/// touch N or Z: the stack pointer isn't a value programs branch on.
pub fn txs(cpu: &mut Cpu, _mode: Mode) {
    cpu.s = cpu.x;
}
