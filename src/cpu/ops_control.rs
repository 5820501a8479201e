//! Branches, jumps, the stack instructions, flag setters/clearers, BIT,
//! BRK/RTI, and NOP.

use super::{Cpu, Mode, StatusFlag};

fn branch(cpu: &mut Cpu, mode: Mode, condition: bool) {
    let address = cpu.operand_address(mode);
    if condition {
        cpu.pc = address;
    }
}

/// Branch if plus (N=0)
pub fn bpl(cpu: &mut Cpu, mode: Mode) {
    let condition = !cpu.is_status_flag_set(StatusFlag::Negative);
    branch(cpu, mode, condition);
}

/// Branch if minus (N=1)
pub fn bmi(cpu: &mut Cpu, mode: Mode) {
    let condition = cpu.is_status_flag_set(StatusFlag::Negative);
    branch(cpu, mode, condition);
}

/// Branch if overflow clear
pub fn bvc(cpu: &mut Cpu, mode: Mode) {
    let condition = !cpu.is_status_flag_set(StatusFlag::Overflow);
    branch(cpu, mode, condition);
}

/// Branch if overflow set
pub fn bvs(cpu: &mut Cpu, mode: Mode) {
    let condition = cpu.is_status_flag_set(StatusFlag::Overflow);
    branch(cpu, mode, condition);
}

/// Branch if carry clear
pub fn bcc(cpu: &mut Cpu, mode: Mode) {
    let condition = !cpu.is_status_flag_set(StatusFlag::Carry);
    branch(cpu, mode, condition);
}

/// Branch if carry set
pub fn bcs(cpu: &mut Cpu, mode: Mode) {
    let condition = cpu.is_status_flag_set(StatusFlag::Carry);
    branch(cpu, mode, condition);
}

/// Branch if not equal (Z=0)
pub fn bne(cpu: &mut Cpu, mode: Mode) {
    let condition = !cpu.is_status_flag_set(StatusFlag::Zero);
    branch(cpu, mode, condition);
}

/// Branch if equal (Z=1)
pub fn beq(cpu: &mut Cpu, mode: Mode) {
    let condition = cpu.is_status_flag_set(StatusFlag::Zero);
    branch(cpu, mode, condition);
}

/// Force break: pushes PC+2 (the extra byte accounts for BRK's padding
/// operand) and flags with B and U both set, then jumps through the
/// IRQ/BRK vector.
/// Flags: B I
pub fn brk(cpu: &mut Cpu, _mode: Mode) {
    cpu.brk_sequence();
}

/// Return from interrupt: pops flags (B/U from the stack are discarded,
/// same as PLP), then pops PC with no +1.
/// Flags: N V D I Z C
pub fn rti(cpu: &mut Cpu, _mode: Mode) {
    let flags = cpu.pull_stack_u8();
    cpu.p = (flags & !(StatusFlag::Break as u8)) | (StatusFlag::Unused as u8);
    cpu.pc = cpu.pull_stack_u16();
}

/// Jump to subroutine: pushes the address of the last byte of the JSR
/// instruction (not the next instruction), so RTS can pop-and-add-one.
pub fn jsr(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    cpu.push_stack_u16(cpu.pc.wrapping_sub(1));
    cpu.pc = address;
}

/// Return from subroutine
pub fn rts(cpu: &mut Cpu, _mode: Mode) {
    cpu.pc = cpu.pull_stack_u16().wrapping_add(1);
}

/// Jump. Carries the indirect-JMP page-boundary bug via `operand_address`.
pub fn jmp(cpu: &mut Cpu, mode: Mode) {
    cpu.pc = cpu.operand_address(mode);
}

/// Bit test: A is not modified.
/// Flags: N V Z
pub fn bit(cpu: &mut Cpu, mode: Mode) {
    let operand = cpu.operand_value(mode);
    cpu.set_status_flag(StatusFlag::Negative, operand & 0b1000_0000 != 0);
    cpu.set_status_flag(StatusFlag::Overflow, operand & 0b0100_0000 != 0);
    cpu.set_status_flag(StatusFlag::Zero, cpu.a & operand == 0);
}

/// Push A
pub fn pha(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_stack_u8(cpu.a);
}

/// Pull A
/// Flags: N Z
pub fn pla(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.pull_stack_u8();
    cpu.update_zero_and_negative_flags(cpu.a);
}

/// Push status flags, with B and U both forced to 1: the pushed byte never
/// reflects the CPU's internal (non-existent) B/U storage, only the
/// convention PHP always writes.
pub fn php(cpu: &mut Cpu, _mode: Mode) {
    let flags = cpu.p | (StatusFlag::Break as u8) | (StatusFlag::Unused as u8);
    cpu.push_stack_u8(flags);
}

/// Pull status flags. B and U from the stack are discarded; the CPU's own
/// B/U bits are not user-writable via PLP.
pub fn plp(cpu: &mut Cpu, _mode: Mode) {
    let pulled = cpu.pull_stack_u8();
    cpu.p = (pulled & !(StatusFlag::Break as u8)) | (StatusFlag::Unused as u8);
}

/// Clear carry
pub fn clc(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Carry, false);
}

/// Set carry
pub fn sec(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Carry, true);
}

/// Clear decimal. The NES's 6502 ignores D for arithmetic, but the flag
/// itself is still a real, settable bit.
pub fn cld(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Decimal, false);
}

/// Set decimal
pub fn sed(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Decimal, true);
}

/// Clear interrupt disable
pub fn cli(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, false);
}

/// Set interrupt disable
pub fn sei(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
}

/// Clear overflow
pub fn clv(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Overflow, false);
}

/// No operation. Covers both the official single-byte NOP and the
/// unofficial multi-byte immediate variants, which still need their
/// operand byte(s) skipped even though the value is discarded.
pub fn nop(cpu: &mut Cpu, mode: Mode) {
    if mode != Mode::Implicit {
        cpu.operand_value(mode);
    }
}

#[cfg(test)]
mod test {
    use super::super::test_helpers::*;
    use super::*;

    #[test]
    fn test_jsr_then_rts_round_trips_pc_and_sp() {
        let mut cpu = cpu_with_program(&[0x10, 0x90]); // operand for JSR $9010
        let original_s = cpu.s;
        let pc_after_jsr_operand = cpu.pc.wrapping_add(2);
        jsr(&mut cpu, Mode::Absolute);
        assert_eq!(cpu.pc, 0x9010);
        rts(&mut cpu, Mode::Implicit);
        assert_eq!(cpu.pc, pc_after_jsr_operand);
        assert_eq!(cpu.s, original_s);
    }

    #[test]
    fn test_php_then_plp_restores_all_but_break_and_unused() {
        let mut cpu = cpu_with_program(&[]);
        cpu.p = 0b1010_1010;
        php(&mut cpu, Mode::Implicit);
        cpu.p = 0;
        plp(&mut cpu, Mode::Implicit);
        let preserved_mask = !(StatusFlag::Break as u8) & !(StatusFlag::Unused as u8);
        assert_eq!(cpu.p & preserved_mask, 0b1010_1010 & preserved_mask);
        assert!(cpu.is_status_flag_set(StatusFlag::Unused));
        assert!(!cpu.is_status_flag_set(StatusFlag::Break));
    }

    #[test]
    fn test_branch_taken_and_not_taken() {
        let mut cpu = cpu_with_program(&[0x02]); // operand for BPL +2
        cpu.set_status_flag(StatusFlag::Negative, false);
        let expected = cpu.pc.wrapping_add(1).wrapping_add(2);
        bpl(&mut cpu, Mode::Relative);
        assert_eq!(cpu.pc, expected);
    }

    #[test]
    fn test_bit_sets_overflow_and_negative_from_operand_not_result() {
        let mut cpu = cpu_with_program(&[0x05]); // zero-page operand: address $05
        cpu.a = 0x00;
        cpu.bus.borrow_mut().write_u8(0x05, 0b1100_0000);
        bit(&mut cpu, Mode::ZeroPage);
        assert!(cpu.is_status_flag_set(StatusFlag::Negative));
        assert!(cpu.is_status_flag_set(StatusFlag::Overflow));
        assert!(cpu.is_status_flag_set(StatusFlag::Zero));
    }
}
