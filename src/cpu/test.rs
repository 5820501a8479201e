//! End-to-end tests that drive the CPU the way the demo binary and a real
//! program would: by writing raw opcodes into the bus and ticking, rather
//! than calling instruction handlers directly (see the per-family test
//! modules in `ops_arith`/`ops_control` for that level of coverage).

use super::opcodes::BASE_CYCLES_TABLE;
use super::test_helpers::*;
use super::*;
use crate::bus::Bus;
use crate::constants::InterruptVectors;

#[test]
fn test_lda_immediate_loads_and_sets_flags() {
    let cpu = run_asm("LDA #$00", 1);
    assert_eq!(cpu.a, 0x00);
    assert_status(&cpu, P | Z);
}

#[test]
fn test_lda_immediate_twice_leaves_final_value() {
    let cpu = run_asm("LDA #$01\nLDA #$80", 2);
    assert_eq!(cpu.a, 0x80);
    assert_status(&cpu, P | N);
}

#[test]
fn test_jsr_rts_round_trip() {
    let mut cpu = cpu_with_asm(
        "  JSR target\n  BRK\n  BRK\n  BRK\ntarget:\n  NOP\n  RTS",
    );
    let original_s = cpu.s;
    cpu.tick(); // JSR
    assert_eq!(cpu.pc, 0x8006);
    cpu.tick(); // NOP at the landing pad
    cpu.tick(); // RTS
    assert_eq!(cpu.pc, 0x8003); // right after the 3-byte JSR
    assert_eq!(cpu.s, original_s);
}

#[test]
fn test_adc_with_carry_chain() {
    let cpu = run_asm("SEC\nLDA #$7F\nADC #$01", 3);
    assert_eq!(cpu.a, 0x81);
    assert!(cpu.is_status_flag_set(StatusFlag::Negative));
    assert!(cpu.is_status_flag_set(StatusFlag::Overflow));
    assert!(!cpu.is_status_flag_set(StatusFlag::Carry));
}

#[test]
fn test_indirect_jmp_page_boundary_bug_end_to_end() {
    let bus = Bus::new_shared();
    // JMP ($90FF)
    bus.borrow_mut().write_u8(0x8000, 0x6C);
    bus.borrow_mut().write_u16(0x8001, 0x90FF);
    bus.borrow_mut().write_u8(0x90FF, 0x34);
    bus.borrow_mut().write_u8(0x9000, 0x12); // should be read, not $9100
    bus.borrow_mut().write_u8(0x9100, 0xFF);
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0x8000);
    let mut cpu = Cpu::new(bus);
    cpu.tick();
    assert_eq!(cpu.pc, 0x1234);
}

#[test]
fn test_reset_vector_sets_initial_pc() {
    let bus = Bus::new_shared();
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0xC000);
    let cpu = Cpu::new(bus);
    assert_eq!(cpu.pc, 0xC000);
}

#[test]
fn test_warm_reset_subtracts_3_from_sp() {
    let bus = Bus::new_shared();
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0xC000);
    let mut cpu = Cpu::new(bus);
    assert_eq!(cpu.s, 0xFD); // cold power-on: no subtraction

    cpu.s = 0x80;
    cpu.pc = 0x1234;
    cpu.bus
        .borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0xD000);
    cpu.reset(true);
    assert_eq!(cpu.s, 0x7D);
    assert_eq!(cpu.pc, 0xD000);
    assert!(cpu.is_status_flag_set(StatusFlag::InterruptDisable));
}

#[test]
fn test_warm_reset_wraps_sp_below_zero() {
    let bus = Bus::new_shared();
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0xC000);
    let mut cpu = Cpu::new(bus);
    cpu.s = 0x01;
    cpu.reset(true);
    assert_eq!(cpu.s, 0xFE);
}

#[test]
fn test_zero_page_x_wraps_within_page_zero() {
    let mut cpu = cpu_with_asm("LDA $C0,X");
    cpu.x = 0x60;
    cpu.bus.borrow_mut().write_u8(0x20, 0x99);
    cpu.tick();
    assert_eq!(cpu.a, 0x99);
}

#[test]
fn test_indirect_y_crossing_page_boundary_adds_cycle() {
    let mut cpu = cpu_with_asm("LDA ($10),Y");
    cpu.bus.borrow_mut().write_u16(0x10, 0x30FF);
    cpu.y = 0x01; // 0x30FF + 1 crosses into page 0x31
    cpu.bus.borrow_mut().write_u8(0x3100, 0x55);
    cpu.tick();
    assert_eq!(cpu.a, 0x55);
    assert_eq!(cpu.cycles, BASE_CYCLES_TABLE[0xB1] + 1);
}

#[test]
fn test_branch_offset_extremes() {
    // BPL -128 from a location that won't underflow the test's chosen PC.
    let mut cpu = cpu_with_program(&[0x10, 0x80]); // BPL -128
    cpu.set_status_flag(StatusFlag::Negative, false);
    let expected = cpu.pc.wrapping_add(2).wrapping_sub(128);
    cpu.tick();
    assert_eq!(cpu.pc, expected);

    let mut cpu = cpu_with_program(&[0x10, 0x7F]); // BPL +127
    cpu.set_status_flag(StatusFlag::Negative, false);
    let expected = cpu.pc.wrapping_add(2).wrapping_add(127);
    cpu.tick();
    assert_eq!(cpu.pc, expected);
}

#[test]
fn test_stack_wrap_on_push_at_zero() {
    let mut cpu = cpu_with_program(&[]);
    cpu.s = 0x00;
    cpu.push_stack_u8(0xAB);
    assert_eq!(cpu.bus.borrow().read_u8(0x0100), 0xAB);
    assert_eq!(cpu.s, 0xFF);
}

#[test]
fn test_unknown_opcode_is_logged_and_skipped() {
    // $02 is undefined; PC should simply advance past it.
    let mut cpu = cpu_with_program(&[0x02, 0xA9, 0x42]); // ??? ; LDA #$42
    cpu.tick();
    assert_eq!(cpu.pc, 0x8001);
    cpu.tick();
    assert_eq!(cpu.a, 0x42);
}

#[test]
fn test_nmi_interrupts_between_instructions() {
    let bus = Bus::new_shared();
    bus.borrow_mut().write_u8(0x8000, 0xEA); // NOP
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0x8000);
    bus.borrow_mut()
        .write_u16(InterruptVectors::NonMaskableInterrupt as u16, 0x9000);
    let mut cpu = Cpu::new(bus);
    cpu.interrupts.assert_nmi();
    cpu.tick();
    assert_eq!(cpu.pc, 0x9000);
}

#[test]
fn test_irq_ignored_when_interrupt_disable_set() {
    let bus = Bus::new_shared();
    bus.borrow_mut().write_u8(0x8000, 0xEA); // NOP
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0x8000);
    bus.borrow_mut()
        .write_u16(InterruptVectors::IrqOrBrk as u16, 0x9000);
    let mut cpu = Cpu::new(bus);
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
    cpu.interrupts.assert_irq();
    cpu.tick();
    assert_eq!(cpu.pc, 0x8001); // the NOP ran, the IRQ stayed pending
}

#[test]
fn test_brk_pushes_return_address_and_flags_then_vectors() {
    let bus = Bus::new_shared();
    bus.borrow_mut().write_u8(0x8000, 0x00); // BRK
    bus.borrow_mut()
        .write_u16(InterruptVectors::Reset as u16, 0x8000);
    bus.borrow_mut()
        .write_u16(InterruptVectors::IrqOrBrk as u16, 0x9000);
    let mut cpu = Cpu::new(bus);
    cpu.tick();
    assert_eq!(cpu.pc, 0x9000);
    assert!(cpu.is_status_flag_set(StatusFlag::InterruptDisable));
    let pushed_flags = cpu.pull_stack_u8();
    assert!(pushed_flags & (StatusFlag::Break as u8) != 0);
    let pushed_pc = cpu.pull_stack_u16();
    assert_eq!(pushed_pc, 0x8002);
}
