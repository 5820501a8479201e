use super::ops_arith as arith;
use super::ops_control as control;
use super::ops_transfer as transfer;
use super::Cpu;

/// An addressing mode, resolved to an effective address (or, for
/// `Implicit`/`Accumulator`, not resolved at all) by `Cpu::operand_address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

type OperationFn = fn(&mut Cpu, Mode);

/// 56 official mnemonics plus the unofficial multi-byte immediate NOPs
/// ("NOPu"); everything else is an undefined opcode the dispatcher logs and
/// skips past. Kept in lockstep with `MODE_TABLE` and `HANDLER_TABLE` below
/// by construction (one array literal per opcode row), and reused by the
/// disassembler so a decode change can never drift out of sync with the
/// disassembly text.
#[rustfmt::skip]
pub const MNEMONIC_TABLE: [&str; 256] = [
    "BRK", "ORA", "???", "???", "???", "ORA", "ASL", "???",
    "PHP", "ORA", "ASL", "???", "???", "ORA", "ASL", "???",
    "BPL", "ORA", "???", "???", "???", "ORA", "ASL", "???",
    "CLC", "ORA", "???", "???", "???", "ORA", "ASL", "???",
    "JSR", "AND", "???", "???", "BIT", "AND", "ROL", "???",
    "PLP", "AND", "ROL", "???", "BIT", "AND", "ROL", "???",
    "BMI", "AND", "???", "???", "???", "AND", "ROL", "???",
    "SEC", "AND", "???", "???", "???", "AND", "ROL", "???",
    "RTI", "EOR", "???", "???", "???", "EOR", "LSR", "???",
    "PHA", "EOR", "LSR", "???", "JMP", "EOR", "LSR", "???",
    "BVC", "EOR", "???", "???", "???", "EOR", "LSR", "???",
    "CLI", "EOR", "???", "???", "???", "EOR", "LSR", "???",
    "RTS", "ADC", "???", "???", "???", "ADC", "ROR", "???",
    "PLA", "ADC", "ROR", "???", "JMP", "ADC", "ROR", "???",
    "BVS", "ADC", "???", "???", "???", "ADC", "ROR", "???",
    "SEI", "ADC", "???", "???", "???", "ADC", "ROR", "???",
    "NOPu", "STA", "NOPu", "???", "STY", "STA", "STX", "???",
    "DEY", "NOPu", "TXA", "???", "STY", "STA", "STX", "???",
    "BCC", "STA", "???", "???", "STY", "STA", "STX", "???",
    "TYA", "STA", "TXS", "???", "???", "STA", "???", "???",
    "LDY", "LDA", "LDX", "???", "LDY", "LDA", "LDX", "???",
    "TAY", "LDA", "TAX", "???", "LDY", "LDA", "LDX", "???",
    "BCS", "LDA", "???", "???", "LDY", "LDA", "LDX", "???",
    "CLV", "LDA", "TSX", "???", "LDY", "LDA", "LDX", "???",
    "CPY", "CMP", "NOPu", "???", "CPY", "CMP", "DEC", "???",
    "INY", "CMP", "DEX", "???", "CPY", "CMP", "DEC", "???",
    "BNE", "CMP", "???", "???", "???", "CMP", "DEC", "???",
    "CLD", "CMP", "???", "???", "???", "CMP", "DEC", "???",
    "CPX", "SBC", "NOPu", "???", "CPX", "SBC", "INC", "???",
    "INX", "SBC", "NOP", "???", "CPX", "SBC", "INC", "???",
    "BEQ", "SBC", "???", "???", "???", "SBC", "INC", "???",
    "SED", "SBC", "???", "???", "???", "SBC", "INC", "???",
];

#[rustfmt::skip]
pub const MODE_TABLE: [Mode; 256] = [
    Mode::Implicit, Mode::IndirectX, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Accumulator, Mode::Implicit, Mode::Implicit, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::AbsoluteX, Mode::Implicit,
    Mode::Absolute, Mode::IndirectX, Mode::Implicit, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Accumulator, Mode::Implicit, Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::AbsoluteX, Mode::Implicit,
    Mode::Implicit, Mode::IndirectX, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Accumulator, Mode::Implicit, Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::AbsoluteX, Mode::Implicit,
    Mode::Implicit, Mode::IndirectX, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Accumulator, Mode::Implicit, Mode::Indirect, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::AbsoluteX, Mode::Implicit,
    Mode::Immediate, Mode::IndirectX, Mode::Immediate, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Implicit, Mode::Implicit, Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::ZeroPageY, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::Implicit, Mode::Implicit,
    Mode::Immediate, Mode::IndirectX, Mode::Immediate, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Implicit, Mode::Implicit, Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::ZeroPageY, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::AbsoluteX, Mode::AbsoluteY, Mode::Implicit,
    Mode::Immediate, Mode::IndirectX, Mode::Immediate, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Implicit, Mode::Implicit, Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::AbsoluteX, Mode::Implicit,
    Mode::Immediate, Mode::IndirectX, Mode::Immediate, Mode::Implicit, Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::Implicit,
    Mode::Implicit, Mode::Immediate, Mode::Implicit, Mode::Implicit, Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::Implicit,
    Mode::Relative, Mode::IndirectY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::ZeroPageX, Mode::ZeroPageX, Mode::Implicit,
    Mode::Implicit, Mode::AbsoluteY, Mode::Implicit, Mode::Implicit, Mode::Implicit, Mode::AbsoluteX, Mode::AbsoluteX, Mode::Implicit,
];

/// Base cycle cost per opcode, undefined entries zeroed. Page-boundary
/// penalties are added on top by `Cpu::incur_extra_cycle_on_page_boundary`.
#[rustfmt::skip]
pub const BASE_CYCLES_TABLE: [u8; 256] = [
    7, 6, 0, 8, 3, 3, 5, 5, 3, 2, 2, 2, 4, 4, 6, 6,
    2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
    6, 6, 0, 8, 3, 3, 5, 5, 4, 2, 2, 2, 4, 4, 6, 6,
    2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
    6, 6, 0, 8, 3, 3, 5, 5, 3, 2, 2, 2, 3, 4, 6, 6,
    2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
    6, 6, 0, 8, 3, 3, 5, 5, 4, 2, 2, 2, 5, 4, 6, 6,
    2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4,
    2, 6, 0, 6, 4, 4, 4, 4, 2, 5, 2, 5, 5, 5, 5, 5,
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4,
    2, 5, 0, 5, 4, 4, 4, 4, 2, 4, 2, 4, 4, 4, 4, 4,
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6,
    2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6,
    2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
];

/// Dispatch table: one handler per defined opcode, `None` for the 100
/// undefined slots the CPU logs and steps past.
#[rustfmt::skip]
pub const HANDLER_TABLE: [Option<OperationFn>; 256] = [
    // 0x00
    Some(control::brk), Some(arith::ora), None, None, None, Some(arith::ora), Some(arith::asl), None,
    Some(control::php), Some(arith::ora), Some(arith::asl), None, None, Some(arith::ora), Some(arith::asl), None,
    // 0x10
    Some(control::bpl), Some(arith::ora), None, None, None, Some(arith::ora), Some(arith::asl), None,
    Some(control::clc), Some(arith::ora), None, None, None, Some(arith::ora), Some(arith::asl), None,
    // 0x20
    Some(control::jsr), Some(arith::and), None, None, Some(control::bit), Some(arith::and), Some(arith::rol), None,
    Some(control::plp), Some(arith::and), Some(arith::rol), None, Some(control::bit), Some(arith::and), Some(arith::rol), None,
    // 0x30
    Some(control::bmi), Some(arith::and), None, None, None, Some(arith::and), Some(arith::rol), None,
    Some(control::sec), Some(arith::and), None, None, None, Some(arith::and), Some(arith::rol), None,
    // 0x40
    Some(control::rti), Some(arith::eor), None, None, None, Some(arith::eor), Some(arith::lsr), None,
    Some(control::pha), Some(arith::eor), Some(arith::lsr), None, Some(control::jmp), Some(arith::eor), Some(arith::lsr), None,
    // 0x50
    Some(control::bvc), Some(arith::eor), None, None, None, Some(arith::eor), Some(arith::lsr), None,
    Some(control::cli), Some(arith::eor), None, None, None, Some(arith::eor), Some(arith::lsr), None,
    // 0x60
    Some(control::rts), Some(arith::adc), None, None, None, Some(arith::adc), Some(arith::ror), None,
    Some(control::pla), Some(arith::adc), Some(arith::ror), None, Some(control::jmp), Some(arith::adc), Some(arith::ror), None,
    // 0x70
    Some(control::bvs), Some(arith::adc), None, None, None, Some(arith::adc), Some(arith::ror), None,
    Some(control::sei), Some(arith::adc), None, None, None, Some(arith::adc), Some(arith::ror), None,
    // 0x80
    Some(control::nop), Some(transfer::sta), Some(control::nop), None, Some(transfer::sty), Some(transfer::sta), Some(transfer::stx), None,
    Some(arith::dey), Some(control::nop), Some(transfer::txa), None, Some(transfer::sty), Some(transfer::sta), Some(transfer::stx), None,
    // 0x90
    Some(control::bcc), Some(transfer::sta), None, None, Some(transfer::sty), Some(transfer::sta), Some(transfer::stx), None,
    Some(transfer::tya), Some(transfer::sta), Some(transfer::txs), None, None, Some(transfer::sta), None, None,
    // 0xA0
    Some(transfer::ldy), Some(transfer::lda), Some(transfer::ldx), None, Some(transfer::ldy), Some(transfer::lda), Some(transfer::ldx), None,
    Some(transfer::tay), Some(transfer::lda), Some(transfer::tax), None, Some(transfer::ldy), Some(transfer::lda), Some(transfer::ldx), None,
    // 0xB0
    Some(control::bcs), Some(transfer::lda), None, None, Some(transfer::ldy), Some(transfer::lda), Some(transfer::ldx), None,
    Some(control::clv), Some(transfer::lda), Some(transfer::tsx), None, Some(transfer::ldy), Some(transfer::lda), Some(transfer::ldx), None,
    // 0xC0
    Some(arith::cpy), Some(arith::cmp), Some(control::nop), None, Some(arith::cpy), Some(arith::cmp), Some(arith::dec), None,
    Some(arith::iny), Some(arith::cmp), Some(arith::dex), None, Some(arith::cpy), Some(arith::cmp), Some(arith::dec), None,
    // 0xD0
    Some(control::bne), Some(arith::cmp), None, None, None, Some(arith::cmp), Some(arith::dec), None,
    Some(control::cld), Some(arith::cmp), None, None, None, Some(arith::cmp), Some(arith::dec), None,
    // 0xE0
    Some(arith::cpx), Some(arith::sbc), Some(control::nop), None, Some(arith::cpx), Some(arith::sbc), Some(arith::inc), None,
    Some(arith::inx), Some(arith::sbc), Some(control::nop), None, Some(arith::cpx), Some(arith::sbc), Some(arith::inc), None,
    // 0xF0
    Some(control::beq), Some(arith::sbc), None, None, None, Some(arith::sbc), Some(arith::inc), None,
    Some(control::sed), Some(arith::sbc), None, None, None, Some(arith::sbc), Some(arith::inc), None,
];
