//! Formats a single already-fetched instruction for the demo binary's trace
//! output. Reads the same mnemonic/mode tables the dispatcher uses, so a
//! decode change can never leave the disassembly out of sync, but otherwise
//! never touches CPU or bus state: it is a pure consumer.

use crate::cpu::Mode;
use crate::cpu::{MNEMONIC_TABLE, MODE_TABLE};
use crate::cpu::Cpu;

/// One disassembled line: `address  raw_bytes  mnemonic  operand  A=.. X=.. Y=.. flags=..`.
pub fn disassemble_at(cpu: &Cpu, address: u16) -> String {
    let opcode = cpu.bus.borrow().read_u8(address);
    let mode = MODE_TABLE[opcode as usize];
    let mnemonic = MNEMONIC_TABLE[opcode as usize];
    let operand_len = operand_byte_len(mode);
    let raw_bytes = cpu.bus.borrow().read_range(address, 1 + operand_len);

    let raw_bytes_text = raw_bytes
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ");

    let operand_text = format_operand(mode, &raw_bytes[1..]);

    format!(
        "{:04X}  {:<8}  {:<4} {:<10}  A={:02X} X={:02X} Y={:02X} flags={:08b}",
        address, raw_bytes_text, mnemonic, operand_text, cpu.a, cpu.x, cpu.y, cpu.p
    )
}

fn operand_byte_len(mode: Mode) -> usize {
    match mode {
        Mode::Implicit | Mode::Accumulator => 0,
        Mode::Immediate
        | Mode::ZeroPage
        | Mode::ZeroPageX
        | Mode::ZeroPageY
        | Mode::IndirectX
        | Mode::IndirectY
        | Mode::Relative => 1,
        Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
    }
}

fn format_operand(mode: Mode, operand_bytes: &[u8]) -> String {
    match mode {
        Mode::Implicit => String::new(),
        Mode::Accumulator => "A".to_string(),
        Mode::Immediate => format!("#${:02X}", operand_bytes[0]),
        Mode::ZeroPage => format!("${:02X}", operand_bytes[0]),
        Mode::ZeroPageX => format!("${:02X},X", operand_bytes[0]),
        Mode::ZeroPageY => format!("${:02X},Y", operand_bytes[0]),
        Mode::IndirectX => format!("(${:02X},X)", operand_bytes[0]),
        Mode::IndirectY => format!("(${:02X}),Y", operand_bytes[0]),
        Mode::Relative => format!("${:02X}", operand_bytes[0]),
        Mode::Absolute => format!("${:02X}{:02X}", operand_bytes[1], operand_bytes[0]),
        Mode::AbsoluteX => format!("${:02X}{:02X},X", operand_bytes[1], operand_bytes[0]),
        Mode::AbsoluteY => format!("${:02X}{:02X},Y", operand_bytes[1], operand_bytes[0]),
        Mode::Indirect => format!("(${:02X}{:02X})", operand_bytes[1], operand_bytes[0]),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bus::Bus;
    use crate::constants::InterruptVectors;

    #[test]
    fn test_disassembles_immediate_load() {
        let bus = Bus::new_shared();
        bus.borrow_mut().write_u8(0x8000, 0xA9); // LDA #$42
        bus.borrow_mut().write_u8(0x8001, 0x42);
        bus.borrow_mut()
            .write_u16(InterruptVectors::Reset as u16, 0x8000);
        let cpu = Cpu::new(bus);

        let line = disassemble_at(&cpu, 0x8000);
        assert!(line.starts_with("8000  A9 42"));
        assert!(line.contains("LDA"));
        assert!(line.contains("#$42"));
    }

    #[test]
    fn test_disassembles_absolute_operand_byte_order() {
        let bus = Bus::new_shared();
        bus.borrow_mut().write_u8(0x8000, 0x4C); // JMP $1234
        bus.borrow_mut().write_u16(0x8001, 0x1234);
        bus.borrow_mut()
            .write_u16(InterruptVectors::Reset as u16, 0x8000);
        let cpu = Cpu::new(bus);

        let line = disassemble_at(&cpu, 0x8000);
        assert!(line.contains("$1234"));
    }
}
