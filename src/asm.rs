//! A small line-based 6502 assembler for test fixtures: turns readable
//! assembly text into the raw bytes `cpu_with_program`/`run_program` load
//! onto the bus, so a test can read `"LDA #$01\nSTA $10"` instead of hand
//! counting opcode bytes. Two passes: the first lays out instruction sizes
//! to resolve label addresses, the second emits bytes with operands and
//! branch offsets filled in.
//!
//! Supports the addressing-mode syntaxes this codebase's test suite
//! actually uses: implicit/accumulator, immediate, zero page (+X/Y),
//! absolute (+X/Y), indirect, (indirect,X), (indirect),Y, and relative
//! branches to a label. Out of scope: macros, data directives, anything
//! beyond what a readable test fixture needs.

use std::collections::HashMap;

use crate::cpu::{Mode, MNEMONIC_TABLE, MODE_TABLE};

/// Assembles `source` into bytes starting at `origin`. Labels are resolved
/// against that base address, so branch offsets and absolute references
/// come out correct regardless of where the program is ultimately loaded.
pub fn assemble(source: &str, origin: u16) -> Vec<u8> {
    let lines: Vec<Line> = source.lines().filter_map(parse_line).collect();
    let opcode_table = build_opcode_table();

    let mut address = origin;
    let mut labels: HashMap<String, u16> = HashMap::new();
    for line in &lines {
        if let Some(label) = &line.label {
            labels.insert(label.clone(), address);
        }
        if let Some(instruction) = &line.instruction {
            address = address.wrapping_add(1 + operand_len(instruction.mode) as u16);
        }
    }

    let mut bytes = Vec::new();
    let mut address = origin;
    for line in &lines {
        let Some(instruction) = &line.instruction else {
            continue;
        };
        let opcode = *opcode_table
            .get(&(instruction.mnemonic.as_str(), instruction.mode))
            .unwrap_or_else(|| {
                panic!(
                    "no opcode for {} in mode {:?}",
                    instruction.mnemonic, instruction.mode
                )
            });
        bytes.push(opcode);

        let instruction_len = 1 + operand_len(instruction.mode) as u16;
        match &instruction.operand {
            Operand::None => {}
            Operand::Byte(value) => bytes.push(*value),
            Operand::Word(value) => {
                bytes.push((*value & 0xFF) as u8);
                bytes.push((*value >> 8) as u8);
            }
            Operand::Label(name) => {
                let target = *labels
                    .get(name)
                    .unwrap_or_else(|| panic!("undefined label {}", name));
                if instruction.mode == Mode::Relative {
                    let next_instruction = address.wrapping_add(instruction_len);
                    let offset = target.wrapping_sub(next_instruction) as i16;
                    assert!(
                        (-128..=127).contains(&offset),
                        "branch to {} out of range",
                        name
                    );
                    bytes.push(offset as i8 as u8);
                } else {
                    bytes.push((target & 0xFF) as u8);
                    bytes.push((target >> 8) as u8);
                }
            }
        }
        address = address.wrapping_add(instruction_len);
    }
    bytes
}

fn build_opcode_table() -> HashMap<(&'static str, Mode), u8> {
    let mut table = HashMap::new();
    for opcode in 0..=255usize {
        let mnemonic = MNEMONIC_TABLE[opcode];
        if mnemonic == "???" {
            continue;
        }
        table.insert((mnemonic, MODE_TABLE[opcode]), opcode as u8);
    }
    table
}

fn operand_len(mode: Mode) -> usize {
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

struct Line {
    label: Option<String>,
    instruction: Option<Instruction>,
}

struct Instruction {
    mnemonic: String,
    mode: Mode,
    operand: Operand,
}

enum Operand {
    None,
    Byte(u8),
    Word(u16),
    Label(String),
}

fn parse_line(raw: &str) -> Option<Line> {
    let text = match raw.find(';') {
        Some(index) => &raw[..index],
        None => raw,
    };
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (label, rest) = match text.find(':') {
        Some(index) => (Some(text[..index].trim().to_string()), text[index + 1..].trim()),
        None => (None, text),
    };
    if rest.is_empty() {
        return Some(Line {
            label,
            instruction: None,
        });
    }

    let mut parts = rest.splitn(2, char::is_whitespace);
    let mnemonic = parts.next().unwrap().to_uppercase();
    let operand_text = parts.next().unwrap_or("").trim();
    let (mode, operand) = parse_operand(&mnemonic, operand_text);

    Some(Line {
        label,
        instruction: Some(Instruction {
            mnemonic,
            mode,
            operand,
        }),
    })
}

const BRANCH_MNEMONICS: [&str; 8] = ["BPL", "BMI", "BVC", "BVS", "BCC", "BCS", "BNE", "BEQ"];

fn parse_operand(mnemonic: &str, text: &str) -> (Mode, Operand) {
    if text.is_empty() {
        return (Mode::Implicit, Operand::None);
    }
    if text.eq_ignore_ascii_case("A") {
        return (Mode::Accumulator, Operand::None);
    }
    if let Some(immediate) = text.strip_prefix('#') {
        return (Mode::Immediate, Operand::Byte(parse_u8(immediate)));
    }
    // (zp),Y: the parenthesis closes right after the zero-page byte.
    if let Some(indirect) = text.strip_suffix(",Y").and_then(|t| {
        t.strip_prefix('(').and_then(|t| t.strip_suffix(')'))
    }) {
        return (Mode::IndirectY, Operand::Byte(parse_u8(indirect)));
    }
    // (zp,X): the ,X is inside the parenthesis.
    if let Some(indirect) = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(",X)"))
    {
        return (Mode::IndirectX, Operand::Byte(parse_u8(indirect)));
    }
    if let Some(pointer) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        return (Mode::Indirect, Operand::Word(parse_address(pointer)));
    }
    if let Some(zero_page) = text.strip_suffix(",X") {
        return match operand_from_address_text(zero_page) {
            Some(value) if value <= 0xFF && !is_word_literal(zero_page) => {
                (Mode::ZeroPageX, Operand::Byte(value as u8))
            }
            Some(value) => (Mode::AbsoluteX, Operand::Word(value)),
            None => (Mode::AbsoluteX, Operand::Label(zero_page.to_string())),
        };
    }
    if let Some(zero_page) = text.strip_suffix(",Y") {
        return match operand_from_address_text(zero_page) {
            Some(value) if value <= 0xFF && !is_word_literal(zero_page) => {
                (Mode::ZeroPageY, Operand::Byte(value as u8))
            }
            Some(value) => (Mode::AbsoluteY, Operand::Word(value)),
            None => (Mode::AbsoluteY, Operand::Label(zero_page.to_string())),
        };
    }
    match operand_from_address_text(text) {
        Some(value) if value <= 0xFF && !is_word_literal(text) => {
            (Mode::ZeroPage, Operand::Byte(value as u8))
        }
        Some(value) => (Mode::Absolute, Operand::Word(value)),
        None if BRANCH_MNEMONICS.contains(&mnemonic) => {
            (Mode::Relative, Operand::Label(text.to_string()))
        }
        None => (Mode::Absolute, Operand::Label(text.to_string())),
    }
}

fn is_word_literal(text: &str) -> bool {
    text.strip_prefix('$').is_some_and(|hex| hex.len() > 2)
}

/// Parses a `$xx`/`$xxxx` numeric literal, or `None` for a bare label (which
/// `assemble` resolves by name once every label's address is known).
fn operand_from_address_text(text: &str) -> Option<u16> {
    text.strip_prefix('$')
        .map(|hex| u16::from_str_radix(hex, 16).expect("bad hex literal"))
}

fn parse_u8(text: &str) -> u8 {
    text.strip_prefix('$')
        .map(|hex| u8::from_str_radix(hex, 16).expect("bad hex literal"))
        .unwrap_or_else(|| text.parse().expect("bad decimal literal"))
}

fn parse_address(text: &str) -> u16 {
    text.strip_prefix('$')
        .map(|hex| u16::from_str_radix(hex, 16).expect("bad hex literal"))
        .unwrap_or_else(|| text.parse().expect("bad decimal literal"))
}
