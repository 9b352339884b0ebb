use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::path::Path;

use propeller_rs::disasm::{fmt_assignment, fmt_instruction, fmt_memory_operation};
use propeller_rs::spin::assign::{ArgumentMode, ParsedAssignment};
use propeller_rs::spin::memop::ParsedMemoryOperation;
use propeller_rs::spin::operands;
use propeller_rs::{conditions, decode_assembly_opcode, instructions, registers};
use propeller_rs::{ByteSource, MemoryCursor};

mod model;
use model::{load_raw_bin, locate, read_long, read_u8};

#[derive(Parser, Debug)]
#[command(author, version, about = "Propeller P8X32A disassembler CLI", long_about = None)]
struct Cli {
    /// Load address for the binary in hub address space
    #[arg(long, default_value_t = 0u32)]
    base: u32,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Input binary path (not required for table dumps)
    #[arg(value_name = "BINFILE")]
    input: Option<String>,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded segments (simple single-segment for raw .bin)
    Sections,
    /// Disassemble PASM longs in [start, end)
    Range {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Decode a run of Spin assignment bytecodes from an address
    Spin {
        /// Start address (hex or dec)
        start: String,
        /// Number of bytecodes to decode
        #[arg(long, default_value_t = 16usize)]
        count: usize,
    },
    /// Decode a single register memory-operation byte
    Memop {
        /// The bytecode byte (hex or dec)
        byte: String,
    },
    /// Enumerate the static instruction/condition/register tables
    Tables {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else if let Some(hex) = s.strip_prefix('$') {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
struct TableDump {
    instructions: Vec<Vec<&'static str>>,
    conditions: Vec<Vec<&'static str>>,
    hardware_registers: Vec<registers::Register>,
    spin_registers: Vec<&'static str>,
    math_operators: Vec<&'static str>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Command::Tables { format } = &cli.cmd {
        return dump_tables(*format);
    }
    if let Command::Memop { byte } = &cli.cmd {
        let op = ParsedMemoryOperation::from_byte(parse_u32(byte)? as u8);
        println!("{}", fmt_memory_operation(&op));
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("this subcommand needs a BINFILE"))?;
    let img = load_raw_bin(Path::new(input), cli.base, cli.skip, cli.len)?;

    match cli.cmd {
        Command::Sections => {
            println!("{:<10} {:<12} {:<12} {:<6} {:<6}", "name", "start", "end", "perms", "kind");
            for s in &img.segments {
                let start = s.base;
                let end = s.base + (s.bytes.len() as u32);
                println!(
                    "{:<10} {start:#010x}   {end:#010x}   {:<6} {:<6}",
                    s.name, s.perms, s.kind
                );
            }
        }
        Command::Range { start, end, show_bytes, out } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");

            let mut buf = String::new();
            let mut pc = start;
            use std::fmt::Write as _;
            while pc < end {
                let Some(raw) = read_long(&img, pc) else {
                    let _ = writeln!(buf, "{pc:#010x}: <oob>");
                    break;
                };
                let d = decode_assembly_opcode(raw);
                if show_bytes {
                    let _ = write!(buf, "{pc:#010x}: ");
                    for i in 0..4 {
                        let _ = write!(buf, "{:02x} ", read_u8(&img, pc + i).unwrap_or(0));
                    }
                    let _ = writeln!(buf, "  {}", fmt_instruction(&d));
                } else {
                    let _ = writeln!(buf, "{pc:#010x}: {}", fmt_instruction(&d));
                }
                pc = pc.wrapping_add(4);
            }
            if let Some(path) = out {
                std::fs::write(path, buf)?;
            } else {
                print!("{buf}");
            }
        }
        Command::Spin { start, count } => {
            let start = parse_u32(&start)?;
            let (seg, off) = locate(&img, start)
                .ok_or_else(|| anyhow::anyhow!("address {start:#x} is not mapped"))?;
            let mut cur = MemoryCursor::at(&seg.bytes, off);
            for _ in 0..count {
                let addr = seg.base as usize + cur.position();
                let a = ParsedAssignment::parse(&mut cur)?;
                let trailer = fmt_trailing_operand(&mut cur, a.argument())?;
                println!("{addr:#010x}: {}{trailer}", fmt_assignment(&a));
            }
        }
        Command::Memop { .. } | Command::Tables { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Consume and render the trailing operand an assignment variant declares.
fn fmt_trailing_operand(cur: &mut MemoryCursor<'_>, mode: ArgumentMode) -> Result<String> {
    Ok(match mode {
        ArgumentMode::None => String::new(),
        ArgumentMode::Effect => {
            let nested = ParsedAssignment::parse(cur)?;
            format!(" [{}]", fmt_assignment(&nested))
        }
        ArgumentMode::SignedOffset => format!(" {}", operands::signed_offset(cur)?.value),
        ArgumentMode::SignedPackedOffset => {
            format!(" {}", operands::signed_packed_offset(cur)?.value)
        }
        ArgumentMode::PackedOffset => format!(" {}", operands::packed_offset(cur)?.value),
        ArgumentMode::PackedLiteral => {
            format!(" {:#x}", operands::packed_literal(cur)?.value)
        }
        ArgumentMode::WordLiteral => format!(" {:#x}", operands::word_literal(cur)?.value),
        ArgumentMode::NearLongLiteral => {
            format!(" {:#x}", operands::near_long_literal(cur)?.value)
        }
        ArgumentMode::LongLiteral => format!(" {:#x}", operands::long_literal(cur)?.value),
    })
}

fn dump_tables(format: OutputFormat) -> Result<()> {
    let dump = TableDump {
        instructions: instructions::INSTRUCTIONS
            .iter()
            .map(|i| i.variants.iter().map(|v| v.name).collect())
            .collect(),
        conditions: conditions::CONDITIONS.iter().map(|c| c.to_vec()).collect(),
        hardware_registers: registers::HW_REGISTERS.to_vec(),
        spin_registers: registers::SPIN_REGISTERS.to_vec(),
        math_operators: propeller_rs::spin::assign::MATH_OPS.iter().map(|m| m.name).collect(),
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dump)?),
        OutputFormat::Text => {
            println!("Instructions:");
            for (i, variants) in dump.instructions.iter().enumerate() {
                println!("  {i:#04x}: {}", variants.join(" / "));
            }
            println!("Conditions:");
            for (i, names) in dump.conditions.iter().enumerate() {
                let names: Vec<_> =
                    names.iter().map(|n| if n.is_empty() { "(blank)" } else { n }).collect();
                println!("  {i:#03x}: {}", names.join(" / "));
            }
            println!("Hardware registers ($1F0..$1FF):");
            for (i, reg) in dump.hardware_registers.iter().enumerate() {
                let rw = match (reg.readable, reg.writable) {
                    (true, true) => "rw",
                    (true, false) => "r-",
                    (false, true) => "-w",
                    (false, false) => "--",
                };
                println!("  ${:03X}: {:<5} {rw}", 0x1F0 + i, reg.name);
            }
            println!("Spin slot registers: {}", dump.spin_registers.join(" "));
            println!("Math operators: {}", dump.math_operators.join(" "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u32_hex_dollar_and_dec() {
        assert_eq!(parse_u32("0x10").unwrap(), 0x10);
        assert_eq!(parse_u32("$1F0").unwrap(), 0x1F0);
        assert_eq!(parse_u32("16").unwrap(), 16);
        assert!(parse_u32("zz").is_err());
    }
}
