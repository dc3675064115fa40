// jackc - A single-pass compiler translating Jack classes into Hack VM code
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Hack VM instruction model and emission.
//!
//! This module defines the closed vocabulary of the stack machine:
//! - Memory segments
//! - Arithmetic and logical commands
//! - Instructions and their one-line text form
//!
//! The [`Emitter`] trait in `emit` is the only way the parser produces code.
//!
//! # Module Structure
//!
//! - `emit` - The `Emitter` trait and its sinks
//! - `labels` - Unique label generation
//! - `operators` - Mapping of Jack operators to instructions

pub mod emit;
pub mod labels;
pub mod operators;

pub use emit::{Emitter, NullEmitter, VmWriter};
pub use labels::LabelGenerator;
pub use operators::{BinaryOp, UnaryOp};

use crate::error::{CompileError, ErrorCode, Span};
use std::fmt;
use std::str::FromStr;

/// A named storage region of the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    /// All segments.
    pub const ALL: [Segment; 8] = [
        Segment::Constant,
        Segment::Argument,
        Segment::Local,
        Segment::Static,
        Segment::This,
        Segment::That,
        Segment::Pointer,
        Segment::Temp,
    ];

    /// The segment name as written in VM code.
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }

    /// Look up a segment by its VM name.
    pub fn from_name(name: &str) -> Option<Segment> {
        Segment::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An arithmetic or logical stack command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl Command {
    /// All commands.
    pub const ALL: [Command; 9] = [
        Command::Add,
        Command::Sub,
        Command::Neg,
        Command::Eq,
        Command::Gt,
        Command::Lt,
        Command::And,
        Command::Or,
        Command::Not,
    ];

    /// The command as written in VM code.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Sub => "sub",
            Command::Neg => "neg",
            Command::Eq => "eq",
            Command::Gt => "gt",
            Command::Lt => "lt",
            Command::And => "and",
            Command::Or => "or",
            Command::Not => "not",
        }
    }

    /// Look up a command by its VM name.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One VM instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `push <segment> <index>`
    Push(Segment, u16),
    /// `pop <segment> <index>`
    Pop(Segment, u16),
    /// `add`, `sub`, `neg`, ...
    Arithmetic(Command),
    /// `label <name>`
    Label(String),
    /// `goto <name>`
    Goto(String),
    /// `if-goto <name>`
    IfGoto(String),
    /// `call <name> <nArgs>`
    Call { name: String, n_args: u16 },
    /// `function <name> <nLocals>`
    Function { name: String, n_locals: u16 },
    /// `return`
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Instruction::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            Instruction::Arithmetic(command) => write!(f, "{}", command),
            Instruction::Label(label) => write!(f, "label {}", label),
            Instruction::Goto(label) => write!(f, "goto {}", label),
            Instruction::IfGoto(label) => write!(f, "if-goto {}", label),
            Instruction::Call { name, n_args } => write!(f, "call {} {}", name, n_args),
            Instruction::Function { name, n_locals } => write!(f, "function {} {}", name, n_locals),
            Instruction::Return => write!(f, "return"),
        }
    }
}

impl FromStr for Instruction {
    type Err = CompileError;

    /// Parse one line of VM text.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let span = Span::new(0, line.len());
        let malformed = || {
            CompileError::new(
                ErrorCode::UnexpectedToken,
                format!("Malformed instruction '{}'", line),
                span.clone(),
            )
        };
        let number = |text: Option<&str>| -> Result<u16, CompileError> {
            text.and_then(|t| t.parse::<u16>().ok()).ok_or_else(malformed)
        };
        let segment = |text: Option<&str>| -> Result<Segment, CompileError> {
            let name = text.ok_or_else(malformed)?;
            Segment::from_name(name).ok_or_else(|| {
                CompileError::new(
                    ErrorCode::UnmappedSegment,
                    format!("Unknown segment '{}'", name),
                    span.clone(),
                )
            })
        };

        let mut parts = line.split_whitespace();
        let op = parts.next().ok_or_else(malformed)?;
        let instruction = match op {
            "push" => Instruction::Push(segment(parts.next())?, number(parts.next())?),
            "pop" => Instruction::Pop(segment(parts.next())?, number(parts.next())?),
            "label" => Instruction::Label(parts.next().ok_or_else(malformed)?.to_string()),
            "goto" => Instruction::Goto(parts.next().ok_or_else(malformed)?.to_string()),
            "if-goto" => Instruction::IfGoto(parts.next().ok_or_else(malformed)?.to_string()),
            "call" => Instruction::Call {
                name: parts.next().ok_or_else(malformed)?.to_string(),
                n_args: number(parts.next())?,
            },
            "function" => Instruction::Function {
                name: parts.next().ok_or_else(malformed)?.to_string(),
                n_locals: number(parts.next())?,
            },
            "return" => Instruction::Return,
            other => Instruction::Arithmetic(Command::from_name(other).ok_or_else(|| {
                CompileError::new(
                    ErrorCode::UnmappedOperator,
                    format!("Unknown command '{}'", other),
                    span.clone(),
                )
            })?),
        };

        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(instruction)
    }
}

/// Render instructions as VM text, one instruction per line.
pub fn render(instructions: &[Instruction]) -> String {
    let mut output = String::new();
    for instruction in instructions {
        output.push_str(&instruction.to_string());
        output.push('\n');
    }
    output
}

/// Parse VM text back into instructions. Blank lines and `//` comments are skipped.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, CompileError> {
    text.lines()
        .map(|line| line.split("//").next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect()
}
