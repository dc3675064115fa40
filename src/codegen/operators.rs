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

//! Jack operators and their VM lowering.
//!
//! Multiplication and division have no VM command and are lowered to calls
//! into the `Math` operating system class.

use super::{Command, Instruction};
use crate::error::{CompileError, ErrorCode, Span};

/// Binary infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl BinaryOp {
    /// Map an operator symbol to its operation.
    pub fn from_symbol(symbol: char, span: Span) -> Result<BinaryOp, CompileError> {
        let op = match symbol {
            '+' => BinaryOp::Add,
            '-' => BinaryOp::Sub,
            '*' => BinaryOp::Mul,
            '/' => BinaryOp::Div,
            '&' => BinaryOp::And,
            '|' => BinaryOp::Or,
            '<' => BinaryOp::Lt,
            '>' => BinaryOp::Gt,
            '=' => BinaryOp::Eq,
            other => {
                return Err(CompileError::new(
                    ErrorCode::UnmappedOperator,
                    format!("No VM command for binary operator '{}'", other),
                    span,
                ))
            }
        };
        Ok(op)
    }

    /// The instruction that applies this operator to the two topmost values.
    pub fn instruction(&self) -> Instruction {
        let command = match self {
            BinaryOp::Mul => return math_call("Math.multiply"),
            BinaryOp::Div => return math_call("Math.divide"),
            BinaryOp::Add => Command::Add,
            BinaryOp::Sub => Command::Sub,
            BinaryOp::And => Command::And,
            BinaryOp::Or => Command::Or,
            BinaryOp::Lt => Command::Lt,
            BinaryOp::Gt => Command::Gt,
            BinaryOp::Eq => Command::Eq,
        };
        Instruction::Arithmetic(command)
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `~x`
    Not,
}

impl UnaryOp {
    /// Map an operator symbol to its operation.
    pub fn from_symbol(symbol: char, span: Span) -> Result<UnaryOp, CompileError> {
        match symbol {
            '-' => Ok(UnaryOp::Neg),
            '~' => Ok(UnaryOp::Not),
            other => Err(CompileError::new(
                ErrorCode::UnmappedOperator,
                format!("No VM command for unary operator '{}'", other),
                span,
            )),
        }
    }

    pub fn instruction(&self) -> Instruction {
        match self {
            UnaryOp::Neg => Instruction::Arithmetic(Command::Neg),
            UnaryOp::Not => Instruction::Arithmetic(Command::Not),
        }
    }
}

fn math_call(name: &str) -> Instruction {
    Instruction::Call {
        name: name.to_string(),
        n_args: 2,
    }
}
