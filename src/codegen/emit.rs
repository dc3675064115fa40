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

//! Instruction emission.
//!
//! The [`Emitter`] trait is the seam between the parser and the output sink.
//! Each `write_*` method produces exactly one instruction. Implementations
//! only have to provide [`Emitter::emit`].

use super::{render, Command, Instruction, Segment};

/// Sink for VM instructions.
pub trait Emitter {
    /// Append one instruction.
    fn emit(&mut self, instruction: Instruction);

    /// `push <segment> <index>`
    fn write_push(&mut self, segment: Segment, index: u16) {
        self.emit(Instruction::Push(segment, index));
    }

    /// `pop <segment> <index>`
    fn write_pop(&mut self, segment: Segment, index: u16) {
        self.emit(Instruction::Pop(segment, index));
    }

    /// An arithmetic or logical command.
    fn write_arithmetic(&mut self, command: Command) {
        self.emit(Instruction::Arithmetic(command));
    }

    /// `label <name>`
    fn write_label(&mut self, label: &str) {
        self.emit(Instruction::Label(label.to_string()));
    }

    /// `goto <name>`
    fn write_goto(&mut self, label: &str) {
        self.emit(Instruction::Goto(label.to_string()));
    }

    /// `if-goto <name>`
    fn write_if(&mut self, label: &str) {
        self.emit(Instruction::IfGoto(label.to_string()));
    }

    /// `call <name> <nArgs>`
    fn write_call(&mut self, name: &str, n_args: u16) {
        self.emit(Instruction::Call {
            name: name.to_string(),
            n_args,
        });
    }

    /// `function <name> <nLocals>`
    fn write_function(&mut self, name: &str, n_locals: u16) {
        self.emit(Instruction::Function {
            name: name.to_string(),
            n_locals,
        });
    }

    /// `return`
    fn write_return(&mut self) {
        self.emit(Instruction::Return);
    }
}

/// Buffers instructions in emission order.
#[derive(Debug, Default, Clone)]
pub struct VmWriter {
    instructions: Vec<Instruction>,
}

impl VmWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The instructions written so far.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the writer, returning its instructions.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Render the buffer as VM text.
    pub fn to_text(&self) -> String {
        render(&self.instructions)
    }

    /// Number of instructions written so far.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl Emitter for VmWriter {
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

/// Discards instructions, only counting them.
///
/// Used when only the token stream, parse tree, or symbol dump is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEmitter {
    count: usize,
}

impl NullEmitter {
    /// Create an emitter with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instructions that were discarded.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Emitter for NullEmitter {
    fn emit(&mut self, _instruction: Instruction) {
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_each_write_emits_one_line() {
        let mut writer = VmWriter::new();
        writer.write_function("Main.main", 1);
        writer.write_push(Segment::Constant, 2);
        writer.write_pop(Segment::Local, 0);
        writer.write_label("WHILE_EXP_0");
        writer.write_push(Segment::Local, 0);
        writer.write_arithmetic(Command::Not);
        writer.write_if("WHILE_END_1");
        writer.write_goto("WHILE_EXP_0");
        writer.write_label("WHILE_END_1");
        writer.write_call("Output.printInt", 1);
        writer.write_return();

        assert_eq!(writer.len(), 11);
        assert_eq!(
            writer.to_text(),
            "function Main.main 1\n\
             push constant 2\n\
             pop local 0\n\
             label WHILE_EXP_0\n\
             push local 0\n\
             not\n\
             if-goto WHILE_END_1\n\
             goto WHILE_EXP_0\n\
             label WHILE_END_1\n\
             call Output.printInt 1\n\
             return\n"
        );
    }

    #[test]
    fn test_empty_writer() {
        let writer = VmWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.to_text(), "");
    }

    #[test]
    fn test_null_emitter_counts() {
        let mut sink = NullEmitter::new();
        sink.write_push(Segment::Constant, 0);
        sink.write_return();
        assert_eq!(sink.count(), 2);
    }
}
