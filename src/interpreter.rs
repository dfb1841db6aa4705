//! Interpreter that drives a [`Turtle`] from an expanded symbol string.
//!
//! The entry point is [`Interpreter`]. Configure it with an
//! [`InterpreterConfig`], register symbol-to-operation mappings via
//! [`Interpreter::set_op`] or [`Interpreter::populate_standard_symbols`], then
//! call [`Interpreter::execute`] with the symbols and the turtle to drive.

use crate::error::LSystemError;
use crate::spline::CurveSink;
use crate::turtle::Turtle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;
use tracing::{debug, warn};

/// Operations a symbol can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward by the given distance.
    Forward(f32),
    /// Rotate by the given angle in radians.
    Turn(f32),
    /// Lower the pen.
    PenDown,
    /// Raise the pen, emitting the recorded path.
    PenUp,
    /// Save the turtle state (`[`).
    Push,
    /// Restore the most recently saved state (`]`).
    Pop,
    /// Bound, but does nothing. Grammar-only symbols such as `X` in the dragon curve.
    Ignore,
}

impl TurtleOp {
    /// Performs this operation on `turtle`.
    pub fn apply<S: CurveSink>(self, turtle: &mut Turtle<S>) -> Result<(), LSystemError> {
        match self {
            Self::Forward(distance) => turtle.forward(distance),
            Self::Turn(angle) => turtle.turn(angle),
            Self::PenDown => turtle.pen_down(),
            Self::PenUp => {
                turtle.pen_up();
            }
            Self::Push => turtle.push()?,
            Self::Pop => turtle.pop()?,
            Self::Ignore => {}
        }
        Ok(())
    }
}

/// What to do with a symbol that has no bound operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPolicy {
    /// Fail with [`LSystemError::UnboundSymbol`].
    #[default]
    Strict,
    /// Skip it, logging a warning once the run completes.
    SkipUnknown,
}

/// Configuration for symbol interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Distance used by the standard forward symbols.
    pub step: f32,
    /// Angle (radians) used by the standard turn symbols.
    pub angle: f32,
    pub policy: SymbolPolicy,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            step: 1.0,
            angle: FRAC_PI_2,
            policy: SymbolPolicy::Strict,
        }
    }
}

/// Symbol-to-operation lookup table.
pub type OpTable = HashMap<char, TurtleOp>;

/// Interprets symbol strings as turtle operations.
#[derive(Clone, Debug, Default)]
pub struct Interpreter {
    op_map: OpTable,
    config: InterpreterConfig,
}

impl Interpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            op_map: OpTable::new(),
            config,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, map: OpTable) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol, replacing any previous binding.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// The operation bound to `symbol`, if any.
    pub fn op(&self, symbol: char) -> Option<TurtleOp> {
        self.op_map.get(&symbol).copied()
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Registers the conventional turtle alphabet.
    ///
    /// `F` and `G` move forward by `step`, `+` turns by `angle`, `-` turns by
    /// `-angle`, `[` and `]` push and pop. Existing bindings for other symbols
    /// are left alone.
    pub fn populate_standard_symbols(&mut self) {
        let step = self.config.step;
        let angle = self.config.angle;
        let mappings = [
            ('F', TurtleOp::Forward(step)),
            ('G', TurtleOp::Forward(step)),
            ('+', TurtleOp::Turn(angle)),
            ('-', TurtleOp::Turn(-angle)),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];
        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Walks `symbols` in order, applying each bound operation to `turtle`.
    ///
    /// Under [`SymbolPolicy::Strict`] the first unbound symbol aborts the run
    /// with its position; operations already applied stay applied. Stack
    /// errors from `[`/`]` always abort.
    pub fn execute<S: CurveSink>(
        &self,
        symbols: &str,
        turtle: &mut Turtle<S>,
    ) -> Result<(), LSystemError> {
        let mut skipped = 0usize;
        let mut count = 0usize;
        for (index, symbol) in symbols.chars().enumerate() {
            count += 1;
            match self.op_map.get(&symbol) {
                Some(op) => op.apply(turtle)?,
                None => match self.config.policy {
                    SymbolPolicy::Strict => {
                        return Err(LSystemError::UnboundSymbol { symbol, index });
                    }
                    SymbolPolicy::SkipUnknown => skipped += 1,
                },
            }
        }

        if skipped > 0 {
            warn!(skipped, turtle = turtle.name(), "ignored unbound symbols");
        }
        debug!(
            symbols = count,
            depth = turtle.depth(),
            curves = turtle.curves().len(),
            "executed symbol string"
        );
        Ok(())
    }
}
