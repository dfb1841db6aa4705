//! Well-known grammars and ready-made renderers for some of them.

use crate::error::LSystemError;
use crate::grammar::LSystem;
use crate::interpreter::{Interpreter, InterpreterConfig, OpTable, TurtleOp};
use crate::spline::CurveSink;
use crate::turtle::Turtle;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

/// Named L-systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    /// Lindenmayer's model of algae growth.
    Algae,
    PythagorasTree,
    CantorSet,
    KochCurve,
    KochSnowflake,
    SierpinskiTriangle,
    /// Sierpinski arrowhead curve, approximates the triangle.
    SierpinskiCurve,
    DragonCurve,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Algae,
        Preset::PythagorasTree,
        Preset::CantorSet,
        Preset::KochCurve,
        Preset::KochSnowflake,
        Preset::SierpinskiTriangle,
        Preset::SierpinskiCurve,
        Preset::DragonCurve,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Algae => "Algae",
            Self::PythagorasTree => "PythagorasTree",
            Self::CantorSet => "CantorSet",
            Self::KochCurve => "KochCurve",
            Self::KochSnowflake => "KochSnowflake",
            Self::SierpinskiTriangle => "SierpinskiTriangle",
            Self::SierpinskiCurve => "SierpinskiCurve",
            Self::DragonCurve => "DragonCurve",
        }
    }

    /// Axiom and rules of this preset.
    pub fn system(self) -> LSystem {
        match self {
            Self::Algae => LSystem::new("A").with_rule('A', "AB").with_rule('B', "A"),
            Self::PythagorasTree => LSystem::new("0")
                .with_rule('0', "1[0]0")
                .with_rule('1', "11"),
            Self::CantorSet => LSystem::new("A")
                .with_rule('A', "ABA")
                .with_rule('B', "BBB"),
            Self::KochCurve => LSystem::new("F").with_rule('F', "F+F-F-F+F"),
            Self::KochSnowflake => LSystem::new("F++F++F").with_rule('F', "F-F++F-F"),
            Self::SierpinskiTriangle => LSystem::new("F-G-G")
                .with_rule('F', "F-G+F+G-F")
                .with_rule('G', "GG"),
            Self::SierpinskiCurve => LSystem::new("A")
                .with_rule('A', "+B-A-B+")
                .with_rule('B', "-A+B+A-"),
            Self::DragonCurve => LSystem::new("FX")
                .with_rule('X', "X+YF+")
                .with_rule('Y', "-FX-Y"),
        }
    }

    /// Expands this preset for `iterations` generations.
    pub fn expand(self, iterations: u32) -> Result<String, LSystemError> {
        self.system().expand(iterations)
    }

    /// The drawing table for this preset at `iterations`, if it has one.
    ///
    /// The Koch snowflake shrinks its step by a third per generation so every
    /// iteration spans the same unit triangle.
    pub fn interpreter(self, iterations: u32) -> Option<Interpreter> {
        let map: OpTable = match self {
            Self::DragonCurve => OpTable::from([
                ('F', TurtleOp::Forward(2.0)),
                ('+', TurtleOp::Turn(FRAC_PI_2)),
                ('-', TurtleOp::Turn(-FRAC_PI_2)),
                ('X', TurtleOp::Ignore),
                ('Y', TurtleOp::Ignore),
            ]),
            Self::KochSnowflake => {
                let step = 1.0 / 3f32.powi(i32::try_from(iterations).unwrap_or(i32::MAX));
                OpTable::from([
                    ('F', TurtleOp::Forward(step)),
                    ('+', TurtleOp::Turn(FRAC_PI_3)),
                    ('-', TurtleOp::Turn(-FRAC_PI_3)),
                ])
            }
            _ => return None,
        };
        Some(Interpreter::new(InterpreterConfig::default()).with_map(map))
    }

    /// Expands this preset and draws it with `turtle` as a single pen stroke.
    ///
    /// Returns the handle of the created curve. Presets without a drawing
    /// table leave the turtle untouched and return `None`.
    pub fn render<S: CurveSink>(
        self,
        iterations: u32,
        turtle: &mut Turtle<S>,
    ) -> Result<Option<&S::Handle>, LSystemError> {
        let Some(interpreter) = self.interpreter(iterations) else {
            return Ok(None);
        };
        let symbols = self.expand(iterations)?;
        turtle.pen_down();
        interpreter.execute(&symbols, turtle)?;
        Ok(turtle.pen_up())
    }
}
