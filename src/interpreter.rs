//! Interpreter that executes an expanded symbol sequence as turtle graphics.
//!
//! The entry point is [`Interpreter`]. Configure it with an [`InterpreterConfig`],
//! then call [`Interpreter::run`] with the fully expanded sequence, a cursor,
//! a position stack, a [`Gradient`], and any [`Canvas`].

use crate::canvas::Canvas;
use crate::error::{LSystemError, LSystemResult};
use crate::gradient::Gradient;
use crate::grammar::Symbol;
use crate::turtle::{Command, Cursor};
use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpreterConfig {
    /// Distance covered by one forward step.
    pub movement_length: f64,
    /// Angle (in radians) applied by each rotate command.
    pub rotate_angle: f64,
    /// Stroke width in pixels.
    pub pen_width: u32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            movement_length: 5.0,
            rotate_angle: FRAC_PI_2,
            pen_width: 1,
        }
    }
}

/// Walks a symbol sequence and emits colored strokes.
#[derive(Clone, Debug, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Counts the strokes `sequence` will emit when started with the pen `pen_down`.
    ///
    /// Only pen state is tracked: every `MoveForward` and every
    /// `GotoStoredPosition` seen while the pen is down counts as one stroke.
    pub fn count_draws(sequence: &[Symbol], pen_down: bool) -> usize {
        let mut pen_down = pen_down;
        let mut draws = 0;
        for symbol in sequence {
            match symbol.command {
                Command::PenDown => pen_down = true,
                Command::PenUp => pen_down = false,
                Command::MoveForward | Command::GotoStoredPosition if pen_down => draws += 1,
                _ => {}
            }
        }
        draws
    }

    /// Executes `sequence` against `cursor` and `stack`, drawing onto `canvas`.
    ///
    /// Stroke color is `gradient(draws_so_far / total_draws)`, where the total
    /// is counted up front from the cursor's pen state at the start of the run.
    /// Returns the number of strokes drawn.
    ///
    /// # Push / Pop
    ///
    /// `StorePosition` saves a copy of the whole cursor. `GotoStoredPosition`
    /// draws to the saved position if the pen is currently down, then installs
    /// the saved cursor while keeping the *current* pen state.
    ///
    /// # Errors
    ///
    /// [`LSystemError::StackUnderflow`] if a `GotoStoredPosition` finds the stack
    /// empty. Strokes already issued stay on the canvas; the caller decides
    /// whether to discard it.
    pub fn run<C: Canvas + ?Sized>(
        &self,
        sequence: &[Symbol],
        cursor: &mut Cursor,
        stack: &mut Vec<Cursor>,
        gradient: &Gradient,
        canvas: &mut C,
    ) -> LSystemResult<usize> {
        let total_draws = Self::count_draws(sequence, cursor.pen_down);
        log::debug!(
            "interpreting {} symbols, {} strokes expected",
            sequence.len(),
            total_draws
        );

        let mut draws = 0usize;
        let mut stroke = |from: DVec2, to: DVec2, draws: &mut usize| {
            let t = if total_draws == 0 {
                0.0
            } else {
                *draws as f64 / total_draws as f64
            };
            canvas.draw_line(from, to, gradient.at(t), self.config.pen_width);
            *draws += 1;
        };

        for (index, symbol) in sequence.iter().enumerate() {
            match symbol.command {
                Command::PenDown => cursor.pen_down = true,
                Command::PenUp => cursor.pen_down = false,
                Command::MoveForward => {
                    let from = cursor.position;
                    cursor.move_forward(self.config.movement_length);
                    if cursor.pen_down {
                        stroke(from, cursor.position, &mut draws);
                    }
                }
                Command::RotateCcw => cursor.rotate_ccw(self.config.rotate_angle),
                Command::RotateCw => cursor.rotate_cw(self.config.rotate_angle),
                Command::StorePosition => stack.push(*cursor),
                Command::GotoStoredPosition => {
                    let mut saved = stack
                        .pop()
                        .ok_or(LSystemError::StackUnderflow { index })?;
                    if cursor.pen_down {
                        stroke(cursor.position, saved.position, &mut draws);
                    }
                    saved.pen_down = cursor.pen_down;
                    *cursor = saved;
                }
                Command::NoAction => {}
            }
        }

        Ok(draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::LineSegment;
    use crate::gradient::Rgb;
    use crate::grammar::NameTable;

    fn sequence(text: &str) -> Vec<Symbol> {
        NameTable::standard().symbols(text).unwrap()
    }

    fn white() -> Gradient {
        Gradient::new(vec![Rgb::WHITE]).unwrap()
    }

    #[test]
    fn count_tracks_pen_state() {
        // PenDown, Move, PenUp, Move, PenDown, Move starting pen-up.
        assert_eq!(Interpreter::count_draws(&sequence("DFUFDF"), false), 2);
        assert_eq!(Interpreter::count_draws(&sequence("F[F]"), true), 3);
        assert_eq!(Interpreter::count_draws(&sequence("F[F]"), false), 0);
        assert_eq!(Interpreter::count_draws(&sequence("X+-"), true), 0);
    }

    #[test]
    fn restore_draws_back_and_keeps_current_pen() {
        let interpreter = Interpreter::default();
        let mut cursor = Cursor::new(0.0, 0.0);
        let mut stack = Vec::new();
        let mut strokes: Vec<LineSegment> = Vec::new();

        let drawn = interpreter
            .run(&sequence("[FU]F"), &mut cursor, &mut stack, &white(), &mut strokes)
            .unwrap();

        // Pen lifted before the restore, so only the first F draws; the
        // restored cursor keeps the lifted pen and the final F is silent.
        assert_eq!(drawn, 1);
        assert_eq!(strokes.len(), 1);
        assert!(!cursor.pen_down);
        assert_eq!(cursor.position, DVec2::new(5.0, 0.0));
        assert!(stack.is_empty());
    }

    #[test]
    fn restore_with_pen_down_draws_return_stroke() {
        let interpreter = Interpreter::default();
        let mut cursor = Cursor::new(0.0, 0.0);
        let mut stack = Vec::new();
        let mut strokes: Vec<LineSegment> = Vec::new();

        interpreter
            .run(&sequence("[F]"), &mut cursor, &mut stack, &white(), &mut strokes)
            .unwrap();

        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[1].from, DVec2::new(5.0, 0.0));
        assert_eq!(strokes[1].to, DVec2::ZERO);
        assert_eq!(cursor.position, DVec2::ZERO);
    }

    #[test]
    fn restore_keeps_pen_down_even_if_saved_up() {
        let interpreter = Interpreter::default();
        let mut cursor = Cursor::new(0.0, 0.0);
        cursor.pen_down = false;
        let mut stack = Vec::new();
        let mut strokes: Vec<LineSegment> = Vec::new();

        interpreter
            .run(&sequence("[DF]F"), &mut cursor, &mut stack, &white(), &mut strokes)
            .unwrap();

        // F, the return stroke, and the final F all draw.
        assert_eq!(strokes.len(), 3);
        assert!(cursor.pen_down);
    }

    #[test]
    fn empty_stack_restore_fails() {
        let interpreter = Interpreter::default();
        let mut cursor = Cursor::default();
        let mut stack = Vec::new();
        let mut strokes: Vec<LineSegment> = Vec::new();

        let err = interpreter
            .run(&sequence("F+]F"), &mut cursor, &mut stack, &white(), &mut strokes)
            .unwrap_err();
        assert!(matches!(err, LSystemError::StackUnderflow { index: 2 }));
    }

    #[test]
    fn colors_follow_stroke_order() {
        let interpreter = Interpreter::default();
        let gradient = Gradient::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        let mut cursor = Cursor::default();
        let mut stack = Vec::new();
        let mut strokes: Vec<LineSegment> = Vec::new();

        // Rotations and placeholders between moves do not shift the colors.
        interpreter
            .run(&sequence("FX+FUFDF-F"), &mut cursor, &mut stack, &gradient, &mut strokes)
            .unwrap();

        let reds: Vec<u8> = strokes.iter().map(|s| s.color.r).collect();
        assert_eq!(reds, vec![0, 63, 127, 191]);
    }

    #[test]
    fn pen_up_sequence_draws_nothing() {
        let interpreter = Interpreter::default();
        let mut cursor = Cursor::default();
        cursor.pen_down = false;
        let mut stack = Vec::new();
        let mut strokes: Vec<LineSegment> = Vec::new();

        let drawn = interpreter
            .run(&sequence("FF+F"), &mut cursor, &mut stack, &white(), &mut strokes)
            .unwrap();
        assert_eq!(drawn, 0);
        assert!(strokes.is_empty());
    }

    #[test]
    fn configured_pen_width_and_step_reach_the_canvas() {
        let interpreter = Interpreter::new(InterpreterConfig {
            movement_length: 2.0,
            pen_width: 7,
            ..Default::default()
        });
        assert_eq!(interpreter.config().pen_width, 7);
        let mut cursor = Cursor::new(0.0, 0.0);
        let mut stack = Vec::new();
        let mut strokes: Vec<LineSegment> = Vec::new();

        interpreter
            .run(&sequence("F[F]"), &mut cursor, &mut stack, &white(), &mut strokes)
            .unwrap();

        assert_eq!(strokes.len(), 3);
        assert!(strokes.iter().all(|s| s.width == 7));
        assert_eq!(strokes[1].to, DVec2::new(4.0, 0.0));
    }
}
