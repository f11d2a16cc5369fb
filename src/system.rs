//! The driver: rewrite for N generations, then interpret once.

use crate::canvas::{Canvas, RasterCanvas};
use crate::config::RenderConfig;
use crate::error::LSystemResult;
use crate::gradient::Gradient;
use crate::grammar::{Grammar, Symbol, expand_once};
use crate::interpreter::Interpreter;
use crate::turtle::Cursor;

/// An L-System bound to a render configuration.
///
/// Holds the grammar and the current symbol sequence, which starts as the
/// seed and is replaced by each call to [`LSystem::iterate`].
#[derive(Clone, Debug)]
pub struct LSystem {
    grammar: Grammar,
    sequence: Vec<Symbol>,
    gradient: Gradient,
    interpreter: Interpreter,
    config: RenderConfig,
}

impl LSystem {
    /// Validates `config` and builds the color gradient.
    ///
    /// # Errors
    ///
    /// Any configuration error, including an empty pen color list.
    pub fn new(grammar: Grammar, config: RenderConfig) -> LSystemResult<Self> {
        config.validate()?;
        let gradient = Gradient::new(config.pen_colors.clone())?;
        Ok(Self {
            sequence: grammar.seed.clone(),
            grammar,
            gradient,
            interpreter: Interpreter::new(config.interpreter_config()),
            config,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn sequence(&self) -> &[Symbol] {
        &self.sequence
    }

    /// Applies one generation of rewriting to the current sequence.
    pub fn iterate(&mut self) {
        self.sequence = expand_once(&self.sequence, &self.grammar.rules);
    }

    pub fn iterate_n(&mut self, n: usize) {
        for _ in 0..n {
            self.iterate();
        }
        log::debug!("{} generations -> {} symbols", n, self.sequence.len());
    }

    /// The cursor a run starts from: configured position, facing right, pen down.
    pub fn start_cursor(&self) -> Cursor {
        let (x, y) = self.config.start();
        Cursor::new(x, y)
    }

    /// Interprets the current sequence onto `canvas` with a fresh cursor and stack.
    ///
    /// Returns the number of strokes drawn.
    pub fn run<C: Canvas + ?Sized>(&self, canvas: &mut C) -> LSystemResult<usize> {
        let mut cursor = self.start_cursor();
        let mut stack = Vec::new();
        self.interpreter
            .run(&self.sequence, &mut cursor, &mut stack, &self.gradient, canvas)
    }

    /// Runs the configured number of generations, then draws onto a new raster.
    ///
    /// On error the partially drawn raster is dropped.
    pub fn render(&mut self) -> LSystemResult<RasterCanvas> {
        self.iterate_n(self.config.iterations);
        let mut canvas =
            RasterCanvas::new(self.config.width, self.config.height, self.config.background);
        log::info!(
            "rendering {} symbols onto {}x{} canvas",
            self.sequence.len(),
            self.config.width,
            self.config.height
        );
        let draws = self.run(&mut canvas)?;
        log::info!("drew {draws} strokes");
        Ok(canvas)
    }
}
