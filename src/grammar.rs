//! Symbols, command naming, and parallel rewriting.
//!
//! A [`Grammar`] pairs a seed sequence with context-free substitution rules.
//! Every character is bound to a [`Command`] through a [`NameTable`]; the
//! resulting [`Symbol`] is both the alphabet element and the rule key.

use crate::error::{LSystemError, LSystemResult};
use crate::turtle::Command;
use std::collections::{BTreeMap, HashMap};

/// A display character together with the command it performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: char,
    pub command: Command,
}

impl Symbol {
    pub const fn new(name: char, command: Command) -> Self {
        Self { name, command }
    }
}

/// Maps single display characters to commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NameTable {
    names: BTreeMap<char, Command>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional vocabulary understood by the command line.
    pub fn standard() -> Self {
        let mappings = [
            // Drawing
            ('F', Command::MoveForward),
            ('G', Command::MoveForward),
            ('H', Command::MoveForward),
            ('+', Command::RotateCcw),
            ('-', Command::RotateCw),
            ('U', Command::PenUp),
            ('D', Command::PenDown),
            // Flow
            ('[', Command::StorePosition),
            (']', Command::GotoStoredPosition),
            // Placeholders
            ('X', Command::NoAction),
            ('Y', Command::NoAction),
            ('Z', Command::NoAction),
        ];
        Self {
            names: mappings.into_iter().collect(),
        }
    }

    /// Builds a table from string keys, each of which must be exactly one character.
    pub fn from_pairs<K: AsRef<str>>(
        pairs: impl IntoIterator<Item = (K, Command)>,
    ) -> LSystemResult<Self> {
        let mut table = Self::new();
        for (key, command) in pairs {
            table.insert(key.as_ref(), command)?;
        }
        Ok(table)
    }

    /// Binds `key` to `command`, replacing any previous binding.
    pub fn insert(&mut self, key: &str, command: Command) -> LSystemResult<()> {
        let name = single_char(key).ok_or_else(|| LSystemError::NameKeyLength(key.to_string()))?;
        self.names.insert(name, command);
        Ok(())
    }

    pub fn get(&self, name: char) -> Option<Command> {
        self.names.get(&name).copied()
    }

    /// Resolves `name` into a [`Symbol`].
    pub fn symbol(&self, name: char) -> LSystemResult<Symbol> {
        self.get(name)
            .map(|command| Symbol::new(name, command))
            .ok_or(LSystemError::UnnamedSymbol(name))
    }

    /// Resolves every character of `text` in order.
    pub fn symbols(&self, text: &str) -> LSystemResult<Vec<Symbol>> {
        text.chars().map(|c| self.symbol(c)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Command)> + '_ {
        self.names.iter().map(|(&name, &command)| (name, command))
    }
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Substitution rules keyed by symbol.
pub type Rules = HashMap<Symbol, Vec<Symbol>>;

/// A seed sequence and its rewrite rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grammar {
    pub seed: Vec<Symbol>,
    pub rules: Rules,
}

impl Grammar {
    pub fn new(seed: Vec<Symbol>, rules: Rules) -> Self {
        Self { seed, rules }
    }

    /// Builds a grammar from textual seed and rules, resolving every character through `names`.
    ///
    /// Rule keys must be exactly one character. A later rule for the same key
    /// replaces an earlier one.
    ///
    /// # Errors
    ///
    /// [`LSystemError::RuleKeyLength`] for a multi-character or empty key, and
    /// [`LSystemError::UnnamedSymbol`] for any character missing from `names`.
    pub fn from_strings<K: AsRef<str>, V: AsRef<str>>(
        seed: &str,
        rules: impl IntoIterator<Item = (K, V)>,
        names: &NameTable,
    ) -> LSystemResult<Self> {
        let rules = rules
            .into_iter()
            .map(|(key, replacement)| {
                let key = key.as_ref();
                single_char(key)
                    .map(|name| (name, replacement))
                    .ok_or_else(|| LSystemError::RuleKeyLength(key.to_string()))
            })
            .collect::<LSystemResult<Vec<_>>>()?;

        let mut table = Rules::with_capacity(rules.len());
        for (name, replacement) in rules {
            table.insert(names.symbol(name)?, names.symbols(replacement.as_ref())?);
        }

        Ok(Self {
            seed: names.symbols(seed)?,
            rules: table,
        })
    }

    /// Expands the seed `n` generations.
    pub fn expand(&self, n: usize) -> Vec<Symbol> {
        expand_n(&self.seed, &self.rules, n)
    }
}

/// Applies one generation of rewriting to `sequence`.
///
/// Each symbol is replaced by its rule's right-hand side; symbols without a
/// rule pass through unchanged.
pub fn expand_once(sequence: &[Symbol], rules: &Rules) -> Vec<Symbol> {
    let len = sequence
        .iter()
        .map(|s| rules.get(s).map_or(1, Vec::len))
        .sum();
    let mut next = Vec::with_capacity(len);
    for symbol in sequence {
        match rules.get(symbol) {
            Some(replacement) => next.extend_from_slice(replacement),
            None => next.push(*symbol),
        }
    }
    next
}

/// Applies [`expand_once`] exactly `n` times starting from `seed`.
pub fn expand_n(seed: &[Symbol], rules: &Rules, n: usize) -> Vec<Symbol> {
    let mut sequence = seed.to_vec();
    for generation in 0..n {
        sequence = expand_once(&sequence, rules);
        log::debug!(
            "generation {}: {} symbols",
            generation + 1,
            sequence.len()
        );
    }
    sequence
}
