//! Grammar engine: parallel rewriting of an axiom under per-symbol rules.
//!
//! Each generation scans the previous output left to right and replaces every
//! symbol that has a rule with its replacement. Symbols without a rule are
//! copied through. Replacements produced during a generation are not rescanned
//! until the next one.

use crate::error::LSystemError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Maps a single symbol to the string that replaces it each generation.
pub type RuleTable = HashMap<char, String>;

/// Optional ceilings on expansion.
///
/// Output grows exponentially with the iteration count, so hosts that accept
/// user input should set at least one of these. Both are unbounded by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Reject requests for more generations than this.
    pub max_iterations: Option<u32>,
    /// Abort as soon as a generation would exceed this many symbols.
    pub max_length: Option<usize>,
}

/// An axiom together with its rewriting rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LSystem {
    pub axiom: String,
    pub rules: RuleTable,
}

impl LSystem {
    /// Creates a system with the given axiom and no rules.
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            rules: RuleTable::new(),
        }
    }

    /// Adds (or replaces) the rule for `symbol` (builder pattern).
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.rules.insert(symbol, replacement.into());
        self
    }

    /// Expands the axiom for `iterations` generations with no ceiling.
    pub fn expand(&self, iterations: u32) -> Result<String, LSystemError> {
        self.expand_with(iterations, &GrammarConfig::default())
    }

    /// Expands the axiom for `iterations` generations, honouring `config`.
    pub fn expand_with(
        &self,
        iterations: u32,
        config: &GrammarConfig,
    ) -> Result<String, LSystemError> {
        expand_bounded(&self.axiom, &self.rules, iterations, config)
    }
}

/// Expands `axiom` under `rules` for `iterations` generations.
///
/// Zero iterations returns the axiom unchanged. A negative count is rejected
/// with [`LSystemError::InvalidIterationCount`].
pub fn expand(axiom: &str, rules: &RuleTable, iterations: i64) -> Result<String, LSystemError> {
    let iterations = checked_iterations(iterations)?;
    expand_bounded(axiom, rules, iterations, &GrammarConfig::default())
}

/// Converts a signed iteration count into a generation count.
pub fn checked_iterations(iterations: i64) -> Result<u32, LSystemError> {
    if iterations < 0 {
        return Err(LSystemError::InvalidIterationCount(iterations));
    }
    u32::try_from(iterations).map_err(|_| LSystemError::IterationLimit {
        requested: iterations,
        max: u32::MAX,
    })
}

/// Expands `axiom` under `rules`, failing if a ceiling in `config` is crossed.
pub fn expand_bounded(
    axiom: &str,
    rules: &RuleTable,
    iterations: u32,
    config: &GrammarConfig,
) -> Result<String, LSystemError> {
    if let Some(max) = config.max_iterations
        && iterations > max
    {
        return Err(LSystemError::IterationLimit {
            requested: i64::from(iterations),
            max,
        });
    }

    // Replacement lengths in symbols, not bytes.
    let table: HashMap<char, (&str, usize)> = rules
        .iter()
        .map(|(&sym, rep)| (sym, (rep.as_str(), rep.chars().count())))
        .collect();

    let mut current = axiom.to_owned();
    let mut length = current.chars().count();
    for iteration in 1..=iterations {
        let (next, next_length) =
            rewrite(&current, &table, config.max_length).map_err(|length| {
                LSystemError::LengthLimit {
                    length,
                    max: config.max_length.unwrap_or(usize::MAX),
                    iteration,
                }
            })?;
        trace!(iteration, length = next_length, "rewrote symbol string");
        current = next;
        length = next_length;
    }

    debug!(
        iterations,
        axiom_length = axiom.chars().count(),
        length,
        "expanded l-system"
    );
    Ok(current)
}

/// Runs one generation.
///
/// Stops early with the partial length as soon as it passes `limit`.
fn rewrite(
    current: &str,
    table: &HashMap<char, (&str, usize)>,
    limit: Option<usize>,
) -> Result<(String, usize), usize> {
    let mut next = String::with_capacity(current.len() * 2);
    let mut length = 0usize;
    for sym in current.chars() {
        match table.get(&sym) {
            Some(&(replacement, count)) => {
                next.push_str(replacement);
                length += count;
            }
            None => {
                next.push(sym);
                length += 1;
            }
        }
        if let Some(max) = limit
            && length > max
        {
            return Err(length);
        }
    }
    Ok((next, length))
}
