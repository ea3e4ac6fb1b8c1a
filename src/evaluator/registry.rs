//! Registries for named constants and functions.
//!
//! Both registries keep their entries sorted by name (byte order) and are
//! queried with a case-insensitive binary search, so `pi`, `PI` and `Pi` all
//! resolve the same constant. Registration appends and re-sorts; duplicate
//! names are permitted and resolve to whichever entry the search lands on
//! first.

use std::cmp::Ordering;
use std::fmt;

/// Per-evaluation settings passed to every registered function.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext {
    /// Trigonometric functions convert their inputs from degrees to radians
    /// when set (the default).
    pub use_degrees: bool,
}

/// Signature of a registered function: the argument count has already been
/// validated against the descriptor's declared range.
pub type EvalFunction = fn(&EvalContext, &[f64]) -> f64;

/// A named constant definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDef {
    pub name: String,
    pub value: f64,
}

impl ConstantDef {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// A named function definition with its accepted argument-count range.
///
/// `max_args` of [`usize::MAX`] means the function is variadic with no upper
/// bound.
#[derive(Clone)]
pub struct FunctionDef {
    pub name: String,
    pub min_args: usize,
    pub max_args: usize,
    pub func: EvalFunction,
}

impl FunctionDef {
    pub fn new(name: &str, min_args: usize, max_args: usize, func: EvalFunction) -> Self {
        Self {
            name: name.to_string(),
            min_args,
            max_args,
            func,
        }
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish()
    }
}

/// Name accessor shared by the two registries.
pub(crate) trait Named {
    fn name(&self) -> &str;
}

impl Named for ConstantDef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for FunctionDef {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Compares names the way `strcasecmp` does: byte by byte, lowercased.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
}

/// An ordered table of named definitions.
#[derive(Debug, Clone, Default)]
pub(crate) struct Registry<T> {
    entries: Vec<T>,
}

impl<T: Named> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends definitions and restores the sort order.
    pub fn register<I>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.entries.extend(definitions);
        self.entries
            .sort_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));
    }

    /// Case-insensitive binary search for `name`.
    pub fn find(&self, name: &str) -> Option<&T> {
        let mut low = 0isize;
        let mut high = self.entries.len() as isize - 1;

        while low <= high {
            let middle = low + (high - low) / 2;
            let entry = &self.entries[middle as usize];

            match cmp_ignore_case(entry.name(), name) {
                Ordering::Less => low = middle + 1,
                Ordering::Greater => high = middle - 1,
                Ordering::Equal => return Some(entry),
            }
        }

        None
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}
