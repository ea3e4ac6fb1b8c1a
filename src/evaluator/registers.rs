//! The per-session register bank.
//!
//! Registers are scratch cells addressed by `#k!` (store) and `#k?` (recall).
//! When the index is omitted, a store targets the cell after the most
//! recently written one (cell 0 when nothing has been written), and a recall
//! targets the most recently written cell. The bank persists across
//! evaluations for the lifetime of the session.

use super::errors::EvalError;

/// Number of register cells per session, indices `0..64`.
pub const MAX_REGISTERS: usize = 64;

#[derive(Debug, Clone)]
pub(crate) struct RegisterBank {
    values: [f64; MAX_REGISTERS],
    assigned: [bool; MAX_REGISTERS],
    /// Most recently written index, if any
    last: Option<usize>,
}

impl RegisterBank {
    pub fn new() -> Self {
        Self {
            values: [0.0; MAX_REGISTERS],
            assigned: [false; MAX_REGISTERS],
            last: None,
        }
    }

    /// Clears every cell and the last-written cursor.
    pub fn reset(&mut self) {
        self.values = [0.0; MAX_REGISTERS];
        self.assigned = [false; MAX_REGISTERS];
        self.last = None;
    }

    /// Writes `value`, resolving an omitted index to the cell after the most
    /// recently written one.
    pub fn save(&mut self, index: Option<usize>, value: f64) -> Result<(), EvalError> {
        let index = match index {
            Some(index) => index,
            None => match self.last {
                Some(last) => last + 1,
                None => 0,
            },
        };

        if index >= MAX_REGISTERS {
            return Err(EvalError::InvalidRegisterIndex {
                index: index as u32,
                at: None,
            });
        }

        self.values[index] = value;
        self.assigned[index] = true;
        self.last = Some(index);
        Ok(())
    }

    /// Reads a cell, resolving an omitted index to the most recently written
    /// one. Recalling a cell that was never written is an error.
    pub fn recall(&self, index: Option<usize>) -> Result<f64, EvalError> {
        let index = match index {
            Some(index) => index,
            None => self
                .last
                .ok_or(EvalError::RegisterNotSet { index: None })?,
        };

        if index >= MAX_REGISTERS || !self.assigned[index] {
            return Err(EvalError::RegisterNotSet { index: Some(index) });
        }

        Ok(self.values[index])
    }
}
