//! Session state that survives a save: the round counter.

use std::collections::VecDeque;

use crate::state::Round;

use super::{GameSession, SaveError};

/// Integer-granular save stream.
pub trait SaveStream {
    fn put_int(&mut self, value: i64);

    fn get_int(&mut self) -> Result<i64, SaveError>;
}

/// In-memory FIFO save stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntStream {
    values: VecDeque<i64>,
}

impl IntStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SaveStream for IntStream {
    fn put_int(&mut self, value: i64) {
        self.values.push_back(value);
    }

    fn get_int(&mut self) -> Result<i64, SaveError> {
        self.values.pop_front().ok_or(SaveError::UnexpectedEnd)
    }
}

/// Save and load methods for GameSession.
impl GameSession {
    /// Writes the round counter.
    pub fn save(&self, stream: &mut dyn SaveStream) {
        stream.put_int(i64::try_from(self.round.0).unwrap_or(i64::MAX));
    }

    /// Restores the round counter. Everything else is rebuilt by the loader.
    pub fn load(&mut self, stream: &mut dyn SaveStream) -> Result<(), SaveError> {
        let value = stream.get_int()?;
        let round = u64::try_from(value).map_err(|_| SaveError::InvalidRound(value))?;
        self.round = Round(round);
        Ok(())
    }
}
