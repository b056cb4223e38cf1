use std::collections::BTreeMap;
use std::fmt;

use crate::core::Location;

/// Resolution state of a requested call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchState {
    /// Requested, not resolved yet.
    Pending,
    /// A call with a decodable first argument sits at the position.
    Found,
    /// No call at the position produced a message.
    NotFound,
    /// The call is suppressed by the ignore marker in its comment.
    Ignored,
}

impl MatchState {
    pub fn is_terminal(self) -> bool {
        self != MatchState::Pending
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchState::Pending => write!(f, "pending"),
            MatchState::Found => write!(f, "found"),
            MatchState::NotFound => write!(f, "not found"),
            MatchState::Ignored => write!(f, "ignored"),
        }
    }
}

/// Requested positions of one file, grouped by line then column.
#[derive(Debug, Default, Clone)]
pub struct PositionIndex {
    lines: BTreeMap<usize, BTreeMap<usize, MatchState>>,
}

impl PositionIndex {
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        let mut lines: BTreeMap<usize, BTreeMap<usize, MatchState>> = BTreeMap::new();
        for location in locations {
            lines
                .entry(location.line)
                .or_default()
                .insert(location.column, MatchState::Pending);
        }
        Self { lines }
    }

    pub fn state(&self, location: Location) -> Option<MatchState> {
        self.lines
            .get(&location.line)
            .and_then(|columns| columns.get(&location.column))
            .copied()
    }

    pub fn is_pending(&self, location: Location) -> bool {
        self.state(location) == Some(MatchState::Pending)
    }

    /// Move a pending position to a terminal state.
    ///
    /// Returns false, leaving the index untouched, when the position was not
    /// requested or is already resolved.
    pub fn resolve(&mut self, location: Location, state: MatchState) -> bool {
        debug_assert!(state.is_terminal());
        let Some(current) = self
            .lines
            .get_mut(&location.line)
            .and_then(|columns| columns.get_mut(&location.column))
        else {
            return false;
        };
        if *current != MatchState::Pending {
            return false;
        }
        *current = state;
        true
    }

    /// Mark every position still pending as `NotFound`, returning those
    /// positions in (line, column) order.
    pub fn finish(&mut self) -> Vec<Location> {
        let mut not_found = Vec::new();
        for (line, columns) in &mut self.lines {
            for (column, state) in columns.iter_mut() {
                if *state == MatchState::Pending {
                    *state = MatchState::NotFound;
                    not_found.push(Location::new(*line, *column));
                }
            }
        }
        not_found
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, MatchState)> + '_ {
        self.lines.iter().flat_map(|(line, columns)| {
            columns
                .iter()
                .map(move |(column, state)| (Location::new(*line, *column), *state))
        })
    }

    pub fn len(&self) -> usize {
        self.lines.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
