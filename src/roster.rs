use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MANUAL_TASK_DELIMITERS: [char; 3] = [',', ';', '|'];

/// Ordered team members. A member's position, not its name, keys rotation
/// and manual task lookup, so blank names still hold a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<String>,
}

impl Roster {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// A roster holding a single blank slot, ready to be filled in.
    pub fn with_blank_slot() -> Self {
        Self {
            members: vec![String::new()],
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.members.get(index).map(String::as_str)
    }

    /// True when at least one member has a non-blank name.
    pub fn has_valid_member(&self) -> bool {
        self.members.iter().any(|m| !m.trim().is_empty())
    }

    /// Appends a member and returns its position.
    pub fn add(&mut self, name: impl Into<String>) -> usize {
        self.members.push(name.into());
        self.members.len() - 1
    }

    pub fn set(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.members.get_mut(index) {
            Some(slot) => {
                *slot = name.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.members.len() {
            Some(self.members.remove(index))
        } else {
            None
        }
    }
}

/// Splits free text on `,`, `;` or `|`, trims each piece and drops empties.
pub fn parse_manual_tasks(text: &str) -> Vec<String> {
    text.split(MANUAL_TASK_DELIMITERS)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Free-text manual task declarations keyed by roster position.
///
/// A position with no entry behaves as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualTasks {
    by_index: BTreeMap<usize, String>,
}

impl ManualTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize, text: impl Into<String>) {
        self.by_index.insert(index, text.into());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    pub fn parsed(&self, index: usize) -> Vec<String> {
        self.get(index).map(parse_manual_tasks).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.by_index.iter().map(|(idx, text)| (*idx, text.as_str()))
    }

    /// Drops the entry at `index` and shifts every later entry down one slot,
    /// mirroring a roster removal.
    pub fn remove_position(&mut self, index: usize) {
        let previous = std::mem::take(&mut self.by_index);
        self.by_index = previous
            .into_iter()
            .filter(|(idx, _)| *idx != index)
            .map(|(idx, text)| if idx > index { (idx - 1, text) } else { (idx, text) })
            .collect();
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for ManualTasks {
    fn from_iter<T: IntoIterator<Item = (usize, S)>>(iter: T) -> Self {
        Self {
            by_index: iter.into_iter().map(|(idx, s)| (idx, s.into())).collect(),
        }
    }
}
