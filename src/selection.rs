//! Selecting a guest and the attendance controls for their party.

use crate::common::*;
use crate::directory::Directory;
use crate::normalize::compare_names;

/// The party of the selected guest, one attendance control per member.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyView {
    pub selected: Guest,
    pub toggles: Vec<ToggleDescriptor>,
}

impl PartyView {
    pub fn group(&self) -> &str {
        &self.selected.group
    }
}

/// Resolves the party of `guest` and builds its controls in name order.
///
/// Defaults come from the directory as loaded, never from an unsent edit.
pub fn select(directory: &Directory, guest: &Guest) -> PartyView {
    let mut members: Vec<Guest> = directory
        .party(&guest.group)
        .map(<[Guest]>::to_vec)
        .unwrap_or_else(|| vec![guest.clone()]);

    if !members.iter().any(|m| m.id == guest.id) {
        members.push(guest.clone());
    }

    members.sort_by(|a, b| compare_names(&a.name, &b.name));

    PartyView {
        selected: guest.clone(),
        toggles: members.iter().map(ToggleDescriptor::from).collect(),
    }
}

/// Current, possibly edited, state of each control of a [`PartyView`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleStates {
    checked: Vec<bool>,
}

impl ToggleStates {
    /// Controls as first rendered.
    pub fn seeded(view: &PartyView) -> Self {
        Self {
            checked: view.toggles.iter().map(|t| t.attending_default).collect(),
        }
    }

    pub fn from_values(checked: Vec<bool>) -> Self {
        Self { checked }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.checked.get(index).copied()
    }

    /// Sets control `index`; returns `false` if there is no such control.
    pub fn set(&mut self, index: usize, attending: bool) -> bool {
        match self.checked.get_mut(index) {
            Some(slot) => {
                *slot = attending;
                true
            }
            None => false,
        }
    }

    /// Flips control `index`, returning its new value.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.checked.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }
}
