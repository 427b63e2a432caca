//! Cross-chart filter state.
//!
//! Two independent dimensions: which loneliness categories are active on the
//! overview bar chart, and which sociological factor value (if any) is
//! selected on the stacked panels.

use super::category::Loneliness;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryState<T> {
    AllActive,
    /// Active subset, in universe order. Never empty and never the whole
    /// universe.
    PartialActive(Vec<T>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection<T> {
    universe: Vec<T>,
    state: CategoryState<T>,
}

impl<T: Clone + PartialEq> CategorySelection<T> {
    pub fn new(universe: impl IntoIterator<Item = T>) -> Self {
        Self {
            universe: universe.into_iter().collect(),
            state: CategoryState::AllActive,
        }
    }

    pub fn state(&self) -> &CategoryState<T> {
        &self.state
    }

    pub fn universe(&self) -> &[T] {
        &self.universe
    }

    pub fn is_all_active(&self) -> bool {
        matches!(self.state, CategoryState::AllActive)
    }

    pub fn is_active(&self, value: &T) -> bool {
        match &self.state {
            CategoryState::AllActive => self.universe.contains(value),
            CategoryState::PartialActive(active) => active.contains(value),
        }
    }

    pub fn active_values(&self) -> Vec<T> {
        self.universe
            .iter()
            .filter(|value| self.is_active(value))
            .cloned()
            .collect()
    }

    /// Clicking a category:
    /// - an active value, with others still active, is deactivated;
    /// - the sole active value resets to all active;
    /// - an inactive value also resets to all active, it is not re-added.
    pub fn toggle(&mut self, value: &T) {
        let active = self.active_values();
        let next = if active.contains(value) && active.len() > 1 {
            CategoryState::PartialActive(active.into_iter().filter(|v| v != value).collect())
        } else {
            CategoryState::AllActive
        };
        self.state = next;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FactorSelection<T> {
    /// No factor selected; dependent views are unfiltered.
    #[default]
    Unset,
    Set(T),
}

impl<T: PartialEq> FactorSelection<T> {
    /// Selecting the current value again clears the selection.
    pub fn select(&mut self, value: T) {
        *self = if self.is_selected(&value) {
            FactorSelection::Unset
        } else {
            FactorSelection::Set(value)
        };
    }

    pub fn is_selected(&self, value: &T) -> bool {
        matches!(self, FactorSelection::Set(current) if current == value)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FactorSelection::Unset => None,
            FactorSelection::Set(value) => Some(value),
        }
    }
}

/// Selection shared by the overview bar chart and the factor panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub category: CategorySelection<Loneliness>,
    pub factor: FactorSelection<String>,
}

impl SelectionState {
    pub fn initial() -> Self {
        Self {
            category: CategorySelection::new(Loneliness::ALL),
            factor: FactorSelection::Unset,
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::initial()
    }
}
