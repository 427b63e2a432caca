//! Selection fan-out between the overview bar chart and the factor panels.
//!
//! The coordinator owns the [`SelectionState`]. Views subscribe to one or
//! both dimensions and are called back, in subscription order, after every
//! transition of a dimension they listen to. [`FactorData`] holds the
//! datasets the listeners re-derive from.

use std::fmt;

use super::category::{FactorKind, Loneliness};
use super::record::{Dataset, SurveyRow};
use super::selection::{CategorySelection, FactorSelection, SelectionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Category,
    Factor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&SelectionState)>;

struct Listener {
    id: SubscriptionId,
    dimensions: Vec<Dimension>,
    callback: Callback,
}

pub struct SelectionCoordinator {
    state: SelectionState,
    listeners: Vec<Listener>,
    next_id: u64,
}

impl fmt::Debug for SelectionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCoordinator")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionCoordinator {
    pub fn new(state: SelectionState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn subscribe(
        &mut self,
        dimensions: &[Dimension],
        callback: impl FnMut(&SelectionState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            dimensions: dimensions.to_vec(),
            callback: Box::new(callback),
        });
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        before != self.listeners.len()
    }

    pub fn toggle_category(&mut self, value: Loneliness) -> &SelectionState {
        self.state.category.toggle(&value);
        tracing::debug!(?value, state = ?self.state.category.state(), "category toggled");
        self.notify(Dimension::Category);
        &self.state
    }

    pub fn select_factor(&mut self, value: impl Into<String>) -> &SelectionState {
        self.state.factor.select(value.into());
        tracing::debug!(factor = ?self.state.factor, "factor selected");
        self.notify(Dimension::Factor);
        &self.state
    }

    fn notify(&mut self, dimension: Dimension) {
        let Self {
            state, listeners, ..
        } = self;
        for listener in listeners
            .iter_mut()
            .filter(|listener| listener.dimensions.contains(&dimension))
        {
            (listener.callback)(state);
        }
    }
}

/// Value of the `gender` column for rows that aggregate both genders.
pub const ALL_GENDERS: &str = "All";

/// Stand-in slice shown on the overview when a gender is selected. The table
/// has no clean per-gender totals, so the immigration rows of that gender are
/// used instead.
pub const GENDER_PROXY_VALUES: [&str; 2] = ["Immigrants", "Non-immigrants"];

/// Datasets behind the bidirectional page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorData {
    all: Dataset<SurveyRow>,
    overview: Dataset<SurveyRow>,
    panels: Vec<(FactorKind, Dataset<SurveyRow>)>,
}

impl FactorData {
    pub fn from_rows(rows: &Dataset<SurveyRow>) -> Self {
        let overview = rows.filter(|row| row.gender == ALL_GENDERS);
        let by_gender = rows.filter(|row| row.gender != ALL_GENDERS);

        let panels = FactorKind::ALL
            .into_iter()
            .map(|kind| {
                let panel = match kind {
                    FactorKind::Gender => Dataset::new(
                        by_gender
                            .iter()
                            .map(|row| SurveyRow {
                                value: row.gender.clone(),
                                ..row.clone()
                            })
                            .collect(),
                    ),
                    _ => by_gender.filter(|row| row.category == kind.category()),
                };
                (kind, panel)
            })
            .collect();

        Self {
            all: rows.clone(),
            overview,
            panels,
        }
    }

    /// Rows of one factor panel, limited to the active loneliness categories.
    pub fn panel_rows(
        &self,
        kind: FactorKind,
        category: &CategorySelection<Loneliness>,
    ) -> Dataset<SurveyRow> {
        let Some((_, panel)) = self.panels.iter().find(|(k, _)| *k == kind) else {
            return Dataset::empty();
        };
        if category.is_all_active() {
            return panel.clone();
        }
        panel.filter(|row| {
            Loneliness::from_label(&row.loneliness).is_some_and(|level| category.is_active(&level))
        })
    }

    /// Rows of the overview bar chart for the selected factor. A non-gender
    /// value keeps its rows of every gender, `All` included.
    pub fn overview_rows(&self, factor: &FactorSelection<String>) -> Dataset<SurveyRow> {
        match factor.value() {
            None => self.overview.clone(),
            Some(value) if is_gender(value) => gender_factor_slice(&self.all, value),
            Some(value) => self.all.filter(|row| row.value == *value),
        }
    }
}

fn is_gender(value: &str) -> bool {
    value == "Men" || value == "Women"
}

/// Overview rows for a selected gender: the immigration rows of that gender.
pub fn gender_factor_slice(rows: &Dataset<SurveyRow>, gender: &str) -> Dataset<SurveyRow> {
    rows.filter(|row| GENDER_PROXY_VALUES.contains(&row.value.as_str()) && row.gender == gender)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_only_hear_their_dimension() {
        let mut coordinator = SelectionCoordinator::new(SelectionState::initial());
        let heard = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&heard);
        coordinator.subscribe(&[Dimension::Category], move |_| log.borrow_mut().push("category"));
        let log = Rc::clone(&heard);
        coordinator.subscribe(&[Dimension::Factor], move |_| log.borrow_mut().push("factor"));
        let log = Rc::clone(&heard);
        coordinator.subscribe(&[Dimension::Category, Dimension::Factor], move |_| {
            log.borrow_mut().push("both")
        });

        coordinator.toggle_category(Loneliness::Sometimes);
        coordinator.select_factor("Retired");

        assert_eq!(*heard.borrow(), ["category", "both", "factor", "both"]);
    }

    #[test]
    fn listeners_see_the_new_state() {
        let mut coordinator = SelectionCoordinator::new(SelectionState::initial());
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        coordinator.subscribe(&[Dimension::Factor], move |state| {
            *sink.borrow_mut() = state.factor.value().cloned();
        });

        coordinator.select_factor("Women");
        assert_eq!(seen.borrow().as_deref(), Some("Women"));
        coordinator.select_factor("Women");
        assert_eq!(*seen.borrow(), None);
    }

    #[test]
    fn unsubscribed_listeners_are_silent() {
        let mut coordinator = SelectionCoordinator::new(SelectionState::initial());
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = coordinator.subscribe(&[Dimension::Category], move |_| *sink.borrow_mut() += 1);

        coordinator.toggle_category(Loneliness::Sometimes);
        assert!(coordinator.unsubscribe(id));
        assert!(!coordinator.unsubscribe(id));
        coordinator.toggle_category(Loneliness::Sometimes);
        assert_eq!(*count.borrow(), 1);
    }

    fn survey(
        gender: &str,
        category: &str,
        value: &str,
        loneliness: Loneliness,
        amount: i64,
    ) -> SurveyRow {
        SurveyRow {
            id: String::new(),
            gender: gender.into(),
            category: category.into(),
            value: value.into(),
            loneliness: loneliness.label().into(),
            amount: Some(amount),
            status: String::new(),
        }
    }

    fn sample() -> Dataset<SurveyRow> {
        Dataset::new(vec![
            survey("All", "immigration", "Immigrants", Loneliness::Sometimes, 100),
            survey("Men", "immigration", "Immigrants", Loneliness::Sometimes, 40),
            survey("Women", "immigration", "Immigrants", Loneliness::AlwaysOrOften, 60),
            survey("Women", "immigration", "Non-immigrants", Loneliness::Sometimes, 30),
            survey("All", "work", "Retired", Loneliness::RarelyOrNever, 80),
            survey("Women", "work", "Retired", Loneliness::RarelyOrNever, 45),
        ])
    }

    #[test]
    fn gender_panel_uses_gender_as_value() {
        let data = FactorData::from_rows(&sample());
        let panel = data.panel_rows(FactorKind::Gender, &CategorySelection::new(Loneliness::ALL));
        assert_eq!(panel.len(), 4);
        assert!(panel.iter().all(|row| row.value == row.gender));
    }

    #[test]
    fn panels_follow_active_categories() {
        let data = FactorData::from_rows(&sample());
        let mut category = CategorySelection::new(Loneliness::ALL);
        category.toggle(&Loneliness::Sometimes);

        let panel = data.panel_rows(FactorKind::Immigration, &category);
        assert_eq!(panel.len(), 1);
        assert_eq!(panel[0].gender, "Women");
    }

    #[test]
    fn unset_factor_shows_the_all_genders_overview() {
        let data = FactorData::from_rows(&sample());
        let rows = data.overview_rows(&FactorSelection::Unset);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.gender == ALL_GENDERS));
    }

    #[test]
    fn gender_selection_shows_that_genders_immigration_rows() {
        let data = FactorData::from_rows(&sample());
        let rows = data.overview_rows(&FactorSelection::Set("Women".into()));
        let amounts: Vec<_> = rows.iter().map(|row| row.amount).collect();
        assert_eq!(amounts, [Some(60), Some(30)]);
    }

    #[test]
    fn other_factor_selection_keeps_rows_of_every_gender() {
        let mut rows: Vec<SurveyRow> = sample().iter().cloned().collect();
        rows.push(survey("Men", "work", "Retired", Loneliness::RarelyOrNever, 35));
        let data = FactorData::from_rows(&Dataset::new(rows));

        let rows = data.overview_rows(&FactorSelection::Set("Retired".into()));
        let genders: Vec<_> = rows.iter().map(|row| row.gender.as_str()).collect();
        assert_eq!(genders, ["All", "Women", "Men"]);
        let amounts: Vec<_> = rows.iter().map(|row| row.amount).collect();
        assert_eq!(amounts, [Some(80), Some(45), Some(35)]);
    }
}
