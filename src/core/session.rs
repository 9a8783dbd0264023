use crate::core::aggregate::{self, Summary};
use crate::core::filter::{self, FilterCriteria, FilteredView};
use crate::domain::model::Dataset;

/// Everything one interaction renders and exports: the filtered view plus
/// the KPI bundle computed from it. Borrowed from the session's dataset and
/// discarded after use.
#[derive(Debug)]
pub struct DashboardFrame<'a> {
    pub view: FilteredView<'a>,
    pub summary: Summary,
}

/// Owns the per-session state: the immutable dataset loaded once at session
/// start and the criteria rebuilt from user input on every interaction.
/// There is no other state; every refresh recomputes from scratch.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Dataset,
    criteria: FilterCriteria,
}

impl DashboardSession {
    pub fn new(dataset: Dataset, criteria: FilterCriteria) -> Self {
        Self { dataset, criteria }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the criteria for the next interaction. The dataset is never
    /// touched.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Recompute the filtered view and its summary from the current state.
    pub fn refresh(&self) -> DashboardFrame<'_> {
        let view = filter::apply(&self.dataset, &self.criteria);
        let summary = aggregate::summarize(&view);
        DashboardFrame { view, summary }
    }
}
