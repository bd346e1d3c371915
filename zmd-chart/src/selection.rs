//! The selection state machine: user selection, series computation, chart
//! display, reset.

use zmd_data::series::{filter_series, Selection};
use zmd_data::station_index::StationIndex;
use zmd_meteo::record::Attribute;
use zmd_meteo::station::StationSelector;

use crate::spec::{build_chart_spec, ChartSpec};

/// Where the controller currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing chosen.
    Idle,
    /// One of station/attribute chosen.
    Partial,
    /// Both chosen, chart not yet computed.
    Ready,
    /// A computed chart is exposed.
    Displaying,
}

/// Minimal coordinator between the selection widgets and the pipeline.
///
/// Selections only mark readiness; the series is recomputed exclusively by
/// the explicit [`SelectionController::show`] action. Changing a selection
/// while a chart is displayed leaves the prior chart visible (and the show
/// action enabled) until `show` runs again.
#[derive(Debug, Default)]
pub struct SelectionController {
    selection: Selection,
    chart: Option<ChartSpec>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        if self.chart.is_some() {
            return SelectionState::Displaying;
        }
        match (&self.selection.station, &self.selection.attribute) {
            (Some(_), Some(_)) => SelectionState::Ready,
            (None, None) => SelectionState::Idle,
            _ => SelectionState::Partial,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_station(&mut self, station: StationSelector) {
        self.selection.station = Some(station);
    }

    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.selection.attribute = Some(attribute);
    }

    /// Whether the show action is enabled: both selection fields are set.
    pub fn can_show(&self) -> bool {
        self.selection.is_complete()
    }

    /// Compute the series for the current selection and expose its chart.
    ///
    /// Disabled while the selection is incomplete: returns `None` and
    /// changes nothing.
    pub fn show(&mut self, index: &StationIndex) -> Option<&ChartSpec> {
        if !self.can_show() {
            return None;
        }
        let series = filter_series(index, &self.selection);
        self.chart = Some(build_chart_spec(series, &self.selection));
        self.chart.as_ref()
    }

    /// The chart computed by the last show, if any.
    pub fn chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    /// Clear both selection fields and discard any computed chart.
    pub fn reset(&mut self) {
        self.selection = Selection::default();
        self.chart = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionController, SelectionState};
    use zmd_data::station_index::StationIndex;
    use zmd_meteo::normalize::normalize_raw_batch;
    use zmd_meteo::raw_record::parse_delimited;
    use zmd_meteo::record::Attribute;
    use zmd_meteo::station::StationSelector;

    const STR_RESULT: &str = "\
Datum,Standort,T,RainDur
2023-01-01,Zch_Rosengartenstrasse,5.2,0
2023-01-01,Zch_Stampfenbachstrasse,5.4,0
";

    fn index() -> StationIndex {
        let rows = parse_delimited(STR_RESULT).unwrap();
        StationIndex::from_records(&normalize_raw_batch(&rows).records)
    }

    #[test]
    fn test_walks_idle_partial_ready_displaying() {
        let index = index();
        let mut controller = SelectionController::new();
        assert_eq!(controller.state(), SelectionState::Idle);

        controller.set_station(StationSelector::from_input("Rosengartenstrasse"));
        assert_eq!(controller.state(), SelectionState::Partial);
        assert!(!controller.can_show());

        controller.set_attribute(Attribute::Temperature);
        assert_eq!(controller.state(), SelectionState::Ready);
        assert!(controller.can_show());

        assert!(controller.show(&index).is_some());
        assert_eq!(controller.state(), SelectionState::Displaying);
        assert_eq!(controller.chart().unwrap().data.values.len(), 1);
    }

    #[test]
    fn test_show_is_disabled_until_both_fields_are_set() {
        let index = index();
        let mut controller = SelectionController::new();
        assert!(controller.show(&index).is_none());

        controller.set_attribute(Attribute::RainDuration);
        assert!(controller.show(&index).is_none());
        assert!(controller.chart().is_none());
        assert_eq!(controller.state(), SelectionState::Partial);
    }

    #[test]
    fn test_changing_selection_while_displaying_keeps_the_prior_chart() {
        let index = index();
        let mut controller = SelectionController::new();
        controller.set_station(StationSelector::from_input("Rosengartenstrasse"));
        controller.set_attribute(Attribute::Temperature);
        assert!(controller.show(&index).is_some());
        let before = controller.chart().cloned();

        // no implicit recompute on selection change
        controller.set_station(StationSelector::All);
        assert_eq!(controller.state(), SelectionState::Displaying);
        assert_eq!(controller.chart().cloned(), before);
        assert!(controller.can_show());

        // the explicit re-show recomputes
        assert!(controller.show(&index).is_some());
        assert_eq!(controller.chart().unwrap().data.values.len(), 2);
    }

    #[test]
    fn test_reset_returns_to_idle_and_disables_show() {
        let index = index();
        let mut controller = SelectionController::new();
        controller.set_station(StationSelector::All);
        controller.set_attribute(Attribute::Temperature);
        assert!(controller.show(&index).is_some());
        assert_eq!(controller.state(), SelectionState::Displaying);

        controller.reset();
        assert_eq!(controller.state(), SelectionState::Idle);
        assert!(controller.selection().station.is_none());
        assert!(controller.selection().attribute.is_none());
        assert!(controller.chart().is_none());
        // show must not re-enable until fields are chosen again
        assert!(controller.show(&index).is_none());
    }
}
