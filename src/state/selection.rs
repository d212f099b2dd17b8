// Single-slot selection for the AQI map. Hosts own it through use_reducer.
use std::rc::Rc;
use yew::Reducible;

use crate::model::AqiMapPoint;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Selection {
    pub selected: Option<AqiMapPoint>,
}

pub enum SelectionAction {
    Select(AqiMapPoint),
    Dismiss,
}

impl SelectionAction {
    /// Adapts the map's `set_selected_point` setter form.
    pub fn from_setter(point: Option<AqiMapPoint>) -> Self {
        match point {
            Some(p) => SelectionAction::Select(p),
            None => SelectionAction::Dismiss,
        }
    }
}

impl Reducible for Selection {
    type Action = SelectionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let selected = match action {
            SelectionAction::Select(p) => Some(p),
            SelectionAction::Dismiss => None,
        };
        if selected == self.selected {
            return self;
        }
        Rc::new(Selection { selected })
    }
}

/// What clicking a marker should do.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerClick {
    /// Hand the point to the caller's setter.
    Select(AqiMapPoint),
    /// The point is already selected but its popup is closed. The setter would
    /// not change anything, so the map reopens the popup itself.
    Reopen(AqiMapPoint),
}

pub fn marker_click(
    selected: Option<&AqiMapPoint>,
    clicked: &AqiMapPoint,
    popup_open: bool,
) -> MarkerClick {
    if !popup_open && selected == Some(clicked) {
        MarkerClick::Reopen(clicked.clone())
    } else {
        MarkerClick::Select(clicked.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoPoint;

    fn point(id: &str) -> AqiMapPoint {
        AqiMapPoint {
            id: id.into(),
            location: format!("Station {}", id),
            coordinates: GeoPoint::new(12.9, 77.6),
            aqi: 80,
            category: "Moderate".into(),
        }
    }

    #[test]
    fn selecting_replaces_prior_selection() {
        let s = Rc::new(Selection::default())
            .reduce(SelectionAction::Select(point("a")))
            .reduce(SelectionAction::Select(point("b")));
        assert_eq!(s.selected.as_ref().map(|p| p.id.as_str()), Some("b"));
    }

    #[test]
    fn dismiss_clears_slot() {
        let s = Rc::new(Selection::default())
            .reduce(SelectionAction::Select(point("a")))
            .reduce(SelectionAction::Dismiss);
        assert_eq!(s.selected, None);
        let s = s.reduce(SelectionAction::from_setter(Some(point("c"))));
        assert_eq!(s.selected, Some(point("c")));
        assert_eq!(s.reduce(SelectionAction::from_setter(None)).selected, None);
    }

    #[test]
    fn reselecting_point_with_closed_popup_reopens_it() {
        let a = point("a");
        let s = Rc::new(Selection::default()).reduce(SelectionAction::Select(a.clone()));
        // The setter alone cannot bring the popup back.
        let again = s.clone().reduce(SelectionAction::Select(a.clone()));
        assert!(Rc::ptr_eq(&s, &again));
        assert_eq!(
            marker_click(s.selected.as_ref(), &a, false),
            MarkerClick::Reopen(a.clone())
        );
    }

    #[test]
    fn clicks_otherwise_go_through_the_setter() {
        let (a, b) = (point("a"), point("b"));
        assert_eq!(marker_click(None, &a, false), MarkerClick::Select(a.clone()));
        assert_eq!(marker_click(Some(&a), &a, true), MarkerClick::Select(a.clone()));
        assert_eq!(marker_click(Some(&a), &b, false), MarkerClick::Select(b.clone()));
        assert_eq!(marker_click(Some(&a), &b, true), MarkerClick::Select(b));
    }
}
