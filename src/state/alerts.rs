//! Alert aggregation: one normalization step from [`AlertInput`] to a
//! canonical event list, plus the loading lifecycle that gates visibility.

use std::rc::Rc;
use yew::Reducible;

use crate::model::{AlertInput, DisasterEvent};

pub fn normalize(input: &AlertInput) -> Vec<DisasterEvent> {
    match input {
        AlertInput::Explicit(list) => list.clone(),
        AlertInput::Legacy { kind, count } => (0..*count)
            .map(|i| DisasterEvent::new(format!("legacy-{}", i), kind.clone()))
            .collect(),
        AlertInput::Empty => Vec::new(),
    }
}

/// Count per distinct type, in order of first occurrence.
pub fn group_counts(events: &[DisasterEvent]) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = Vec::new();
    for e in events {
        match out.iter_mut().find(|(k, _)| *k == e.kind) {
            Some((_, n)) => *n += 1,
            None => out.push((e.kind.clone(), 1)),
        }
    }
    out
}

/// Detail page for an alert row. Only earthquakes have a dedicated page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertRoute {
    Earthquake,
    Generic,
}

impl AlertRoute {
    pub fn for_kind(kind: &str) -> Self {
        if kind == "earthquake" {
            AlertRoute::Earthquake
        } else {
            AlertRoute::Generic
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            AlertRoute::Earthquake => "/earthquakePage",
            AlertRoute::Generic => "/cyclonePage",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertGlyph {
    Seismic,
    Wave,
}

impl AlertGlyph {
    pub fn for_kind(kind: &str) -> Self {
        match kind {
            "earthquake" => AlertGlyph::Seismic,
            _ => AlertGlyph::Wave,
        }
    }
}

pub fn row_label(kind: &str, index: usize) -> String {
    format!("{} alert #{}", kind, index + 1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedPhase {
    Loading,
    Ready,
}

/// Published alert list. Each restart opens a new generation; a completion
/// only lands if it belongs to the current one.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertFeed {
    pub generation: u64,
    pub phase: FeedPhase,
    events: Vec<DisasterEvent>,
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self {
            generation: 0,
            phase: FeedPhase::Loading,
            events: Vec::new(),
        }
    }
}

impl AlertFeed {
    pub fn is_loaded(&self) -> bool {
        self.phase == FeedPhase::Ready
    }

    /// Empty while loading.
    pub fn visible(&self) -> &[DisasterEvent] {
        match self.phase {
            FeedPhase::Ready => &self.events,
            FeedPhase::Loading => &[],
        }
    }
}

pub enum FeedAction {
    Restart { generation: u64 },
    Complete { generation: u64, input: AlertInput },
}

impl Reducible for AlertFeed {
    type Action = FeedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            FeedAction::Restart { generation } => Rc::new(AlertFeed {
                generation,
                phase: FeedPhase::Loading,
                events: Vec::new(),
            }),
            FeedAction::Complete { generation, input } => {
                if generation != self.generation {
                    return self;
                }
                Rc::new(AlertFeed {
                    generation,
                    phase: FeedPhase::Ready,
                    events: normalize(&input),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn legacy(kind: &str, count: u32) -> AlertInput {
        AlertInput::Legacy {
            kind: kind.into(),
            count,
        }
    }

    #[test]
    fn legacy_pair_expands_with_sequential_ids() {
        let events = normalize(&legacy("flood", 3));
        assert_eq!(
            events,
            vec![
                DisasterEvent::new("legacy-0", "flood"),
                DisasterEvent::new("legacy-1", "flood"),
                DisasterEvent::new("legacy-2", "flood"),
            ]
        );
    }

    #[test]
    fn explicit_list_is_kept_in_order() {
        let list = vec![
            DisasterEvent::new("a", "earthquake"),
            DisasterEvent::new("b", "cyclone"),
        ];
        assert_eq!(normalize(&AlertInput::Explicit(list.clone())), list);
        assert!(normalize(&AlertInput::Empty).is_empty());
    }

    #[test]
    fn group_counts_keep_first_occurrence_order() {
        let events = vec![
            DisasterEvent::new("1", "flood"),
            DisasterEvent::new("2", "quake"),
            DisasterEvent::new("3", "flood"),
        ];
        assert_eq!(
            group_counts(&events),
            vec![("flood".to_string(), 2), ("quake".to_string(), 1)]
        );
        assert!(group_counts(&[]).is_empty());
    }

    #[test]
    fn only_earthquakes_get_their_own_page() {
        assert_eq!(AlertRoute::for_kind("earthquake").href(), "/earthquakePage");
        assert_eq!(AlertRoute::for_kind("cyclone").href(), "/cyclonePage");
        assert_eq!(AlertRoute::for_kind("flood").href(), "/cyclonePage");
        assert_eq!(AlertGlyph::for_kind("earthquake"), AlertGlyph::Seismic);
        assert_eq!(AlertGlyph::for_kind("wildfire"), AlertGlyph::Wave);
        assert_eq!(row_label("flood", 0), "flood alert #1");
    }

    #[test]
    fn events_hidden_until_population_completes() {
        let feed = Rc::new(AlertFeed::default());
        let feed = feed.reduce(FeedAction::Restart { generation: 1 });
        assert!(!feed.is_loaded());
        assert!(feed.visible().is_empty());

        let feed = feed.reduce(FeedAction::Complete {
            generation: 1,
            input: legacy("flood", 3),
        });
        assert!(feed.is_loaded());
        assert_eq!(feed.visible().len(), 3);
        assert!(feed.visible().iter().all(|e| e.kind == "flood"));
    }

    #[test]
    fn restart_replaces_previous_result() {
        let feed = Rc::new(AlertFeed::default())
            .reduce(FeedAction::Restart { generation: 1 })
            .reduce(FeedAction::Complete {
                generation: 1,
                input: legacy("flood", 2),
            })
            .reduce(FeedAction::Restart { generation: 2 });
        assert!(feed.visible().is_empty());

        let feed = feed.reduce(FeedAction::Complete {
            generation: 2,
            input: AlertInput::Explicit(vec![DisasterEvent::new("a", "earthquake")]),
        });
        assert_eq!(feed.visible(), &[DisasterEvent::new("a", "earthquake")]);
    }

    #[test]
    fn superseded_completion_is_ignored() {
        let feed = Rc::new(AlertFeed::default())
            .reduce(FeedAction::Restart { generation: 1 })
            .reduce(FeedAction::Restart { generation: 2 })
            .reduce(FeedAction::Complete {
                generation: 1,
                input: legacy("flood", 5),
            });
        assert!(!feed.is_loaded());
        assert_eq!(feed.generation, 2);
    }
}
