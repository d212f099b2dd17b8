// Expand/collapse state of the alert panel.
use std::rc::Rc;
use yew::Reducible;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub expanded: bool,
}

impl PanelState {
    /// Double-click on the anchor.
    pub fn toggle(self) -> Self {
        Self {
            expanded: !self.expanded,
        }
    }

    /// Global click; `inside` is true when the target sits within the alert container.
    pub fn click(self, inside: bool) -> Self {
        if inside { self } else { Self { expanded: false } }
    }

    /// The panel needs something to list, so it stays hidden for an empty feed.
    pub fn shows_panel(self, loaded: bool, event_count: usize) -> bool {
        self.expanded && loaded && event_count > 0
    }
}

pub enum PanelAction {
    Toggle,
    Click { inside: bool },
}

impl Reducible for PanelState {
    type Action = PanelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            PanelAction::Toggle => self.toggle(),
            PanelAction::Click { inside } => self.click(inside),
        };
        if next == *self {
            return self;
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_restores_visibility() {
        let p = PanelState::default();
        assert!(p.toggle().expanded);
        assert_eq!(p.toggle().toggle(), p);
    }

    #[test]
    fn outside_click_collapses_only_when_expanded() {
        let open = PanelState { expanded: true };
        assert!(!open.click(false).expanded);
        assert!(open.click(true).expanded);
        let closed = PanelState::default();
        assert_eq!(closed.click(false), closed);
    }

    #[test]
    fn panel_hidden_without_events() {
        let open = PanelState { expanded: true };
        assert!(!open.shows_panel(true, 0));
        assert!(!open.shows_panel(false, 3));
        assert!(open.shows_panel(true, 3));
        assert!(!PanelState::default().shows_panel(true, 3));
    }

    #[test]
    fn reducer_routes_actions() {
        let p = Rc::new(PanelState::default()).reduce(PanelAction::Toggle);
        assert!(p.expanded);
        let p = p.reduce(PanelAction::Click { inside: true });
        assert!(p.expanded);
        let p = p.reduce(PanelAction::Click { inside: false });
        assert!(!p.expanded);
    }
}
