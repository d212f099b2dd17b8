pub mod alerts;
pub mod drag;
pub mod panel;
pub mod request;
pub mod selection;

pub use alerts::{group_counts, row_label, AlertFeed, AlertGlyph, AlertRoute, FeedAction};
pub use drag::DragController;
pub use panel::{PanelAction, PanelState};
pub use request::{LayerFetch, Ticket};
pub use selection::{marker_click, MarkerClick, Selection, SelectionAction};
