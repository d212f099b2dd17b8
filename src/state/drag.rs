// Pointer-driven repositioning of the floating alert widget.
use crate::model::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub start_x: f64,
    pub start_y: f64,
    pub origin: Position,
}

/// Tracks the widget offset across gestures. Offsets accumulate; a new gesture
/// starts from wherever the last one ended.
#[derive(Default, Debug, Clone)]
pub struct DragController {
    offset: Position,
    drag: Option<DragState>,
}

impl DragController {
    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag = Some(DragState {
            start_x: x,
            start_y: y,
            origin: self.offset,
        });
    }

    /// New offset while a gesture is active, `None` otherwise.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Position> {
        let drag = self.drag?;
        self.offset = Position {
            x: drag.origin.x + (x - drag.start_x),
            y: drag.origin.y + (y - drag.start_y),
        };
        Some(self.offset)
    }

    /// Ends the gesture. Returns whether one was active.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn pointer_cancel(&mut self) -> bool {
        self.pointer_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_offset_ignores_move_granularity() {
        let mut coarse = DragController::default();
        coarse.pointer_down(100.0, 100.0);
        coarse.pointer_move(130.0, 80.0);
        coarse.pointer_up();

        let mut fine = DragController::default();
        fine.pointer_down(100.0, 100.0);
        for i in 1..=30 {
            fine.pointer_move(100.0 + i as f64, 100.0 - (i as f64) * 20.0 / 30.0);
        }
        fine.pointer_up();

        assert_eq!(coarse.offset(), Position { x: 30.0, y: -20.0 });
        assert_eq!(fine.offset(), coarse.offset());
    }

    #[test]
    fn gestures_accumulate() {
        let mut d = DragController::default();
        d.pointer_down(0.0, 0.0);
        d.pointer_move(10.0, 5.0);
        d.pointer_up();
        d.pointer_down(50.0, 50.0);
        d.pointer_move(45.0, 70.0);
        d.pointer_cancel();
        assert_eq!(d.offset(), Position { x: 5.0, y: 25.0 });
    }

    #[test]
    fn move_without_gesture_is_ignored() {
        let mut d = DragController::default();
        assert_eq!(d.pointer_move(40.0, 40.0), None);
        d.pointer_down(0.0, 0.0);
        d.pointer_up();
        assert_eq!(d.pointer_move(40.0, 40.0), None);
        assert_eq!(d.offset(), Position::default());
    }

    #[test]
    fn release_is_idempotent_without_press() {
        let mut d = DragController::default();
        d.pointer_up();
        d.pointer_cancel();
        assert_eq!(d.pointer_move(2.0, 2.0), None);
        d.pointer_down(1.0, 1.0);
        assert_eq!(d.pointer_move(2.0, 2.0), Some(Position { x: 1.0, y: 1.0 }));
        d.pointer_cancel();
        d.pointer_up();
        assert_eq!(d.pointer_move(9.0, 9.0), None);
    }

    #[test]
    fn release_reports_only_the_gesture_it_ends() {
        let mut d = DragController::default();
        assert!(!d.pointer_up());
        d.pointer_down(3.0, 4.0);
        assert!(d.pointer_up());
        assert!(!d.pointer_up());
        d.pointer_down(3.0, 4.0);
        assert!(d.pointer_cancel());
        assert!(!d.pointer_cancel());
    }
}
