//! Element dragging: live frames never commit, drag end commits once

use super::MoodboardSession;

impl MoodboardSession {
    /// Mark an element as being dragged. No history entry is written.
    pub fn drag_start(&mut self, id: &str) -> bool {
        let Some(el) = self.get_mut(id) else {
            tracing::debug!("Drag start ignored, no element with id {id}");
            return false;
        };
        el.frame.is_dragging = true;
        tracing::debug!("Element drag started: {id}");
        self.version += 1;
        true
    }

    /// Live position update while the drag is in progress
    pub fn drag_move(&mut self, id: &str, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        if !el.frame.is_dragging {
            return false;
        }
        el.frame.x = x;
        el.frame.y = y;
        self.version += 1;
        true
    }

    /// Finish a drag at the reported position. Commits exactly once when the
    /// element actually moved.
    pub fn drag_end(&mut self, id: &str, x: f64, y: f64) -> bool {
        let committed = self.history.current().iter().find(|e| e.id() == id).map(|e| (e.frame.x, e.frame.y));
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        el.frame.is_dragging = false;
        if x.is_finite() && y.is_finite() {
            el.frame.x = x;
            el.frame.y = y;
        }
        let end = (el.frame.x, el.frame.y);
        tracing::debug!("Element drag ended: {id}");

        // Dropped where it was picked up
        if committed == Some(end) {
            self.version += 1;
            return false;
        }
        self.commit();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    #[test]
    fn test_drag_frames_do_not_commit() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("a", 10.0, 10.0, 1)]);
        let before = s.history_len();

        assert!(s.drag_start("a"));
        assert!(s.get("a").unwrap().frame.is_dragging);
        for i in 0..5 {
            assert!(s.drag_move("a", 10.0 + i as f64, 10.0));
        }
        assert_eq!(s.history_len(), before);

        assert!(s.drag_end("a", 40.0, 60.0));
        let el = s.get("a").unwrap();
        assert!(!el.frame.is_dragging);
        assert_eq!((el.frame.x, el.frame.y), (40.0, 60.0));
        assert_eq!(s.history_len(), before + 1);
    }

    #[test]
    fn test_drag_back_to_start_does_not_commit() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("a", 10.0, 10.0, 1)]);
        s.drag_start("a");
        s.drag_move("a", 90.0, 90.0);
        assert!(!s.drag_end("a", 10.0, 10.0));
        assert!(!s.can_undo());
        assert!(!s.get("a").unwrap().frame.is_dragging);
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("a", 10.0, 10.0, 1)]);
        assert!(!s.drag_move("a", 50.0, 50.0));
        assert_eq!(s.get("a").unwrap().frame.x, 10.0);
    }

    #[test]
    fn test_undo_restores_pre_drag_position() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("a", 10.0, 10.0, 1)]);
        s.drag_start("a");
        s.drag_end("a", 200.0, 100.0);
        assert!(s.undo());
        let el = s.get("a").unwrap();
        assert_eq!((el.frame.x, el.frame.y), (10.0, 10.0));
        assert!(!el.frame.is_dragging);
    }

    #[test]
    fn test_commit_mid_drag_does_not_record_drag_flag() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("a", 10.0, 10.0, 1)]);
        s.drag_start("a");
        s.add_text();
        assert!(s.drag_end("a", 5.0, 5.0));

        assert!(s.undo());
        assert!(!s.get("a").unwrap().frame.is_dragging);
        assert!(!s.drag_move("a", 70.0, 70.0));
        assert!(s.elements().iter().all(|e| !e.frame.is_dragging));
    }
}
