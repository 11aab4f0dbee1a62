//! Z-order: swap with the immediate neighbor in paint order

use super::MoodboardSession;

impl MoodboardSession {
    pub fn bring_forward(&mut self, id: &str) -> bool {
        self.swap_with_neighbor(id, true)
    }

    pub fn send_backward(&mut self, id: &str) -> bool {
        self.swap_with_neighbor(id, false)
    }

    fn swap_with_neighbor(&mut self, id: &str, forward: bool) -> bool {
        let order = self.sorted_indices();
        let Some(pos) = order.iter().position(|&i| self.elements[i].id() == id) else {
            return false;
        };
        let neighbor = if forward {
            order.get(pos + 1)
        } else {
            pos.checked_sub(1).and_then(|p| order.get(p))
        };
        let Some(&other) = neighbor else {
            tracing::debug!("{id} is already at the {} of the stack", if forward { "top" } else { "bottom" });
            return false;
        };
        let this = order[pos];

        let (a, b) = (self.elements[this].z_index(), self.elements[other].z_index());
        if a == b {
            // Tied zIndex: paint order falls back to storage order
            self.elements.swap(this, other);
        } else {
            self.elements[this].frame.z_index = b;
            self.elements[other].frame.z_index = a;
        }
        self.commit();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    fn z(s: &super::MoodboardSession, id: &str) -> i64 {
        s.get(id).unwrap().z_index()
    }

    #[test]
    fn test_bring_forward_swaps_with_next() {
        let mut s = fixtures::moodboard_with(vec![
            fixtures::swatch("a", 0.0, 0.0, 1),
            fixtures::swatch("b", 0.0, 0.0, 5),
            fixtures::swatch("c", 0.0, 0.0, 9),
        ]);
        assert!(s.bring_forward("a"));
        assert_eq!((z(&s, "a"), z(&s, "b"), z(&s, "c")), (5, 1, 9));
        assert_eq!(s.history_len(), 2);
    }

    #[test]
    fn test_send_backward_uses_sorted_order_not_storage() {
        let mut s = fixtures::moodboard_with(vec![
            fixtures::swatch("top", 0.0, 0.0, 3),
            fixtures::swatch("bottom", 0.0, 0.0, 1),
            fixtures::swatch("mid", 0.0, 0.0, 2),
        ]);
        assert!(s.send_backward("top"));
        assert_eq!((z(&s, "top"), z(&s, "mid"), z(&s, "bottom")), (2, 3, 1));
    }

    #[test]
    fn test_ends_of_stack_are_noops() {
        let mut s = fixtures::moodboard_with(vec![
            fixtures::swatch("a", 0.0, 0.0, 1),
            fixtures::swatch("b", 0.0, 0.0, 2),
        ]);
        assert!(!s.bring_forward("b"));
        assert!(!s.send_backward("a"));
        assert!(!s.can_undo());
    }

    #[test]
    fn test_tied_z_swaps_paint_order() {
        let mut s = fixtures::moodboard_with(vec![
            fixtures::swatch("a", 0.0, 0.0, 2),
            fixtures::swatch("b", 0.0, 0.0, 2),
        ]);
        assert!(s.bring_forward("a"));
        let ids: Vec<&str> = s.paint_order().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
