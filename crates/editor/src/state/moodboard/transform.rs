//! Resize/rotate through the transformer handle
//!
//! The transformer reports a node scale on top of the committed size. On
//! transform end the scale is folded into `width`/`height` (and the text font
//! size), and the node scale returns to 1 so it never accumulates.

use serde::{Deserialize, Serialize};
use shared::ElementContent;

use super::MoodboardSession;

/// Transformer node state reported by the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    /// Degrees
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl NodeTransform {
    fn is_finite(&self) -> bool {
        [self.x, self.y, self.rotation, self.scale_x, self.scale_y]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl MoodboardSession {
    /// Current node scale of an element: the live transformer scale while a
    /// transform is in progress, 1 otherwise
    pub fn node_scale(&self, id: &str) -> (f64, f64) {
        match &self.live_transform {
            Some((live_id, t)) if live_id == id => (t.scale_x, t.scale_y),
            _ => (1.0, 1.0),
        }
    }

    /// Live transformer update. A box smaller than the element's size floor
    /// is rejected and the previous live state is kept.
    pub fn transform_update(&mut self, id: &str, t: NodeTransform) -> bool {
        let Some(el) = self.get(id) else {
            return false;
        };
        if !t.is_finite() {
            tracing::debug!("Rejected non-finite transform for {id}");
            return false;
        }
        let min = el.content.min_size();
        let (w, h) = (el.frame.width * t.scale_x, el.frame.height * t.scale_y);
        if w < min || h < min {
            tracing::debug!("Rejected transform of {id} below minimum size {min}");
            return false;
        }
        self.live_transform = Some((id.to_string(), t));
        self.version += 1;
        true
    }

    /// Fold the live transform into the element and commit once
    pub fn transform_end(&mut self, id: &str) -> bool {
        let t = match self.live_transform.take() {
            Some((live_id, t)) if live_id == id => t,
            other => {
                self.live_transform = other;
                return false;
            }
        };
        let Some(el) = self.get_mut(id) else {
            return false;
        };

        let min = el.content.min_size();
        let frame = &mut el.frame;
        frame.x = t.x;
        frame.y = t.y;
        frame.rotation = t.rotation;
        frame.width = (frame.width * t.scale_x).max(min);
        frame.height = (frame.height * t.scale_y).max(min);
        if let ElementContent::Text { font_size, .. } = &mut el.content {
            *font_size *= t.scale_x;
        }
        self.commit();
        true
    }

    /// Single-step transform (update + end), as reported by a transform-end event
    pub fn apply_transform(&mut self, id: &str, t: NodeTransform) -> bool {
        self.transform_update(id, t) && self.transform_end(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn scaled(el: &shared::MoodboardElement, k: f64) -> NodeTransform {
        NodeTransform {
            x: el.frame.x,
            y: el.frame.y,
            rotation: el.frame.rotation,
            scale_x: k,
            scale_y: k,
        }
    }

    #[test]
    fn test_scale_folds_into_size_and_resets() {
        let mut s = fixtures::moodboard_with(vec![fixtures::image("img", 0.0, 0.0, 1)]);
        let t = scaled(s.get("img").unwrap(), 1.5);

        assert!(s.transform_update("img", t));
        assert_eq!(s.node_scale("img"), (1.5, 1.5));
        // Size is untouched until the transform ends
        assert_eq!(s.get("img").unwrap().frame.width, 200.0);

        assert!(s.transform_end("img"));
        let el = s.get("img").unwrap();
        assert!((el.frame.width - 300.0).abs() < 1e-9);
        assert!((el.frame.height - 225.0).abs() < 1e-9);
        assert_eq!(s.node_scale("img"), (1.0, 1.0));
        assert_eq!(s.history_len(), 2);
    }

    #[test]
    fn test_text_font_scales_with_horizontal_factor() {
        let mut s = fixtures::moodboard_with(vec![fixtures::text("t", 0.0, 0.0, 1)]);
        let mut t = scaled(s.get("t").unwrap(), 2.0);
        t.scale_y = 1.0;
        assert!(s.apply_transform("t", t));
        match &s.get("t").unwrap().content {
            ElementContent::Text { font_size, .. } => assert!((font_size - 48.0).abs() < 1e-9),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_below_floor_is_rejected() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("c", 0.0, 0.0, 1)]);
        let el = s.get("c").unwrap().clone();
        assert!(s.transform_update("c", scaled(&el, 0.5)));
        // 100 * 0.05 = 5 < 10
        assert!(!s.transform_update("c", scaled(&el, 0.05)));
        assert_eq!(s.node_scale("c"), (0.5, 0.5));
        assert!(s.transform_end("c"));
        assert!((s.get("c").unwrap().frame.width - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_end_without_update_is_noop() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("c", 0.0, 0.0, 1)]);
        assert!(!s.transform_end("c"));
        assert!(!s.can_undo());
    }

    #[test]
    fn test_rotation_and_position_are_taken_from_node() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("c", 0.0, 0.0, 1)]);
        let t = NodeTransform {
            x: 15.0,
            y: 25.0,
            rotation: 30.0,
            scale_x: 1.0,
            scale_y: 1.0,
        };
        assert!(s.apply_transform("c", t));
        let f = &s.get("c").unwrap().frame;
        assert_eq!((f.x, f.y, f.rotation), (15.0, 25.0, 30.0));
    }
}
