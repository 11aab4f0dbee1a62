//! Validation utilities.
//!
//! Document repair for loaded room designs and moodboards (duplicate ids,
//! non-finite numbers, malformed colors) and `MeshValidator` integrity checks
//! for tessellated output.

use std::collections::HashSet;

use shared::{ElementContent, Footprint, MoodboardDocument, RoomDesign, RoomShell};

use crate::catalog::DEFAULT_COLOR;
use crate::viewport::mesh::MeshData;

/// `#RGB` or `#RRGGBB`
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Parse a hex color into [0, 1] RGB. Malformed input gives None.
pub fn hex_to_rgb(s: &str) -> Option<[f32; 3]> {
    if !is_hex_color(s) {
        return None;
    }
    let hex = &s[1..];
    let channel = |i: usize, len: usize| -> Option<f32> {
        let raw = u8::from_str_radix(&hex[i * len..(i + 1) * len], 16).ok()?;
        let value = if len == 1 { raw * 17 } else { raw };
        Some(f32::from(value) / 255.0)
    };
    let len = hex.len() / 3;
    Some([channel(0, len)?, channel(1, len)?, channel(2, len)?])
}

fn fresh_id_if_taken(id: &mut String, seen: &mut HashSet<String>, what: &str, warnings: &mut Vec<String>) {
    if id.is_empty() || seen.contains(id.as_str()) {
        let fresh = uuid::Uuid::new_v4().to_string();
        warnings.push(format!("{what} id '{id}' is empty or duplicated, reassigned to {fresh}"));
        *id = fresh;
    }
    seen.insert(id.clone());
}

/// Fix a loaded room design in place. Returns one message per repair.
pub fn repair_room_design(design: &mut RoomDesign) -> Vec<String> {
    let mut warnings = Vec::new();

    if !design.room.is_valid() {
        let shell = design.room;
        design.room = RoomShell::validated(shell.width, shell.length, shell.height).unwrap_or_default();
        warnings.push(format!("Room shell {shell:?} out of range, using {:?}", design.room));
    }

    let mut seen = HashSet::new();
    for item in &mut design.furniture {
        fresh_id_if_taken(&mut item.id, &mut seen, "Furniture", &mut warnings);

        let t = &mut item.transform;
        if !t.position.iter().all(|v| v.is_finite()) {
            warnings.push(format!("Furniture {} has non-finite position, reset", item.id));
            t.position = [0.0, 0.0, 0.0];
        }
        if !t.rotation.iter().all(|v| v.is_finite()) {
            warnings.push(format!("Furniture {} has non-finite rotation, reset", item.id));
            t.rotation = [0.0, 0.0, 0.0];
        }
        if !t.scale.iter().all(|v| v.is_finite() && *v > 0.0) {
            warnings.push(format!("Furniture {} has invalid scale, reset", item.id));
            t.scale = [1.0, 1.0, 1.0];
        }
        if !item.footprint.is_valid() {
            warnings.push(format!("Furniture {} has invalid dimensions, reset", item.id));
            item.footprint = Footprint::default();
        }
        if !is_hex_color(&item.color) {
            warnings.push(format!("Furniture {} has invalid color '{}', reset", item.id, item.color));
            item.color = DEFAULT_COLOR.to_string();
        }
    }

    warnings
}

/// Fix a loaded moodboard in place. Returns one message per repair.
pub fn repair_moodboard(doc: &mut MoodboardDocument) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for el in &mut doc.elements {
        let min = el.content.min_size();
        let frame = &mut el.frame;
        fresh_id_if_taken(&mut frame.id, &mut seen, "Element", &mut warnings);
        frame.is_dragging = false;

        for (name, value) in [("x", &mut frame.x), ("y", &mut frame.y), ("rotation", &mut frame.rotation)] {
            if !value.is_finite() {
                warnings.push(format!("Element {} has non-finite {name}, reset", frame.id));
                *value = 0.0;
            }
        }
        for (name, value) in [("width", &mut frame.width), ("height", &mut frame.height)] {
            if !value.is_finite() || *value < min {
                warnings.push(format!("Element {} has invalid {name} {value}, raised to {min}", frame.id));
                *value = min;
            }
        }
        if let ElementContent::Text { font_size, .. } = &mut el.content {
            if !font_size.is_finite() || *font_size <= 0.0 {
                warnings.push(format!("Element {} has invalid font size, reset", frame.id));
                *font_size = 24.0;
            }
        }
    }

    warnings
}

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// Number of vertices (vertices buffer length / 9).
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() / MeshData::STRIDE
    }

    /// Number of triangles (indices buffer length / 3).
    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % MeshData::STRIDE == 0
    }

    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh.vertices.chunks_exact(MeshData::STRIDE).all(|v| {
            let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            (len - 1.0).abs() <= epsilon
        })
    }

    /// Extents (width, height, depth) of the vertex positions.
    pub fn dimensions(&self) -> [f32; 3] {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in self.mesh.vertices.chunks_exact(MeshData::STRIDE) {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }
        if self.vertex_count() == 0 {
            return [0.0; 3];
        }
        [max[0] - min[0], max[1] - min[1], max[2] - min[2]]
    }

    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        (0..3).all(|i| (dims[i] - expected[i]).abs() < tolerance)
    }

    /// Does any vertex carry this color
    pub fn has_color(&self, rgb: [f32; 3]) -> bool {
        self.mesh
            .vertices
            .chunks_exact(MeshData::STRIDE)
            .any(|v| (0..3).all(|i| (v[6 + i] - rgb[i]).abs() < 0.01))
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of 9",
                self.mesh.vertices.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        if self.mesh.vertices.iter().any(|v| !v.is_finite()) {
            errors.push("Vertex buffer contains non-finite values".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ElementFrame, MoodboardElement};

    #[test]
    fn test_hex_colors() {
        assert!(is_hex_color("#8B4513"));
        assert!(is_hex_color("#fff"));
        assert!(!is_hex_color("8B4513"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#GGGGGG"));

        assert_eq!(hex_to_rgb("#FF0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(hex_to_rgb("#fff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(hex_to_rgb("blue"), None);
    }

    #[test]
    fn test_repair_room_design() {
        let json = r##"{"room": {"width": 40, "length": 8, "height": 3}, "furniture": [
            {"id": "a", "type": "chair", "name": "A", "position": [0, 0, 0], "color": "#fff"},
            {"id": "a", "type": "chair", "name": "B", "position": [1, 0, 1], "scale": [0, 1, 1],
             "color": "oops", "dimensions": {"width": 0, "height": 1, "depth": 1}}
        ]}"##;
        let mut design: RoomDesign = serde_json::from_str(json).unwrap();
        let warnings = repair_room_design(&mut design);

        assert_eq!(design.room.width, 15.0);
        assert_ne!(design.furniture[1].id, "a");
        assert_eq!(design.furniture[1].transform.scale, [1.0, 1.0, 1.0]);
        assert_eq!(design.furniture[1].footprint, Footprint::default());
        assert_eq!(design.furniture[1].color, DEFAULT_COLOR);
        assert_eq!(warnings.len(), 5);
    }

    #[test]
    fn test_repair_moodboard() {
        let mut doc = MoodboardDocument::default();
        let mut frame = ElementFrame::new("1".into(), f64::NAN, 0.0, 2.0, 50.0, 1);
        frame.is_dragging = true;
        doc.elements.push(MoodboardElement {
            frame,
            content: ElementContent::ColorSwatch { fill: "#94A684".into() },
        });
        doc.elements.push(MoodboardElement {
            frame: ElementFrame::new("1".into(), 0.0, 0.0, 200.0, 30.0, 2),
            content: ElementContent::Text {
                text: "x".into(),
                font_size: -1.0,
                font_family: "Inter".into(),
                fill: "#333333".into(),
            },
        });

        let warnings = repair_moodboard(&mut doc);
        assert_eq!(warnings.len(), 4);
        assert_eq!(doc.elements[0].frame.x, 0.0);
        assert_eq!(doc.elements[0].frame.width, 10.0);
        assert!(!doc.elements[0].frame.is_dragging);
        assert_ne!(doc.elements[1].frame.id, "1");
    }

    fn simple_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
                0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_mesh_validator_ok() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.assert_dimensions_approx([1.0, 1.0, 0.0], 1e-6));
        assert!(v.has_color([0.5, 0.5, 0.5]));
    }

    #[test]
    fn test_mesh_validator_catches_bad_buffers() {
        let bad = MeshData {
            vertices: vec![0.0; 10],
            indices: vec![0, 1, 7, 3],
        };
        let errors = MeshValidator::new(&bad).validate_all();
        assert!(errors.iter().any(|e| e.contains("multiple of 9")));
        assert!(errors.iter().any(|e| e.contains("multiple of 3")));
        assert!(errors.iter().any(|e| e.contains("out of range")));
    }
}
