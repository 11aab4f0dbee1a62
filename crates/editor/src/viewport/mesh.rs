use glam::{Mat3, Mat4, Vec3};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub const STRIDE: usize = 9;

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append `other` transformed by `model` (normals use the inverse-transpose)
    pub fn append_transformed(&mut self, other: &MeshData, model: Mat4) {
        let base = self.vertex_count() as u32;
        let normal_matrix = Mat3::from_mat4(model).inverse().transpose();

        for v in other.vertices.chunks_exact(Self::STRIDE) {
            let p = model.transform_point3(Vec3::new(v[0], v[1], v[2]));
            let n = (normal_matrix * Vec3::new(v[3], v[4], v[5])).normalize_or_zero();
            self.vertices
                .extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, v[6], v[7], v[8]]);
        }
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Debug, Clone, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn push_segment(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        push_line_vert(&mut self.vertices, a.x, a.y, a.z, color);
        push_line_vert(&mut self.vertices, b.x, b.y, b.z, color);
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 14
    }
}

// ── Primitive generation ─────────────────────────────────────

/// Axis-aligned box centered at the origin, one flat-shaded quad per side
pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let half = Vec3::new(w, h, d) * 0.5;
    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24 * MeshData::STRIDE),
        indices: Vec::with_capacity(36),
    };

    for normal in [Vec3::Z, Vec3::NEG_Z, Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y] {
        // Two in-plane axes with u × v == normal keep the winding counter-clockwise
        let u = normal.any_orthonormal_vector();
        let v = normal.cross(u);
        let base = mesh.vertex_count() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (normal + u * su + v * sv) * half;
            push_vert(&mut mesh.vertices, p.x, p.y, p.z, normal, color);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// Frustum along Y centered at the origin; equal radii give a cylinder
pub fn frustum(radius_top: f32, radius_bottom: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let hh = height * 0.5;
    let segments = segments.max(3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    // Side faces
    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;

        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();

        let n0 = Vec3::new(c0, slope, s0).normalize();
        let n1 = Vec3::new(c1, slope, s1).normalize();

        let base = (vertices.len() / 9) as u32;

        push_vert(&mut vertices, radius_bottom * c0, -hh, radius_bottom * s0, n0, color);
        push_vert(&mut vertices, radius_bottom * c1, -hh, radius_bottom * s1, n1, color);
        push_vert(&mut vertices, radius_top * c1, hh, radius_top * s1, n1, color);
        push_vert(&mut vertices, radius_top * c0, hh, radius_top * s0, n0, color);

        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    if radius_top > 0.0 {
        disc(&mut vertices, &mut indices, radius_top, hh, segments, true, color);
    }
    if radius_bottom > 0.0 {
        disc(&mut vertices, &mut indices, radius_bottom, -hh, segments, false, color);
    }

    MeshData { vertices, indices }
}

pub fn cylinder(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    frustum(radius, radius, height, segments, color)
}

pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let (sp, cp) = phi.sin_cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let (st, ct) = theta.sin_cos();

            let n = Vec3::new(sp * ct, cp, sp * st);
            push_vert(&mut vertices, radius * n.x, radius * n.y, radius * n.z, n, color);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }

    MeshData { vertices, indices }
}

pub fn cone(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    frustum(0.0, radius, height, segments, color)
}

/// Flat annulus in the XZ plane facing +Y
pub fn ring(inner: f32, outer: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let segments = segments.max(3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..segments {
        let a = (i as f32) * std::f32::consts::TAU / segments as f32;
        let (s, c) = a.sin_cos();
        push_vert(&mut vertices, inner * c, 0.0, inner * s, Vec3::Y, color);
        push_vert(&mut vertices, outer * c, 0.0, outer * s, Vec3::Y, color);
    }
    for i in 0..segments {
        let next = (i + 1) % segments;
        let (i0, o0, i1, o1) = (2 * i, 2 * i + 1, 2 * next, 2 * next + 1);
        indices.extend_from_slice(&[i0, i1, o0, o0, i1, o1]);
    }

    MeshData { vertices, indices }
}

/// Rectangle in the XZ plane facing +Y
pub fn plane(w: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hd = d * 0.5;
    let mut vertices = Vec::with_capacity(4 * 9);
    push_vert(&mut vertices, -hw, 0.0, hd, Vec3::Y, color);
    push_vert(&mut vertices, hw, 0.0, hd, Vec3::Y, color);
    push_vert(&mut vertices, hw, 0.0, -hd, Vec3::Y, color);
    push_vert(&mut vertices, -hw, 0.0, -hd, Vec3::Y, color);
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[px, py, pz, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

/// Horizontal disc at height `y`, facing up or down
fn disc(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    up: bool,
    color: [f32; 3],
) {
    let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
    let center = (vertices.len() / MeshData::STRIDE) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);
    for i in 0..segments {
        let (s, c) = ((i as f32) * std::f32::consts::TAU / segments as f32).sin_cos();
        push_vert(vertices, radius * c, y, radius * s, normal, color);
    }

    for i in 0..segments {
        let (a, b) = (center + 1 + i, center + 1 + (i + 1) % segments);
        if up {
            indices.extend_from_slice(&[center, b, a]);
        } else {
            indices.extend_from_slice(&[center, a, b]);
        }
    }
}
