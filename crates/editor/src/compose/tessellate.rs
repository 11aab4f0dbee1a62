//! Composed scene → interleaved vertex buffers for a host renderer

use glam::{DMat4, Mat4};

use crate::validation::hex_to_rgb;
use crate::viewport::mesh::{self, LineMeshData, MeshData};

use super::{ComposedScene, Finish, ShellPlane, Solid, SolidPart, DRAG_COLOR, OUTLINE_COLOR};

const SEGMENTS: u32 = 24;
const FALLBACK_RGB: [f32; 3] = [0.55, 0.27, 0.07];

/// GPU-ready buffers, split by blending
#[derive(Debug, Clone, Default)]
pub struct SceneMeshes {
    pub opaque: MeshData,
    /// Ceiling, glass and markers
    pub transparent: MeshData,
    pub lines: LineMeshData,
}

fn rgb(hex: &str) -> [f32; 3] {
    hex_to_rgb(hex).unwrap_or(FALLBACK_RGB)
}

pub fn solid_mesh(solid: &Solid, color: [f32; 3]) -> MeshData {
    match *solid {
        Solid::Box { width, height, depth } => mesh::cube(width as f32, height as f32, depth as f32, color),
        Solid::Cylinder {
            radius_top,
            radius_bottom,
            height,
        } => mesh::frustum(radius_top as f32, radius_bottom as f32, height as f32, SEGMENTS, color),
        Solid::Cone { radius, height } => mesh::cone(radius as f32, height as f32, SEGMENTS, color),
        Solid::Sphere { radius } => mesh::sphere(radius as f32, SEGMENTS / 2, SEGMENTS, color),
    }
}

fn part_mesh(part: &SolidPart, body_rgb: [f32; 3]) -> MeshData {
    let color = match part.finish {
        Finish::Body => body_rgb,
        Finish::Accent(hex) => rgb(hex),
    };
    solid_mesh(&part.solid, color)
}

fn shell_mesh(plane: &ShellPlane) -> MeshData {
    let (u, v) = plane.axes();
    let (hu, hv) = (u * plane.size[0] / 2.0, v * plane.size[1] / 2.0);
    let n = plane.normal.as_vec3();
    let color = rgb(plane.color);
    let corners = [
        plane.center - hu - hv,
        plane.center + hu - hv,
        plane.center + hu + hv,
        plane.center - hu + hv,
    ];
    let mut vertices = Vec::with_capacity(4 * MeshData::STRIDE);
    for c in corners {
        let c = c.as_vec3();
        vertices.extend_from_slice(&[c.x, c.y, c.z, n.x, n.y, n.z, color[0], color[1], color[2]]);
    }
    // Face the triangles toward the normal
    let indices = if (u.cross(v)).dot(plane.normal) >= 0.0 {
        vec![0, 1, 2, 0, 2, 3]
    } else {
        vec![0, 2, 1, 0, 3, 2]
    };
    MeshData { vertices, indices }
}

fn to_f32(m: DMat4) -> Mat4 {
    m.as_mat4()
}

pub fn tessellate(scene: &ComposedScene) -> SceneMeshes {
    let mut out = SceneMeshes::default();

    for plane in &scene.shell {
        let target = if plane.opacity < 1.0 {
            &mut out.transparent
        } else {
            &mut out.opaque
        };
        target.append_transformed(&shell_mesh(plane), Mat4::IDENTITY);
    }

    for proxy in &scene.furniture {
        let body = rgb(&proxy.color);
        let target = if proxy.material.transparent {
            &mut out.transparent
        } else {
            &mut out.opaque
        };
        for part in &proxy.parts {
            let model = proxy.model * DMat4::from_translation(part.offset);
            target.append_transformed(&part_mesh(part, body), to_f32(model));
        }
    }

    if let Some(ring) = &scene.selection_ring {
        let m = mesh::ring(
            ring.inner_radius as f32,
            ring.outer_radius as f32,
            SEGMENTS * 2,
            rgb(ring.color),
        );
        out.transparent
            .append_transformed(&m, Mat4::from_translation(ring.center.as_vec3()));
    }

    if let Some((center, radius)) = scene.drag_indicator {
        let m = mesh::sphere(radius as f32, 8, 16, rgb(DRAG_COLOR));
        out.transparent
            .append_transformed(&m, Mat4::from_translation(center.as_vec3()));
    }

    if let Some(grid) = &scene.grid {
        let cell = [0.878, 0.878, 0.878, 1.0];
        let section = [0.6, 0.6, 0.6, 1.0];
        for line in &grid.lines {
            let color = if line.section { section } else { cell };
            out.lines
                .push_segment(line.from.as_vec3(), line.to.as_vec3(), color);
        }
        let [r, g, b] = rgb(OUTLINE_COLOR);
        for pair in grid.outline.windows(2) {
            out.lines
                .push_segment(pair[0].as_vec3(), pair[1].as_vec3(), [r, g, b, 1.0]);
        }
    }

    out
}

/// Vertical extent of a composed furniture proxy in world space
pub fn proxy_height(parts: &[SolidPart], model: DMat4) -> f32 {
    let mut mesh = MeshData::default();
    for part in parts {
        let m = model * DMat4::from_translation(part.offset);
        mesh.append_transformed(&part_mesh(part, FALLBACK_RGB), to_f32(m));
    }
    let ys = mesh.vertices.chunks_exact(MeshData::STRIDE).map(|v| v[1]);
    let (lo, hi) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if lo > hi {
        0.0
    } else {
        hi - lo
    }
}
