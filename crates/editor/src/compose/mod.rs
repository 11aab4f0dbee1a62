//! 3D scene composition
//!
//! A pure projection of the room design into renderable proxies: shell
//! planes, floor grid with measurement labels, lights, per-furniture solids
//! and the selection/drag markers. Nothing here mutates the design.

pub mod geometry;
pub mod tessellate;

use glam::{DMat4, DQuat, DVec3};
use shared::{FurnitureInstance, MaterialProps, ObjectId, RoomDesign, RoomShell};

use crate::state::settings::GridSettings;

pub use geometry::{build_parts, geometry_builder, Finish, GeometryBuilder, Solid, SolidPart};

pub const SELECTION_COLOR: &str = "#3B82F6";
pub const DRAG_COLOR: &str = "#10B981";
pub const OUTLINE_COLOR: &str = "#FF6B6B";

/// Flat rectangle of the room shell
#[derive(Debug, Clone, PartialEq)]
pub struct ShellPlane {
    pub name: &'static str,
    pub center: DVec3,
    /// Unit normal facing into the room
    pub normal: DVec3,
    /// Extent along the two in-plane axes returned by `axes`
    pub size: [f64; 2],
    pub color: &'static str,
    pub opacity: f64,
}

impl ShellPlane {
    /// In-plane axes matching `size`: horizontal first, then vertical for walls
    pub fn axes(&self) -> (DVec3, DVec3) {
        if self.normal.y.abs() > 0.5 {
            (DVec3::X, DVec3::Z)
        } else {
            (DVec3::Y.cross(self.normal), DVec3::Y)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLabel {
    pub position: DVec3,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub from: DVec3,
    pub to: DVec3,
    /// Every fifth line is a section line
    pub section: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloorGrid {
    pub size: f64,
    pub divisions: usize,
    pub step: f64,
    pub lines: Vec<GridLine>,
    pub labels: Vec<GridLabel>,
    /// Closed room outline slightly above the floor
    pub outline: Vec<DVec3>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient { intensity: f64 },
    Directional { position: DVec3, intensity: f64 },
}

/// One furniture instance ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureProxy {
    pub id: ObjectId,
    /// Local → world (translation, yaw, scale)
    pub model: DMat4,
    pub parts: Vec<SolidPart>,
    pub color: String,
    pub material: MaterialProps,
    pub selected: bool,
    pub dragging: bool,
}

/// Flat ring marker on the floor
#[derive(Debug, Clone, PartialEq)]
pub struct RingMarker {
    pub center: DVec3,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub color: &'static str,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedScene {
    pub shell: Vec<ShellPlane>,
    pub grid: Option<FloorGrid>,
    pub lights: Vec<Light>,
    pub furniture: Vec<FurnitureProxy>,
    pub selection_ring: Option<RingMarker>,
    /// Small sphere above a furniture item that is being dragged
    pub drag_indicator: Option<(DVec3, f64)>,
}

/// Inputs that are not part of the design itself
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeContext<'a> {
    pub selected: Option<&'a str>,
    pub dragging: Option<&'a str>,
}

pub fn compose_scene(design: &RoomDesign, ctx: ComposeContext<'_>, grid: &GridSettings) -> ComposedScene {
    let furniture: Vec<FurnitureProxy> = design
        .furniture
        .iter()
        .map(|f| furniture_proxy(f, ctx))
        .collect();

    let selection_ring = ctx
        .selected
        .and_then(|id| design.furniture.iter().find(|f| f.id == id))
        .map(selection_ring);

    let drag_indicator = ctx
        .dragging
        .and_then(|id| design.furniture.iter().find(|f| f.id == id))
        .map(|f| {
            let [x, y, z] = f.position();
            (DVec3::new(x, y + f.footprint.height + 0.5, z), 0.1)
        });

    ComposedScene {
        shell: shell_planes(&design.room),
        grid: grid.visible.then(|| floor_grid(&design.room, grid)),
        lights: vec![
            Light::Ambient { intensity: 0.4 },
            Light::Directional {
                position: DVec3::new(10.0, 10.0, 5.0),
                intensity: 0.8,
            },
        ],
        furniture,
        selection_ring,
        drag_indicator,
    }
}

pub fn shell_planes(room: &RoomShell) -> Vec<ShellPlane> {
    let (w, l, h) = (room.width, room.length, room.height);
    vec![
        ShellPlane {
            name: "floor",
            center: DVec3::ZERO,
            normal: DVec3::Y,
            size: [w, l],
            color: "#F5F5F5",
            opacity: 1.0,
        },
        ShellPlane {
            name: "back_wall",
            center: DVec3::new(0.0, h / 2.0, -l / 2.0),
            normal: DVec3::Z,
            size: [w, h],
            color: "#FFFFFF",
            opacity: 1.0,
        },
        ShellPlane {
            name: "left_wall",
            center: DVec3::new(-w / 2.0, h / 2.0, 0.0),
            normal: DVec3::X,
            size: [l, h],
            color: "#FFFFFF",
            opacity: 1.0,
        },
        ShellPlane {
            name: "right_wall",
            center: DVec3::new(w / 2.0, h / 2.0, 0.0),
            normal: DVec3::NEG_X,
            size: [l, h],
            color: "#FFFFFF",
            opacity: 1.0,
        },
        ShellPlane {
            name: "ceiling",
            center: DVec3::new(0.0, h, 0.0),
            normal: DVec3::NEG_Y,
            size: [w, l],
            color: "#FAFAFA",
            opacity: 0.1,
        },
    ]
}

/// Grid sized to 1.5× the longer room side, one division per meter of that side
pub fn floor_grid(room: &RoomShell, settings: &GridSettings) -> FloorGrid {
    let longest = room.width.max(room.length);
    let size = longest * 1.5;
    let divisions = (longest.ceil() as usize).max(1);
    let step = size / divisions as f64;
    let half = size / 2.0;

    let mut lines = Vec::with_capacity((divisions + 1) * 2);
    for i in 0..=divisions {
        let c = i as f64 * step - half;
        let section = i % 5 == 0;
        lines.push(GridLine {
            from: DVec3::new(c, 0.0, -half),
            to: DVec3::new(c, 0.0, half),
            section,
        });
        lines.push(GridLine {
            from: DVec3::new(-half, 0.0, c),
            to: DVec3::new(half, 0.0, c),
            section,
        });
    }

    let every = settings.label_every.max(1);
    let mut labels = Vec::new();
    for i in (0..=divisions).step_by(every) {
        let c = (i as f64 - divisions as f64 / 2.0) * step;
        if c.abs() < 1e-9 {
            continue;
        }
        let text = format!("{:.1}m", c.abs());
        labels.push(GridLabel {
            position: DVec3::new(c, 0.1, -half - 1.0),
            text: text.clone(),
        });
        labels.push(GridLabel {
            position: DVec3::new(-half - 1.0, 0.1, c),
            text,
        });
    }

    let outline = if settings.show_outline {
        let (hw, hl) = (room.width / 2.0, room.length / 2.0);
        vec![
            DVec3::new(-hw, 0.01, -hl),
            DVec3::new(hw, 0.01, -hl),
            DVec3::new(hw, 0.01, hl),
            DVec3::new(-hw, 0.01, hl),
            DVec3::new(-hw, 0.01, -hl),
        ]
    } else {
        Vec::new()
    };

    FloorGrid {
        size,
        divisions,
        step,
        lines,
        labels,
        outline,
    }
}

/// Local → world transform of an instance
pub fn model_matrix(instance: &FurnitureInstance) -> DMat4 {
    let t = &instance.transform;
    DMat4::from_scale_rotation_translation(
        DVec3::from_array(t.scale),
        DQuat::from_euler(glam::EulerRot::XYZ, t.rotation[0], t.rotation[1], t.rotation[2]),
        DVec3::from_array(t.position),
    )
}

pub fn furniture_proxy(instance: &FurnitureInstance, ctx: ComposeContext<'_>) -> FurnitureProxy {
    FurnitureProxy {
        id: instance.id.clone(),
        model: model_matrix(instance),
        parts: build_parts(&instance.kind, &instance.footprint),
        color: instance.color.clone(),
        material: instance.material_kind.props(),
        selected: ctx.selected == Some(instance.id.as_str()),
        dragging: ctx.dragging == Some(instance.id.as_str()),
    }
}

pub fn selection_ring(instance: &FurnitureInstance) -> RingMarker {
    let [x, _, z] = instance.position();
    let extent = instance.footprint.width.max(instance.footprint.depth);
    RingMarker {
        center: DVec3::new(x, 0.01, z),
        inner_radius: extent * 0.6,
        outer_radius: extent * 0.7,
        color: SELECTION_COLOR,
        opacity: 0.5,
    }
}
