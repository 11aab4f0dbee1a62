use glam::DVec3;
use shared::{FurnitureInstance, ObjectId};

/// A ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Intersect the ray with the horizontal plane `y = height`.
/// Returns None for rays parallel to the plane or pointing away from it.
pub fn ray_horizontal_plane(ray: &Ray, height: f64) -> Option<DVec3> {
    let dy = ray.direction.y;
    if !dy.is_finite() || dy.abs() < 1e-9 {
        return None;
    }
    let t = (height - ray.origin.y) / dy;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    let hit = ray.at(t);
    hit.is_finite().then_some(hit)
}

/// Intersect the ray with the floor (`y = 0`)
pub fn ray_ground(ray: &Ray) -> Option<DVec3> {
    ray_horizontal_plane(ray, 0.0)
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// World-space box around a furniture instance.
    ///
    /// The footprint is rotated by the instance yaw and the box is taken
    /// around the rotated rectangle, so it never under-covers the proxy.
    pub fn from_instance(instance: &FurnitureInstance) -> Self {
        let fp = instance.footprint;
        let scale = instance.transform.scale;
        let half_w = fp.width * scale[0].abs() / 2.0;
        let half_d = fp.depth * scale[2].abs() / 2.0;
        let height = fp.height * scale[1].abs();

        let (sin, cos) = instance.yaw().sin_cos();
        let ext_x = cos.abs() * half_w + sin.abs() * half_d;
        let ext_z = sin.abs() * half_w + cos.abs() * half_d;

        let [x, y, z] = instance.position();
        Self {
            min: DVec3::new(x - ext_x, y, z - ext_z),
            max: DVec3::new(x + ext_x, y + height, z + ext_z),
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f64> {
    let inv_dir = DVec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax.is_nan() || tmin.is_nan() || tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest furniture instance whose box is intersected by the ray.
pub fn pick_nearest(ray: &Ray, furniture: &[FurnitureInstance]) -> Option<ObjectId> {
    let mut best: Option<(&ObjectId, f64)> = None;

    for item in furniture {
        if let Some(dist) = ray_aabb(ray, &Aabb::from_instance(item)) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((&item.id, dist));
            }
        }
    }

    best.map(|(id, _)| id.clone())
}
