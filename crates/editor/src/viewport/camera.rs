use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::state::settings::CameraSettings;

use super::picking::Ray;

/// Orbit camera around a target point.
///
/// Angles are spherical: `azimuth` around +Y measured from +Z, `polar` from
/// the vertical axis. Distance and polar angle stay inside the configured limits.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub azimuth: f64,
    pub polar: f64,
    pub distance: f64,
    pub target: DVec3,
    /// Vertical field of view (radians)
    pub fov: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar: f64,
    pub max_polar: f64,
}

impl OrbitCamera {
    /// Initial eye position of the room view
    pub const HOME_EYE: DVec3 = DVec3::new(12.0, 10.0, 12.0);

    pub fn new(settings: &CameraSettings) -> Self {
        let mut camera = Self {
            azimuth: 0.0,
            polar: 0.0,
            distance: 0.0,
            target: DVec3::ZERO,
            fov: settings.fov_degrees.to_radians(),
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            min_polar: settings.min_polar,
            max_polar: settings.max_polar,
        };
        camera.look_from(Self::HOME_EYE);
        camera
    }

    /// Place the eye at `eye`, keeping the current target (limits still apply)
    pub fn look_from(&mut self, eye: DVec3) {
        let offset = eye - self.target;
        let distance = offset.length();
        if !distance.is_finite() || distance < 1e-9 {
            return;
        }
        self.azimuth = offset.x.atan2(offset.z);
        self.polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        self.distance = distance;
        self.apply_limits();
    }

    fn apply_limits(&mut self) {
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.polar = self.polar.clamp(self.min_polar, self.max_polar);
    }

    /// Rotate by angle deltas (radians)
    pub fn orbit(&mut self, d_azimuth: f64, d_polar: f64) {
        if !(d_azimuth.is_finite() && d_polar.is_finite()) {
            return;
        }
        self.azimuth += d_azimuth;
        self.polar += d_polar;
        self.apply_limits();
    }

    /// Scale distance; factor < 1 moves closer
    pub fn dolly(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.distance *= factor;
        self.apply_limits();
    }

    /// Move the target in the view plane (world units)
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let right = self.right_vector();
        let up = self.up_vector();
        self.target += right * dx + up * dy;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> DVec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + DVec3::new(sp * sa, cp, sp * ca) * self.distance
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye_position(), self.target, DVec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov, aspect, 0.1, 1000.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f64) -> DMat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> DVec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(DVec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> DVec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        self.right_vector().cross(fwd).normalize_or_zero()
    }

    /// Screen position → normalized device coordinates in [-1, 1]
    pub fn screen_to_ndc(screen_pos: egui::Pos2, rect: egui::Rect) -> DVec2 {
        let half_w = f64::from(rect.width()) * 0.5;
        let half_h = f64::from(rect.height()) * 0.5;
        let center = rect.center();
        DVec2::new(
            f64::from(screen_pos.x - center.x) / half_w,
            -f64::from(screen_pos.y - center.y) / half_h,
        )
    }

    /// Project a 3D point to 2D screen coords
    pub fn project(&self, point: DVec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = f64::from(rect.width()) / f64::from(rect.height());
        let p = self.view_projection(aspect) * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let center = rect.center();
        let screen_x = f64::from(center.x) + ndc.x * f64::from(rect.width()) * 0.5;
        let screen_y = f64::from(center.y) - ndc.y * f64::from(rect.height()) * 0.5;
        Some(egui::pos2(screen_x as f32, screen_y as f32))
    }

    /// Cast a ray through normalized device coordinates
    pub fn ndc_ray(&self, ndc: DVec2, aspect: f64) -> Ray {
        let vp_inv = self.view_projection(aspect).inverse();

        let near_world = vp_inv * DVec4::new(ndc.x, ndc.y, -1.0, 1.0);
        let far_world = vp_inv * DVec4::new(ndc.x, ndc.y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }

    /// Cast a ray from a screen position into the 3D scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = f64::from(rect.width()) / f64::from(rect.height());
        self.ndc_ray(Self::screen_to_ndc(screen_pos, rect), aspect)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}
