//! Orbit/zoom/pan input for the room camera, gated by the drag signal.

use std::f64::consts::TAU;

use crate::state::settings::CameraSettings;

use super::camera::OrbitCamera;
use super::drag_signal::DragObserver;

/// Camera input handler.
///
/// Effective enablement is `preference && !furniture_dragging`. The drag flag
/// is written only through [`DragObserver`]; the preference only through
/// [`CameraControls::set_preference`].
pub struct CameraControls {
    pub camera: OrbitCamera,
    preference: bool,
    furniture_dragging: bool,
    rotate_speed: f64,
    zoom_speed: f64,
    pan_speed: f64,
    damping: f64,
    /// Pending angular velocity (azimuth, polar) drained by `update`
    momentum: (f64, f64),
}

impl CameraControls {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            camera: OrbitCamera::new(settings),
            preference: settings.enabled,
            furniture_dragging: false,
            rotate_speed: settings.rotate_speed,
            zoom_speed: settings.zoom_speed,
            pan_speed: settings.pan_speed,
            damping: settings.damping.clamp(0.0, 1.0),
            momentum: (0.0, 0.0),
        }
    }

    pub fn enabled(&self) -> bool {
        self.preference && !self.furniture_dragging
    }

    pub fn preference(&self) -> bool {
        self.preference
    }

    pub fn set_preference(&mut self, enabled: bool) {
        self.preference = enabled;
        self.refresh();
    }

    fn refresh(&mut self) {
        if !self.enabled() {
            self.momentum = (0.0, 0.0);
        }
    }

    /// Orbit by a pointer delta in pixels over a viewport of `viewport_height` pixels
    pub fn orbit_drag(&mut self, dx: f64, dy: f64, viewport_height: f64) -> bool {
        if !self.enabled() || viewport_height <= 0.0 {
            return false;
        }
        let d_azimuth = -TAU * dx / viewport_height * self.rotate_speed;
        let d_polar = -TAU * dy / viewport_height * self.rotate_speed;
        if self.damping > 0.0 {
            self.momentum.0 += d_azimuth;
            self.momentum.1 += d_polar;
        } else {
            self.camera.orbit(d_azimuth, d_polar);
        }
        true
    }

    /// Wheel zoom; positive `steps` zooms in
    pub fn zoom(&mut self, steps: f64) -> bool {
        if !self.enabled() {
            return false;
        }
        let scale = 0.95_f64.powf(self.zoom_speed);
        self.camera.dolly(scale.powf(steps));
        true
    }

    /// Pan by a pointer delta in pixels
    pub fn pan_drag(&mut self, dx: f64, dy: f64, viewport_height: f64) -> bool {
        if !self.enabled() || viewport_height <= 0.0 {
            return false;
        }
        // World units covered by the viewport height at the target distance
        let span = 2.0 * self.camera.distance * (self.camera.fov / 2.0).tan();
        let k = span / viewport_height * self.pan_speed;
        self.camera.pan(-dx * k, dy * k);
        true
    }

    /// Per-frame update: applies a damped share of pending orbit momentum
    pub fn update(&mut self) {
        if !self.enabled() {
            return;
        }
        let (a, p) = self.momentum;
        if a == 0.0 && p == 0.0 {
            return;
        }
        self.camera.orbit(a * self.damping, p * self.damping);
        self.momentum = (a * (1.0 - self.damping), p * (1.0 - self.damping));
        if self.momentum.0.abs() < 1e-6 && self.momentum.1.abs() < 1e-6 {
            self.momentum = (0.0, 0.0);
        }
    }

    pub fn has_momentum(&self) -> bool {
        self.momentum != (0.0, 0.0)
    }
}

impl DragObserver for CameraControls {
    fn drag_state_changed(&mut self, any_active: bool) {
        self.furniture_dragging = any_active;
        self.refresh();
    }
}

impl Default for CameraControls {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}
