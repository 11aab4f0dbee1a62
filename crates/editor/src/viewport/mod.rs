//! Room viewport: pointer routing between furniture drags and the camera

pub mod camera;
pub mod camera_controls;
pub mod drag_signal;
pub mod furniture_controller;
pub mod mesh;
pub mod picking;

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use egui::{PointerButton, Pos2, Rect};
use shared::ObjectId;

use crate::compose::{compose_scene, ComposeContext, ComposedScene};
use crate::state::room::RoomSession;
use crate::state::settings::{EditorSettings, GridSettings, InteractionSettings};
use camera::OrbitCamera;
use camera_controls::CameraControls;
use drag_signal::{DragObserver, DragSignal, SharedDragSignal};
use furniture_controller::{FurnitureController, PointerSample};
use picking::pick_nearest;

/// Background (non-furniture) pointer gesture
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    None,
    Orbit { last: Pos2 },
    Pan { last: Pos2 },
}

/// Headless room view.
///
/// Owns the drag signal, the camera controls subscribed to it and one
/// controller per furniture instance that has been touched.
pub struct RoomViewport {
    signal: SharedDragSignal,
    controls: Rc<RefCell<CameraControls>>,
    controllers: HashMap<ObjectId, FurnitureController>,
    interaction: InteractionSettings,
    rect: Rect,
    gesture: Gesture,
}

impl RoomViewport {
    pub fn new(settings: &EditorSettings, rect: Rect) -> Self {
        let signal = DragSignal::shared();
        let controls = Rc::new(RefCell::new(CameraControls::new(&settings.camera)));
        let observer: Rc<RefCell<dyn DragObserver>> = controls.clone();
        signal.borrow_mut().subscribe(&observer);
        Self {
            signal,
            controls,
            controllers: HashMap::new(),
            interaction: settings.interaction.clone(),
            rect,
            gesture: Gesture::None,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn signal(&self) -> &SharedDragSignal {
        &self.signal
    }

    pub fn controls(&self) -> Ref<'_, CameraControls> {
        self.controls.borrow()
    }

    pub fn controls_mut(&self) -> RefMut<'_, CameraControls> {
        self.controls.borrow_mut()
    }

    pub fn camera(&self) -> OrbitCamera {
        self.controls.borrow().camera.clone()
    }

    pub fn camera_enabled(&self) -> bool {
        self.controls.borrow().enabled()
    }

    pub fn controller(&self, id: &str) -> Option<&FurnitureController> {
        self.controllers.get(id)
    }

    /// Id of the instance currently in a translate or rotate drag
    pub fn dragging(&self) -> Option<&ObjectId> {
        self.controllers.values().find(|c| !c.is_idle()).map(|c| c.id())
    }

    fn sample(&self, pos: Pos2, shift: bool) -> PointerSample {
        let controls = self.controls.borrow();
        PointerSample {
            ray: controls.camera.screen_ray(pos, self.rect),
            ndc: OrbitCamera::screen_to_ndc(pos, self.rect),
            shift,
        }
    }

    fn controller_mut(&mut self, id: &str) -> &mut FurnitureController {
        let signal = &self.signal;
        let interaction = &self.interaction;
        self.controllers
            .entry(id.to_string())
            .or_insert_with(|| FurnitureController::new(id.to_string(), signal.clone(), interaction))
    }

    /// Finish whatever drag `id` had in progress (selection moved away)
    fn release_controller(&mut self, session: &mut RoomSession, id: &str) {
        if let Some(ctrl) = self.controllers.get_mut(id) {
            ctrl.pointer_up(session);
        }
    }

    /// Drop controllers whose instance no longer exists
    pub fn sync(&mut self, session: &RoomSession) {
        let signal = &self.signal;
        self.controllers.retain(|id, ctrl| {
            let keep = session.get(id).is_some();
            if !keep && !ctrl.is_idle() {
                signal.borrow_mut().drag_ended(id);
            }
            keep
        });
    }

    /// Select `id` outside of a pointer press. A drag still held by the
    /// previous selection ends first.
    pub fn select(&mut self, session: &mut RoomSession, id: &str) -> bool {
        if session.get(id).is_none() {
            return false;
        }
        if let Some(prev) = session.selected().cloned().filter(|p| p != id) {
            self.release_controller(session, &prev);
        }
        session.select(id);
        true
    }

    /// Clear the selection, ending the selected instance's drag if any
    pub fn clear_selection(&mut self, session: &mut RoomSession) -> Option<ObjectId> {
        if let Some(prev) = session.selected().cloned() {
            self.release_controller(session, &prev);
        }
        session.clear_selection()
    }

    /// Pointer press. A hit on furniture selects it and starts its drag; a
    /// miss clears the selection and starts a camera gesture.
    pub fn pointer_down(
        &mut self,
        session: &mut RoomSession,
        pos: Pos2,
        button: PointerButton,
        shift: bool,
    ) -> Option<ObjectId> {
        self.sync(session);

        if button != PointerButton::Primary {
            self.gesture = Gesture::Pan { last: pos };
            return None;
        }

        let sample = self.sample(pos, shift);
        let previous = session.selected().cloned();

        match pick_nearest(&sample.ray, session.furniture()) {
            Some(id) => {
                if let Some(prev) = previous.filter(|p| *p != id) {
                    self.release_controller(session, &prev);
                }
                self.gesture = Gesture::None;
                self.controller_mut(&id).pointer_down(session, &sample);
                Some(id)
            }
            None => {
                if let Some(prev) = previous {
                    self.release_controller(session, &prev);
                }
                session.clear_selection();
                self.gesture = Gesture::Orbit { last: pos };
                None
            }
        }
    }

    /// Pointer move. Returns true when the design or the camera changed.
    pub fn pointer_move(&mut self, session: &mut RoomSession, pos: Pos2, shift: bool) -> bool {
        let sample = self.sample(pos, shift);
        let mut changed = false;
        let mut routed = false;
        for ctrl in self.controllers.values_mut().filter(|c| !c.is_idle()) {
            routed = true;
            changed |= ctrl.pointer_move(session, &sample);
        }
        if routed {
            return changed;
        }

        let height = f64::from(self.rect.height());
        match self.gesture {
            Gesture::None => false,
            Gesture::Orbit { last } => {
                self.gesture = Gesture::Orbit { last: pos };
                let d = pos - last;
                self.controls
                    .borrow_mut()
                    .orbit_drag(f64::from(d.x), f64::from(d.y), height)
            }
            Gesture::Pan { last } => {
                self.gesture = Gesture::Pan { last: pos };
                let d = pos - last;
                self.controls
                    .borrow_mut()
                    .pan_drag(f64::from(d.x), f64::from(d.y), height)
            }
        }
    }

    /// Pointer release over the viewport
    pub fn pointer_up(&mut self, session: &mut RoomSession) -> bool {
        let mut ended = false;
        for ctrl in self.controllers.values_mut() {
            ended |= ctrl.pointer_up(session);
        }
        self.gesture = Gesture::None;
        self.global_pointer_up(session);
        ended
    }

    /// Document-level pointer-up fallback: ends every drag that is still
    /// marked, even when the viewport never saw the release. Returns the ids
    /// that had to be recovered.
    pub fn global_pointer_up(&mut self, session: &mut RoomSession) -> Vec<ObjectId> {
        let stuck = self.signal.borrow_mut().release_all();
        for ctrl in self.controllers.values_mut().filter(|c| !c.is_idle()) {
            ctrl.pointer_up(session);
        }
        self.gesture = Gesture::None;
        stuck
    }

    /// Wheel zoom
    pub fn scroll(&mut self, steps: f64) -> bool {
        self.controls.borrow_mut().zoom(steps)
    }

    /// Per-frame camera update
    pub fn update(&mut self) {
        self.controls.borrow_mut().update();
    }

    pub fn compose(&self, session: &RoomSession, grid: &GridSettings) -> ComposedScene {
        let ctx = ComposeContext {
            selected: session.selected().map(String::as_str),
            dragging: self.dragging().map(String::as_str),
        };
        compose_scene(&session.design, ctx, grid)
    }
}
