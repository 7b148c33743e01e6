use std::time::Duration;

use bevy::prelude::*;


/// Tunables for an [`OrbitRig`].
///
/// Sensitivities are in radians (or scene units) per input pixel; the
/// auto-rotation rate is in radians per second.
#[derive(Clone, Debug, Reflect)]
pub struct OrbitSettings {
    pub drag_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub auto_rotate_rate: f32,
    /// per-frame convergence factor for distance smoothing, in (0, 1)
    pub smoothing: f32,
    pub min_phi: f32,
    pub max_phi: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub elevation_offset: f32,
    pub initial_phi: f32,
    pub initial_distance: f32,
    /// idle window after the last interaction before auto-rotation resumes
    pub resume_delay: Duration,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            zoom_sensitivity: 0.05,
            auto_rotate_rate: 0.03,
            smoothing: 0.08,
            min_phi: 0.1,
            max_phi: 1.4,
            min_distance: 20.0,
            max_distance: 120.0,
            elevation_offset: 4.0,
            initial_phi: 0.6,
            initial_distance: 60.0,
            resume_delay: Duration::from_millis(2000),
        }
    }
}


/// Spherical-coordinate camera rig orbiting the scene origin.
///
/// Attach to a `Camera3d` entity; the controller systems feed pointer, touch,
/// and wheel input into the rig and write the resulting transform back every
/// frame. The rig auto-rotates while no interaction is in flight and resumes
/// after a single-slot cooldown once the user lets go.
#[derive(Component, Clone, Debug, Reflect)]
#[reflect(Component)]
pub struct OrbitRig {
    pub settings: OrbitSettings,
    pub theta: f32,
    pub phi: f32,
    pub current_distance: f32,
    pub target_distance: f32,
    dragging: bool,
    user_interacting: bool,
    orbit_enabled: bool,
    last_pointer: Option<Vec2>,
    resume_timer: Timer,
    viewport: Vec2,
}

impl OrbitRig {
    pub fn new(settings: OrbitSettings) -> Self {
        let mut resume_timer = Timer::new(settings.resume_delay, TimerMode::Once);
        resume_timer.pause();

        Self {
            theta: 0.0,
            phi: settings.initial_phi,
            current_distance: settings.initial_distance,
            target_distance: settings.initial_distance,
            dragging: false,
            user_interacting: false,
            orbit_enabled: true,
            last_pointer: None,
            resume_timer,
            viewport: Vec2::ZERO,
            settings,
        }
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn user_interacting(&self) -> bool {
        self.user_interacting
    }

    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Gates pointer-driven orbiting; auto-rotation and rendering continue
    /// regardless. Disabling mid-drag ends the drag.
    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
        if !enabled && self.dragging {
            self.pointer_released();
        }
    }

    pub fn pointer_pressed(&mut self, position: Vec2) {
        if !self.orbit_enabled {
            return;
        }

        self.dragging = true;
        self.user_interacting = true;
        self.last_pointer = Some(position);

        // a new interaction supersedes any pending resume
        self.resume_timer.pause();
        self.resume_timer.reset();
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if !self.dragging {
            return;
        }

        let Some(last) = self.last_pointer else {
            self.last_pointer = Some(position);
            return;
        };

        let delta = position - last;
        self.theta -= delta.x * self.settings.drag_sensitivity;
        self.phi = (self.phi + delta.y * self.settings.drag_sensitivity)
            .clamp(self.settings.min_phi, self.settings.max_phi);
        self.last_pointer = Some(position);
    }

    pub fn pointer_released(&mut self) {
        self.dragging = false;
        self.last_pointer = None;

        if self.user_interacting {
            self.resume_timer.reset();
            self.resume_timer.unpause();
        }
    }

    /// Adjusts the zoom target by a raw wheel delta (pixels). The wheel
    /// system only forwards events while the designated modifier is held.
    pub fn zoom_by(&mut self, wheel_delta: f32) {
        if !self.orbit_enabled {
            return;
        }

        self.target_distance = (self.target_distance
            + wheel_delta * self.settings.zoom_sensitivity)
            .clamp(self.settings.min_distance, self.settings.max_distance);

        self.user_interacting = true;
        self.resume_timer.reset();
        self.resume_timer.unpause();
    }

    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size;
    }

    /// Per-frame step: idle auto-rotation, cooldown bookkeeping, distance
    /// smoothing. The cooldown only runs between release and expiry, never
    /// while a drag is in flight.
    pub fn advance(&mut self, dt: Duration) {
        if self.user_interacting {
            if !self.dragging {
                self.resume_timer.tick(dt);
                if self.resume_timer.finished() {
                    self.user_interacting = false;
                    self.resume_timer.pause();
                    self.resume_timer.reset();
                }
            }
        } else {
            self.theta += self.settings.auto_rotate_rate * dt.as_secs_f32();
        }

        self.current_distance +=
            (self.target_distance - self.current_distance) * self.settings.smoothing;
    }

    pub fn position(&self) -> Vec3 {
        let distance = self.current_distance;

        Vec3::new(
            distance * self.phi.cos() * self.theta.sin(),
            distance * self.phi.sin() + self.settings.elevation_offset,
            distance * self.phi.cos() * self.theta.cos(),
        )
    }

    pub fn look_transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> OrbitRig {
        OrbitRig::default()
    }

    #[test]
    fn drag_updates_theta_by_sensitivity() {
        let mut rig = rig();
        rig.phi = 0.4;

        rig.pointer_pressed(Vec2::ZERO);
        rig.pointer_moved(Vec2::new(100.0, 0.0));

        assert!((rig.theta - (-0.5)).abs() < 1e-6);
        assert!((rig.phi - 0.4).abs() < 1e-6);
    }

    #[test]
    fn phi_clamp_holds_for_large_deltas() {
        let mut rig = rig();

        rig.pointer_pressed(Vec2::ZERO);
        rig.pointer_moved(Vec2::new(0.0, 1e6));
        assert!((rig.phi - rig.settings.max_phi).abs() < 1e-6);

        rig.pointer_moved(Vec2::new(0.0, -1e6));
        assert!((rig.phi - rig.settings.min_phi).abs() < 1e-6);
    }

    #[test]
    fn wheel_zoom_adjusts_target_within_bounds() {
        let mut rig = rig();
        rig.target_distance = 60.0;

        rig.zoom_by(200.0);
        assert!((rig.target_distance - 70.0).abs() < 1e-6);

        rig.zoom_by(1e9);
        assert!((rig.target_distance - rig.settings.max_distance).abs() < 1e-6);

        rig.zoom_by(-1e9);
        assert!((rig.target_distance - rig.settings.min_distance).abs() < 1e-6);
    }

    #[test]
    fn distance_converges_monotonically_without_overshoot() {
        let mut rig = rig();
        rig.current_distance = 60.0;
        rig.target_distance = 100.0;

        let mut previous = rig.current_distance;
        for _ in 0..500 {
            rig.advance(Duration::from_millis(16));
            assert!(rig.current_distance >= previous);
            assert!(rig.current_distance <= rig.target_distance);
            previous = rig.current_distance;
        }

        assert!((rig.current_distance - rig.target_distance).abs() < 1e-3);
    }

    #[test]
    fn position_satisfies_spherical_conversion() {
        let mut rig = rig();
        rig.theta = 2.3;
        rig.phi = 0.7;
        rig.current_distance = 80.0;

        let position = rig.position();
        let planar = rig.current_distance * rig.phi.cos();

        assert!(((position.x.powi(2) + position.z.powi(2)).sqrt() - planar).abs() < 1e-2);
        assert!(
            (position.y
                - (rig.current_distance * rig.phi.sin() + rig.settings.elevation_offset))
                .abs()
                < 1e-4
        );
    }

    #[test]
    fn dragging_implies_interacting() {
        let mut rig = rig();

        rig.pointer_pressed(Vec2::ZERO);
        assert!(rig.dragging());
        assert!(rig.user_interacting());
    }

    #[test]
    fn cooldown_resumes_auto_rotation_after_idle_window() {
        let mut rig = rig();

        rig.pointer_pressed(Vec2::ZERO);
        rig.pointer_released();
        assert!(rig.user_interacting());

        // theta stays put while the cooldown is pending
        let theta = rig.theta;
        rig.advance(Duration::from_millis(1000));
        assert!(rig.user_interacting());
        assert_eq!(rig.theta, theta);

        rig.advance(Duration::from_millis(1500));
        assert!(!rig.user_interacting());

        rig.advance(Duration::from_millis(500));
        assert!(rig.theta > theta);
    }

    #[test]
    fn new_press_cancels_pending_cooldown() {
        let mut rig = rig();

        rig.pointer_pressed(Vec2::ZERO);
        rig.pointer_released();
        rig.advance(Duration::from_millis(1900));

        // press just before expiry, then release: the window restarts in full
        rig.pointer_pressed(Vec2::ZERO);
        rig.pointer_released();
        rig.advance(Duration::from_millis(1900));
        assert!(rig.user_interacting());

        rig.advance(Duration::from_millis(200));
        assert!(!rig.user_interacting());
    }

    #[test]
    fn cooldown_does_not_run_while_dragging() {
        let mut rig = rig();

        rig.pointer_pressed(Vec2::ZERO);
        rig.advance(Duration::from_secs(60));
        assert!(rig.user_interacting());

        rig.pointer_released();
        rig.advance(Duration::from_millis(2100));
        assert!(!rig.user_interacting());
    }

    #[test]
    fn disabled_orbit_ignores_pointer_input() {
        let mut rig = rig();
        let theta = rig.theta;
        let phi = rig.phi;

        rig.set_orbit_enabled(false);
        rig.pointer_pressed(Vec2::ZERO);
        rig.pointer_moved(Vec2::new(250.0, 250.0));

        assert!(!rig.dragging());
        assert_eq!(rig.theta, theta);
        assert_eq!(rig.phi, phi);
    }

    #[test]
    fn disabling_mid_drag_ends_the_drag() {
        let mut rig = rig();

        rig.pointer_pressed(Vec2::ZERO);
        rig.set_orbit_enabled(false);
        assert!(!rig.dragging());

        // re-enabling does not revive the old drag
        rig.set_orbit_enabled(true);
        rig.pointer_moved(Vec2::new(100.0, 0.0));
        assert_eq!(rig.theta, 0.0);
    }

    #[test]
    fn auto_rotation_advances_theta_while_idle() {
        let mut rig = rig();
        let theta = rig.theta;

        rig.advance(Duration::from_secs(1));
        assert!((rig.theta - theta - rig.settings.auto_rotate_rate).abs() < 1e-6);
    }

    #[test]
    fn zoom_marks_interacting_with_cooldown() {
        let mut rig = rig();

        rig.zoom_by(100.0);
        assert!(rig.user_interacting());

        rig.advance(Duration::from_millis(2100));
        assert!(!rig.user_interacting());
    }
}
