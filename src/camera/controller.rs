use bevy::{
    input::mouse::{
        MouseScrollUnit,
        MouseWheel,
    },
    prelude::*,
    window::{
        CursorLeft,
        CursorMoved,
        PrimaryWindow,
        SystemCursorIcon,
        WindowResized,
    },
    winit::cursor::CursorIcon,
};

use crate::camera::rig::OrbitRig;


/// Process-wide orbit gate, written by the host's section-tracking logic to
/// suspend pointer interaction outside designated sections.
#[derive(Resource, Clone, Copy, Debug, Reflect)]
#[reflect(Resource)]
pub struct OrbitInputEnabled(pub bool);

impl Default for OrbitInputEnabled {
    fn default() -> Self {
        Self(true)
    }
}

impl OrbitInputEnabled {
    pub fn set(&mut self, enabled: bool) {
        self.0 = enabled;
    }
}


/// one wheel line is treated as this many pixels of scroll
const LINE_SCROLL_PIXELS: f32 = 40.0;


pub fn sync_orbit_enabled(
    mut commands: Commands,
    enabled: Res<OrbitInputEnabled>,
    mut rigs: Query<&mut OrbitRig>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    if !enabled.is_changed() {
        return;
    }

    for mut rig in &mut rigs {
        rig.set_orbit_enabled(enabled.0);
    }

    let icon = if enabled.0 {
        SystemCursorIcon::Grab
    } else {
        SystemCursorIcon::Default
    };

    if let Ok(window) = windows.single() {
        commands.entity(window).insert(CursorIcon::from(icon));
    }
}

pub fn orbit_pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut rigs: Query<(&mut OrbitRig, &mut Transform)>,
) {
    let moves: Vec<Vec2> = cursor_moved.read().map(|event| event.position).collect();
    let left_surface = !cursor_left.is_empty();
    cursor_left.clear();

    let cursor = windows
        .single()
        .ok()
        .and_then(Window::cursor_position);

    for (mut rig, mut transform) in &mut rigs {
        if buttons.just_pressed(MouseButton::Left) {
            if let Some(origin) = moves.first().copied().or(cursor) {
                rig.pointer_pressed(origin);
            }
        }

        for position in &moves {
            rig.pointer_moved(*position);
        }

        if buttons.just_released(MouseButton::Left) || left_surface {
            rig.pointer_released();
        }

        // reposition in the same frame as the drag, not on the next tick
        if rig.dragging() {
            *transform = rig.look_transform();
        }
    }
}

/// First-finger touch maps onto the pointer operations; extra fingers are
/// ignored.
pub fn orbit_touch_input(
    touches: Res<Touches>,
    mut rigs: Query<(&mut OrbitRig, &mut Transform)>,
) {
    let pressed = touches.iter_just_pressed().next().map(|touch| touch.position());
    let moved = touches.iter().next().map(|touch| touch.position());
    let released = touches.iter_just_released().next().is_some()
        || touches.iter_just_canceled().next().is_some();
    let all_lifted = touches.iter().next().is_none();

    for (mut rig, mut transform) in &mut rigs {
        if let Some(position) = pressed {
            rig.pointer_pressed(position);
        }

        if let Some(position) = moved {
            rig.pointer_moved(position);
        }

        if released && all_lifted {
            rig.pointer_released();
        }

        if rig.dragging() {
            *transform = rig.look_transform();
        }
    }
}

/// Wheel zoom is gated on a held Control so plain scrolling stays with the
/// host page.
pub fn orbit_wheel_zoom(
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: EventReader<MouseWheel>,
    mut rigs: Query<&mut OrbitRig>,
) {
    if !keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
        wheel.clear();
        return;
    }

    let mut delta = 0.0;
    for event in wheel.read() {
        delta += match event.unit {
            MouseScrollUnit::Line => -event.y * LINE_SCROLL_PIXELS,
            MouseScrollUnit::Pixel => -event.y,
        };
    }

    if delta.abs() <= f32::EPSILON {
        return;
    }

    for mut rig in &mut rigs {
        rig.zoom_by(delta);
    }
}

/// bevy keeps the projection aspect in sync on its own; the rig only records
/// the viewport for density heuristics.
pub fn handle_viewport_resize(
    mut resized: EventReader<WindowResized>,
    mut rigs: Query<&mut OrbitRig>,
) {
    let Some(event) = resized.read().last() else {
        return;
    };

    let size = Vec2::new(event.width, event.height);
    for mut rig in &mut rigs {
        rig.set_viewport(size);
    }
}

pub fn orbit_update(
    time: Res<Time>,
    mut rigs: Query<(&mut OrbitRig, &mut Transform)>,
) {
    for (mut rig, mut transform) in &mut rigs {
        rig.advance(time.delta());
        *transform = rig.look_transform();
    }
}
