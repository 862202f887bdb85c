//! Shared visualization utilities for the brush viewers.

use brush_csg::{Brush, Plane, Winding};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use nalgebra::{Point3, Rotation3, Vector3};

pub mod explorer;
pub use explorer::SplitExplorer;

/// Generates a deterministic color from a brush's plane hash.
/// Fragments get new colors, identical brushes share one.
pub fn brush_color(brush: &Brush) -> Color {
    let hash = brush.hash();

    // Extract RGB from hash bytes
    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    // Ensure colors aren't too dark by adding a minimum brightness
    Color::from_rgba(r.max(40), g.max(40), b.max(40), 255)
}

fn to_vec3(p: &Point3<f64>) -> Vec3 {
    vec3(p.x as f32, p.y as f32, p.z as f32)
}

/// Draws a single winding by triangulating it (fan triangulation) using a Mesh.
pub fn draw_winding(winding: &Winding, color: Color) {
    let points = winding.points();
    if points.len() < 3 {
        return;
    }

    let mesh_vertices: Vec<Vertex> = points
        .iter()
        .map(|p| Vertex::new2(to_vec3(p), vec2(0.0, 0.0), color))
        .collect();

    // Fan triangulation: vertex 0 connects to all edges
    let mut indices: Vec<u16> = Vec::with_capacity((points.len() - 2) * 3);
    for i in 1..points.len() - 1 {
        indices.push(0);
        indices.push(i as u16);
        indices.push((i + 1) as u16);
    }

    let mesh = Mesh {
        vertices: mesh_vertices,
        indices,
        texture: None,
    };

    draw_mesh(&mesh);
}

/// Draws the outline of a winding.
pub fn draw_winding_edges(winding: &Winding, color: Color) {
    let points = winding.points();
    for (i, p) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        draw_line_3d(to_vec3(p), to_vec3(next), color);
    }
}

/// Draws every face of a brush. Closing faces left by splits are darker.
pub fn draw_brush(brush: &Brush) {
    let color = brush_color(brush);
    let hidden = Color::new(color.r * 0.45, color.g * 0.45, color.b * 0.45, 1.0);

    for side in brush.sides() {
        let fill = if side.is_visible() { color } else { hidden };
        draw_winding(side.winding(), fill);
        draw_winding_edges(side.winding(), BLACK);

        // Mark where splits closed the fragment.
        if !side.is_visible() {
            if let Some(center) = side.winding().center() {
                draw_sphere(to_vec3(&center), 0.75, None, YELLOW);
            }
        }
    }
}

/// Builds a cube brush of the given size, rotated about its center.
pub fn rotated_box(center: Point3<f64>, size: f64, rotation: &Rotation3<f64>) -> Brush {
    let half = size / 2.0;
    let axes = [Vector3::x(), Vector3::y(), Vector3::z()];

    let planes = axes.iter().flat_map(|axis| {
        let normal = rotation * axis;
        let offset = normal.dot(&center.coords);
        [
            Plane::new(normal, offset + half),
            Plane::new(-normal, -offset + half),
        ]
    });

    Brush::from_planes(planes)
}

/// Simple orbit camera for 3D scene navigation. Z is up, as in map space.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 10.0,
            min_distance: 20.0,
            max_distance: 1000.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 0.0, 1.0),
            target: self.target,
            ..Default::default()
        }
    }
}

/// Draws the world axes at the origin.
pub fn draw_axes(length: f32) {
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(length, 0.0, 0.0), RED);
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, length, 0.0), GREEN);
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, length), BLUE);
}
