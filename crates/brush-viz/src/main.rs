use brush_csg::{Brush, Plane};
use brush_viz::{draw_axes, OrbitCamera, SplitExplorer};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

/// Cutting planes applied one per step to the player box.
fn cutting_planes() -> Vec<Plane> {
    vec![
        Plane::new(Vector3::x(), 0.0),
        Plane::new(Vector3::z(), 8.0),
        Plane::new(Vector3::new(1.0, 1.0, 0.0).normalize(), 4.0),
        Plane::new(Vector3::new(-0.3, 0.5, 0.8).normalize(), -6.0),
        Plane::new(Vector3::y(), -10.0),
    ]
}

#[macroquad::main("Brush CSG")]
async fn main() {
    env_logger::init();

    let brush = Brush::make_box(Point3::new(-16.0, -16.0, -24.0), Point3::new(16.0, 16.0, 32.0));
    log::info!(
        "player box: {} sides, volume {:.1}, hash {:016x}",
        brush.len(),
        brush.volume(),
        brush.hash()
    );

    let mut explorer = SplitExplorer::new(vec![brush], cutting_planes());
    let mut camera = OrbitCamera::new(140.0, 0.6, 0.5);

    loop {
        camera.update();
        explorer.update();

        clear_background(Color::from_rgba(20, 20, 30, 255));
        set_camera(&camera.to_camera3d());

        explorer.render();
        draw_axes(24.0);

        set_default_camera();

        draw_text("Brush CSG - player box", 10.0, 25.0, 20.0, WHITE);
        explorer.draw_ui(50.0);
        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 115.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 135.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
