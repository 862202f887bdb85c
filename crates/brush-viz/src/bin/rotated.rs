use brush_csg::{Brush, Plane};
use brush_viz::{draw_axes, rotated_box, OrbitCamera, SplitExplorer};
use macroquad::prelude::*;
use nalgebra::{Point3, Rotation3, Unit, Vector3};

const NUM_BOXES: usize = 10;
const WORLD_SIZE: f64 = 256.0;
const MIN_BOX_SIZE: f64 = 24.0;
const MAX_BOX_SIZE: f64 = 64.0;
const NUM_PLANES: usize = 6;

/// Simple seeded random number generator (LCG).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 33) as f64) / (u32::MAX as f64 / 2.0)
    }

    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    fn direction(&mut self) -> Unit<Vector3<f64>> {
        let v = Vector3::new(
            self.next_f64() - 0.5,
            self.next_f64() - 0.5,
            self.next_f64() - 0.5,
        );
        if v.norm() > 0.01 {
            Unit::new_normalize(v)
        } else {
            Vector3::x_axis()
        }
    }
}

/// Generates random rotated boxes in the world space.
fn generate_random_rotated_boxes(rng: &mut Rng) -> Vec<Brush> {
    (0..NUM_BOXES)
        .map(|_| {
            let center = Point3::new(
                (rng.next_f64() - 0.5) * WORLD_SIZE,
                (rng.next_f64() - 0.5) * WORLD_SIZE,
                (rng.next_f64() - 0.5) * WORLD_SIZE,
            );
            let size = rng.range(MIN_BOX_SIZE, MAX_BOX_SIZE);
            let axis = rng.direction();
            let angle = rng.next_f64() * std::f64::consts::TAU;

            rotated_box(center, size, &Rotation3::from_axis_angle(&axis, angle))
        })
        .collect()
}

/// Random planes passing near the origin.
fn generate_cutting_planes(rng: &mut Rng) -> Vec<Plane> {
    (0..NUM_PLANES)
        .map(|_| {
            let normal = rng.direction().into_inner();
            let dist = (rng.next_f64() - 0.5) * WORLD_SIZE * 0.5;
            Plane::new(normal, dist)
        })
        .collect()
}

#[macroquad::main("Brush CSG Rotated Boxes")]
async fn main() {
    env_logger::init();

    let mut rng = Rng::new(42);
    let brushes = generate_random_rotated_boxes(&mut rng);
    let planes = generate_cutting_planes(&mut rng);

    let convex = brushes.iter().filter(|b| b.is_convex()).count();
    log::info!(
        "generated {} boxes ({} convex), {} cutting planes",
        brushes.len(),
        convex,
        planes.len()
    );

    let mut camera = OrbitCamera::new(400.0, 0.0, 0.3).with_zoom(20.0, 50.0, 1500.0);
    let mut explorer = SplitExplorer::new(brushes, planes);

    loop {
        camera.update();
        explorer.update();

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        explorer.render();
        draw_axes(48.0);

        set_default_camera();

        draw_text(
            &format!("Brush CSG Rotated Boxes - {} boxes", NUM_BOXES),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        explorer.draw_ui(50.0);

        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 115.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 135.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
