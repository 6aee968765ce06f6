//! Static warehouse and arena geometry.
//!
//! Both layouts are built once when the scene is created. Shelf
//! decoration is random, so a seeded [`StdRng`] makes it reproducible.

use forklift_geometry::{Axis, FrameBuilder, Part, Rgba, palette};
use nalgebra::Vector3;
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::WarehouseConfig;

const FLOOR_THICKNESS: f64 = 0.1;
const MARKING_WIDTH: f64 = 0.1;
const MARKING_THICKNESS: f64 = 0.01;
const MARKING_ELEVATION: f64 = 0.06;
const PERIMETER_SPACING: f64 = 2.0;
const LANE_SPACING: f64 = 4.0;
const LANE_DASH: f64 = 2.0;
const WINDOW_SIZE: f64 = 1.5;
const WINDOW_SPACING: f64 = 5.0;
const SHELF_POST_RADIUS: f64 = 0.1;
const SHELF_BOARD_THICKNESS: f64 = 0.05;
/// Boxes stay this far inside a shelf board's edges.
const SHELF_MARGIN: f64 = 0.3;

const BOX_COLORS: [Rgba; 5] = [
    palette::BROWN,
    palette::BLUE,
    palette::RED,
    palette::GREEN,
    palette::YELLOW,
];

/// Arena grid half-extent and spacing.
const GRID_HALF_EXTENT: i32 = 20;
const GRID_LINE_WIDTH: f64 = 0.02;
const GRID_THICKNESS: f64 = 0.005;

/// Builds the warehouse: floor, markings, walls, windows and shelves.
pub fn build_warehouse(config: &WarehouseConfig, rng: &mut StdRng) -> Part {
    let mut frames = FrameBuilder::new();
    floor(&mut frames, config);
    walls(&mut frames, config);
    for (x, y, yaw) in rack_placements(config) {
        frames.scoped(|f| {
            f.translate(x, y, 0.0).rotate_deg(Axis::Z, yaw);
            shelf(f, config, rng);
        });
    }
    frames.finish()
}

/// Builds the arena floor grid one unit apart, just under the wheels.
pub fn build_arena_grid(floor_z: f64) -> Part {
    let span = f64::from(GRID_HALF_EXTENT) * 2.0;
    let mut frames = FrameBuilder::new();
    for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
        let offset = f64::from(i);
        frames.scoped(|f| {
            f.translate(offset, 0.0, floor_z).emit_box(
                Vector3::new(GRID_LINE_WIDTH, span, GRID_THICKNESS),
                palette::GRID,
            );
        });
        frames.scoped(|f| {
            f.translate(0.0, offset, floor_z).emit_box(
                Vector3::new(span, GRID_LINE_WIDTH, GRID_THICKNESS),
                palette::GRID,
            );
        });
    }
    frames.finish()
}

/// Positions `first, first + step, ...` strictly below `end`.
fn stepped(first: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(first), move |v| Some(v + step)).take_while(move |v| *v < end)
}

fn floor(frames: &mut FrameBuilder, config: &WarehouseConfig) {
    let half_w = config.width / 2.0;
    let half_l = config.length / 2.0;
    let mark = |f: &mut FrameBuilder, x: f64, y: f64, size: Vector3<f64>| {
        f.scoped(|m| {
            m.translate(x, y, MARKING_ELEVATION)
                .emit_box(size, palette::YELLOW);
        });
    };

    frames.emit_box(
        Vector3::new(config.width, config.length, FLOOR_THICKNESS),
        palette::CONCRETE,
    );

    // Dashed perimeter one unit in from the walls.
    let dash_y = Vector3::new(MARKING_WIDTH, 1.0, MARKING_THICKNESS);
    let dash_x = Vector3::new(1.0, MARKING_WIDTH, MARKING_THICKNESS);
    for x in [-half_w + 1.0, half_w - 1.0] {
        for y in stepped(-half_l.trunc() + 1.0, half_l.trunc(), PERIMETER_SPACING) {
            mark(frames, x, y, dash_y);
        }
    }
    for y in [-half_l + 1.0, half_l - 1.0] {
        for x in stepped(-half_w.trunc() + 1.0, half_w.trunc(), PERIMETER_SPACING) {
            mark(frames, x, y, dash_x);
        }
    }

    // Three lanes along Y at the quarter lines and the centerline.
    let lane = Vector3::new(MARKING_WIDTH, LANE_DASH, MARKING_THICKNESS);
    let quarter = config.width / 4.0;
    for x in [-quarter, 0.0, quarter] {
        for y in stepped(-half_l + 3.0, half_l - 3.0, LANE_SPACING) {
            mark(frames, x, y, lane);
        }
    }
}

fn walls(frames: &mut FrameBuilder, config: &WarehouseConfig) {
    let half_w = config.width / 2.0;
    let half_l = config.length / 2.0;
    let h = config.height;
    let t = config.wall_thickness;

    let slabs = [
        (0.0, half_l, Vector3::new(config.width, t, h)),
        (0.0, -half_l, Vector3::new(config.width, t, h)),
        (-half_w, 0.0, Vector3::new(t, config.length, h)),
        (half_w, 0.0, Vector3::new(t, config.length, h)),
    ];
    for (x, y, size) in slabs {
        frames.scoped(|f| {
            f.translate(x, y, h / 2.0).emit_box(size, palette::GRAY);
        });
    }

    // Windows along the inside of the north wall.
    for x in stepped(-half_w.trunc() + WINDOW_SPACING, half_w.trunc(), WINDOW_SPACING) {
        frames.scoped(|f| {
            f.translate(x, half_l - 0.1, h / 2.0 + 1.0).emit_box(
                Vector3::new(WINDOW_SIZE, 0.1, WINDOW_SIZE),
                palette::WINDOW,
            );
        });
    }
}

/// Rack positions and yaw: east, west, north, south walls, then one free-standing.
fn rack_placements(config: &WarehouseConfig) -> [(f64, f64, f64); 5] {
    let from_x = config.width / 2.0 - config.shelf_depth / 2.0 - 1.0;
    let from_y = config.length / 2.0 - config.shelf_depth / 2.0 - 1.0;
    [
        (from_x, 0.0, 90.0),
        (-from_x, 0.0, 90.0),
        (0.0, from_y, 0.0),
        (0.0, -from_y, 0.0),
        (config.width / 4.0, config.length / 4.0, 0.0),
    ]
}

fn shelf(frames: &mut FrameBuilder, config: &WarehouseConfig, rng: &mut StdRng) {
    let w = config.shelf_width;
    let d = config.shelf_depth;
    let level_height = config.shelf_height / f64::from(config.shelf_levels);

    for x in [-w / 2.0, w / 2.0] {
        for y in [-d / 2.0, d / 2.0] {
            frames.scoped(|f| {
                f.translate(x, y, 0.0).emit_cylinder(
                    SHELF_POST_RADIUS,
                    config.shelf_height,
                    8,
                    palette::METAL,
                );
            });
        }
    }

    for level in 0..config.shelf_levels {
        let z = f64::from(level) * level_height;
        frames.scoped(|f| {
            f.translate(0.0, 0.0, z).emit_box(
                Vector3::new(w + 0.1, d + 0.1, SHELF_BOARD_THICKNESS),
                palette::WOOD_DARK,
            );
        });

        if level == 0 || !rng.gen_bool(config.fill_probability) {
            continue;
        }
        let count = rng.gen_range(1..=3);
        for _ in 0..count {
            let x = spread(rng, w / 2.0 - SHELF_MARGIN);
            let y = spread(rng, d / 2.0 - SHELF_MARGIN);
            let size = Vector3::new(
                rng.gen_range(0.3..=0.8),
                rng.gen_range(0.3..=0.8),
                rng.gen_range(0.2..=0.5),
            );
            let color = BOX_COLORS[rng.gen_range(0..BOX_COLORS.len())];
            frames.scoped(|f| {
                f.translate(x, y, z + size.z / 2.0 + SHELF_BOARD_THICKNESS)
                    .emit_box(size, color);
            });
        }
    }
}

/// Uniform in `[-half, half]`, or 0 when the board is too small for a margin.
fn spread(rng: &mut StdRng, half: f64) -> f64 {
    if half > 0.0 {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}
