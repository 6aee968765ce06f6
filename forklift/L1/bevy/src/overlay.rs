//! Status text and load-cell chart as Bevy UI nodes.
//!
//! Text lines and chart points are pooled like the 3D primitives. Points
//! are drawn as small dots, one per history sample.

use bevy::prelude::*;
use forklift_core::Overlay;

use crate::render::DrawQueue;

const FONT_SIZE: f32 = 16.0;
const DOT_SIZE: f32 = 2.0;
const PANEL_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
const PLOT_COLOR: Color = Color::srgb(0.2, 1.0, 0.2);

/// Marks a pooled status line.
#[derive(Component, Debug, Clone, Copy)]
pub struct StatusLine(pub usize);

/// Marks the chart background panel.
#[derive(Component, Debug, Clone, Copy)]
pub struct ChartPanel;

/// Marks the chart title.
#[derive(Component, Debug, Clone, Copy)]
pub struct ChartLabel;

/// Marks a pooled chart point.
#[derive(Component, Debug, Clone, Copy)]
pub struct ChartDot(pub usize);

/// Pooled overlay entities.
#[derive(Resource, Debug, Default)]
pub struct OverlayPool {
    lines: Vec<Entity>,
    dots: Vec<Entity>,
    panel: Option<Entity>,
    label: Option<Entity>,
    synced_frame: u64,
}

impl OverlayPool {
    /// Number of pooled text lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of pooled chart dots.
    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }
}

fn absolute(x: f32, y: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(x),
        top: Val::Px(y),
        ..default()
    }
}

fn boxed(x: f32, y: f32, size: [f32; 2]) -> Node {
    Node {
        width: Val::Px(size[0]),
        height: Val::Px(size[1]),
        ..absolute(x, y)
    }
}

/// Syncs UI nodes to the queued overlay.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are passed by value
pub fn sync_overlay(
    mut commands: Commands,
    queue: Res<DrawQueue>,
    mut pool: ResMut<OverlayPool>,
    mut texts: Query<(&mut Text, &mut Node)>,
    mut shapes: Query<&mut Node, Without<Text>>,
    mut visibility: Query<&mut Visibility>,
) {
    if queue.frames() == pool.synced_frame {
        return;
    }
    pool.synced_frame = queue.frames();
    let overlay: &Overlay = queue.overlay();

    for (index, line) in overlay.lines.iter().enumerate() {
        match pool.lines.get(index).copied() {
            Some(entity) => {
                if let Ok((mut text, mut node)) = texts.get_mut(entity) {
                    if text.0 != line.text {
                        text.0.clone_from(&line.text);
                    }
                    *node = absolute(line.x, line.y);
                }
                if let Ok(mut vis) = visibility.get_mut(entity) {
                    *vis = Visibility::Inherited;
                }
            }
            None => {
                let entity = commands
                    .spawn((
                        StatusLine(index),
                        Text::new(line.text.clone()),
                        TextFont {
                            font_size: FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        absolute(line.x, line.y),
                    ))
                    .id();
                pool.lines.push(entity);
            }
        }
    }
    for &entity in pool.lines.iter().skip(overlay.lines.len()) {
        if let Ok(mut vis) = visibility.get_mut(entity) {
            *vis = Visibility::Hidden;
        }
    }

    let chart = &overlay.chart;
    let panel = pool.panel;
    match panel {
        Some(entity) => {
            if let Ok(mut node) = shapes.get_mut(entity) {
                *node = boxed(chart.origin[0], chart.origin[1], chart.size);
            }
        }
        None => {
            let panel = commands
                .spawn((
                    ChartPanel,
                    boxed(chart.origin[0], chart.origin[1], chart.size),
                    BackgroundColor(PANEL_COLOR),
                ))
                .id();
            pool.panel = Some(panel);
        }
    }
    let label_at = (chart.origin[0] + 10.0, chart.origin[1] + 5.0);
    let label = pool.label;
    match label {
        Some(entity) => {
            if let Ok((_, mut node)) = texts.get_mut(entity) {
                *node = absolute(label_at.0, label_at.1);
            }
        }
        None => {
            let label = commands
                .spawn((
                    ChartLabel,
                    Text::new(chart.label.clone()),
                    TextFont {
                        font_size: FONT_SIZE,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    absolute(label_at.0, label_at.1),
                ))
                .id();
            pool.label = Some(label);
        }
    }

    let half = DOT_SIZE / 2.0;
    for (index, point) in chart.points.iter().enumerate() {
        let node = boxed(point[0] - half, point[1] - half, [DOT_SIZE, DOT_SIZE]);
        match pool.dots.get(index).copied() {
            Some(entity) => {
                if let Ok(mut dot) = shapes.get_mut(entity) {
                    *dot = node;
                }
                if let Ok(mut vis) = visibility.get_mut(entity) {
                    *vis = Visibility::Inherited;
                }
            }
            None => {
                let entity = commands
                    .spawn((ChartDot(index), node, BackgroundColor(PLOT_COLOR)))
                    .id();
                pool.dots.push(entity);
            }
        }
    }
    for &entity in pool.dots.iter().skip(chart.points.len()) {
        if let Ok(mut vis) = visibility.get_mut(entity) {
            *vis = Visibility::Hidden;
        }
    }
}
