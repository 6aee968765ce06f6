//! Bridges the core's [`RenderBackend`] to Bevy entities.
//!
//! The simulation submits draw commands into [`DrawQueue`]. A sync system
//! then maps command `i` onto pooled entity `i`, reusing cached unit meshes
//! and one material per distinct color. Surplus entities are hidden.

use std::collections::HashMap;

use bevy::prelude::*;
use forklift_core::geometry::{PrimitiveKind, RenderPass, Rgba};
use forklift_core::{DrawCommand, Overlay, RenderBackend};

use crate::convert::{color_from_rgba, transform_from_command};

/// One frame of draw commands and overlay, filled by the simulation.
#[derive(Resource, Debug, Default)]
pub struct DrawQueue {
    commands: Vec<DrawCommand>,
    overlay: Overlay,
    frames: u64,
}

impl DrawQueue {
    /// Commands of the last completed frame, opaque first.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Overlay of the last completed frame.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Number of frames completed.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderBackend for DrawQueue {
    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn submit_overlay(&mut self, overlay: &Overlay) {
        self.overlay.clone_from(overlay);
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

/// Marks a pooled primitive entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct PrimitiveSlot(pub usize);

/// Mesh handle key: one unit mesh per shape and tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Cuboid,
    Cylinder(u32),
}

impl MeshKey {
    fn of(kind: &PrimitiveKind) -> Self {
        match *kind {
            PrimitiveKind::Box { .. } => Self::Cuboid,
            PrimitiveKind::Cylinder { sides, .. } => Self::Cylinder(sides),
        }
    }

    fn build(self) -> Mesh {
        match self {
            Self::Cuboid => Cuboid::new(1.0, 1.0, 1.0).mesh().build(),
            Self::Cylinder(sides) => Cylinder::new(1.0, 1.0).mesh().resolution(sides).build(),
        }
    }
}

/// Pooled entities plus mesh and material caches.
#[derive(Resource, Debug, Default)]
pub struct PrimitivePool {
    slots: Vec<Entity>,
    meshes: HashMap<MeshKey, Handle<Mesh>>,
    materials: HashMap<[u8; 4], Handle<StandardMaterial>>,
    synced_frame: u64,
}

impl PrimitivePool {
    /// Number of pooled entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing has been spawned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of distinct materials created so far.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn mesh(&mut self, kind: &PrimitiveKind, assets: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.meshes
            .entry(MeshKey::of(kind))
            .or_insert_with_key(|key| assets.add(key.build()))
            .clone()
    }

    fn material(
        &mut self,
        color: Rgba,
        pass: RenderPass,
        assets: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.materials
            .entry(color.to_rgba8())
            .or_insert_with(|| {
                assets.add(StandardMaterial {
                    base_color: color_from_rgba(color),
                    alpha_mode: match pass {
                        RenderPass::Opaque => AlphaMode::Opaque,
                        RenderPass::Translucent => AlphaMode::Blend,
                    },
                    perceptual_roughness: 0.8,
                    ..default()
                })
            })
            .clone()
    }
}

/// Syncs pooled entities to the queued draw commands.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are passed by value
pub fn sync_primitives(
    mut commands: Commands,
    queue: Res<DrawQueue>,
    mut pool: ResMut<PrimitivePool>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut slots: Query<(
        &mut Mesh3d,
        &mut MeshMaterial3d<StandardMaterial>,
        &mut Transform,
        &mut Visibility,
    )>,
) {
    if queue.frames() == pool.synced_frame {
        return;
    }
    pool.synced_frame = queue.frames();

    for (index, command) in queue.commands().iter().enumerate() {
        let mesh = pool.mesh(&command.kind, &mut meshes);
        let material = pool.material(command.color, command.pass, &mut materials);
        let transform = transform_from_command(command);

        let existing = pool.slots.get(index).copied();
        match existing.and_then(|entity| slots.get_mut(entity).ok()) {
            Some((mut mesh3d, mut material3d, mut slot_transform, mut visibility)) => {
                if mesh3d.0 != mesh {
                    mesh3d.0 = mesh;
                }
                if material3d.0 != material {
                    material3d.0 = material;
                }
                *slot_transform = transform;
                *visibility = Visibility::Inherited;
            }
            None => {
                let entity = commands
                    .spawn((
                        PrimitiveSlot(index),
                        Mesh3d(mesh),
                        MeshMaterial3d(material),
                        transform,
                        Visibility::Inherited,
                    ))
                    .id();
                if index < pool.slots.len() {
                    pool.slots[index] = entity;
                } else {
                    pool.slots.push(entity);
                }
            }
        }
    }

    let used = queue.commands().len();
    for &entity in pool.slots.iter().skip(used) {
        if let Ok((_, _, _, mut visibility)) = slots.get_mut(entity) {
            *visibility = Visibility::Hidden;
        }
    }
}
