//! Static scene surrounding the rig.

use forklift_geometry::{Part, Primitive};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::{ForkliftConfig, SceneVariant};
use crate::warehouse::{build_arena_grid, build_warehouse};

/// Static geometry, built once per simulation.
#[derive(Debug, Clone)]
pub struct Scene {
    variant: SceneVariant,
    part: Part,
}

impl Scene {
    /// Builds the static geometry for `config.variant`.
    #[must_use]
    pub fn build(config: &ForkliftConfig) -> Self {
        let part = match config.variant {
            SceneVariant::Arena => build_arena_grid(-config.rig.chassis_height / 2.0 - 0.01),
            SceneVariant::Warehouse => {
                let mut rng = match config.warehouse.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                build_warehouse(&config.warehouse, &mut rng)
            }
        };
        info!(variant = %config.variant, primitives = part.len(), "built static scene");
        Self {
            variant: config.variant,
            part,
        }
    }

    /// Which layout was built.
    #[must_use]
    pub const fn variant(&self) -> SceneVariant {
        self.variant
    }

    /// Static primitives in world space.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        self.part.primitives()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_is_a_grid() {
        let scene = Scene::build(&ForkliftConfig::arena());
        assert_eq!(scene.variant(), SceneVariant::Arena);
        assert_eq!(scene.primitives().len(), 82);
    }

    #[test]
    fn seeded_warehouse_is_stable() {
        let config = ForkliftConfig::warehouse().with_seed(17);
        let a = Scene::build(&config);
        let b = Scene::build(&config);
        assert_eq!(a.primitives(), b.primitives());
    }
}
