//! Collaborator seams: rendering and input.
//!
//! The core never talks to a window, GPU or keyboard. A frontend implements
//! [`RenderBackend`] to draw what the core submits and [`InputSource`] to
//! report which logical actions are active.

use forklift_geometry::{Primitive, PrimitiveKind, RenderPass, Rgba};
use nalgebra::{Matrix4, Vector2};

use crate::action::ActionSet;
use crate::overlay::Overlay;

/// One draw call: a unit shape mapped into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Shape, with its extents.
    pub kind: PrimitiveKind,
    /// Unit shape to world: rigid transform × extents.
    pub world: Matrix4<f64>,
    /// Surface color.
    pub color: Rgba,
    /// Blend hint.
    pub pass: RenderPass,
}

impl From<&Primitive> for DrawCommand {
    fn from(primitive: &Primitive) -> Self {
        Self {
            kind: primitive.kind,
            world: primitive.matrix(),
            color: primitive.color,
            pass: primitive.pass(),
        }
    }
}

/// Receives one frame of draw commands and overlay.
///
/// Calls arrive as `begin_frame`, any number of `submit`, one
/// `submit_overlay`, then `end_frame`. Opaque commands precede translucent
/// ones within a frame.
pub trait RenderBackend {
    /// Starts a frame.
    fn begin_frame(&mut self);

    /// Queues one draw command.
    fn submit(&mut self, command: DrawCommand);

    /// Queues the 2D overlay.
    fn submit_overlay(&mut self, overlay: &Overlay);

    /// Finishes the frame.
    fn end_frame(&mut self);
}

/// Everything the frontend reports for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Active logical actions.
    pub actions: ActionSet,
    /// Camera orbit drag in pixels.
    pub orbit: Vector2<f64>,
    /// Camera zoom scroll in lines.
    pub zoom: f64,
}

impl InputFrame {
    /// A frame with only `actions` set.
    #[must_use]
    pub fn from_actions(actions: ActionSet) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }
}

/// Reports input once per tick.
pub trait InputSource {
    /// Returns the input for the current tick.
    fn poll(&mut self) -> InputFrame;
}

/// Submits `primitives` and `overlay` as one frame, opaque pass first.
pub fn render_frame<B: RenderBackend + ?Sized>(
    backend: &mut B,
    primitives: &[Primitive],
    overlay: &Overlay,
) {
    backend.begin_frame();
    for pass in [RenderPass::Opaque, RenderPass::Translucent] {
        for primitive in primitives.iter().filter(|p| p.pass() == pass) {
            backend.submit(DrawCommand::from(primitive));
        }
    }
    backend.submit_overlay(overlay);
    backend.end_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use forklift_geometry::palette;
    use nalgebra::{Isometry3, Vector3};

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
        passes: Vec<RenderPass>,
    }

    impl RenderBackend for Recorder {
        fn begin_frame(&mut self) {
            self.log.push("begin".into());
        }
        fn submit(&mut self, command: DrawCommand) {
            self.passes.push(command.pass);
        }
        fn submit_overlay(&mut self, overlay: &Overlay) {
            self.log.push(format!("overlay:{}", overlay.lines.len()));
        }
        fn end_frame(&mut self) {
            self.log.push("end".into());
        }
    }

    fn cube(color: Rgba) -> Primitive {
        Primitive::new(
            PrimitiveKind::Box {
                size: Vector3::repeat(1.0),
            },
            Isometry3::identity(),
            color,
        )
    }

    #[test]
    fn frame_is_bracketed_and_opaque_first() {
        let prims = [cube(palette::ACRYLIC), cube(palette::RED), cube(palette::WINDOW), cube(palette::BLUE)];
        let mut recorder = Recorder::default();
        render_frame(&mut recorder, &prims, &Overlay::default());

        assert_eq!(recorder.log, vec!["begin", "overlay:0", "end"]);
        assert_eq!(
            recorder.passes,
            vec![
                RenderPass::Opaque,
                RenderPass::Opaque,
                RenderPass::Translucent,
                RenderPass::Translucent
            ]
        );
    }

    #[test]
    fn draw_command_carries_extents() {
        let command = DrawCommand::from(&Primitive::new(
            PrimitiveKind::Box {
                size: Vector3::new(2.0, 3.0, 4.0),
            },
            Isometry3::translation(1.0, 0.0, 0.0),
            palette::RED,
        ));
        assert!((command.world[(0, 0)] - 2.0).abs() < 1e-12);
        assert!((command.world[(2, 2)] - 4.0).abs() < 1e-12);
        assert!((command.world[(0, 3)] - 1.0).abs() < 1e-12);
    }
}
