//! Render loop plumbing.
//!
//! The driver hands the renderer a read-only [`Frame`] built from the scene
//! graph on every tick. It keeps no copy of the scene between ticks, so any
//! mutation applied before a tick is what that tick draws.

pub mod native;
pub mod shared;

pub use native::Renderer;

use crate::attributes::Rgb;
use crate::camera::CameraParams;
use crate::scene::{EntityId, Renderable, SceneGraph};

/// Everything needed to draw one frame.
#[derive(Debug)]
pub struct Frame<'a> {
    pub background: Rgb,
    pub camera: CameraParams,
    pub entities: Vec<(EntityId, &'a Renderable)>,
}

/// Anything that can present a frame.
pub trait FrameTarget {
    type Error;

    fn draw_frame(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

/// Drives the draw cycle from the current scene graph.
#[derive(Debug, Default)]
pub struct RenderLoopDriver {
    frames: u64,
}

impl RenderLoopDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the scene as it is right now.
    pub fn tick<T: FrameTarget>(
        &mut self,
        scene: &SceneGraph,
        camera: CameraParams,
        target: &mut T,
    ) -> Result<(), T::Error> {
        let frame = Frame {
            background: scene.background(),
            camera,
            entities: scene.iter().collect(),
        };
        target.draw_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}
