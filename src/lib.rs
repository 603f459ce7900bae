//! Interactive sphere scene editor.
//!
//! Spheres are created from a control panel, edited through per-object
//! color and position controls, and removed by double-clicking them in the
//! viewport. All editing state lives in [`EditorSession`], which keeps the
//! object registry, scene graph, panel and interaction router in agreement
//! and can be driven headlessly; the window, GPU renderer and egui view sit
//! on top of it.

pub mod attributes;
pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod interaction;
pub mod panel;
pub mod picking;
pub mod registry;
pub mod render;
pub mod scene;
pub mod session;
pub mod ui;

pub use attributes::{AttributeState, Axis, Rgb, SharedAttributes};
pub use camera::{CameraParams, OrbitCamera};
pub use config::{CameraConfig, EditorConfig};
pub use error::{EditorError, EditorResult};
pub use input::{ClickTracker, DragMode, MouseButton, PointerState};
pub use interaction::{Gesture, InteractionRouter};
pub use panel::{ControlEdit, ControlPanel, PanelCommand, PanelSection};
pub use picking::{pick_entity, Ray};
pub use registry::{ObjectHandle, SceneObject, SceneObjectRegistry};
pub use render::{Frame, FrameTarget, RenderLoopDriver, Renderer};
pub use scene::{EntityId, Renderable, SceneGraph};
pub use session::{EditorSession, Teardown};
pub use ui::show_panel;
