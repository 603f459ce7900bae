use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::attributes::AttributeState;
use crate::camera::CameraParams;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::interaction::{Gesture, InteractionRouter};
use crate::panel::{ControlEdit, ControlPanel, PanelCommand};
use crate::picking::{pick_entity, Ray};
use crate::registry::{ObjectHandle, SceneObject, SceneObjectRegistry};
use crate::scene::SceneGraph;

/// Counts of what a shutdown released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Teardown {
    pub objects: usize,
    pub sections: usize,
    pub triggers: usize,
    pub entities: usize,
}

/// Editing context owning the scene graph, registry, panel and router.
///
/// Every mutation leaves all four in agreement before returning. Dropping the
/// session tears everything down.
#[derive(Debug)]
pub struct EditorSession {
    scene: SceneGraph,
    registry: SceneObjectRegistry,
    panel: ControlPanel,
    router: InteractionRouter,
    rng: StdRng,
}

impl EditorSession {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Session with a deterministic position generator.
    pub fn with_seed(config: &EditorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &EditorConfig, rng: StdRng) -> Self {
        Self {
            scene: SceneGraph::new(config.background),
            registry: SceneObjectRegistry::new(config.sphere_radius),
            panel: ControlPanel::new(config.panel_title.clone()),
            router: InteractionRouter::new(),
            rng,
        }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.registry.get(handle)
    }

    /// Live objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Creates a sphere with its entity, panel section and removal trigger.
    pub fn add_sphere(&mut self) -> ObjectHandle {
        let object = self.registry.create(&mut self.scene, &mut self.rng);
        let handle = object.handle();
        let entity = object.entity();
        let state = object.attributes();
        let label = self.panel.bind(object).label().to_string();
        self.router.attach(entity, handle);
        info!(
            "added '{label}' ({handle}) at ({:.2}, {:.2}, {:.2})",
            state.position.x, state.position.y, state.position.z
        );
        self.debug_check();
        handle
    }

    /// Applies a control edit and pushes the result into the scene graph.
    pub fn edit(&mut self, handle: ObjectHandle, edit: ControlEdit) -> EditorResult<AttributeState> {
        let entity = self
            .registry
            .get(handle)
            .map(SceneObject::entity)
            .ok_or(EditorError::UnknownObject(handle))?;
        let section = self
            .panel
            .section(handle)
            .ok_or(EditorError::UnknownObject(handle))?;
        let state = section.apply(edit);
        if !self.scene.sync(entity, &state) {
            return Err(EditorError::Inconsistent(format!(
                "{handle} has no entity in the scene graph"
            )));
        }
        debug!("{handle} edited: {edit:?}");
        self.debug_check();
        Ok(state)
    }

    /// Removes the object and everything bound to it. Unknown handles are a no-op.
    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        let Some(object) = self.registry.remove(&mut self.scene, handle) else {
            debug!("ignoring removal of unregistered {handle}");
            return false;
        };
        let section = self.panel.unbind(handle);
        let detached = self.router.detach(object.entity());
        if section.is_none() || !detached {
            warn!("{handle} was missing its section or trigger at removal");
        }
        info!("removed '{}' ({handle})", object.label());
        drop(section);
        drop(object);
        self.debug_check();
        true
    }

    /// Dispatches a gesture; returns the removed object, if any.
    pub fn handle_gesture(&mut self, gesture: Gesture) -> Option<ObjectHandle> {
        let handle = self.router.route(gesture)?;
        self.remove(handle).then_some(handle)
    }

    /// Picks the sphere under the cursor and treats the press as a double-activation.
    pub fn double_activate_at(
        &mut self,
        cursor: Vec2,
        viewport: Vec2,
        camera: &CameraParams,
    ) -> Option<ObjectHandle> {
        let ray = Ray::from_screen(cursor, viewport, camera)?;
        let entity = pick_entity(&self.scene, &ray)?;
        self.handle_gesture(Gesture::DoubleActivate(entity))
    }

    /// Applies one command emitted by the panel view.
    pub fn apply(&mut self, command: PanelCommand) -> EditorResult<()> {
        match command {
            PanelCommand::AddSphere => {
                self.add_sphere();
            }
            PanelCommand::Edit { handle, edit } => {
                self.edit(handle, edit)?;
            }
            PanelCommand::SetExpanded { handle, expanded } => {
                self.panel
                    .section_mut(handle)
                    .ok_or(EditorError::UnknownObject(handle))?
                    .set_expanded(expanded);
            }
        }
        Ok(())
    }

    /// Verifies that registry, scene graph, panel and router describe the same objects.
    pub fn check_consistency(&self) -> EditorResult<()> {
        let count = self.registry.len();
        if self.scene.len() != count || self.panel.len() != count || self.router.len() != count {
            return Err(EditorError::Inconsistent(format!(
                "{count} objects, {} entities, {} sections, {} triggers",
                self.scene.len(),
                self.panel.len(),
                self.router.len()
            )));
        }
        for (object, section) in self.registry.iter().zip(self.panel.sections()) {
            let handle = object.handle();
            if section.handle() != handle {
                return Err(EditorError::Inconsistent(format!(
                    "section '{}' is out of order for {handle}",
                    section.label()
                )));
            }
            let state = object.attributes();
            match self.scene.get(object.entity()) {
                Some(renderable)
                    if renderable.position == state.position && renderable.color == state.color => {}
                Some(_) => {
                    return Err(EditorError::Inconsistent(format!(
                        "{} is out of sync with {handle}",
                        object.entity()
                    )))
                }
                None => {
                    return Err(EditorError::Inconsistent(format!(
                        "{handle} has no entity in the scene graph"
                    )))
                }
            }
            if self.router.route(Gesture::DoubleActivate(object.entity())) != Some(handle) {
                return Err(EditorError::Inconsistent(format!(
                    "{handle} has no removal trigger"
                )));
            }
        }
        Ok(())
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.check_consistency() {
                panic!("{err}");
            }
        }
    }

    /// Releases every section, trigger, object and entity.
    ///
    /// Runs whenever anything is still held, so objects added after an
    /// earlier shutdown are released by the next one or by `Drop`.
    pub fn shutdown(&mut self) -> Teardown {
        if self.registry.is_empty()
            && self.panel.is_empty()
            && self.router.is_empty()
            && self.scene.is_empty()
        {
            return Teardown::default();
        }
        log_final_state(self);
        let entities = self.scene.len();
        let teardown = Teardown {
            sections: self.panel.clear(),
            triggers: self.router.clear(),
            objects: self.registry.drain(&mut self.scene).len(),
            entities,
        };
        self.scene.clear();
        info!(
            "session closed: released {} objects, {} sections, {} triggers",
            teardown.objects, teardown.sections, teardown.triggers
        );
        teardown
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn log_final_state(session: &EditorSession) {
    info!("final object states:");
    for object in session.objects() {
        let state = object.attributes();
        info!(
            " - {} pos=({:.2}, {:.2}, {:.2}) color={}",
            object.label(),
            state.position.x,
            state.position.y,
            state.position.z,
            state.color
        );
    }
}
