use std::fmt;

use log::debug;
use rand::Rng;

use crate::attributes::{share, AttributeState, SharedAttributes};
use crate::scene::{EntityId, Renderable, SceneGraph};

/// Stable identifier of a live object.
///
/// The slot index may be recycled after the object is destroyed; the
/// generation is bumped when that happens so an old handle never resolves to
/// the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl ObjectHandle {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object {}v{}", self.index, self.generation)
    }
}

/// A live object: its handle, its entity in the scene graph and its attributes.
#[derive(Debug)]
pub struct SceneObject {
    handle: ObjectHandle,
    entity: EntityId,
    ordinal: usize,
    attributes: SharedAttributes,
}

impl SceneObject {
    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Size of the registry right after this object was inserted.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn label(&self) -> String {
        format!("Sphere {}", self.ordinal)
    }

    /// Snapshot of the current attribute values.
    pub fn attributes(&self) -> AttributeState {
        *self.attributes.read()
    }

    pub(crate) fn shared_attributes(&self) -> &SharedAttributes {
        &self.attributes
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    object: Option<SceneObject>,
}

/// Ordered collection of live objects, in creation order.
#[derive(Debug, Default)]
pub struct SceneObjectRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<ObjectHandle>,
    radius: f32,
}

impl SceneObjectRegistry {
    /// Creates an empty registry whose entities are spheres of `radius`.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Allocates a randomized object, inserts its entity into `scene` and
    /// appends it to the creation order.
    pub fn create<R: Rng>(&mut self, scene: &mut SceneGraph, rng: &mut R) -> &SceneObject {
        let state = AttributeState::randomized(rng);
        let entity = scene.insert(Renderable::sphere(&state, self.radius));

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let handle = ObjectHandle {
            index,
            generation: slot.generation,
        };
        self.order.push(handle);
        debug!("registered {handle} as {entity}");

        slot.object.insert(SceneObject {
            handle,
            entity,
            ordinal: self.order.len(),
            attributes: share(state),
        })
    }

    /// Removes the object and its entity. Unknown or stale handles are ignored.
    ///
    /// The returned object is the removal signal: callers tear down whatever
    /// else was bound to it before handing control back.
    pub fn remove(&mut self, scene: &mut SceneGraph, handle: ObjectHandle) -> Option<SceneObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.order.retain(|live| *live != handle);
        scene.remove(object.entity);
        debug!("unregistered {handle}");
        Some(object)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_ref()
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Live objects in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.order.iter().filter_map(move |handle| self.get(*handle))
    }

    pub fn handles(&self) -> Vec<ObjectHandle> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every object in creation order, returning them.
    pub fn drain(&mut self, scene: &mut SceneGraph) -> Vec<SceneObject> {
        self.handles()
            .into_iter()
            .filter_map(|handle| self.remove(scene, handle))
            .collect()
    }
}
