use std::collections::HashMap;

use log::debug;

use crate::registry::ObjectHandle;
use crate::scene::EntityId;

/// View-level gesture aimed at one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Double click / double tap on the entity's visible geometry.
    DoubleActivate(EntityId),
}

/// Maps entities to the object whose removal they trigger.
///
/// Triggers are attached per entity when the object is created and looked up
/// by identity when a gesture arrives.
#[derive(Debug, Default)]
pub struct InteractionRouter {
    triggers: HashMap<EntityId, ObjectHandle>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, entity: EntityId, handle: ObjectHandle) {
        let previous = self.triggers.insert(entity, handle);
        debug_assert!(previous.is_none(), "{entity} already has a removal trigger");
    }

    pub fn detach(&mut self, entity: EntityId) -> bool {
        let removed = self.triggers.remove(&entity).is_some();
        if removed {
            debug!("detached removal trigger from {entity}");
        }
        removed
    }

    /// Returns the object the gesture asks to remove, if the entity still has a trigger.
    pub fn route(&self, gesture: Gesture) -> Option<ObjectHandle> {
        match gesture {
            Gesture::DoubleActivate(entity) => self.triggers.get(&entity).copied(),
        }
    }

    pub fn is_attached(&self, entity: EntityId) -> bool {
        self.triggers.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn clear(&mut self) -> usize {
        let count = self.triggers.len();
        self.triggers.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SceneObjectRegistry;
    use crate::scene::SceneGraph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn routes_only_to_the_targeted_object() {
        let mut registry = SceneObjectRegistry::new(1.0);
        let mut scene = SceneGraph::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut router = InteractionRouter::new();
        let mut created = Vec::new();
        for _ in 0..2 {
            let object = registry.create(&mut scene, &mut rng);
            router.attach(object.entity(), object.handle());
            created.push((object.entity(), object.handle()));
        }
        let (entity_b, handle_b) = created[1];
        assert_eq!(router.route(Gesture::DoubleActivate(entity_b)), Some(handle_b));

        assert!(router.detach(entity_b));
        assert!(!router.detach(entity_b));
        assert_eq!(router.route(Gesture::DoubleActivate(entity_b)), None);
        assert!(router.is_attached(created[0].0));
        assert_eq!(router.len(), 1);
    }
}
