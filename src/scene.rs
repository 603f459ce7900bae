use std::fmt;

use glam::Vec3;

use crate::attributes::{AttributeState, Rgb};

/// Identifier of a drawable entity inside the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Drawable sphere as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub position: Vec3,
    pub color: Rgb,
    pub radius: f32,
}

impl Renderable {
    pub fn sphere(state: &AttributeState, radius: f32) -> Self {
        Self {
            position: state.position,
            color: state.color,
            radius,
        }
    }
}

/// Renderer-facing collection of entities, kept in insertion order.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    background: Rgb,
    entities: Vec<(EntityId, Renderable)>,
    next_id: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new(Rgb::WHITE)
    }
}

impl SceneGraph {
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            entities: Vec::new(),
            next_id: 1,
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Adds an entity and returns its freshly allocated id. Ids are never reused.
    pub fn insert(&mut self, renderable: Renderable) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push((id, renderable));
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Renderable> {
        let index = self.entities.iter().position(|(entity, _)| *entity == id)?;
        Some(self.entities.remove(index).1)
    }

    pub fn get(&self, id: EntityId) -> Option<&Renderable> {
        self.entities
            .iter()
            .find(|(entity, _)| *entity == id)
            .map(|(_, renderable)| renderable)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Copies color and position from the attribute state onto the entity.
    pub fn sync(&mut self, id: EntityId, state: &AttributeState) -> bool {
        let Some((_, renderable)) = self.entities.iter_mut().find(|(entity, _)| *entity == id)
        else {
            return false;
        };
        renderable.color = state.color;
        renderable.position = state.position;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Renderable)> + '_ {
        self.entities.iter().map(|(id, renderable)| (*id, renderable))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) -> usize {
        let count = self.entities.len();
        self.entities.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at(x: f32) -> Renderable {
        Renderable {
            position: Vec3::new(x, 0.0, 0.0),
            color: Rgb::new(0x00ff00),
            radius: 1.0,
        }
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let mut scene = SceneGraph::default();
        let a = scene.insert(sphere_at(0.0));
        let b = scene.insert(sphere_at(1.0));
        let c = scene.insert(sphere_at(2.0));
        assert_eq!(scene.remove(b).map(|r| r.position.x), Some(1.0));
        let ids: Vec<_> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(scene.remove(b).is_none());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut scene = SceneGraph::default();
        let a = scene.insert(sphere_at(0.0));
        scene.remove(a);
        let b = scene.insert(sphere_at(0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn sync_copies_attributes() {
        let mut scene = SceneGraph::default();
        let id = scene.insert(sphere_at(0.0));
        let state = AttributeState::new(Rgb::new(0xff0000), Vec3::new(1.0, -1.0, 0.5));
        assert!(scene.sync(id, &state));
        let renderable = scene.get(id).unwrap();
        assert_eq!(renderable.color, Rgb::new(0xff0000));
        assert_eq!(renderable.position, Vec3::new(1.0, -1.0, 0.5));
        assert_eq!(renderable.radius, 1.0);
    }

    #[test]
    fn sync_on_missing_entity_is_rejected() {
        let mut scene = SceneGraph::default();
        let id = scene.insert(sphere_at(0.0));
        scene.clear();
        assert!(!scene.sync(id, &AttributeState::default()));
    }
}
