//! Control panel model.
//!
//! Each live object owns one [`PanelSection`]. The controls in a section hold
//! the object's attribute state directly and expose explicit getters and
//! setters; the egui view in [`crate::ui`] only reads them and emits
//! [`PanelCommand`]s.

use log::debug;

use crate::attributes::{
    snap_coordinate, AttributeState, Axis, Rgb, SharedAttributes, POSITION_MAX, POSITION_MIN,
    POSITION_STEP,
};
use crate::registry::{ObjectHandle, SceneObject};

/// Label of the single top-level command.
pub const ADD_SPHERE_LABEL: &str = "Add Sphere";

/// A user intent produced by the panel view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelCommand {
    AddSphere,
    Edit {
        handle: ObjectHandle,
        edit: ControlEdit,
    },
    SetExpanded {
        handle: ObjectHandle,
        expanded: bool,
    },
}

/// A value written through one control of a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEdit {
    Color(Rgb),
    Position(Axis, f32),
}

/// Color picker bound to an object's color.
#[derive(Debug)]
pub struct ColorControl {
    target: SharedAttributes,
}

impl ColorControl {
    pub fn name(&self) -> &'static str {
        "Color"
    }

    pub fn get(&self) -> Rgb {
        self.target.read().color
    }

    pub fn set(&self, color: Rgb) -> Rgb {
        self.target.write().color = color;
        color
    }
}

/// Bounded slider bound to one position coordinate.
#[derive(Debug)]
pub struct SliderControl {
    axis: Axis,
    target: SharedAttributes,
}

impl SliderControl {
    pub fn name(&self) -> &'static str {
        self.axis.label()
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn min(&self) -> f32 {
        POSITION_MIN
    }

    pub fn max(&self) -> f32 {
        POSITION_MAX
    }

    pub fn step(&self) -> f32 {
        POSITION_STEP
    }

    pub fn get(&self) -> f32 {
        self.target.read().coordinate(self.axis)
    }

    /// Writes the value clamped to the range and snapped to the step grid.
    pub fn set(&self, value: f32) -> f32 {
        let value = snap_coordinate(value);
        self.target.write().set_coordinate(self.axis, value);
        value
    }
}

/// Labelled group of controls for one object.
#[derive(Debug)]
pub struct PanelSection {
    handle: ObjectHandle,
    label: String,
    expanded: bool,
    color: ColorControl,
    position: [SliderControl; 3],
}

impl PanelSection {
    fn new(object: &SceneObject) -> Self {
        let target = object.shared_attributes();
        let slider = |axis| SliderControl {
            axis,
            target: SharedAttributes::clone(target),
        };
        Self {
            handle: object.handle(),
            label: object.label(),
            expanded: true,
            color: ColorControl {
                target: SharedAttributes::clone(target),
            },
            position: [slider(Axis::X), slider(Axis::Y), slider(Axis::Z)],
        }
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn color(&self) -> &ColorControl {
        &self.color
    }

    pub fn slider(&self, axis: Axis) -> &SliderControl {
        &self.position[axis.index()]
    }

    pub fn sliders(&self) -> &[SliderControl; 3] {
        &self.position
    }

    /// Routes the edit to the matching control and returns the resulting state.
    pub fn apply(&self, edit: ControlEdit) -> AttributeState {
        match edit {
            ControlEdit::Color(color) => {
                self.color.set(color);
            }
            ControlEdit::Position(axis, value) => {
                self.slider(axis).set(value);
            }
        }
        *self.color.target.read()
    }
}

/// The command panel: one top-level command and one section per live object.
#[derive(Debug)]
pub struct ControlPanel {
    title: String,
    sections: Vec<PanelSection>,
}

impl ControlPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Builds the expanded section for a freshly created object.
    pub fn bind(&mut self, object: &SceneObject) -> &PanelSection {
        debug_assert!(self.section(object.handle()).is_none());
        let section = PanelSection::new(object);
        debug!("bound section '{}' to {}", section.label, section.handle);
        self.sections.push(section);
        &self.sections[self.sections.len() - 1]
    }

    /// Detaches and returns the section of `handle`, if one is bound.
    pub fn unbind(&mut self, handle: ObjectHandle) -> Option<PanelSection> {
        let index = self
            .sections
            .iter()
            .position(|section| section.handle == handle)?;
        let section = self.sections.remove(index);
        debug!("unbound section '{}' from {}", section.label, handle);
        Some(section)
    }

    pub fn section(&self, handle: ObjectHandle) -> Option<&PanelSection> {
        self.sections
            .iter()
            .find(|section| section.handle == handle)
    }

    pub fn section_mut(&mut self, handle: ObjectHandle) -> Option<&mut PanelSection> {
        self.sections
            .iter_mut()
            .find(|section| section.handle == handle)
    }

    pub fn sections(&self) -> &[PanelSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn clear(&mut self) -> usize {
        let count = self.sections.len();
        self.sections.clear();
        count
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new("Controls")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SceneObjectRegistry;
    use crate::scene::SceneGraph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn bound_object() -> (SceneObjectRegistry, SceneGraph, ControlPanel, ObjectHandle) {
        let mut registry = SceneObjectRegistry::new(1.0);
        let mut scene = SceneGraph::default();
        let mut panel = ControlPanel::default();
        let mut rng = StdRng::seed_from_u64(3);
        let object = registry.create(&mut scene, &mut rng);
        let handle = object.handle();
        panel.bind(object);
        (registry, scene, panel, handle)
    }

    #[test]
    fn bind_builds_expanded_section_with_four_controls() {
        let (registry, _scene, panel, handle) = bound_object();
        let section = panel.section(handle).unwrap();
        assert_eq!(section.label(), "Sphere 1");
        assert!(section.is_expanded());
        assert_eq!(section.color().name(), "Color");
        let names: Vec<_> = section.sliders().iter().map(SliderControl::name).collect();
        assert_eq!(names, vec!["X Position", "Y Position", "Z Position"]);
        let state = registry.get(handle).unwrap().attributes();
        assert_eq!(section.color().get(), state.color);
        assert_eq!(section.slider(Axis::Z).get(), state.position.z);
    }

    #[test]
    fn controls_write_through_to_attributes() {
        let (registry, _scene, panel, handle) = bound_object();
        let section = panel.section(handle).unwrap();
        let state = section.apply(ControlEdit::Color(Rgb::new(0xff0000)));
        assert_eq!(state.color, Rgb::new(0xff0000));
        let state = section.apply(ControlEdit::Position(Axis::X, 1.04));
        assert!((state.position.x - 1.0).abs() < 1e-5);
        assert_eq!(registry.get(handle).unwrap().attributes(), state);
    }

    #[test]
    fn sliders_cannot_leave_their_range() {
        let (_registry, _scene, panel, handle) = bound_object();
        let slider = panel.section(handle).unwrap().slider(Axis::Y);
        assert_eq!(slider.set(17.0), POSITION_MAX);
        assert_eq!(slider.set(-3.0), POSITION_MIN);
        assert_eq!(slider.get(), POSITION_MIN);
    }

    #[test]
    fn unbind_releases_the_attribute_references() {
        let (mut registry, mut scene, mut panel, handle) = bound_object();
        let weak = Arc::downgrade(registry.get(handle).unwrap().shared_attributes());
        assert_eq!(weak.strong_count(), 5);
        assert!(panel.unbind(handle).is_some());
        assert!(panel.unbind(handle).is_none());
        assert_eq!(weak.strong_count(), 1);
        drop(registry.remove(&mut scene, handle));
        assert!(weak.upgrade().is_none());
    }
}
