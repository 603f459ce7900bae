use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sphere_editor::attributes::{POSITION_MAX, POSITION_MIN};
use sphere_editor::{
    Axis, ControlEdit, EditorConfig, EditorSession, Gesture, ObjectHandle, OrbitCamera,
    PanelCommand, Rgb, Teardown,
};

fn session(seed: u64) -> EditorSession {
    EditorSession::with_seed(&EditorConfig::default(), seed)
}

fn labels(session: &EditorSession) -> Vec<String> {
    session
        .panel()
        .sections()
        .iter()
        .map(|section| section.label().to_string())
        .collect()
}

fn remove_by_gesture(session: &mut EditorSession, handle: ObjectHandle) -> Option<ObjectHandle> {
    let entity = session.object(handle).map(|object| object.entity())?;
    session.handle_gesture(Gesture::DoubleActivate(entity))
}

#[test]
fn random_edit_sequences_stay_consistent() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut session = session(1);
    let mut live: Vec<ObjectHandle> = Vec::new();
    let mut retired: Vec<ObjectHandle> = Vec::new();

    for _ in 0..500 {
        match rng.gen_range(0..4) {
            0 | 1 => live.push(session.add_sphere()),
            2 if !live.is_empty() => {
                let handle = live.remove(rng.gen_range(0..live.len()));
                assert_eq!(remove_by_gesture(&mut session, handle), Some(handle));
                retired.push(handle);
            }
            3 if !live.is_empty() => {
                let handle = live[rng.gen_range(0..live.len())];
                let axis = Axis::ALL[rng.gen_range(0..3)];
                let value = rng.gen_range(-3.0..3.0);
                let state = session
                    .edit(handle, ControlEdit::Position(axis, value))
                    .unwrap();
                let coordinate = state.coordinate(axis);
                assert!((POSITION_MIN..=POSITION_MAX).contains(&coordinate));
            }
            _ => {
                if let Some(&stale) = retired.last() {
                    assert!(!session.remove(stale));
                }
            }
        }
        session.check_consistency().unwrap();
        assert_eq!(session.len(), live.len());
        let order: Vec<ObjectHandle> = session.objects().map(|object| object.handle()).collect();
        assert_eq!(order, live);
    }
}

#[test]
fn removal_by_gesture_keeps_other_sections() {
    let mut session = session(2);
    let first = session.add_sphere();
    let second = session.add_sphere();
    assert_eq!(labels(&session), ["Sphere 1", "Sphere 2"]);

    assert_eq!(remove_by_gesture(&mut session, first), Some(first));
    assert_eq!(labels(&session), ["Sphere 2"]);
    assert_eq!(session.scene().len(), 1);
    assert!(session.object(second).is_some());
}

#[test]
fn labels_follow_current_count() {
    let mut session = session(3);
    let first = session.add_sphere();
    session.add_sphere();
    session.remove(first);
    session.add_sphere();
    assert_eq!(labels(&session), ["Sphere 2", "Sphere 2"]);
}

#[test]
fn color_edit_reaches_scene_graph() {
    let mut session = session(4);
    let handle = session.add_sphere();
    let entity = session.object(handle).unwrap().entity();
    assert_eq!(session.scene().get(entity).unwrap().color, Rgb::new(0x00ff00));

    session
        .apply(PanelCommand::Edit {
            handle,
            edit: ControlEdit::Color(Rgb::new(0xff0000)),
        })
        .unwrap();
    assert_eq!(session.scene().get(entity).unwrap().color, Rgb::new(0xff0000));
    assert_eq!(
        session.panel().section(handle).unwrap().color().get(),
        Rgb::new(0xff0000)
    );
}

#[test]
fn removing_everything_in_any_order_empties_all_views() {
    for order in [[0, 1, 2], [2, 1, 0], [1, 2, 0]] {
        let mut session = session(5);
        let handles: Vec<ObjectHandle> = (0..3).map(|_| session.add_sphere()).collect();
        for index in order {
            assert!(session.remove(handles[index]));
        }
        assert!(session.is_empty());
        assert!(session.panel().is_empty());
        assert!(session.scene().is_empty());
        assert!(session.router().is_empty());
    }
}

#[test]
fn removal_leaves_other_objects_untouched() {
    let mut session = session(6);
    let a = session.add_sphere();
    let b = session.add_sphere();
    session
        .edit(b, ControlEdit::Position(Axis::Y, 1.3))
        .unwrap();
    let before = session.object(b).unwrap().attributes();
    let slider_before = session.panel().section(b).unwrap().slider(Axis::Y).get();

    session.remove(a);

    assert_eq!(session.object(b).unwrap().attributes(), before);
    assert_eq!(
        session.panel().section(b).unwrap().slider(Axis::Y).get(),
        slider_before
    );
    session.check_consistency().unwrap();
}

#[test]
fn second_removal_is_a_no_op() {
    let mut session = session(7);
    let handle = session.add_sphere();
    let entity = session.object(handle).unwrap().entity();
    assert!(session.remove(handle));
    assert!(!session.remove(handle));
    assert_eq!(session.handle_gesture(Gesture::DoubleActivate(entity)), None);
    session.check_consistency().unwrap();
}

#[test]
fn double_click_through_camera_removes_sphere_under_cursor() {
    let mut session = session(8);
    let handle = session.add_sphere();
    for axis in Axis::ALL {
        session.edit(handle, ControlEdit::Position(axis, 0.0)).unwrap();
    }
    let camera = OrbitCamera::new(&EditorConfig::default().camera).params(1.0);
    let viewport = Vec2::new(600.0, 600.0);

    assert_eq!(
        session.double_activate_at(Vec2::new(2.0, 2.0), viewport, &camera),
        None
    );
    assert_eq!(
        session.double_activate_at(Vec2::new(300.0, 300.0), viewport, &camera),
        Some(handle)
    );
    assert!(session.is_empty());
}

#[test]
fn shutdown_reports_released_resources() {
    let mut session = session(9);
    let keep = session.add_sphere();
    let drop_me = session.add_sphere();
    session.add_sphere();
    session.remove(drop_me);

    let teardown = session.shutdown();
    assert_eq!(
        teardown,
        Teardown {
            objects: 2,
            sections: 2,
            triggers: 2,
            entities: 2,
        }
    );
    assert!(session.object(keep).is_none());
    assert_eq!(session.shutdown(), Teardown::default());
}
