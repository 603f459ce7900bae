//! egui view of the control panel.
//!
//! The view only reads the panel; every interaction comes back as a
//! [`PanelCommand`] for the session to apply after the frame is laid out.

use crate::attributes::{snap_coordinate, Rgb};
use crate::panel::{ControlEdit, ControlPanel, PanelCommand, PanelSection, ADD_SPHERE_LABEL};

const PANEL_MARGIN: [f32; 2] = [-8.0, 8.0];

/// Lays out the panel window and returns the commands the user issued.
pub fn show_panel(ctx: &egui::Context, panel: &ControlPanel) -> Vec<PanelCommand> {
    let mut commands = Vec::new();
    egui::Window::new(panel.title())
        .anchor(egui::Align2::RIGHT_TOP, PANEL_MARGIN)
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            if ui.button(ADD_SPHERE_LABEL).clicked() {
                commands.push(PanelCommand::AddSphere);
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for section in panel.sections() {
                    show_section(ui, section, &mut commands);
                }
            });
        });
    commands
}

fn show_section(ui: &mut egui::Ui, section: &PanelSection, commands: &mut Vec<PanelCommand>) {
    let handle = section.handle();
    let expanded = section.is_expanded();
    let response = egui::CollapsingHeader::new(section.label())
        .id_salt(handle)
        .open(Some(expanded))
        .show(ui, |ui| {
            let color = section.color();
            ui.horizontal(|ui| {
                let mut bytes = color.get().to_bytes();
                let picked = ui.color_edit_button_srgb(&mut bytes);
                if picked.changed() && Rgb::from_bytes(bytes) != color.get() {
                    commands.push(PanelCommand::Edit {
                        handle,
                        edit: ControlEdit::Color(Rgb::from_bytes(bytes)),
                    });
                }
                ui.label(color.name());
            });

            for slider in section.sliders() {
                let mut value = slider.get();
                let widget = egui::Slider::new(&mut value, slider.min()..=slider.max())
                    .step_by(slider.step() as f64)
                    .text(slider.name());
                let moved = ui.add(widget);
                // The slider re-rounds its displayed value on its own, so only
                // user-driven changes that land on a new grid value count.
                if is_user_change(&moved) && snap_coordinate(value) != slider.get() {
                    commands.push(PanelCommand::Edit {
                        handle,
                        edit: ControlEdit::Position(slider.axis(), value),
                    });
                }
            }
        });

    if response.header_response.clicked() {
        commands.push(PanelCommand::SetExpanded {
            handle,
            expanded: !expanded,
        });
    }
}

fn is_user_change(response: &egui::Response) -> bool {
    response.changed()
        && (response.dragged()
            || response.clicked()
            || response.is_pointer_button_down_on()
            || response.has_focus())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::session::EditorSession;

    #[test]
    fn idle_frame_issues_no_commands() {
        let mut session = EditorSession::with_seed(&EditorConfig::default(), 5);
        session.add_sphere();
        session.add_sphere();

        let ctx = egui::Context::default();
        let mut commands = Vec::new();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                commands.extend(show_panel(ctx, session.panel()));
            });
        }
        assert!(commands.is_empty());
    }

    #[test]
    fn idle_frames_never_rewrite_positions() {
        let mut session = EditorSession::with_seed(&EditorConfig::default(), 21);
        for _ in 0..5 {
            session.add_sphere();
        }
        let before: Vec<_> = session.objects().map(|object| object.attributes()).collect();

        let ctx = egui::Context::default();
        for frame in 0..6 {
            let mut commands = Vec::new();
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                commands = show_panel(ctx, session.panel());
            });
            assert!(commands.is_empty(), "frame {frame} issued {commands:?}");
            for command in commands {
                session.apply(command).unwrap();
            }
        }

        let after: Vec<_> = session.objects().map(|object| object.attributes()).collect();
        assert_eq!(before, after);
    }
}
