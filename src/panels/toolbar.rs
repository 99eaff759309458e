use crate::action::Action;
use crate::command::Command;
use crate::components::ToolButton;
use crate::state::EditorContext;
use crate::tool::ToolKind;

const VIEW_ACTIONS: [Action; 6] = [
    Action::Upload(None),
    Action::Undo,
    Action::Redo,
    Action::ZoomIn,
    Action::ZoomOut,
    Action::ResetView,
];

const FILE_ACTIONS: [Action; 3] = [Action::Save, Action::Export, Action::Share];

pub fn toolbar_panel(ctx: &egui::Context, editor: &EditorContext, commands: &mut Vec<Command>) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("ProofStudio");
                ui.weak("Professional Promotional Products Proofing");
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.vertical(|ui| {
                    ui.label("Untitled Project");
                    ui.small(format!("Revision {}", editor.document().version()));
                });
            });
        });

        ui.separator();

        ui.horizontal(|ui| {
            let current = editor.current_tool();
            for tool in ToolKind::ALL {
                if ToolButton::new(tool, tool == current).show(ui).clicked() {
                    log::info!("Tool selected from UI: {}", tool);
                    commands.push(Command::SetTool(tool));
                }
            }

            ui.separator();

            for action in VIEW_ACTIONS {
                if ui.button(action.label()).clicked() {
                    commands.push(Command::Dispatch(action));
                }
            }
            ui.label(format!("{:.0}%", editor.view().zoom() * 100.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for action in FILE_ACTIONS.into_iter().rev() {
                    if ui.button(action.label()).clicked() {
                        commands.push(Command::Dispatch(action));
                    }
                }
            });
        });
        ui.add_space(4.0);
    });
}
