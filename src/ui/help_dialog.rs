use crate::app::GwMonitor;

pub fn render_help_dialog(app: &mut GwMonitor, ctx: &eframe::egui::Context) {
    if app.state.view.show_help {
        eframe::egui::Window::new("⌨ Help")
            .anchor(eframe::egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading("Keyboard");
                ui.label("R - Reset chart to the display range");
                ui.label("G - Toggle grid");
                ui.label("L - Toggle legend");
                ui.label("T - Toggle dark/light theme");
                ui.label("H / F1 - Toggle help");
                ui.label("ESC - Close help");

                ui.separator();
                ui.heading("Mouse");
                ui.label("Scroll - Zoom in/out");
                ui.label("Drag - Pan view");
                ui.label("Double-click - Back to the display range");
                ui.label("Right-click - Context menu");

                ui.separator();
                ui.heading("Selection");
                ui.label("Period bounds are inclusive at hour precision");
                ui.label("Hour of day keeps only readings taken in that hour");
                ui.label("Range size scales the data spread around the mean");

                ui.separator();
                if ui.button("Close").clicked() {
                    app.state.view.show_help = false;
                }
            });
    }
}
