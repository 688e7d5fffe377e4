use crate::app::GwMonitor;
use crate::pipeline::RenderOutcome;

/// Render the top toolbar: source, export, config and view buttons
pub fn render_toolbar(app: &mut GwMonitor, ctx: &eframe::egui::Context, ui: &mut eframe::egui::Ui) {
    ui.horizontal(|ui| {
        ui.heading(&app.state.config.title);
        if let Some(url) = app.state.config.banner_url.clone() {
            ui.hyperlink_to("🖼", url).on_hover_text("Site image");
        }
    });

    ui.horizontal(|ui| {
        // File operations
        if ui.button("📂").on_hover_text("Open CSV File").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV Files", &["csv"])
                .pick_file()
            {
                if let Err(e) = app.load_file(path) {
                    app.state.ui.set_error(&e);
                }
            }
        }

        let response = ui.add(
            eframe::egui::TextEdit::singleline(&mut app.state.ui.source_input)
                .hint_text("Path or URL of a CSV")
                .desired_width(320.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter));
        if ui.button("Load").clicked() || submitted {
            let source = app.state.ui.source_input.trim().to_string();
            if !source.is_empty() {
                app.open_source(&source);
            }
        }

        if app.state.current_source.is_some() && ui.button("🔄").on_hover_text("Reload source").clicked() {
            app.reload();
        }

        ui.separator();

        let has_selection = matches!(
            app.state.outcome,
            Some(RenderOutcome::Ready(_)) | Some(RenderOutcome::NoData { .. })
        );
        ui.add_enabled_ui(has_selection, |ui| {
            if ui.button("💾 Selection").on_hover_text("Export selected data as CSV").clicked() {
                app.export_selection();
            }
            if ui.button("📋").on_hover_text("Copy selected data to clipboard").clicked() {
                app.copy_selection();
            }
        });
        ui.add_enabled_ui(app.state.has_data(), |ui| {
            if ui.button("💾 All").on_hover_text("Export the whole table as CSV").clicked() {
                app.export_all();
            }
        });

        ui.separator();

        if ui.button("⚙").on_hover_text("Save Config").clicked() {
            app.save_config();
        }
        if ui.button("📥").on_hover_text("Load Config").clicked() {
            app.load_config();
        }

        ui.separator();
        if ui
            .button(if app.state.view.dark_mode { "🌙" } else { "☀" })
            .on_hover_text("Toggle theme (T)")
            .clicked()
        {
            app.state.view.dark_mode = !app.state.view.dark_mode;
        }
        if ui.button("❓").on_hover_text("Help (F1)").clicked() {
            app.state.view.show_help = !app.state.view.show_help;
        }
    });

    // Display current source
    if let Some(source) = &app.state.current_source {
        let name = source.rsplit(['/', '\\']).next().unwrap_or(source);
        ui.label(format!("📄 {}", name)).on_hover_text(source.as_str());
    }

    // Handle drag and drop
    let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
    if let Some(path) = dropped {
        if let Err(e) = app.load_file(path) {
            app.state.ui.set_error(&e);
        }
    }
}
