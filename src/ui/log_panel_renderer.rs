use airport_explorer::cache::DatasetCache;
use egui::Ui;

pub fn render_log_panel(ui: &mut Ui, cache: &DatasetCache) {
    ui.label(format!("Log Panel ({:?})", cache.state()));
    ui.set_style(egui::Style {
        wrap: Some(false),
        ..Default::default()
    });
    ui.monospace(cache.progress_log());
}
