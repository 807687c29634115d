use crate::ui::map_renderer::MapPanel;
use airport_explorer::cache::{CacheState, DatasetCache};
use airport_explorer::dataset::Dataset;
use airport_explorer::explorer::Explorer;
use egui::{CollapsingHeader, Color32, Grid, ScrollArea, TextStyle, Ui};

const TABLE_HEIGHT: f32 = 320.0;

/// Shows the airports for the current filter.
pub fn render_central_panel(
    ui: &mut Ui,
    explorer: &mut Explorer,
    dataset: &Dataset,
    map: &mut MapPanel,
) {
    let data_source_page = explorer.config().data_source_page.clone();
    ui.heading("Global Airport Data");
    ui.separator();

    ui.checkbox(&mut explorer.show_raw, "Show full raw data");
    if explorer.show_raw {
        ui.strong("All raw data");
        render_table(
            ui,
            "raw_data",
            dataset.columns(),
            dataset.records().len(),
            |row, column| dataset.records().get(row).map_or("", |r| r.field(column)),
        );
    }
    ui.add_space(8.0);

    ui.label(explorer.criteria.to_string());
    match explorer.view() {
        Some(Ok(view)) => {
            ui.label(format!("{} airports", view.matched));
            if view.table.columns.is_empty() {
                ui.label("No columns selected");
            } else {
                render_table(
                    ui,
                    "filtered_data",
                    &view.table.columns,
                    view.table.len(),
                    |row, column| {
                        view.table
                            .rows
                            .get(row)
                            .and_then(|r| r.get(column))
                            .map_or("", String::as_str)
                    },
                );
            }
            CollapsingHeader::new("Show map").show(ui, |ui| map.render(ui, &view.points));
        }
        Some(Err(e)) => {
            ui.colored_label(Color32::RED, e.to_string());
        }
        None => {
            ui.spinner();
        }
    }

    ui.add_space(8.0);
    ui.hyperlink_to("Data source", data_source_page);
}

/// Shows why there is nothing to explore yet. Returns whether the user asked for a reload.
pub fn render_unavailable(ui: &mut Ui, cache: &DatasetCache) -> bool {
    ui.heading("Global Airport Data");
    ui.separator();
    match cache.state() {
        CacheState::Failed => {
            if let Some(e) = cache.error() {
                ui.colored_label(Color32::RED, format!("Could not load the airports: {e}"));
            }
            ui.button("Reload data").clicked()
        }
        _ => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading airports from {}", cache.source_url()));
            });
            false
        }
    }
}

/// A scrolling table that only lays out the visible rows.
fn render_table<'a, F>(ui: &mut Ui, id: &str, columns: &[String], rows: usize, cell: F)
where
    F: Fn(usize, usize) -> &'a str,
{
    let row_height = ui.text_style_height(&TextStyle::Body) + ui.spacing().item_spacing.y;
    ScrollArea::both()
        .id_source(id)
        .max_height(TABLE_HEIGHT)
        .auto_shrink([false, true])
        .show_rows(ui, row_height, rows, |ui, row_range| {
            Grid::new(id).striped(true).show(ui, |ui| {
                for column in columns {
                    ui.strong(column.as_str());
                }
                ui.end_row();
                for row in row_range {
                    for column in 0..columns.len() {
                        ui.label(cell(row, column));
                    }
                    ui.end_row();
                }
            });
        });
}
