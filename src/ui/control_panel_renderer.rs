use airport_explorer::components::prelude::*;
use airport_explorer::dataset::Dataset;
use airport_explorer::explorer::Explorer;
use airport_explorer::filter::Selection;
use egui::{ScrollArea, TextEdit, Ui};
use log::debug;

const LIST_HEIGHT: f32 = 160.0;
const LETTER_INPUT_WIDTH: f32 = 24.0;
const LETTER_LABELS: [&str; 3] = [
    "Filter by first letter of IATA",
    "Filter by second letter of IATA",
    "Filter by third letter of IATA",
];

/// The IATA position inputs as the user typed them.
pub type LetterInputs = [String; 3];

/// Shows the filter controls. Returns whether the user asked for a reload.
pub fn render_control_panel(
    ui: &mut Ui,
    explorer: &mut Explorer,
    dataset: &Dataset,
    letters: &mut LetterInputs,
) -> bool {
    ui.heading("Please filter here:");
    ui.separator();

    ui.strong("Select columns to show");
    render_column_choice(ui, &mut explorer.columns, dataset.columns());
    ui.separator();

    ui.strong("Filter country");
    render_selection(
        ui,
        "countries",
        &mut explorer.criteria.countries,
        &dataset.countries(),
        |code| format!("{} - {}", code, country_name(&code.0)),
    );
    ui.separator();

    ui.strong("Filter airport type");
    render_selection(
        ui,
        "airport_types",
        &mut explorer.criteria.types,
        &dataset.airport_types(),
        ToString::to_string,
    );
    ui.separator();

    for (position, (input, label)) in letters.iter_mut().zip(LETTER_LABELS).enumerate() {
        ui.horizontal(|ui| {
            let response = ui.add(TextEdit::singleline(input).desired_width(LETTER_INPUT_WIDTH));
            ui.label(label);
            if response.changed() {
                keep_one_letter(input);
                debug!("Letter {} set to {:?}", position + 1, input);
                explorer.criteria.set_letter(position, input);
            }
        });
    }
    ui.separator();

    let mut reload = false;
    ui.horizontal(|ui| {
        if ui.button("Reset filters").clicked() {
            explorer.reset_filters();
            *letters = explorer.config().default_letters.clone();
        }
        reload = ui.button("Reload data").clicked();
    });
    reload
}

/// Checkboxes for every column of the file. Newly checked columns go to the end.
fn render_column_choice(ui: &mut Ui, selected: &mut Vec<String>, columns: &[String]) {
    ScrollArea::vertical()
        .id_source("columns")
        .max_height(LIST_HEIGHT)
        .show(ui, |ui| {
            for column in columns {
                let mut shown = selected.contains(column);
                if ui.checkbox(&mut shown, column.as_str()).changed() {
                    if shown {
                        selected.push(column.clone());
                    } else {
                        selected.retain(|c| c != column);
                    }
                }
            }
        });
}

fn render_selection<T, F>(
    ui: &mut Ui,
    id: &str,
    selection: &mut Selection<T>,
    options: &[&T],
    label: F,
) where
    T: Ord + Clone,
    F: Fn(&T) -> String,
{
    let mut all = selection.is_all();
    if ui.checkbox(&mut all, "Select all").changed() {
        selection.set_all(all);
    }
    ui.add_enabled_ui(!all, |ui| {
        ScrollArea::vertical()
            .id_source(id)
            .max_height(LIST_HEIGHT)
            .show(ui, |ui| {
                for option in options {
                    let mut chosen = selection.is_chosen(option);
                    if ui.checkbox(&mut chosen, label(option)).changed() {
                        selection.choose((*option).clone(), chosen);
                    }
                }
            });
    });
}

/// Cuts an input down to its first non-blank character.
fn keep_one_letter(input: &mut String) {
    *input = input
        .trim()
        .chars()
        .next()
        .map_or_else(String::new, String::from);
}
