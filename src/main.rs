#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//! Explorer for the OurAirports world airport dataset.
#![warn(
    clippy::all,
    clippy::restriction,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    rust_2018_idioms,
    missing_debug_implementations,
    missing_docs
)]
#![allow(clippy::module_inception)]
#![allow(clippy::implicit_return)]
#![allow(clippy::blanket_clippy_restriction_lints)]
#![allow(clippy::shadow_same)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::separated_literal_suffix)]
#![allow(clippy::float_arithmetic)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::use_self)]
#![allow(clippy::pattern_type_mismatch)]
#![allow(clippy::pub_use)]
#![allow(clippy::missing_docs_in_private_items)]

mod ui;

use crate::ui::central_panel_renderer::{render_central_panel, render_unavailable};
use crate::ui::control_panel_renderer::{render_control_panel, LetterInputs};
use crate::ui::log_panel_renderer::render_log_panel;
use crate::ui::map_renderer::MapPanel;
use airport_explorer::cache::CacheState;
use airport_explorer::config::Config;
use airport_explorer::explorer::Explorer;
use eframe::egui::{CentralPanel, ScrollArea, SidePanel, TopBottomPanel};
use eframe::App;
use egui::{Context, Vec2};
use log::{error, info};

#[derive(Debug)]
struct ExplorerApp {
    explorer: Explorer,
    letters: LetterInputs,
    map: MapPanel,
}

impl ExplorerApp {
    fn new(config: Config) -> Self {
        let letters = config.default_letters.clone();
        Self {
            explorer: Explorer::new(config),
            letters,
            map: MapPanel::default(),
        }
    }

    fn reload(&mut self) {
        info!("Reloading airports from {}", self.explorer.cache().source_url());
        if let Err(e) = self.explorer.reload() {
            error!("{}", e);
        }
    }

    fn render_panels(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("log_panel")
            .max_height(120.0)
            .show(ctx, |ui| render_log_panel(ui, self.explorer.cache()));

        let dataset = self.explorer.dataset();
        let mut reload = false;
        if let Some(dataset) = &dataset {
            SidePanel::left("filter_panel")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| {
                    ScrollArea::vertical().show(ui, |ui| {
                        reload =
                            render_control_panel(ui, &mut self.explorer, dataset, &mut self.letters);
                    });
                });
        }

        CentralPanel::default().show(ctx, |ui| match &dataset {
            Some(dataset) => {
                ScrollArea::vertical().show(ui, |ui| {
                    render_central_panel(ui, &mut self.explorer, dataset, &mut self.map);
                });
            }
            None => {
                reload |= render_unavailable(ui, self.explorer.cache());
            }
        });

        if reload {
            self.reload();
        }
    }
}

impl App for ExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Err(e) = self.explorer.start() {
            error!("{}", e);
        }
        if self.explorer.poll() {
            info!("Dataset cache is now {:?}", self.explorer.cache().state());
        }
        if self.explorer.cache().state() == CacheState::Loading {
            ctx.request_repaint();
        }

        self.render_panels(ctx);
    }
}

#[tokio::main]
async fn main() {
    use std::default::Default;
    env_logger::init();
    let config = Config::default();
    let (width, height) = config.window_size;
    let options = eframe::NativeOptions {
        initial_window_size: Some(Vec2::new(width, height)),
        ..Default::default()
    };
    eframe::run_native(
        "Global Airport Data",
        options,
        Box::new(move |_cc| Box::new(ExplorerApp::new(config))),
    );
}
