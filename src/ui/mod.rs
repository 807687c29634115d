pub mod central_panel_renderer;
pub mod control_panel_renderer;
pub mod log_panel_renderer;
pub mod map_renderer;
pub mod viewport;
