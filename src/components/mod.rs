pub mod alert_widget;
pub mod app;
pub mod aqi_map;
pub mod glyphs;
pub mod map_overlay;
