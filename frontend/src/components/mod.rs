pub mod dropdown;
pub mod map_component;
pub mod status_badge;
