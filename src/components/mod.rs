pub mod force_graph;
pub mod label_panel;
pub mod value_panel;
