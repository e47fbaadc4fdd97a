//! UI widgets for the application

mod helpers;
mod query_editor;
mod results_table;
mod schema_tree;
mod suggestions;

pub use helpers::{format_cell, truncate_to_width};
pub use query_editor::{draw_query_input, query_input_height};
pub use results_table::draw_results_panel;
pub use schema_tree::draw_schema_explorer;
pub use suggestions::draw_suggestions;
