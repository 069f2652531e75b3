//! UI rendering and layout utilities.
//!
//! Pure helpers separated from application state: rect arithmetic in
//! `layout`, small widget builders (buttons, text fields, lists) in
//! `widgets`.

mod layout;
mod widgets;

pub use layout::{centered_fixed, centered_rect, inset_horizontal, top_right};
pub use widgets::{button_row, dialog_block, dim_style, input_line, list_lines, truncate_label};
