pub mod arcade_field;
pub mod chart;
pub mod key_list;
pub mod progress_bar;
pub mod results;
pub mod session_header;
pub mod typing_area;
