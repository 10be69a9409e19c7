pub mod background;
pub mod contents_json;
pub mod icon_gen;
