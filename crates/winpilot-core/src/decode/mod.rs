//! Decoders for the text and JSON payloads returned by collaborators.

mod errors;
mod handler;
mod types;

pub use errors::FormatError;
pub use handler::{
    decode_app_window_record, decode_bounds, decode_display_inventory, decode_geometry,
    decode_int_list, decode_window_record, parse_resolution, split_records,
};
pub use types::{RawDisplay, WindowRecord};
