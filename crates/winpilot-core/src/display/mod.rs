mod layout;
mod types;

pub use layout::{build_layout, fallback_layout};
pub use types::{DisplayLayout, DisplayRegion, FALLBACK_DISPLAY_NAME, FallbackReason};
