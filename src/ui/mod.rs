pub mod icons;
pub mod output;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, not_found, source_block, success};
pub use theme::{theme, Theme};
