pub mod palette;
pub mod snake_svg;
