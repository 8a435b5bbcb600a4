pub mod snake;
pub mod stats;
pub mod svg;
pub mod top_langs;
