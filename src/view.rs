//! The [`View`] trait for anything written out as a file.

pub trait View {
    /// Name of the file the rendering is stored under.
    fn file_name(&self) -> String;

    fn render(&self) -> String;
}
