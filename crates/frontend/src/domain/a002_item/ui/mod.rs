pub mod line_editor;

pub use line_editor::{ItemLinesEditor, LineVm};
