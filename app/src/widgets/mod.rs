pub mod range_editor;
