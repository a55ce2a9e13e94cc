pub mod challenge_view;
pub mod language_picker;
pub mod lesson_complete;
pub mod lesson_path;
pub mod notice;
pub mod progress_bar;
pub mod stats_header;
