pub mod app;
pub mod config;
pub mod course;
pub mod event;
pub mod generator;
pub mod lesson;
pub mod session;
pub mod store;
pub mod ui;
