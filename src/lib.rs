pub mod app;
pub mod canvas;
pub mod editor;
pub mod io;
pub mod logging;
pub mod settings;
