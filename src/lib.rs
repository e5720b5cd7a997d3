pub mod backend;
pub mod completion;
pub mod document;
pub mod logging;
pub mod models;
