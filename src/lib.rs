pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod repository;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Result, TaskError};
pub use repository::TaskRepository;
pub use store::Store;
pub use task::{Category, NewTask, Task};
