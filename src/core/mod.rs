pub mod errors;
pub mod forms;
pub mod models;
pub mod routing;
pub mod services;
pub mod slots;
pub mod stores;
