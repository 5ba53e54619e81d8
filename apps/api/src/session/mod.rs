// Session: the profile form and current calendar, persisted as one local record.

pub mod controller;
pub mod handlers;
pub mod state;
pub mod store;
