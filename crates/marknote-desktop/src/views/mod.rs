//! Top-level screens

mod home;

pub use home::Home;
