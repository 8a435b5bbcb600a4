#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(unsafe_code)]

pub mod app;
pub mod models;
pub mod view;
pub mod views;
