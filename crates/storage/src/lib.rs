#![forbid(unsafe_code)]

pub mod fixture;
pub mod repository;
pub mod sqlite;
