pub mod api;
pub mod config;
pub mod create_trip;
pub mod dashboard;
pub mod map;
pub mod session;
pub mod storage;
pub mod trip;
pub mod trip_detail;
pub mod user;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
