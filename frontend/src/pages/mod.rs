pub mod create_trip;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod trip_detail;
