pub mod api_error;
pub mod calendar;
pub mod geocoding;
pub mod validation;
pub mod weather;
