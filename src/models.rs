pub mod booking;
pub mod catalog;
pub mod guest;
pub mod review;
