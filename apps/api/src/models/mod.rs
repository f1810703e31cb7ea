pub mod application;
pub mod company;
pub mod job;
pub mod notification;
pub mod profile;
pub mod recommendation;
