// Public job listings and employer posting management.

pub mod filters;
pub mod handlers;
