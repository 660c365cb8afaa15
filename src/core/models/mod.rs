pub mod announcement;
pub mod audit;
pub mod group;
pub mod user;
