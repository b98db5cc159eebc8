pub mod advisor;
pub mod dashboard;
pub mod ticket;
