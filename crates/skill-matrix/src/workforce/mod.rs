pub mod analytics;
pub mod domain;
pub mod notifications;
pub mod repository;
pub mod transfer;
