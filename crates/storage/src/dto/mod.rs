pub mod common;
pub mod event;
pub mod notification;
pub mod participant;
pub mod school;
pub mod user;
