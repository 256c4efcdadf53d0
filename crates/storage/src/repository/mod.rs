pub mod event;
pub mod event_participant;
pub mod notification;
pub mod participant;
pub mod school;
pub mod user;
