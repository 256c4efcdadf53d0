mod event;
mod event_participant;
mod notification;
mod participant;
mod school;
mod user;

pub use event::{Event, EventStatus};
pub use event_participant::EventParticipant;
pub use notification::{Notification, NotificationType};
pub use participant::{Gender, Participant};
pub use school::School;
pub use user::{User, UserRole};
