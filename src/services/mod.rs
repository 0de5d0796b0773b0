pub mod admin_sessions;
pub mod chat;
pub mod events;
pub mod registrations;
pub mod reports;
pub mod users;
