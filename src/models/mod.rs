pub mod events;
pub mod registrations;
pub mod requests;
pub mod users;
