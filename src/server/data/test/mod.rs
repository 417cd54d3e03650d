mod channel;
mod event;
mod message;
mod user;
mod user_role;
