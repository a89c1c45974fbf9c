//! Registry commands

mod login;
mod logout;

pub use login::{execute as login, LoginArgs};
pub use logout::{execute as logout, LogoutArgs};
