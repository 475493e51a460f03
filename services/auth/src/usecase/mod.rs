pub mod change_password;
pub mod reset_code;
pub mod reset_password;
pub mod sweep;
pub mod verify_code;
