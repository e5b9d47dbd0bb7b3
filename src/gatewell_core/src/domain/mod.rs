pub mod email;
pub mod password;
pub mod principal;
pub mod reset_token;
pub mod role;
