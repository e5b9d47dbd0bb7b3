mod helpers;
mod login;
mod password_reset;
mod rate_limit;
mod session;
mod signup;
