pub mod use_cases;

pub use use_cases::{
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    login::{LoginError, LoginUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    signup::{SignupError, SignupUseCase},
    validate_session::{ValidateSessionError, ValidateSessionUseCase},
};
