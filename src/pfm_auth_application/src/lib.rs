pub mod responses;
pub mod side_effect;
pub mod use_cases;

mod session;

#[cfg(test)]
mod test_support;

pub use responses::{
    AuthSession, FORGOT_PASSWORD_MESSAGE, MessageResponse, PASSWORD_RESET_MESSAGE, UserProfile,
};
pub use side_effect::{SideEffect, best_effort};
pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    forgot_password::{ForgotPasswordUseCase, RESET_EMAIL_SUBJECT},
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    profile::{ProfileError, ProfileUseCase, UpdateProfileRequest},
    refresh::{RefreshError, RefreshUseCase},
    register::{RegisterError, RegisterRequest, RegisterUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
};
