pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AuthServiceSetting, AuthSetting, EmailClientSetting, JwtSetting, MaintenanceSetting,
    PostgresSetting,
};
