mod change_password;
mod login;
mod logout;
mod password_reset;
mod profile;
mod refresh;
