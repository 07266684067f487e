mod form;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod forgot_password;
pub use forgot_password::ForgotPassword;

mod verify_email;
pub use verify_email::VerifyEmail;

mod onboarding;
pub use onboarding::Onboarding;

mod pages;
pub use pages::{Events, Expenses, Home, NotFound, Tasks};

mod settings;
pub use settings::Settings;
