//! Interactive screens: sign-in, sign-up, and the audio dashboard.

pub mod dashboard;
pub mod signin;
pub mod signup;

pub use dashboard::DashboardOutcome;
pub use signin::SignInOutcome;
pub use signup::SignUpOutcome;
