pub mod logging;
pub mod smtp;

pub use logging::LoggingConfirmationSender;
pub use smtp::Mailer;
pub use smtp::SmtpConfirmationSender;
