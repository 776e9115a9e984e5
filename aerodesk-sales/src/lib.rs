pub mod booking;
pub mod registration;

pub use booking::BookingService;
pub use registration::RegistrationService;
