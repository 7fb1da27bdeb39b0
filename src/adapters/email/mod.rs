pub mod disabled;
pub mod resend;

pub use disabled::DisabledNotifier;
pub use resend::ResendNotifier;
