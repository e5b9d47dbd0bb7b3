pub mod client_origin;
pub mod sliding_window;

pub use client_origin::client_origin;
pub use sliding_window::SlidingWindowRateLimiter;
