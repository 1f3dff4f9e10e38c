//! The computational core of the pair report: calendar alignment of two
//! independently-timestamped series, trailing-window correlation with a
//! data-sufficiency sentinel, earnings date roll-forward, and percent
//! rebasing for the comparison chart.

pub mod align;
pub mod correlation;
pub mod earnings;
pub mod normalize;

pub use align::align;
pub use correlation::correlate;
pub use earnings::estimate_earnings;
pub use normalize::normalize;
