//! Strategy Layer - Signal scorers
//!
//! Two deliberately separate variants: the momentum scorer consumes
//! estimated indicators, the launch scorer works from metadata alone for
//! tokens too young to have a snapshot.

pub mod scorer;
pub mod launch_scorer;

pub use scorer::MomentumScorer;
pub use launch_scorer::{estimate_token_price, LaunchScorer};

/// Age cutoff separating launch-phase tokens from established ones.
///
/// Tokens younger than this are scored on metadata by the launch scorer;
/// the momentum scorer skips them because their indicators are noise.
pub const EARLY_LAUNCH_WINDOW_MIN: f64 = 60.0;
