//! # FlipKit Registration
//!
//! The registration and flip-transform engine for two-sided machining.
//!
//! A part carries registration pin holes straddling a flip axis. After the
//! first side is machined the part is turned over on the fixture, and the
//! second-side job must be placed as the mirror (or half-turn) of the
//! first. The engine:
//!
//! 1. **Feature Set**: plain pins and an optional construction line
//! 2. **Axis Resolver**: candidate axis from a stock bounding box or an explicit line
//! 3. **Pin-Pair Matcher**: every pin has a partner across the axis, and
//!    all pairs agree on one midline
//! 4. **Transform Builder**: `Ti * R * T` for reflection or 180° rotation
//! 5. **Job Mirror Applier**: writes `transform * source` into target
//!    placements, all or nothing
//!
//! Every call is a pure computation over caller-supplied values; the engine
//! keeps no state between calls and never logs its own errors.

pub mod applier;
pub mod axis;
pub mod error;
pub mod feature_set;
pub mod flip;
pub mod matcher;
pub mod midline;

pub use applier::{apply_transform, BodyCorrespondence, BodyId, MirrorReport, PlacedBody, StockPair};
pub use axis::{resolve_candidate_axis, Axis, AxisSource, FlipDirection};
pub use error::{ErrorKind, RegistrationError, RegistrationResult};
pub use feature_set::{ConstructionLine, FeatureSet, Pin};
pub use flip::{build_flip_transform, flip_linear, FlipMode};
pub use matcher::{match_pins, pair_pins, search_axis, PinMatch, PinPair, PinPairing};
pub use midline::{bin_stations, resolve_midline, Station};
