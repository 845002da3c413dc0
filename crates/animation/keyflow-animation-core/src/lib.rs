//! Keyflow Animation Core (engine-agnostic)
//!
//! Keyframe curves evaluated into nested numeric values, and a tick-driven
//! controller that plays them back:
//! - [`Keyframe`] / [`SegmentFunction`] / [`Sequence`]: per-attribute cubic curves
//! - [`AnimationStructure`] / [`AnimationAsset`]: a tree of sequences with labels,
//!   events and cached reverse/rastered variants
//! - [`AnimationController`]: play modes, playback styles, speed and event firing
//!
//! Everything is single-threaded; assets are shared between controllers through
//! [`SharedAsset`].

pub mod asset;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod inputs;
pub mod keyframe;
pub mod outputs;
pub mod raster;
pub mod segment;
pub mod sequence;
pub mod stored_animation;
pub mod structure;
pub mod target;
pub mod variant;

// Re-exports for consumers (adapters)
pub use asset::{AnimationAsset, SharedAsset};
pub use clock::{ClockSource, LocalClock, ManualClock};
pub use config::{Config, ControllerCfg};
pub use controller::AnimationController;
pub use error::AnimationError;
pub use events::EventTimes;
pub use inputs::{ControllerCommand, PlayMode, PlaybackStyle};
pub use keyframe::Keyframe;
pub use outputs::TickOutput;
pub use segment::SegmentFunction;
pub use sequence::Sequence;
pub use stored_animation::{animation_to_json, parse_animation_json};
pub use structure::{AnimationStructure, Mutator, MutatorVisitor};
pub use target::{AnimationTarget, EventListener, PathTarget};
pub use variant::StructureVariant;
