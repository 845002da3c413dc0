//! AnimationAsset: a named clip holding the canonical structure, labels and
//! events, plus lazily built derived variants.
//!
//! Cache policy:
//! - `set_frames_per_second` clears structure and event-time caches.
//! - `add_event` / `remove_event` clear only the event-time cache.
//! - `recompute_duration` clears both; callers invoke it after editing keys.
//! - `structure_mut` marks the duration stale; the next `sync_duration` (run by
//!   `get_structure` / `get_event_times` and once per controller tick) re-derives
//!   the total time and drops every cache if it drifted.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use hashbrown::HashMap;
use uuid::Uuid;

use crate::config::{validate_fps, Config, DEFAULT_FPS};
use crate::error::AnimationError;
use crate::events::{self, EventTimes};
use crate::inputs::PlaybackStyle;
use crate::raster;
use crate::structure::{AnimationStructure, Mutator};
use crate::variant::StructureVariant;

/// Asset handle shared by every controller playing it.
pub type SharedAsset = Rc<RefCell<AnimationAsset>>;

#[derive(Debug)]
pub struct AnimationAsset {
    name: String,
    id_resource: String,
    total_time: f64,
    fps: f64,
    sps: f64,
    labels: BTreeMap<String, f64>,
    events: EventTimes,
    structure: Rc<AnimationStructure>,
    duration_dirty: bool,
    structures: HashMap<StructureVariant, Rc<AnimationStructure>>,
    event_times: HashMap<StructureVariant, Rc<EventTimes>>,
}

impl AnimationAsset {
    pub fn new(name: impl Into<String>, structure: AnimationStructure) -> Self {
        Self::with_config(name, structure, &Config::default())
    }

    pub fn with_config(
        name: impl Into<String>,
        structure: AnimationStructure,
        cfg: &Config,
    ) -> Self {
        let mut asset = Self {
            name: name.into(),
            id_resource: format!("Animation|{}", Uuid::new_v4()),
            total_time: 0.0,
            fps: validate_fps(cfg.fps).unwrap_or_else(|err| {
                log::warn!("{err}; using {DEFAULT_FPS} fps");
                DEFAULT_FPS
            }),
            sps: cfg.sps,
            labels: BTreeMap::new(),
            events: EventTimes::new(),
            structure: Rc::new(structure),
            duration_dirty: false,
            structures: HashMap::new(),
            event_times: HashMap::new(),
        };
        asset.recompute_duration();
        asset
    }

    pub fn into_shared(self) -> SharedAsset {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id_resource(&self) -> &str {
        &self.id_resource
    }

    pub fn set_id_resource(&mut self, id: impl Into<String>) {
        self.id_resource = id.into();
    }

    /// Latest last-key time over all leaf sequences, in ms.
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Change the raster rate. Drops every derived variant. Rates that are not
    /// finite and positive are rejected and the current rate is kept.
    pub fn set_frames_per_second(&mut self, fps: f64) -> Result<(), AnimationError> {
        self.fps = validate_fps(fps)?;
        self.clear_caches();
        Ok(())
    }

    #[inline]
    pub fn sps(&self) -> f64 {
        self.sps
    }

    pub fn set_sps(&mut self, sps: f64) {
        self.sps = sps;
    }

    pub fn labels(&self) -> &BTreeMap<String, f64> {
        &self.labels
    }

    pub fn label(&self, name: &str) -> Option<f64> {
        self.labels.get(name).copied()
    }

    pub fn set_label(&mut self, name: impl Into<String>, time: f64) -> Option<f64> {
        self.labels.insert(name.into(), time)
    }

    pub fn remove_label(&mut self, name: &str) -> Option<f64> {
        self.labels.remove(name)
    }

    pub fn events(&self) -> &EventTimes {
        &self.events
    }

    pub fn event(&self, name: &str) -> Option<f64> {
        self.events.get(name).copied()
    }

    /// Add or move an event. Drops the event-time cache.
    pub fn add_event(&mut self, name: impl Into<String>, time: f64) -> Option<f64> {
        let previous = self.events.insert(name.into(), time);
        self.clear_event_cache();
        previous
    }

    pub fn remove_event(&mut self, name: &str) -> Result<f64, AnimationError> {
        let time = self
            .events
            .remove(name)
            .ok_or_else(|| AnimationError::EventNotFound { name: name.into() })?;
        self.clear_event_cache();
        Ok(time)
    }

    /// Canonical (normal) structure.
    pub fn structure(&self) -> &AnimationStructure {
        &self.structure
    }

    /// Mutable access to the canonical structure. Call
    /// [`AnimationAsset::recompute_duration`] once edits are done; edits that
    /// change the duration are also picked up by the next
    /// [`AnimationAsset::sync_duration`].
    pub fn structure_mut(&mut self) -> &mut AnimationStructure {
        self.duration_dirty = true;
        Rc::make_mut(&mut self.structure)
    }

    pub fn set_structure(&mut self, structure: AnimationStructure) {
        self.structure = Rc::new(structure);
        self.recompute_duration();
    }

    /// Recompute `total_time` from the canonical structure and drop every
    /// derived variant.
    pub fn recompute_duration(&mut self) -> f64 {
        self.duration_dirty = false;
        self.total_time = self.structure.max_key_time();
        self.clear_caches();
        self.total_time
    }

    pub fn has_cached_structure(&self, variant: StructureVariant) -> bool {
        self.structures.contains_key(&variant)
    }

    pub fn has_cached_event_times(&self, variant: StructureVariant) -> bool {
        self.event_times.contains_key(&variant)
    }

    /// Structure for `variant`, built on first access and cached.
    pub fn get_structure(&mut self, variant: StructureVariant) -> Rc<AnimationStructure> {
        self.sync_duration();
        if let Some(cached) = self.structures.get(&variant) {
            return Rc::clone(cached);
        }

        let total = self.total_time;
        let fps = self.fps;
        let built = match variant {
            StructureVariant::Normal => return Rc::clone(&self.structure),
            StructureVariant::Reverse => self.structure.map_sequences(&mut |seq| seq.reversed(total)),
            StructureVariant::Rastered => raster::rasterize_structure(&self.structure, total, fps),
            StructureVariant::RasteredReverse => {
                let reverse = self.get_structure(StructureVariant::Reverse);
                raster::rasterize_structure(&reverse, total, fps)
            }
        };
        log::debug!(
            "animation '{}': built {:?} structure ({} sequences, total {} ms)",
            self.name,
            variant,
            built.sequence_count(),
            total
        );
        let built = Rc::new(built);
        self.structures.insert(variant, Rc::clone(&built));
        built
    }

    /// Event-time map for `variant`, built on first access and cached.
    pub fn get_event_times(&mut self, variant: StructureVariant) -> Rc<EventTimes> {
        self.sync_duration();
        if let Some(cached) = self.event_times.get(&variant) {
            return Rc::clone(cached);
        }

        let built = match variant {
            StructureVariant::Normal => self.events.clone(),
            StructureVariant::Reverse => events::reverse_event_times(&self.events, self.total_time),
            StructureVariant::Rastered => raster::rasterize_event_times(&self.events, self.fps),
            StructureVariant::RasteredReverse => {
                let reverse = self.get_event_times(StructureVariant::Reverse);
                raster::rasterize_event_times(&reverse, self.fps)
            }
        };
        log::debug!(
            "animation '{}': built {:?} event times ({} events)",
            self.name,
            variant,
            built.len()
        );
        let built = Rc::new(built);
        self.event_times.insert(variant, Rc::clone(&built));
        built
    }

    /// Evaluate the whole structure at `time` (ms, not wrapped).
    ///
    /// The variant follows the direction sign and playback style; see
    /// [`StructureVariant::for_evaluation`].
    pub fn evaluate(&mut self, time: f64, direction: f64, style: PlaybackStyle) -> Mutator {
        let variant = StructureVariant::for_evaluation(direction, style);
        self.get_structure(variant).evaluate(time)
    }

    /// Names of events whose time falls in the unwrapped interval `[min, max)`.
    ///
    /// The event-time variant follows [`StructureVariant::for_events`].
    pub fn get_events_to_fire(
        &mut self,
        min: f64,
        max: f64,
        style: PlaybackStyle,
        direction: f64,
    ) -> Vec<String> {
        if self.events.is_empty() {
            return Vec::new();
        }
        let variant = StructureVariant::for_events(direction, style);
        let times = self.get_event_times(variant);
        events::events_to_fire(&times, min, max, self.total_time)
    }

    /// Total time, re-derived first if the structure was borrowed mutably since
    /// the last sync. A changed duration drops every cache. Free otherwise.
    pub fn sync_duration(&mut self) -> f64 {
        if !self.duration_dirty {
            return self.total_time;
        }
        self.duration_dirty = false;
        let total = self.structure.max_key_time();
        if total != self.total_time {
            log::debug!(
                "animation '{}': total time drifted {} -> {} ms",
                self.name,
                self.total_time,
                total
            );
            self.total_time = total;
            self.clear_caches();
        }
        self.total_time
    }

    fn clear_caches(&mut self) {
        if !self.structures.is_empty() || !self.event_times.is_empty() {
            log::debug!("animation '{}': dropping cached variants", self.name);
        }
        self.structures.clear();
        self.event_times.clear();
    }

    fn clear_event_cache(&mut self) {
        self.event_times.clear();
    }
}
