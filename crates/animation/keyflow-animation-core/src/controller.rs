//! AnimationController: binds one shared asset to a play state and advances it
//! once per host tick.
//!
//! Per tick:
//! 1. empty asset (total time 0) short-circuits with no values and no events
//! 2. raw time comes from the explicit tick time or the local clock; frame-based
//!    playback instead advances one nominal frame past the last sampled time
//! 3. the play mode decides the direction and clamps the raw time
//! 4. events in `[last_sampled, adjusted)` are dispatched to listeners
//! 5. if the adjusted time moved, the asset is evaluated at the wrapped time and
//!    the result is forwarded to the bound target

use std::cell::RefCell;
use std::rc::Rc;

use crate::asset::SharedAsset;
use crate::clock::{ClockSource, LocalClock};
use crate::config::ControllerCfg;
use crate::error::AnimationError;
use crate::inputs::{ControllerCommand, PlayMode, PlaybackStyle};
use crate::outputs::TickOutput;
use crate::raster::frame_duration;
use crate::structure::Mutator;
use crate::target::{AnimationTarget, EventListener};

pub struct AnimationController {
    asset: SharedAsset,
    clock: Rc<dyn ClockSource>,
    local_clock: LocalClock,
    play_mode: PlayMode,
    playback_style: PlaybackStyle,
    speed: f64,
    follows_global_speed: bool,
    global_scale: f64,
    scale_revision: u64,
    end_epsilon: f64,
    last_sampled_time: f64,
    last_direction: f64,
    target: Option<Rc<RefCell<dyn AnimationTarget>>>,
    listeners: Vec<Box<dyn EventListener>>,
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("asset", &self.asset.borrow().name())
            .field("play_mode", &self.play_mode)
            .field("playback_style", &self.playback_style)
            .field("speed", &self.speed)
            .field("follows_global_speed", &self.follows_global_speed)
            .field("last_sampled_time", &self.last_sampled_time)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AnimationController {
    pub fn new(asset: SharedAsset, clock: Rc<dyn ClockSource>, cfg: ControllerCfg) -> Self {
        let now = clock.now();
        let mut controller = Self {
            asset,
            global_scale: clock.scale(),
            scale_revision: clock.scale_revision(),
            clock,
            local_clock: LocalClock::new(now),
            play_mode: PlayMode::Loop,
            playback_style: cfg.playback_style,
            speed: cfg.speed,
            follows_global_speed: cfg.follows_global_speed,
            end_epsilon: cfg.end_epsilon_ms,
            last_sampled_time: 0.0,
            last_direction: 0.0,
            target: None,
            listeners: Vec::new(),
        };
        controller.set_play_mode(cfg.play_mode);
        controller.update_scale();
        controller
    }

    pub fn asset(&self) -> &SharedAsset {
        &self.asset
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Switch play mode. Entering [`PlayMode::Stop`] freezes the local clock at
    /// its current time; leaving it resumes from there.
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        if mode == self.play_mode {
            return;
        }
        log::debug!("controller: play mode {:?} -> {:?}", self.play_mode, mode);
        self.play_mode = mode;
        self.update_scale();
    }

    pub fn playback_style(&self) -> PlaybackStyle {
        self.playback_style
    }

    pub fn set_playback_style(&mut self, style: PlaybackStyle) {
        log::debug!("controller: playback {:?} -> {:?}", self.playback_style, style);
        self.playback_style = style;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.update_scale();
    }

    pub fn follows_global_speed(&self) -> bool {
        self.follows_global_speed
    }

    pub fn set_follows_global_speed(&mut self, follows: bool) {
        self.follows_global_speed = follows;
        self.update_scale();
    }

    /// Re-read the global clock scale. Called automatically at the start of a
    /// tick when the clock reports a new scale revision.
    pub fn on_global_scale_changed(&mut self) {
        self.global_scale = self.clock.scale();
        self.scale_revision = self.clock.scale_revision();
        self.update_scale();
    }

    /// Rate of the local clock relative to the clock source.
    pub fn effective_scale(&self) -> f64 {
        self.local_clock.scale()
    }

    pub fn bind_target(&mut self, target: Rc<RefCell<dyn AnimationTarget>>) {
        self.target = Some(target);
    }

    pub fn unbind_target(&mut self) -> Option<Rc<RefCell<dyn AnimationTarget>>> {
        self.target.take()
    }

    pub fn add_listener(&mut self, listener: impl EventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Last play-mode adjusted (unwrapped) sample time; lower bound of the next
    /// event query.
    pub fn last_sampled_time(&self) -> f64 {
        self.last_sampled_time
    }

    pub fn last_direction(&self) -> f64 {
        self.last_direction
    }

    /// Local clock time wrapped into the clip, 0 for an empty asset.
    pub fn current_time(&self) -> f64 {
        let total = self.asset.borrow_mut().sync_duration();
        if total <= 0.0 {
            return 0.0;
        }
        self.local_clock.get(self.clock.now()).rem_euclid(total)
    }

    /// Move the local timeline to `time` and apply the values there at once.
    pub fn jump_to(&mut self, time: f64) -> Option<Mutator> {
        self.local_clock.set(time, self.clock.now());
        self.last_sampled_time = time;

        let total = self.asset.borrow_mut().sync_duration();
        if total <= 0.0 {
            return None;
        }
        let direction = self.direction_at(time, total);
        self.last_direction = direction;
        let mutator =
            self.asset
                .borrow_mut()
                .evaluate(time.rem_euclid(total), direction, self.playback_style);
        self.forward(&mutator);
        Some(mutator)
    }

    pub fn jump_to_label(&mut self, label: &str) -> Result<Option<Mutator>, AnimationError> {
        let time = self.asset.borrow().label(label);
        match time {
            Some(time) => Ok(self.jump_to(time)),
            None => {
                log::warn!("controller: unknown label '{label}'");
                Err(AnimationError::LabelNotFound {
                    label: label.to_string(),
                })
            }
        }
    }

    pub fn apply(&mut self, cmd: ControllerCommand) -> Result<(), AnimationError> {
        match cmd {
            ControllerCommand::SetPlayMode { mode } => self.set_play_mode(mode),
            ControllerCommand::SetPlaybackStyle { style } => self.set_playback_style(style),
            ControllerCommand::SetSpeed { speed } => self.set_speed(speed),
            ControllerCommand::SetFollowsGlobalSpeed { follows } => {
                self.set_follows_global_speed(follows)
            }
            ControllerCommand::JumpTo { time } => {
                self.jump_to(time);
            }
            ControllerCommand::JumpToLabel { label } => {
                self.jump_to_label(&label)?;
            }
        }
        Ok(())
    }

    /// Advance using the local clock.
    pub fn tick(&mut self) -> TickOutput {
        self.advance(None)
    }

    /// Advance to `tick_time` (local ms) or, when `None`, to the local clock's
    /// current time.
    pub fn advance(&mut self, tick_time: Option<f64>) -> TickOutput {
        if self.clock.scale_revision() != self.scale_revision {
            self.on_global_scale_changed();
        }

        // Pick up structure edits before clamping.
        let (total, fps) = {
            let mut asset = self.asset.borrow_mut();
            (asset.sync_duration(), asset.fps())
        };
        if total == 0.0 {
            return TickOutput::default();
        }

        let mut raw = tick_time.unwrap_or_else(|| self.local_clock.get(self.clock.now()));
        if self.playback_style == PlaybackStyle::FrameBased {
            raw = self.last_sampled_time + frame_duration(fps);
        }
        let direction = self.direction_at(raw, total);
        let adjusted = self.clamp_to_play_mode(raw, total);
        self.last_direction = direction;

        let events = self.asset.borrow_mut().get_events_to_fire(
            self.last_sampled_time,
            adjusted,
            self.playback_style,
            direction,
        );
        for name in &events {
            log::trace!("controller: event '{name}'");
            for listener in &mut self.listeners {
                listener.on_event(name);
            }
        }

        log::trace!(
            "controller: raw {raw} adjusted {adjusted} last {} direction {direction}",
            self.last_sampled_time
        );
        if adjusted == self.last_sampled_time {
            return TickOutput {
                mutator: None,
                time: adjusted.rem_euclid(total),
                direction,
                events,
            };
        }

        self.last_sampled_time = adjusted;
        let wrapped = adjusted.rem_euclid(total);
        let mutator = self
            .asset
            .borrow_mut()
            .evaluate(wrapped, direction, self.playback_style);
        self.forward(&mutator);
        TickOutput {
            mutator: Some(mutator),
            time: wrapped,
            direction,
            events,
        }
    }

    fn direction_at(&self, time: f64, total: f64) -> f64 {
        match self.play_mode {
            PlayMode::Stop => 0.0,
            PlayMode::PlayOnce | PlayMode::PlayOnceStopAfter if time >= total => 0.0,
            PlayMode::ReverseLoop => -1.0,
            PlayMode::Loop | PlayMode::PlayOnce | PlayMode::PlayOnceStopAfter => 1.0,
        }
    }

    /// Play-once holds just before the end so the wrapped time does not
    /// restart at 0. Play-once-stop-after lands `end_epsilon` past the end,
    /// which wraps to just after the start.
    fn clamp_to_play_mode(&self, time: f64, total: f64) -> f64 {
        match self.play_mode {
            PlayMode::Stop => self.local_clock.offset(),
            PlayMode::PlayOnce if time >= total => total - self.end_epsilon,
            PlayMode::PlayOnceStopAfter if time >= total => total + self.end_epsilon,
            _ => time,
        }
    }

    fn update_scale(&mut self) {
        let scale = if self.play_mode == PlayMode::Stop {
            0.0
        } else if self.follows_global_speed {
            self.speed * self.global_scale
        } else {
            self.speed
        };
        self.local_clock.set_scale(scale, self.clock.now());
        log::debug!("controller: local clock scale {scale}");
    }

    fn forward(&self, mutator: &Mutator) {
        if let Some(target) = &self.target {
            target.borrow_mut().apply_values(mutator);
        }
    }
}
