/// Game loop controller.
///
/// Owns the session, the frame scheduler and the mixer.  Each delivered
/// frame runs one step of the running / paused / over state machine:
///
/// * running: tick, audio cues, render, reschedule
/// * paused: reschedule only
/// * over: stop music, report the final score, do not reschedule
///
/// Exactly one frame request is outstanding while a session is live.
/// Starting a new session cancels the previous request through its handle.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::assets::Sprite;
use crate::audio::{AudioSink, Cue, Mixer};
use crate::compute::{self, Bounce, TickEvents};
use crate::config::GameConfig;
use crate::display::{self, canvas::Canvas, Viewport};
use crate::entities::{Character, GameStatus, OverCause, Session, Theme};
use crate::error::{GameError, Result};
use crate::scheduler::{FrameHandle, FrameScheduler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalScore {
    pub distance: u64,
    pub stars: u32,
    pub cause: OverCause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The handle was not the outstanding one; nothing ran.
    Stale,
    /// A running tick was simulated and drawn.
    Rendered(TickEvents),
    /// Paused: nothing simulated, next frame requested.
    Skipped,
    /// The session has ended; no further frame was requested.
    Over(FinalScore),
}

pub struct GameLoop<S: AudioSink> {
    config: GameConfig,
    view: Viewport,
    scheduler: FrameScheduler,
    outstanding: Option<FrameHandle>,
    session: Option<Session>,
    mixer: Mixer<S>,
}

impl<S: AudioSink> GameLoop<S> {
    pub fn new(config: GameConfig, sink: S) -> Self {
        let mixer = Mixer::new(sink, &config.audio);
        Self {
            view: Viewport::from_config(&config.display),
            scheduler: FrameScheduler::new(config.display.fps),
            outstanding: None,
            session: None,
            mixer,
            config,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.view
    }

    pub fn mixer(&self) -> &Mixer<S> {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut Mixer<S> {
        &mut self.mixer
    }

    pub fn status(&self) -> Option<GameStatus> {
        self.session.as_ref().map(|s| s.status)
    }

    /// Handle of the outstanding frame request, if any.
    pub fn outstanding(&self) -> Option<FrameHandle> {
        self.outstanding
    }

    /// Reinitialise all session state for a `cols` x `rows` canvas and
    /// enter running.  Any frame still scheduled for a previous session is
    /// cancelled first.  A canvas with no room between the top and bottom
    /// margins is refused and leaves the current session untouched.
    pub fn start_session(
        &mut self,
        character: Character,
        theme: Theme,
        cols: u16,
        rows: u16,
        rng: &mut impl Rng,
        now: Instant,
    ) -> Result<()> {
        let (width, height) = self.view.pixel_size(cols, rows);
        let margin = self.config.tuning.edge_margin;
        if height <= 2.0 * margin {
            return Err(GameError::TerminalTooSmall {
                cols,
                rows,
                min_cols: cols,
                min_rows: (2.0 * margin / self.view.cell_height).floor() as u16 + 1,
            });
        }

        if let Some(handle) = self.outstanding.take() {
            self.scheduler.cancel(handle);
        }

        self.session = Some(compute::init_session(
            character,
            theme,
            width,
            height,
            self.config.tuning,
            &self.config.world,
            rng,
        ));
        tracing::info!(?character, ?theme, width, height, "Session started");

        self.mixer.stop_music();
        self.mixer.start_music();
        self.schedule(now)
    }

    fn schedule(&mut self, now: Instant) -> Result<()> {
        let handle = self.scheduler.request_frame(now)?;
        self.outstanding = Some(handle);
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// Tap / click.  Only takes effect while running.
    pub fn impulse(&mut self) -> bool {
        let applied = self.session.as_mut().map(compute::impulse).unwrap_or(false);
        if applied {
            self.mixer.cue(Cue::Jump);
        }
        applied
    }

    /// Flip between running and paused.  Returns the new status, or `None`
    /// if the session is in neither state.
    pub fn toggle_pause(&mut self) -> Option<GameStatus> {
        let session = self.session.as_mut()?;
        match session.status {
            GameStatus::Playing => {
                session.status = GameStatus::Paused;
                self.mixer.pause_music();
            }
            GameStatus::Paused => {
                session.status = GameStatus::Playing;
                self.mixer.resume_music();
            }
            GameStatus::ConfirmQuit | GameStatus::Over(_) => return None,
        }
        tracing::debug!(status = ?session.status, "Pause toggled");
        Some(session.status)
    }

    /// Show the quit prompt; the game holds while it is open.
    pub fn request_quit(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.status {
            GameStatus::Playing | GameStatus::Paused => {
                session.status = GameStatus::ConfirmQuit;
                self.mixer.pause_music();
                true
            }
            _ => false,
        }
    }

    /// Answer the quit prompt.  Confirming ends the session right away;
    /// declining resumes play.
    pub fn resolve_quit(&mut self, confirm: bool) -> Option<FinalScore> {
        let session = self.session.as_mut()?;
        if session.status != GameStatus::ConfirmQuit {
            return None;
        }
        if !confirm {
            session.status = GameStatus::Playing;
            self.mixer.resume_music();
            return None;
        }

        session.status = GameStatus::Over(OverCause::Quit);
        if let Some(handle) = self.outstanding.take() {
            self.scheduler.cancel(handle);
        }
        Some(self.finish())
    }

    /// Switch the backdrop theme.  Items, hazards and score are unaffected.
    pub fn set_theme(&mut self, theme: Theme, rng: &mut impl Rng) {
        if let Some(session) = self.session.as_mut() {
            compute::set_theme(session, theme, rng);
            tracing::debug!(?theme, "Theme changed");
        }
    }

    // ── Frames ───────────────────────────────────────────────────────────────

    /// Take the outstanding frame if it is due.
    pub fn fire_due(&mut self, now: Instant) -> Option<FrameHandle> {
        self.scheduler.fire_due(now)
    }

    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    /// Run one step for a delivered frame.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        canvas: &mut Canvas,
        rocket: Option<&Sprite>,
        now: Instant,
    ) -> Result<FrameOutcome> {
        if self.outstanding != Some(handle) {
            tracing::trace!(?handle, "Ignoring stale frame");
            return Ok(FrameOutcome::Stale);
        }
        self.outstanding = None;

        let Some(session) = self.session.as_mut() else {
            return Ok(FrameOutcome::Stale);
        };

        match session.status {
            GameStatus::Playing => {
                let events = compute::tick(session);
                display::render(canvas, session, &self.view, rocket);
                self.play_cues(&events);

                if self.session.as_ref().is_some_and(|s| s.status.is_over()) {
                    return Ok(FrameOutcome::Over(self.finish()));
                }
                self.schedule(now)?;
                Ok(FrameOutcome::Rendered(events))
            }
            GameStatus::Paused | GameStatus::ConfirmQuit => {
                self.schedule(now)?;
                Ok(FrameOutcome::Skipped)
            }
            GameStatus::Over(_) => Ok(FrameOutcome::Over(self.finish())),
        }
    }

    fn play_cues(&mut self, events: &TickEvents) {
        if events.bounce == Some(Bounce::Top) {
            self.mixer.cue(Cue::Bounce);
        }
        if events.collisions.collected > 0 {
            self.mixer.cue(Cue::Collect);
        }
        if events.collisions.hazards > 0 {
            self.mixer.cue(Cue::Hit);
        }
    }

    fn finish(&mut self) -> FinalScore {
        self.mixer.stop_music();
        let (distance, stars, cause) = match &self.session {
            Some(s) => (
                s.distance(),
                s.score,
                match s.status {
                    GameStatus::Over(cause) => cause,
                    _ => OverCause::Quit,
                },
            ),
            None => (0, 0, OverCause::Quit),
        };
        tracing::info!(distance, stars, ?cause, "Session over");
        FinalScore {
            distance,
            stars,
            cause,
        }
    }
}
