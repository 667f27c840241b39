use rand::Rng;
use tracing::{debug, info, trace};

use crate::passage;
use crate::render::Renderer;
use crate::scoring::{self, score_input, Stats};
use crate::session::{EndTrigger, Phase, SessionConfig, SessionState};
use crate::timer::{TickId, TickSource, TICK_PERIOD};

/// Drives one typing test at a time: passage choice, countdown, scoring and results.
///
/// All display output goes through `R`, the countdown comes from `T`, and
/// passages are drawn with `G`. Events are delivered one at a time by the
/// caller, so nothing here is shared across threads.
pub struct Controller<R: Renderer, T: TickSource, G: Rng> {
    config: SessionConfig,
    state: SessionState,
    passage: &'static str,
    input: String,
    input_enabled: bool,
    renderer: R,
    ticker: T,
    rng: G,
}

impl<R: Renderer, T: TickSource, G: Rng> Controller<R, T, G> {
    /// Arms the first passage and shows a full countdown. Nothing starts
    /// until the first input event.
    pub fn new(config: SessionConfig, renderer: R, ticker: T, rng: G) -> Self {
        let mut controller = Self {
            config,
            state: SessionState::new(config),
            passage: passage::PASSAGES[0],
            input: String::new(),
            input_enabled: true,
            renderer,
            ticker,
            rng,
        };
        controller.passage = controller.select_passage();
        controller.render_passage(controller.passage);
        controller.renderer.set_countdown(controller.state.seconds_remaining);
        controller
    }

    pub fn select_passage(&mut self) -> &'static str {
        let chosen = passage::select_passage(&mut self.rng);
        debug!(passage = chosen, "selected passage");
        chosen
    }

    pub fn render_passage(&mut self, passage: &str) {
        self.renderer.render_passage(passage);
    }

    /// Starts the countdown. A no-op once the session has started.
    pub fn start_session(&mut self) {
        if self.state.started {
            return;
        }

        self.state.started = true;
        self.state.phase = Phase::Active;
        self.state.clear_counts();
        self.renderer.set_result_summary(None);
        self.state.tick = Some(self.ticker.schedule(TICK_PERIOD));

        info!(secs = self.state.duration_secs, "session started");
    }

    pub fn on_tick(&mut self, id: TickId) {
        if !self.state.is_active() || self.current_tick_id() != Some(id) {
            trace!(?id, "ignoring stale tick");
            return;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        self.renderer.set_countdown(self.state.seconds_remaining);

        if self.state.seconds_remaining == 0 {
            self.end_session();
        }
    }

    /// Rescores `current_input` against the passage from scratch.
    pub fn on_input_changed(&mut self, current_input: &str) {
        if self.state.has_finished() {
            return;
        }
        if self.input != current_input {
            self.input.clear();
            self.input.push_str(current_input);
        }
        if !self.state.started {
            self.start_session();
        }

        let card = score_input(self.passage, current_input);
        self.state.total_typed = card.total_typed;
        self.state.correct_chars = card.correct_chars;
        self.state.total_errors = card.total_errors;

        for (idx, tag) in card.tags.iter().enumerate() {
            self.renderer.set_cell_tag(idx, *tag);
        }

        let stats = Stats::compute(&card, self.state.elapsed_secs());
        self.renderer.set_result_summary(Some(stats.to_string()));

        if card.total_typed >= card.tags.len() {
            self.end_session();
        }
    }

    /// Stops the countdown and freezes the results. Safe to call repeatedly.
    pub fn end_session(&mut self) {
        if let Some(tick) = self.state.tick.take() {
            tick.cancel();
        }
        if self.state.has_finished() {
            return;
        }

        let trigger = if self.state.seconds_remaining == 0 {
            EndTrigger::Timeout
        } else {
            EndTrigger::Completion
        };
        self.state.phase = Phase::Terminal;
        self.state.ended_by = Some(trigger);
        self.input_enabled = false;
        self.renderer.set_input_enabled(false);

        let stats = self.stats();
        self.renderer.set_result_summary(Some(stats.to_string()));

        info!(
            %trigger,
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            errors = stats.errors,
            "session ended"
        );
    }

    /// Throws the current session away and arms a fresh passage.
    pub fn reset_session(&mut self) {
        if let Some(tick) = self.state.tick.take() {
            tick.cancel();
        }

        self.state = SessionState::new(self.config);
        self.input.clear();
        self.input_enabled = true;
        self.renderer.set_input_enabled(true);
        self.renderer.set_result_summary(None);

        self.passage = self.select_passage();
        self.render_passage(self.passage);
        self.renderer.set_countdown(self.state.seconds_remaining);

        info!("session reset");
    }

    pub fn type_char(&mut self, c: char) {
        if !self.input_enabled {
            return;
        }
        self.input.push(c);
        let text = self.input.clone();
        self.on_input_changed(&text);
    }

    pub fn backspace(&mut self) {
        if !self.input_enabled {
            return;
        }
        if self.input.pop().is_none() && !self.state.started {
            return;
        }
        let text = self.input.clone();
        self.on_input_changed(&text);
    }

    pub fn stats(&self) -> Stats {
        Stats {
            wpm: scoring::wpm(self.state.correct_chars, self.state.elapsed_secs()),
            accuracy: scoring::accuracy(self.state.correct_chars, self.state.total_typed),
            errors: self.state.total_errors,
        }
    }

    pub fn current_tick_id(&self) -> Option<TickId> {
        self.state.tick.as_ref().map(|tick| tick.id())
    }

    pub fn passage(&self) -> &'static str {
        self.passage
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    #[cfg(test)]
    fn set_passage(&mut self, passage: &'static str) {
        self.passage = passage;
        self.render_passage(passage);
    }
}
