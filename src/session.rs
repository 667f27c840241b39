use crate::timer::TickHandle;

/// Longest session a user can ask for, in seconds.
pub const MAX_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub number_of_secs: u32,
}

impl SessionConfig {
    /// Clamps the duration into `1..=MAX_SECS`.
    pub fn new(number_of_secs: u32) -> Self {
        Self {
            number_of_secs: number_of_secs.clamp(1, MAX_SECS),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            number_of_secs: MAX_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Active,
    Terminal,
}

/// How a session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EndTrigger {
    Timeout,
    Completion,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub duration_secs: u32,
    pub seconds_remaining: u32,
    pub started: bool,
    pub phase: Phase,
    pub total_typed: usize,
    pub correct_chars: usize,
    pub total_errors: usize,
    pub ended_by: Option<EndTrigger>,
    /// Present only while the countdown is running.
    pub tick: Option<TickHandle>,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            duration_secs: config.number_of_secs,
            seconds_remaining: config.number_of_secs,
            started: false,
            phase: Phase::Idle,
            total_typed: 0,
            correct_chars: 0,
            total_errors: 0,
            ended_by: None,
            tick: None,
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs - self.seconds_remaining
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn clear_counts(&mut self) {
        self.total_typed = 0;
        self.correct_chars = 0;
        self.total_errors = 0;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
