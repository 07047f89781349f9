//! Render projection of the timer state

use serde::Serialize;

use super::{Mode, Phase, TimerState};

/// One mode selector as a renderer should draw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeButton {
    pub mode: Mode,
    pub label: &'static str,
    /// Highlighted as the mode that will run on start
    pub selected: bool,
    /// Hidden while another mode's session is active
    pub hidden: bool,
    /// Clickable only while the countdown is not running
    pub interactive: bool,
}

/// Everything a renderer needs to draw the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub display: String,
    pub seconds_left: u64,
    pub mode: Mode,
    pub mode_label: &'static str,
    pub phase: Phase,
    pub is_paused: bool,
    pub is_stopped: bool,
    pub start_pause_label: &'static str,
    pub give_up_visible: bool,
    pub mode_buttons: Vec<ModeButton>,
}

impl From<&TimerState> for TimerView {
    fn from(state: &TimerState) -> Self {
        let mode_buttons = Mode::ALL
            .into_iter()
            .map(|mode| ModeButton {
                mode,
                label: mode.label(),
                selected: state.is_stopped && state.mode == mode,
                hidden: !state.is_stopped && state.mode != mode,
                interactive: state.is_paused,
            })
            .collect();

        Self {
            display: state.display(),
            seconds_left: state.seconds_left,
            mode: state.mode,
            mode_label: state.mode.label(),
            phase: state.phase(),
            is_paused: state.is_paused,
            is_stopped: state.is_stopped,
            start_pause_label: if state.is_paused { "Start" } else { "Pause" },
            give_up_visible: !state.is_stopped,
            mode_buttons,
        }
    }
}
