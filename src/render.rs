use crate::scoring::CellTag;

/// Output port of the typing session.
///
/// The controller never touches the terminal directly; everything it wants
/// shown goes through these five calls.
pub trait Renderer {
    /// Replaces the whole cell sequence, one neutral cell per char.
    fn render_passage(&mut self, passage: &str);
    fn set_cell_tag(&mut self, idx: usize, tag: CellTag);
    fn set_countdown(&mut self, seconds_remaining: u32);
    /// `None` hides the summary.
    fn set_result_summary(&mut self, summary: Option<String>);
    fn set_input_enabled(&mut self, enabled: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    RenderPassage(String),
    SetCellTag(usize, CellTag),
    SetCountdown(u32),
    SetResultSummary(Option<String>),
    SetInputEnabled(bool),
}

/// Renderer that remembers what it was told, for tests.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub cells: Vec<(char, CellTag)>,
    pub countdown: Option<u32>,
    pub summary: Option<String>,
    pub input_enabled: bool,
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            countdown: None,
            summary: None,
            input_enabled: true,
            calls: Vec::new(),
        }
    }

    pub fn passage(&self) -> String {
        self.cells.iter().map(|(c, _)| c).collect()
    }

    pub fn tags(&self) -> Vec<CellTag> {
        self.cells.iter().map(|(_, tag)| *tag).collect()
    }

    pub fn all_neutral(&self) -> bool {
        self.cells.iter().all(|(_, tag)| *tag == CellTag::Neutral)
    }

    /// Every countdown value pushed so far, oldest first.
    pub fn countdown_history(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::SetCountdown(secs) => Some(*secs),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RecordingRenderer {
    fn render_passage(&mut self, passage: &str) {
        self.cells = passage.chars().map(|c| (c, CellTag::Neutral)).collect();
        self.calls.push(RenderCall::RenderPassage(passage.to_string()));
    }

    fn set_cell_tag(&mut self, idx: usize, tag: CellTag) {
        if let Some(cell) = self.cells.get_mut(idx) {
            cell.1 = tag;
        }
        self.calls.push(RenderCall::SetCellTag(idx, tag));
    }

    fn set_countdown(&mut self, seconds_remaining: u32) {
        self.countdown = Some(seconds_remaining);
        self.calls.push(RenderCall::SetCountdown(seconds_remaining));
    }

    fn set_result_summary(&mut self, summary: Option<String>) {
        self.summary = summary.clone();
        self.calls.push(RenderCall::SetResultSummary(summary));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.calls.push(RenderCall::SetInputEnabled(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_passage_replaces_cells() {
        let mut r = RecordingRenderer::new();
        r.render_passage("abc");
        r.set_cell_tag(1, CellTag::Incorrect);
        r.render_passage("abc");
        assert_eq!(r.passage(), "abc");
        assert!(r.all_neutral());

        r.render_passage("xy");
        assert_eq!(r.cells.len(), 2);
    }

    #[test]
    fn set_cell_tag_out_of_range_is_ignored() {
        let mut r = RecordingRenderer::new();
        r.render_passage("ab");
        r.set_cell_tag(5, CellTag::Correct);
        assert!(r.all_neutral());
    }

    #[test]
    fn countdown_history_in_order() {
        let mut r = RecordingRenderer::new();
        r.set_countdown(60);
        r.set_input_enabled(false);
        r.set_countdown(59);
        assert_eq!(r.countdown_history(), vec![60, 59]);
        assert_eq!(r.countdown, Some(59));
        assert!(!r.input_enabled);
    }
}
