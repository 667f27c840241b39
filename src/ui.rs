use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthChar;

use crate::render::Renderer;
use crate::scoring::CellTag;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
/// Countdown turns red at or below this many seconds.
const LOW_TIME_SECS: u32 = 10;

/// Terminal-side state behind the render port.
#[derive(Debug, Clone)]
pub struct TerminalView {
    cells: Vec<(char, CellTag)>,
    countdown: u32,
    summary: Option<String>,
    input_enabled: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            countdown: 0,
            summary: None,
            input_enabled: true,
        }
    }

    pub fn cells(&self) -> &[(char, CellTag)] {
        &self.cells
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    fn passage_width(&self) -> usize {
        self.cells
            .iter()
            .map(|(c, _)| c.width().unwrap_or(0))
            .sum()
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalView {
    fn render_passage(&mut self, passage: &str) {
        self.cells = passage.chars().map(|c| (c, CellTag::Neutral)).collect();
    }

    fn set_cell_tag(&mut self, idx: usize, tag: CellTag) {
        if let Some(cell) = self.cells.get_mut(idx) {
            cell.1 = tag;
        }
    }

    fn set_countdown(&mut self, seconds_remaining: u32) {
        self.countdown = seconds_remaining;
    }

    fn set_result_summary(&mut self, summary: Option<String>) {
        self.summary = summary;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }
}

/// Whole typing screen: countdown, passage, input line, results and legend.
pub struct TypingScreen<'a> {
    pub view: &'a TerminalView,
    pub input: &'a str,
}

impl<'a> TypingScreen<'a> {
    pub fn new(view: &'a TerminalView, input: &'a str) -> Self {
        Self { view, input }
    }
}

impl Widget for TypingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.view;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let passage_width = view.passage_width();
        let prompt_occupied_lines = if passage_width <= max_chars_per_line as usize {
            1
        } else {
            ((passage_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(2),                     // countdown
                Constraint::Length(prompt_occupied_lines), // passage
                Constraint::Length(1),                     // padding
                Constraint::Length(2),                     // input
                Constraint::Length(2),                     // results
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        let countdown_style = if view.countdown <= LOW_TIME_SECS {
            Style::default().patch(bold_style).fg(Color::Red)
        } else {
            dim_bold_style
        };
        Paragraph::new(Span::styled(view.countdown.to_string(), countdown_style))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let cursor = self.input.chars().count();
        let spans = view
            .cells
            .iter()
            .enumerate()
            .map(|(idx, (c, tag))| match tag {
                CellTag::Correct => Span::styled(c.to_string(), green_bold_style),
                CellTag::Incorrect => Span::styled(
                    match *c {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    red_bold_style,
                ),
                CellTag::Neutral if idx == cursor && view.input_enabled => {
                    Span::styled(c.to_string(), underlined_dim_bold_style)
                }
                CellTag::Neutral => Span::styled(c.to_string(), dim_bold_style),
            })
            .collect::<Vec<Span>>();

        Paragraph::new(Line::from(spans))
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        let mut input_spans = vec![
            Span::styled("> ", dim_bold_style),
            Span::styled(self.input.to_string(), bold_style),
        ];
        if !view.input_enabled {
            input_spans.push(Span::styled("  (input disabled)", italic_style));
        }
        Paragraph::new(Line::from(input_spans))
            .style(if view.input_enabled {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::DIM)
            })
            .wrap(Wrap { trim: false })
            .render(chunks[4], buf);

        if let Some(summary) = view.summary() {
            Paragraph::new(Span::styled(
                summary.to_string(),
                Style::default().patch(bold_style).fg(Color::Cyan),
            ))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        Paragraph::new(Span::styled("(tab) reset / (esc)ape", italic_style))
            .render(chunks[7], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(view: &TerminalView, input: &str, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        TypingScreen::new(view, input).render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn view_with(passage: &str) -> TerminalView {
        let mut view = TerminalView::new();
        view.render_passage(passage);
        view.set_countdown(60);
        view
    }

    #[test]
    fn test_view_tracks_renderer_calls() {
        let mut view = view_with("abc");
        view.set_cell_tag(0, CellTag::Correct);
        view.set_cell_tag(1, CellTag::Incorrect);
        view.set_cell_tag(9, CellTag::Correct);
        view.set_result_summary(Some("WPM: 1".into()));
        view.set_input_enabled(false);

        assert_eq!(
            view.cells(),
            &[
                ('a', CellTag::Correct),
                ('b', CellTag::Incorrect),
                ('c', CellTag::Neutral)
            ]
        );
        assert_eq!(view.summary(), Some("WPM: 1"));
        assert!(!view.input_enabled());

        view.render_passage("xy");
        assert_eq!(view.cells().len(), 2);
        assert!(view.cells().iter().all(|(_, tag)| *tag == CellTag::Neutral));
    }

    #[test]
    fn test_screen_shows_passage_and_countdown() {
        let view = view_with("hello world");
        let out = rendered(&view, "", Rect::new(0, 0, 80, 20));
        assert!(out.contains("hello world"));
        assert!(out.contains("60"));
        assert!(out.contains("(tab) reset / (esc)ape"));
        assert!(!out.contains("WPM"));
    }

    #[test]
    fn test_screen_shows_summary_and_disabled_input() {
        let mut view = view_with("cat");
        view.set_result_summary(Some("WPM: 1 | Accuracy: 100.0% | Total Errors: 0".into()));
        view.set_input_enabled(false);
        let out = rendered(&view, "cat", Rect::new(0, 0, 80, 20));
        assert!(out.contains("WPM: 1 | Accuracy: 100.0% | Total Errors: 0"));
        assert!(out.contains("> cat"));
        assert!(out.contains("(input disabled)"));
    }

    #[test]
    fn test_incorrect_space_is_visible() {
        let mut view = view_with("a b");
        view.set_cell_tag(1, CellTag::Incorrect);
        let out = rendered(&view, "ax", Rect::new(0, 0, 80, 20));
        assert!(out.contains("a·b"));
    }

    #[test]
    fn test_cell_styles() {
        let mut view = view_with("ab");
        view.set_cell_tag(0, CellTag::Correct);
        let area = Rect::new(0, 0, 40, 20);
        let mut buffer = Buffer::empty(area);
        TypingScreen::new(&view, "a").render(area, &mut buffer);

        let cells = buffer.content();
        let a = cells.iter().find(|c| c.symbol() == "a").unwrap();
        assert_eq!(a.fg, Color::Green);
        let b = cells.iter().find(|c| c.symbol() == "b").unwrap();
        assert!(b.modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_long_passage_wraps_in_small_area() {
        let view = view_with(crate::passage::PASSAGES[4]);
        let area = Rect::new(0, 0, 30, 20);
        let mut buffer = Buffer::empty(area);
        TypingScreen::new(&view, "").render(area, &mut buffer);
        assert_eq!(*buffer.area(), area);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let view = view_with("hello");
        let area = Rect::new(0, 0, 8, 3);
        let mut buffer = Buffer::empty(area);
        TypingScreen::new(&view, "he").render(area, &mut buffer);
        assert_eq!(*buffer.area(), area);
    }
}
