use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::tui::component::Component;
use crate::tui::home::{CardText, HomeCard};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A single bordered card on the home screen.
///
/// Transient: built fresh each frame from a [`HomeCard`]. The primary line
/// is bold, the caption dimmed. The last-update card is right-aligned, the
/// rest are centered.
pub struct Card {
    text: CardText,
    alignment: Alignment,
    accent: Color,
    icon: Option<&'static str>,
}

impl Card {
    pub fn new(card: &HomeCard) -> Self {
        let (alignment, accent, icon) = match card {
            HomeCard::NoNetwork => (Alignment::Center, Color::Red, Some("⚠ ")),
            HomeCard::Temperature(_) => (Alignment::Center, Color::Yellow, None),
            HomeCard::Precipitation(_) => (Alignment::Center, Color::Cyan, None),
            HomeCard::Quote(_) => (Alignment::Center, Color::Green, None),
            HomeCard::LastUpdate(_) => (Alignment::Right, Color::DarkGray, None),
        };
        Self {
            text: card.text(),
            alignment,
            accent,
            icon,
        }
    }

    /// Height this card needs at the given width, borders included.
    ///
    /// Wrapping options match `Paragraph`'s word wrapping so the list can lay
    /// cards out without rendering them first.
    pub fn calculate_height(card: &HomeCard, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let rendered = Card::new(card);
        let options = || {
            textwrap::Options::new(content_width as usize)
                .break_words(true)
                .word_separator(textwrap::WordSeparator::AsciiSpace)
        };

        let primary = format!("{}{}", rendered.icon.unwrap_or(""), rendered.text.primary);
        let mut lines = textwrap::wrap(&primary, options()).len().max(1);
        if let Some(secondary) = &rendered.text.secondary {
            lines += textwrap::wrap(secondary, options()).len().max(1);
        }
        lines as u16 + VERTICAL_OVERHEAD
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let mut primary = Vec::with_capacity(2);
        if let Some(icon) = self.icon {
            primary.push(Span::styled(icon, Style::default().fg(self.accent)));
        }
        primary.push(Span::styled(
            self.text.primary.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        let mut lines = vec![Line::from(primary)];
        if let Some(secondary) = &self.text.secondary {
            lines.push(Line::from(Span::styled(
                secondary.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

impl Widget for &Card {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.accent).add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .alignment(self.alignment)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for Card {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&*self, area);
    }
}
