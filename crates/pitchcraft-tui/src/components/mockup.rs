use pitchcraft_core::Session;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Instagram-style post card: account header, the poster reference, an
/// action row, and the caption. Rendered on the preview and feedback
/// screens.
pub struct MockupCard<'a> {
    session: &'a Session,
}

impl<'a> MockupCard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn handle(&self) -> String {
        let name = self
            .session
            .client
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("client");
        name.to_lowercase().replace(' ', "")
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let card = Block::default().borders(Borders::ALL).title("Instagram");
        let inner = card.inner(area);
        frame.render_widget(card, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // account header
            Constraint::Min(4),   // poster
            Constraint::Length(1), // action row
            Constraint::Min(2),   // caption
        ])
        .split(inner);

        let initial = self
            .handle()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?');
        let header = Line::from(vec![
            Span::styled(
                format!("({initial}) "),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                self.handle(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Sponsored", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let poster_text = match &self.session.generated_image {
            Some(reference) if reference.starts_with("data:") => {
                "[generated poster - inline image data]".to_string()
            }
            Some(reference) => format!("[poster] {reference}"),
            None => "[no poster generated]".to_string(),
        };
        let poster = Paragraph::new(poster_text)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(poster, chunks[1]);

        frame.render_widget(
            Paragraph::new("♥ 1,024   💬 87   ↗ Share").style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );

        let caption = Line::from(vec![
            Span::styled(
                self.handle(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(self.session.caption_text.as_str()),
        ]);
        frame.render_widget(
            Paragraph::new(caption).wrap(Wrap { trim: false }),
            chunks[3],
        );
    }
}
