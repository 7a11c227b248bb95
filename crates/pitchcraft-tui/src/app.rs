use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pitchcraft_core::{
    timer, wizard, CampaignInput, Client, FieldError, Session, SessionPatch, Step, TransitionError,
};
use pitchcraft_gateway::{fallback, BlockingGateway};
use pitchcraft_prompts::{poster, ReviewContext};
use pitchcraft_store::BlockingRelay;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use tracing::warn;

use crate::components::mockup::MockupCard;

/// Which campaign-form field currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Headline,
    Usp,
    Cta,
    VisualDescription,
}

impl FormField {
    const ALL: &[FormField] = &[
        FormField::Headline,
        FormField::Usp,
        FormField::Cta,
        FormField::VisualDescription,
    ];

    /// Field key matching the validation errors.
    fn name(&self) -> &'static str {
        match self {
            FormField::Headline => "headline",
            FormField::Usp => "usp",
            FormField::Cta => "cta",
            FormField::VisualDescription => "visual_description",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FormField::Headline => "Headline",
            FormField::Usp => "Unique Selling Proposition",
            FormField::Cta => "Call to Action",
            FormField::VisualDescription => "Visual Description",
        }
    }

    fn index(&self) -> usize {
        FormField::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(&self) -> FormField {
        FormField::ALL[(self.index() + 1) % FormField::ALL.len()]
    }

    fn prev(&self) -> FormField {
        FormField::ALL[(self.index() + FormField::ALL.len() - 1) % FormField::ALL.len()]
    }
}

/// A generation queued by a key press. The event loop runs it after the
/// next draw so the busy indicator is on screen during the blocking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingGeneration {
    Poster,
    Caption,
    Feedback,
}

pub struct App {
    session: Session,
    gateway: BlockingGateway,
    relay: Option<BlockingRelay>,
    pending: Option<PendingGeneration>,

    // Welcome
    name_input: String,
    name_error: Option<String>,

    // Client selection
    roster: Vec<Client>,
    roster_state: ListState,

    // Campaign form
    form: CampaignInput,
    form_focus: FormField,
    form_errors: Vec<FieldError>,
    /// Local toggle between form and poster preview; never changes the step.
    show_poster_preview: bool,

    // Caption
    caption_input: String,
    caption_error: Option<String>,
    suggested_caption: Option<String>,
    caption_requested: bool,

    // Feedback
    feedback_scroll: u16,

    status_message: Option<String>,
}

impl App {
    pub fn new(gateway: BlockingGateway, relay: Option<BlockingRelay>) -> Self {
        let mut roster_state = ListState::default();
        roster_state.select(Some(0));
        Self {
            session: Session::default(),
            gateway,
            relay,
            pending: None,
            name_input: String::new(),
            name_error: None,
            roster: Client::roster(),
            roster_state,
            form: CampaignInput::default(),
            form_focus: FormField::Headline,
            form_errors: Vec::new(),
            show_poster_preview: false,
            caption_input: String::new(),
            caption_error: None,
            suggested_caption: None,
            caption_requested: false,
            feedback_scroll: 0,
            status_message: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn name_error(&self) -> Option<&str> {
        self.name_error.as_deref()
    }

    pub fn form_errors(&self) -> &[FieldError] {
        &self.form_errors
    }

    pub fn caption_error(&self) -> Option<&str> {
        self.caption_error.as_deref()
    }

    pub fn suggested_caption(&self) -> Option<&str> {
        self.suggested_caption.as_deref()
    }

    /// True while a screen is collecting free text, so 'q' must not quit.
    pub fn is_input_mode(&self) -> bool {
        match self.session.current_step {
            Step::Welcome => true,
            Step::CampaignForm => !self.show_poster_preview && !self.session.generating_image,
            Step::CaptionInput => !self.session.generating_caption,
            _ => false,
        }
    }

    // -- Timer --

    /// Recompute elapsed time from the session's own start timestamp.
    /// Writes back only when the whole-second value changed, and stops at
    /// the end of the countdown window. A reset clears `timer_start`, which
    /// stops the tick with no further bookkeeping.
    pub fn tick(&mut self) {
        if let Some(start) = self.session.timer_start {
            let elapsed = timer::elapsed_secs(start, Utc::now()).min(timer::COUNTDOWN_SECS);
            if elapsed != self.session.elapsed_secs {
                self.session.elapsed_secs = elapsed;
            }
        }
    }

    // -- Pending generations --

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run the queued generation. Blocks until the gateway resolves, which
    /// it always does: every operation is total.
    pub fn run_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let Some(client) = self.session.client.clone() else {
            return;
        };
        match pending {
            PendingGeneration::Poster => {
                let reference = self
                    .gateway
                    .generate_image(&self.session.campaign, client.kind);
                // Stock fallbacks are already durable; everything else is
                // best-effort re-hosted for a stable URL.
                let reference = if reference == fallback::stock_poster(client.kind) {
                    reference
                } else {
                    self.relay_best_effort(reference)
                };
                self.session.apply(SessionPatch {
                    generated_image: Some(reference),
                    generating_image: Some(false),
                    ..Default::default()
                });
                self.show_poster_preview = true;
            }
            PendingGeneration::Caption => {
                let text = self
                    .gateway
                    .generate_caption(&self.session.campaign, &client);
                self.suggested_caption = Some(text);
                self.session.generating_caption = false;
            }
            PendingGeneration::Feedback => {
                let review = self.gateway.generate_feedback(&ReviewContext {
                    client,
                    campaign: self.session.campaign.clone(),
                    caption_text: self.session.caption_text.clone(),
                    elapsed_secs: self.session.elapsed_secs,
                });
                self.session.generating_feedback = false;
                if let Err(e) =
                    wizard::record_review(&mut self.session, review.message, review.score)
                {
                    self.status_message = Some(e.to_string());
                }
            }
        }
    }

    fn relay_best_effort(&mut self, reference: String) -> String {
        let Some(relay) = &self.relay else {
            return reference;
        };
        let file_name = format!("poster-{}.png", Utc::now().timestamp());
        match relay.relay_image(&reference, &file_name) {
            Ok(url) => url,
            Err(e) => {
                warn!("asset relay failed, keeping generated reference: {e}");
                self.status_message = Some(format!("asset relay failed: {e}"));
                reference
            }
        }
    }

    // -- Key handling --

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;
        match self.session.current_step {
            Step::Welcome => self.handle_welcome_key(key),
            Step::ClientSelection => self.handle_client_selection_key(key),
            Step::Brief => self.handle_brief_key(key),
            Step::CampaignForm => self.handle_campaign_form_key(key),
            Step::CaptionInput => self.handle_caption_key(key),
            Step::Mockup => self.handle_mockup_key(key),
            Step::Feedback => self.handle_feedback_key(key),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => match wizard::start_run(&mut self.session, &self.name_input) {
                Ok(()) => self.name_error = None,
                Err(TransitionError::Invalid(errors)) => {
                    self.name_error = errors.into_iter().next().map(|e| e.message);
                }
                Err(e) => self.status_message = Some(e.to_string()),
            },
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.name_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_client_selection_key(&mut self, key: KeyEvent) {
        let selected = self.roster_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if selected > 0 {
                    self.roster_state.select(Some(selected - 1));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if selected + 1 < self.roster.len() {
                    self.roster_state.select(Some(selected + 1));
                }
            }
            KeyCode::Enter => {
                let client = self.roster[selected.min(self.roster.len() - 1)].clone();
                if let Err(e) = wizard::choose_client(&mut self.session, client) {
                    self.status_message = Some(e.to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_brief_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            if let Err(e) = wizard::accept_brief(&mut self.session, Utc::now()) {
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn handle_campaign_form_key(&mut self, key: KeyEvent) {
        if self.session.generating_image {
            return;
        }
        if self.show_poster_preview {
            match key.code {
                KeyCode::Enter => match wizard::proceed_to_caption(&mut self.session) {
                    Ok(()) => {
                        self.show_poster_preview = false;
                        self.request_caption_suggestion();
                    }
                    Err(e) => self.status_message = Some(e.to_string()),
                },
                // Back to the form; the committed step does not change.
                KeyCode::Esc => self.show_poster_preview = false,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form_focus = self.form_focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_focus = self.form_focus.prev(),
            KeyCode::Enter => {
                let Some(kind) = self.session.client.as_ref().map(|c| c.kind) else {
                    return;
                };
                let prompt = poster::assemble(&self.form, kind);
                match wizard::submit_campaign(&mut self.session, self.form.clone(), prompt) {
                    Ok(()) => {
                        self.form_errors.clear();
                        self.session.generating_image = true;
                        self.pending = Some(PendingGeneration::Poster);
                    }
                    Err(TransitionError::Invalid(errors)) => self.form_errors = errors,
                    Err(e) => self.status_message = Some(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.focused_field_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_field_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_caption_key(&mut self, key: KeyEvent) {
        if self.session.generating_caption {
            return;
        }
        match key.code {
            KeyCode::Tab => {
                if let Some(suggestion) = &self.suggested_caption {
                    self.caption_input = suggestion.clone();
                }
            }
            KeyCode::Enter => match wizard::submit_caption(&mut self.session, &self.caption_input)
            {
                Ok(()) => self.caption_error = None,
                Err(TransitionError::Invalid(errors)) => {
                    self.caption_error = errors.into_iter().next().map(|e| e.message);
                }
                Err(e) => self.status_message = Some(e.to_string()),
            },
            KeyCode::Backspace => {
                self.caption_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.caption_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_mockup_key(&mut self, key: KeyEvent) {
        if self.session.generating_feedback {
            return;
        }
        if key.code == KeyCode::Enter {
            self.session.generating_feedback = true;
            self.pending = Some(PendingGeneration::Feedback);
        }
    }

    fn handle_feedback_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.feedback_scroll = self.feedback_scroll.saturating_sub(1),
            KeyCode::Down => self.feedback_scroll = self.feedback_scroll.saturating_add(1),
            KeyCode::Enter => {
                if let Err(e) = wizard::play_again(&mut self.session) {
                    self.status_message = Some(e.to_string());
                } else {
                    self.reset_inputs();
                }
            }
            _ => {}
        }
    }

    fn request_caption_suggestion(&mut self) {
        if self.caption_requested {
            return;
        }
        self.caption_requested = true;
        self.session.generating_caption = true;
        self.pending = Some(PendingGeneration::Caption);
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.form_focus {
            FormField::Headline => &mut self.form.headline,
            FormField::Usp => &mut self.form.usp,
            FormField::Cta => &mut self.form.cta,
            FormField::VisualDescription => &mut self.form.visual_description,
        }
    }

    fn reset_inputs(&mut self) {
        self.pending = None;
        self.name_input.clear();
        self.name_error = None;
        self.roster_state.select(Some(0));
        self.form = CampaignInput::default();
        self.form_focus = FormField::Headline;
        self.form_errors.clear();
        self.show_poster_preview = false;
        self.caption_input.clear();
        self.caption_error = None;
        self.suggested_caption = None;
        self.caption_requested = false;
        self.feedback_scroll = 0;
        self.status_message = None;
    }

    // -- Rendering --

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.render_header(frame, chunks[0]);
        match self.session.current_step {
            Step::Welcome => self.render_welcome(frame, chunks[1]),
            Step::ClientSelection => self.render_client_selection(frame, chunks[1]),
            Step::Brief => self.render_brief(frame, chunks[1]),
            Step::CampaignForm => self.render_campaign_form(frame, chunks[1]),
            Step::CaptionInput => self.render_caption(frame, chunks[1]),
            Step::Mockup => self.render_mockup(frame, chunks[1]),
            Step::Feedback => self.render_feedback(frame, chunks[1]),
        }
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let step = self.session.current_step;
        let mut spans = vec![
            Span::styled(
                "pitchcraft",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}/7 {}", step.number(), step.title())),
        ];

        let timed_screen = matches!(step, Step::CampaignForm | Step::CaptionInput | Step::Mockup);
        if timed_screen {
            if let Some(start) = self.session.timer_start {
                let remaining = timer::remaining_secs(start, Utc::now());
                let style = if timer::is_alert(remaining) {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Blue)
                };
                spans.push(Span::raw("   Time Remaining "));
                spans.push(Span::styled(timer::format_clock(remaining), style));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = if let Some(status) = &self.status_message {
            status.clone()
        } else {
            match self.session.current_step {
                Step::Welcome => "type your name · Enter start · Ctrl+C quit".into(),
                Step::ClientSelection => "↑/↓ select · Enter choose · q quit".into(),
                Step::Brief => "Enter start campaign (10:00 timer) · q quit".into(),
                Step::CampaignForm if self.show_poster_preview => {
                    "Enter continue to caption · Esc back to form".into()
                }
                Step::CampaignForm => "Tab next field · Enter generate poster".into(),
                Step::CaptionInput => "Tab use suggestion · Enter create mockup".into(),
                Step::Mockup => "Enter submit to client · q quit".into(),
                Step::Feedback => "↑/↓ scroll · Enter play again · q quit".into(),
            }
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    fn render_welcome(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Ten-Minute Marketer",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::raw("Experience the life of a social media marketer!"),
            Line::raw("Create an Instagram post for a client in under 10 minutes."),
            Line::raw(""),
            Line::raw("What's your name?"),
            Line::from(Span::styled(
                format!("{}▌", self.name_input),
                Style::default().fg(Color::Yellow),
            )),
        ];
        if let Some(error) = &self.name_error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        let welcome = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Welcome"));
        frame.render_widget(welcome, area);
    }

    fn render_client_selection(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .roster
            .iter()
            .map(|client| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            client.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!(
                                "  {} · {}",
                                client.kind.display_name(),
                                client.personality.display_name()
                            ),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::raw(format!("  {}", client.description)),
                    Line::raw(""),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Choose Your Client"),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.roster_state);
    }

    fn render_brief(&self, frame: &mut Frame, area: Rect) {
        let Some(client) = &self.session.client else {
            return;
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    client.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  {} · {}",
                        client.kind.display_name(),
                        client.personality.display_name()
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                client.brief(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Your Task",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(format!(
                "You have 10 minutes to create an Instagram post for {}. You'll fill out \
                 a campaign form, generate a poster image, write a caption, and submit \
                 your work for feedback.",
                client.name
            )),
        ];
        let brief = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Your Brief"));
        frame.render_widget(brief, area);
    }

    fn render_campaign_form(&self, frame: &mut Frame, area: Rect) {
        if self.session.generating_image {
            frame.render_widget(
                Paragraph::new("Generating poster image...")
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default().borders(Borders::ALL).title("Campaign Form")),
                area,
            );
            return;
        }

        if self.show_poster_preview {
            let reference = self
                .session
                .generated_image
                .as_deref()
                .unwrap_or("(no poster)");
            let text = if reference.starts_with("data:") {
                "[generated poster - inline image data]".to_string()
            } else {
                reference.to_string()
            };
            frame.render_widget(
                Paragraph::new(text)
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Generated Poster"),
                    ),
                area,
            );
            return;
        }

        let mut lines = Vec::new();
        for &field in FormField::ALL {
            let focused = field == self.form_focus;
            let marker = if focused { "> " } else { "  " };
            let value = match field {
                FormField::Headline => &self.form.headline,
                FormField::Usp => &self.form.usp,
                FormField::Cta => &self.form.cta,
                FormField::VisualDescription => &self.form.visual_description,
            };
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", field.label()),
                label_style,
            )));
            let shown = if focused {
                format!("  {value}▌")
            } else {
                format!("  {value}")
            };
            lines.push(Line::from(Span::styled(
                shown,
                Style::default().fg(Color::Yellow),
            )));
            if let Some(error) = self.form_errors.iter().find(|e| e.field == field.name()) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", error.message),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::raw(""));
        }

        let form = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Campaign Form"),
        );
        frame.render_widget(form, area);
    }

    fn render_caption(&self, frame: &mut Frame, area: Rect) {
        let chunks =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

        let suggestion_text = if self.session.generating_caption {
            "Generating caption suggestion...".to_string()
        } else {
            self.suggested_caption
                .clone()
                .unwrap_or_else(|| "(no suggestion)".to_string())
        };
        frame.render_widget(
            Paragraph::new(suggestion_text)
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(Color::Blue))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Suggested Caption (Tab to use)"),
                ),
            chunks[0],
        );

        let mut lines = vec![Line::from(Span::styled(
            format!("{}▌", self.caption_input),
            Style::default().fg(Color::Yellow),
        ))];
        if let Some(error) = &self.caption_error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Your Caption")),
            chunks[1],
        );
    }

    fn render_mockup(&self, frame: &mut Frame, area: Rect) {
        if self.session.generating_feedback {
            frame.render_widget(
                Paragraph::new("Submitting to client, awaiting feedback...")
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default().borders(Borders::ALL).title("Post Preview")),
                area,
            );
            return;
        }
        MockupCard::new(&self.session).render(frame, area);
    }

    fn render_feedback(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);

        let score = self
            .session
            .score
            .map(|s| format!("{s}/100"))
            .unwrap_or_else(|| "--".to_string());
        let contact = self
            .session
            .client
            .as_ref()
            .map(|c| format!("{} from {}", c.contact_name(), c.name))
            .unwrap_or_else(|| "your client".to_string());
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(format!("Feedback from {contact}   Score: ")),
                Span::styled(
                    score,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
            .block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(self.session.feedback_message.clone())
                .wrap(Wrap { trim: false })
                .scroll((self.feedback_scroll, 0))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Client Feedback"),
                ),
            chunks[1],
        );
    }
}
