//! Results view: renders display directives next to the report preview.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::Directive;
use crate::domain::AlertLevel;
use crate::tui::styles::MedicalTheme;

/// Results screen state
#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    /// Page directives, in display order
    pub page: Vec<Directive>,
    /// Formatted report text
    pub report: String,
    /// Vertical scroll of the directives pane
    pub scroll: u16,
    /// Vertical scroll of the report preview
    pub preview_scroll: u16,
    /// Outcome of the last export attempt
    pub status: Option<(AlertLevel, String)>,
}

impl ResultsState {
    #[must_use]
    pub fn new(page: Vec<Directive>, report: String) -> Self {
        Self {
            page,
            report,
            scroll: 0,
            preview_scroll: 0,
            status: None,
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Scroll the report preview by a page, never past its last line.
    pub fn page_preview(&mut self, down: bool) {
        const PAGE: u16 = 10;
        let last_line = u16::try_from(self.report.lines().count().saturating_sub(1))
            .unwrap_or(u16::MAX);
        self.preview_scroll = if down {
            self.preview_scroll.saturating_add(PAGE).min(last_line)
        } else {
            self.preview_scroll.saturating_sub(PAGE)
        };
    }
}

/// Render the results screen
pub fn render_results(f: &mut Frame, area: Rect, state: &ResultsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(4), // Footer: status + key hints
        ])
        .split(area);

    render_results_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_directives(f, columns[0], state);
    render_report_preview(f, columns[1], &state.report, state.preview_scroll);
    render_results_footer(f, chunks[2], state);
}

fn render_results_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Assessment Results", MedicalTheme::title()),
        Span::styled(" │ BMI, central obesity and risk", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn directive_lines(page: &[Directive]) -> Vec<Line<'_>> {
    let mut lines = Vec::with_capacity(page.len() + 8);

    for directive in page {
        match directive {
            Directive::Heading(title) => {
                if !lines.is_empty() {
                    lines.push(Line::raw(""));
                }
                lines.push(Line::from(Span::styled(
                    title.as_str(),
                    MedicalTheme::subtitle(),
                )));
            }
            Directive::Metric { label, value } => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label}  "), MedicalTheme::text_secondary()),
                    Span::styled(value.as_str(), MedicalTheme::selected()),
                ]));
            }
            Directive::Message { level, text } => {
                let style = MedicalTheme::alert(*level);
                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", MedicalTheme::alert_marker(*level)), style),
                    Span::styled(text.as_str(), style),
                ]));
            }
            Directive::Text(text) => {
                lines.push(Line::from(Span::styled(text.as_str(), MedicalTheme::text())));
            }
            Directive::Download(artifact) => {
                lines.push(Line::from(vec![
                    Span::styled("[E] ", MedicalTheme::key_hint()),
                    Span::styled(
                        format!(
                            "Save {} ({}, {} bytes)",
                            artifact.file_name,
                            artifact.mime,
                            artifact.bytes.len()
                        ),
                        MedicalTheme::text(),
                    ),
                ]));
            }
        }
    }

    lines
}

fn render_directives(f: &mut Frame, area: Rect, state: &ResultsState) {
    let body = Paragraph::new(directive_lines(&state.page))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border_focused()),
        );

    f.render_widget(body, area);
}

fn render_report_preview(f: &mut Frame, area: Rect, report: &str, scroll: u16) {
    let preview = Paragraph::new(report)
        .style(MedicalTheme::text_secondary())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(Span::styled(" Report preview ", MedicalTheme::focused()))
                .title_alignment(Alignment::Left)
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(preview, area);
}

fn render_results_footer(f: &mut Frame, area: Rect, state: &ResultsState) {
    let status = match &state.status {
        Some((level, message)) => {
            Line::from(Span::styled(message.as_str(), MedicalTheme::alert(*level)))
        }
        None => Line::raw(""),
    };
    let content = vec![
        status,
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Scroll ", MedicalTheme::key_desc()),
            Span::styled("[PgUp/PgDn] ", MedicalTheme::key_hint()),
            Span::styled("Scroll Report ", MedicalTheme::key_desc()),
            Span::styled("[E] ", MedicalTheme::key_hint()),
            Span::styled("Export Report ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Edit Inputs ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment ", MedicalTheme::key_desc()),
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
    ];

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
