use crate::layout::{BubbleLayout, ChartLayout};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Bubbles,
    Sectors,
    Years,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Bubbles => Page::Sectors,
            Page::Sectors => Page::Years,
            Page::Years => Page::Bubbles,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Bubbles => Page::Years,
            Page::Sectors => Page::Bubbles,
            Page::Years => Page::Sectors,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Bubbles => "Bubbles",
            Page::Sectors => "Sectors",
            Page::Years => "Year Rings",
        }
    }
}

pub struct App {
    pub layout: ChartLayout,
    pub state: TableState,
    pub sectors_state: TableState,
    pub years_state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
}

impl App {
    pub fn new(layout: ChartLayout) -> Self {
        let mut state = TableState::default();
        if !layout.bubbles.is_empty() {
            state.select(Some(0));
        }

        let mut sectors_state = TableState::default();
        sectors_state.select(Some(0));

        let mut years_state = TableState::default();
        years_state.select(Some(0));

        Self {
            layout,
            state,
            sectors_state,
            years_state,
            current_page: Page::Bubbles,
            show_detail: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_bubble(&self) -> Option<&BubbleLayout> {
        self.state.selected().and_then(|i| self.layout.bubbles.get(i))
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn active(&mut self) -> (&mut TableState, usize) {
        match self.current_page {
            Page::Bubbles => (&mut self.state, self.layout.bubbles.len()),
            Page::Sectors => (&mut self.sectors_state, self.layout.sectors.len()),
            Page::Years => (&mut self.years_state, self.layout.rings.len()),
        }
    }

    pub fn next(&mut self) {
        let (state, len) = self.active();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.active();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn first(&mut self) {
        let (state, len) = self.active();
        if len > 0 {
            state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let (state, len) = self.active();
        if len > 0 {
            state.select(Some(len - 1));
        }
    }

    /// Number of bubbles showing their name
    pub fn named_count(&self) -> usize {
        self.layout
            .bubbles
            .iter()
            .filter(|b| b.text.line_count > 1)
            .count()
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Bubbles {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Bubble list
                Constraint::Percentage(40), // Detail panel
            ])
            .split(chunks[1]);

        render_bubbles(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Bubbles => render_bubbles(f, chunks[1], app),
            Page::Sectors => render_sectors(f, chunks[1], app),
            Page::Years => render_years(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn table_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Bubbles, Page::Sectors, Page::Years];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Currencies: {}", app.layout.bubbles.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Named: {}", app.named_count()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn score_color(score: f64) -> Color {
    if score >= 0.66 {
        Color::Green
    } else if score >= 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn render_bubbles(f: &mut Frame, area: Rect, app: &mut App) {
    let header = header_row(&["Code", "Year", "Category", "Overall", "Cap", "Vol", "Radius", "Lines"]);

    let rows = app.layout.bubbles.iter().map(|b| {
        let c = &b.currency;
        let category = if b.centered {
            "(center)".to_string()
        } else {
            truncate(&c.record.category, 20)
        };

        Row::new(vec![
            Cell::from(c.record.code.clone()),
            Cell::from(c.record.year.to_string()),
            Cell::from(category),
            Cell::from(format!("{:.3}", c.overall_score)).style(Style::default().fg(score_color(c.overall_score))),
            Cell::from(format!("{:.3}", c.cap_score)),
            Cell::from(format!("{:.3}", c.vol_score)),
            Cell::from(format!("{:.1}", b.geometry.radius)),
            Cell::from(b.text.line_count.to_string()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(22),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(table_block(" Currencies "))
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_sectors(f: &mut Frame, area: Rect, app: &mut App) {
    let header = header_row(&["Category", "Members", "Start°", "End°", "Sweep°"]);

    let rows = app.layout.sectors.iter().map(|s| {
        Row::new(vec![
            Cell::from(truncate(&s.category, 24)),
            Cell::from(s.len().to_string()),
            Cell::from(format!("{:.1}", s.start_angle.to_degrees())),
            Cell::from(format!("{:.1}", s.end_angle.to_degrees())),
            Cell::from(format!("{:.1}", s.sweep().to_degrees())),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(table_block(" Category Sectors "))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.sectors_state);
}

fn render_years(f: &mut Frame, area: Rect, app: &mut App) {
    let header = header_row(&["Year", "Ring Radius", "Currencies"]);

    let rows = app.layout.rings.iter().map(|ring| {
        let count = app
            .layout
            .bubbles
            .iter()
            .filter(|b| !b.centered && b.currency.record.year == ring.year)
            .count();

        Row::new(vec![
            Cell::from(ring.year.to_string()),
            Cell::from(format!("{:.1}", ring.radius)),
            Cell::from(count.to_string()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [Constraint::Length(8), Constraint::Length(14), Constraint::Length(12)],
    )
    .header(header)
    .block(table_block(" Year Rings "))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.years_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (selected, total) = match app.current_page {
        Page::Bubbles => (app.state.selected(), app.layout.bubbles.len()),
        Page::Sectors => (app.sectors_state.selected(), app.layout.sectors.len()),
        Page::Years => (app.years_state.selected(), app.layout.rings.len()),
    };
    let selected = selected.map(|i| i + 1).unwrap_or(0);

    let mut status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
    ];

    for (key, label, color) in [
        ("Enter", " Details | ", Color::Yellow),
        ("Tab", " Page | ", Color::Yellow),
        ("↑/↓", " Nav | ", Color::Yellow),
        ("q", " Quit", Color::Red),
    ] {
        status_spans.push(Span::styled(key, Style::default().fg(color)));
        status_spans.push(Span::raw(label));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {}: ", label),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )])
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Bubble Details ");

    let bubble = match app.selected_bubble() {
        Some(b) => b,
        None => {
            f.render_widget(Paragraph::new("No currency selected").block(block), area);
            return;
        }
    };

    let c = &bubble.currency;
    let g = &bubble.geometry;

    let mut content = vec![
        Line::from(""),
        field("Code", c.record.code.clone()),
        field("Name", c.record.name.clone()),
        field("Inception", c.record.year.to_string()),
        field("Category", c.record.category.clone()),
        field("Market Cap", format!("{:.0}", c.record.market_cap)),
        field("30d Volume", format!("{:.0}", c.record.volume_30d)),
    ];
    if let Some(fork) = &c.record.fork_of {
        content.push(field("Hard-Fork Of", fork.clone()));
    }

    content.extend([
        Line::from(""),
        section("SCORES"),
        field("Overall", format!("{:.4}", c.overall_score)),
        field("Cap", format!("{:.4}  (arc {:.1}°)", c.cap_score, bubble.cap_arc_sweep().to_degrees())),
        field("Vol", format!("{:.4}  (arc {:.1}°)", c.vol_score, bubble.vol_arc_sweep().to_degrees())),
        Line::from(""),
        section("GEOMETRY"),
        field("Center", format!("({:.1}, {:.1})", g.center_x, g.center_y)),
        field("Radius", format!("{:.2}", g.radius)),
        field("Angle", format!("{:.2}°", g.angle.to_degrees())),
        field("Ring", format!("{:.1}", g.ring_radius)),
        Line::from(""),
        section("TEXT"),
        field("Font", format!("{:.2}px", bubble.text.font_size)),
    ]);

    for line in &bubble.text.lines {
        content.push(field(&format!("y={:.1}", line.y), line.text.clone()));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    f.render_widget(Paragraph::new(content).block(block), area);
}
