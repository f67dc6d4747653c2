//! Ratatui-based terminal UI.
//!
//! Three pages mirror the product's navigation: a home page with the
//! overview chart, a "story telling" page of prebuilt analyses, and a
//! "create chart" page where the user picks a chart kind and attributes.
//! Every selection change rebuilds the figure wholesale through the shared
//! request pipeline; the previous chart is dropped, never patched.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::chart::Figure;
use crate::domain::{AppConfig, ChartRequest, Dataset, RankMetric};
use crate::error::AppError;
use crate::query;

mod plotters_chart;

use plotters_chart::FigureWidget;

/// Start the TUI over an already-loaded dataset.
pub fn run(dataset: Dataset, config: AppConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dataset, config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    Story,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoryTab {
    Correlation,
    YearTrend,
    AvgEarning,
    Descriptive,
}

impl StoryTab {
    const ALL: [StoryTab; 4] = [
        StoryTab::Correlation,
        StoryTab::YearTrend,
        StoryTab::AvgEarning,
        StoryTab::Descriptive,
    ];

    fn label(self) -> &'static str {
        match self {
            StoryTab::Correlation => "Correlation",
            StoryTab::YearTrend => "Year trend",
            StoryTab::AvgEarning => "Average earning",
            StoryTab::Descriptive => "Descriptive statistics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreateTab {
    Histogram,
    Scatter,
    Pie,
    Bar,
    Ranking,
}

impl CreateTab {
    const ALL: [CreateTab; 5] = [
        CreateTab::Histogram,
        CreateTab::Scatter,
        CreateTab::Pie,
        CreateTab::Bar,
        CreateTab::Ranking,
    ];

    fn label(self) -> &'static str {
        match self {
            CreateTab::Histogram => "Histogram",
            CreateTab::Scatter => "Scatter",
            CreateTab::Pie => "Pie",
            CreateTab::Bar => "Bar",
            CreateTab::Ranking => "Top 10 ranking",
        }
    }
}

struct App {
    dataset: Dataset,
    config: AppConfig,
    page: Page,
    story_tab: StoryTab,
    create_tab: CreateTab,
    selected_field: usize,
    // Picker state. `None` means "nothing selected yet": by contract that
    // produces no chart and no error.
    hist_attr: Option<usize>,
    scatter_x: Option<usize>,
    scatter_y: Option<usize>,
    pie_year: Option<usize>,
    bar_attr: Option<usize>,
    rank_category: Option<usize>,
    rank_by: RankMetric,
    rank_categories: Vec<String>,
    pie_years: Vec<String>,
    figure: Option<Figure>,
    summary_text: String,
    status: String,
}

impl App {
    fn new(dataset: Dataset, config: AppConfig) -> Self {
        let rank_categories = query::ranking_categories(&dataset);
        let summaries = crate::stats::dataset_summary(&dataset.records);
        let summary_text = crate::report::format_summary(&dataset, &summaries);

        let mut app = Self {
            dataset,
            config,
            page: Page::Home,
            story_tab: StoryTab::Correlation,
            create_tab: CreateTab::Histogram,
            selected_field: 0,
            hist_attr: None,
            scatter_x: None,
            scatter_y: None,
            pie_year: None,
            bar_attr: None,
            rank_category: None,
            rank_by: RankMetric::Subscribers,
            rank_categories,
            pie_years: query::pie_year_labels(),
            figure: None,
            summary_text,
            status: "↑/↓ select, ←/→ adjust, q quits.".to_string(),
        };
        app.refresh_figure();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('h') | KeyCode::Esc => self.switch_page(Page::Home),
            KeyCode::Char('s') => self.switch_page(Page::Story),
            KeyCode::Char('c') => self.switch_page(Page::Create),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < self.field_count() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.page == Page::Home {
                    let target = if self.selected_field == 0 {
                        Page::Story
                    } else {
                        Page::Create
                    };
                    self.switch_page(target);
                }
            }
            _ => {}
        }
        false
    }

    fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.selected_field = 0;
        self.status = match page {
            Page::Home => "Home.".to_string(),
            Page::Story => "Story telling: ←/→ switches the view.".to_string(),
            Page::Create => "Create chart: pick a kind, then attributes.".to_string(),
        };
        self.refresh_figure();
    }

    fn field_count(&self) -> usize {
        match self.page {
            Page::Home => 2,
            Page::Story => 1,
            Page::Create => match self.create_tab {
                CreateTab::Histogram | CreateTab::Pie | CreateTab::Bar => 2,
                CreateTab::Scatter | CreateTab::Ranking => 3,
            },
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.page {
            Page::Home => {}
            Page::Story => {
                self.story_tab = cycle(&StoryTab::ALL, self.story_tab, delta);
                self.status = format!("view: {}", self.story_tab.label());
            }
            Page::Create => self.adjust_create_field(delta),
        }
        self.refresh_figure();
    }

    fn adjust_create_field(&mut self, delta: i32) {
        if self.selected_field == 0 {
            self.create_tab = cycle(&CreateTab::ALL, self.create_tab, delta);
            self.selected_field = 0;
            self.status = format!("chart: {}", self.create_tab.label());
            return;
        }

        let attrs = query::ATTRIBUTE_LABELS.len();
        match (self.create_tab, self.selected_field) {
            (CreateTab::Histogram, 1) => {
                self.hist_attr = step_option(self.hist_attr, attrs, delta);
            }
            (CreateTab::Scatter, 1) => {
                self.scatter_x = step_option(self.scatter_x, attrs, delta);
            }
            (CreateTab::Scatter, 2) => {
                self.scatter_y = step_option(self.scatter_y, attrs, delta);
            }
            (CreateTab::Pie, 1) => {
                self.pie_year = step_option(self.pie_year, self.pie_years.len(), delta);
            }
            (CreateTab::Bar, 1) => {
                self.bar_attr = step_option(self.bar_attr, attrs, delta);
            }
            (CreateTab::Ranking, 1) => {
                self.rank_category =
                    step_option(self.rank_category, self.rank_categories.len(), delta);
            }
            (CreateTab::Ranking, 2) => {
                self.rank_by = self.rank_by.toggle();
            }
            _ => {}
        }
    }

    /// The resolved request for the current page and picker state, if any.
    fn request(&self) -> Option<ChartRequest> {
        match self.page {
            Page::Home => Some(ChartRequest::Overview),
            Page::Story => match self.story_tab {
                StoryTab::Correlation => Some(ChartRequest::Correlation),
                StoryTab::YearTrend => Some(ChartRequest::YearTrend),
                StoryTab::AvgEarning => Some(ChartRequest::EarningsByCategory),
                StoryTab::Descriptive => None,
            },
            Page::Create => match self.create_tab {
                CreateTab::Histogram => query::histogram_request(attr_label(self.hist_attr)),
                CreateTab::Scatter => {
                    query::scatter_request(attr_label(self.scatter_x), attr_label(self.scatter_y))
                }
                CreateTab::Pie => {
                    query::pie_request(self.pie_year.and_then(|i| self.pie_years.get(i)).map(|s| s.as_str()))
                }
                CreateTab::Bar => query::bar_request(attr_label(self.bar_attr)),
                CreateTab::Ranking => query::ranking_request(
                    self.rank_category
                        .and_then(|i| self.rank_categories.get(i))
                        .map(|s| s.as_str()),
                    self.rank_by,
                    &self.rank_categories,
                ),
            },
        }
    }

    fn refresh_figure(&mut self) {
        self.figure = self
            .request()
            .map(|req| crate::app::pipeline::build_figure(&self.dataset, &self.config, &req));
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ytt", Style::default().fg(Color::Cyan)),
            Span::raw(" — YouTube channel statistics"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "rows: {} | categories: {} | created: {}-{} | source: {}",
                self.dataset.stats.n_rows,
                self.dataset.stats.n_categories,
                self.dataset.stats.year_min,
                self.dataset.stats.year_max,
                self.config.csv_path.display(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let settings_height = (self.field_count() as u16 + 2).max(4);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(settings_height)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = match &self.figure {
            Some(fig) => fig.title().to_string(),
            None if self.page == Page::Story && self.story_tab == StoryTab::Descriptive => {
                StoryTab::Descriptive.label().to_string()
            }
            None => "Chart".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.page == Page::Story && self.story_tab == StoryTab::Descriptive {
            let p = Paragraph::new(self.summary_text.as_str());
            frame.render_widget(p, inner);
            return;
        }

        let Some(figure) = &self.figure else {
            let msg = Paragraph::new("No chart yet: pick attributes with ←/→.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        frame.render_widget(FigureWidget { figure }, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = match self.page {
            Page::Home => vec![
                ListItem::new("Story telling"),
                ListItem::new("Create chart"),
            ],
            Page::Story => vec![ListItem::new(format!("View: {}", self.story_tab.label()))],
            Page::Create => {
                let mut items = vec![ListItem::new(format!("Chart: {}", self.create_tab.label()))];
                match self.create_tab {
                    CreateTab::Histogram => {
                        items.push(picker_item("Attribute", attr_label(self.hist_attr)));
                    }
                    CreateTab::Scatter => {
                        items.push(picker_item("X attribute", attr_label(self.scatter_x)));
                        items.push(picker_item("Y attribute", attr_label(self.scatter_y)));
                    }
                    CreateTab::Pie => {
                        items.push(picker_item(
                            "Year",
                            self.pie_year.and_then(|i| self.pie_years.get(i)).map(|s| s.as_str()),
                        ));
                    }
                    CreateTab::Bar => {
                        items.push(picker_item("Attribute", attr_label(self.bar_attr)));
                    }
                    CreateTab::Ranking => {
                        items.push(picker_item(
                            "Category",
                            self.rank_category
                                .and_then(|i| self.rank_categories.get(i))
                                .map(|s| s.as_str()),
                        ));
                        items.push(ListItem::new(format!(
                            "Rank by: {}",
                            self.rank_by.display_label()
                        )));
                    }
                }
                items
            }
        };

        let title = match self.page {
            Page::Home => "Menu",
            Page::Story => "Story telling",
            Page::Create => "Create chart",
        };
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.page {
            Page::Home => "↑/↓ select  Enter open  s story  c create  q quit",
            Page::Story => "←/→ view  h home  c create  q quit",
            Page::Create => "↑/↓ select  ←/→ adjust  h home  s story  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn attr_label(idx: Option<usize>) -> Option<&'static str> {
    idx.and_then(|i| query::ATTRIBUTE_LABELS.get(i).copied())
}

fn picker_item(name: &str, value: Option<&str>) -> ListItem<'static> {
    ListItem::new(format!("{name}: {}", value.unwrap_or("-")))
}

/// Step a wrapping picker. An unset picker starts at the first (or last)
/// entry depending on direction.
fn step_option(current: Option<usize>, len: usize, delta: i32) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match current {
        None => {
            if delta >= 0 {
                0
            } else {
                len - 1
            }
        }
        Some(i) => (i as i32 + delta).rem_euclid(len as i32) as usize,
    };
    Some(next)
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i32) -> T {
    let idx = all.iter().position(|&t| t == current).unwrap_or(0);
    let next = (idx as i32 + delta).rem_euclid(all.len() as i32) as usize;
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_option_wraps_both_directions() {
        assert_eq!(step_option(None, 4, 1), Some(0));
        assert_eq!(step_option(None, 4, -1), Some(3));
        assert_eq!(step_option(Some(3), 4, 1), Some(0));
        assert_eq!(step_option(Some(0), 4, -1), Some(3));
        assert_eq!(step_option(Some(1), 4, 1), Some(2));
        assert_eq!(step_option(None, 0, 1), None);
    }

    #[test]
    fn cycle_walks_the_tab_ring() {
        assert_eq!(cycle(&StoryTab::ALL, StoryTab::Correlation, 1), StoryTab::YearTrend);
        assert_eq!(
            cycle(&StoryTab::ALL, StoryTab::Descriptive, 1),
            StoryTab::Correlation
        );
        assert_eq!(
            cycle(&CreateTab::ALL, CreateTab::Histogram, -1),
            CreateTab::Ranking
        );
    }
}
