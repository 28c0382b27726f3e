use std::str::FromStr;
use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

use crate::branding;
use crate::browser::{ACTIONS_HEADER, BrowserView, NO_MATCHES_TEXT, PageItem, TableBody};
use crate::domain::{CMDMode, SVConfig};
use crate::model::{Model, UIData};

pub const CMDLINE_HEIGH: u16 = 1;
pub const TITLE_HEIGHT: u16 = 1;
pub const PAGINATION_HEIGHT: u16 = 1;
pub const FILTER_BAR_HEIGHT: u16 = 1;
pub const NAVIGATION_WIDTH: u16 = 22;
pub const COLUMN_WIDTH_MARGIN: usize = 1;

// Status messages are dimmed once they are older than this.
const STATUS_MESSAGE_FRESH: Duration = Duration::from_secs(5);
const FALLBACK_ACCENT: Color = Color::Blue;

#[derive(Debug)]
pub struct TableUI {
    max_column_width: usize,
    table_state: TableState,
}

impl TableUI {
    pub fn new(config: &SVConfig) -> Self {
        Self {
            max_column_width: config.max_column_width,
            table_state: TableState::default(),
        }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let data = model.get_uidata();
        let accent =
            Color::from_str(branding::accent_color(data.branding.code)).unwrap_or(FALLBACK_ACCENT);

        let [title_area, body_area, pagination_area, cmdline_area] = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(PAGINATION_HEIGHT),
            Constraint::Length(CMDLINE_HEIGH),
        ])
        .areas(frame.area());
        let [nav_area, main_area] =
            Layout::horizontal([Constraint::Length(NAVIGATION_WIDTH), Constraint::Min(0)])
                .areas(body_area);
        let [filter_area, table_area] =
            Layout::vertical([Constraint::Length(FILTER_BAR_HEIGHT), Constraint::Min(0)])
                .areas(main_area);

        frame.render_widget(Self::title_bar(&data, accent), title_area);
        frame.render_widget(Self::navigation(&data, accent), nav_area);
        frame.render_widget(Self::filter_bar(&data, accent), filter_area);
        self.render_table(&data, accent, frame, table_area);
        frame.render_widget(Self::pagination(&data.table, accent), pagination_area);
        Self::render_cmdline(&data, frame, cmdline_area);

        if data.show_popup {
            Self::render_popup(&data, accent, frame);
        }
    }

    fn title_bar(data: &UIData, accent: Color) -> Paragraph<'static> {
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", data.branding.display_name),
                Style::new().fg(Color::Black).bg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {} ", data.current_view.title())),
            Span::styled(
                format!(" {} ", data.role.title()),
                Style::new().fg(accent),
            ),
            Span::styled(
                format!("[{}]", branding::logo_path(data.branding.code)),
                Style::new().dark_gray(),
            ),
        ]);
        Paragraph::new(line)
    }

    fn navigation(data: &UIData, accent: Color) -> Paragraph<'static> {
        let mut lines = Vec::new();
        for group in data.navigation.iter() {
            lines.push(Line::from(group.title.bold()));
            for item in group.items.iter() {
                let line = if *item == data.current_view {
                    Line::from(Span::styled(
                        format!(" ▸ {}", item.title()),
                        Style::new().fg(accent).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("   {}", item.title()))
                };
                lines.push(line);
            }
            lines.push(Line::default());
        }
        Paragraph::new(Text::from(lines)).block(Block::bordered().title(" Views "))
    }

    fn filter_bar(data: &UIData, accent: Color) -> Paragraph<'static> {
        let view = &data.table;
        let mut spans = vec![Span::raw(" Search: ")];
        if view.search.is_empty() {
            spans.push(Span::styled("—", Style::new().dark_gray()));
        } else {
            spans.push(Span::styled(format!("\"{}\"", view.search), Style::new().fg(accent)));
        }
        for (idx, filter) in view.filters.iter().enumerate() {
            let style = if idx == data.focused_filter {
                Style::new().add_modifier(Modifier::UNDERLINED)
            } else {
                Style::new()
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("{}: {}", filter.column, filter.label), style));
        }
        if let Some(sort) = &view.sort {
            let arrow = if sort.ascending { "↑" } else { "↓" };
            spans.push(Span::raw(format!("  Sort: {} {arrow}", sort.column)));
        }
        Paragraph::new(Line::from(spans))
    }

    fn render_table(&mut self, data: &UIData, accent: Color, frame: &mut Frame, area: Rect) {
        let view = &data.table;
        let widths = column_widths(view, self.max_column_width);
        let header = Row::new(view.header.iter().map(|h| Cell::from(h.clone())))
            .style(Style::new().add_modifier(Modifier::BOLD).fg(accent));

        let rows: Vec<Row> = match &view.body {
            TableBody::Rows(rows) => rows
                .iter()
                .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.clone()))))
                .collect(),
            TableBody::NoMatches => Vec::new(),
        };

        let block = Block::bordered().title(format!(
            " {} · {} of {} ",
            data.current_view.title(),
            view.filtered_count,
            view.total_count
        ));
        let inner = block.inner(area);

        let table = Table::new(rows, widths.into_iter().map(|w| Constraint::Length(w as u16)))
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED))
            .column_highlight_style(Style::new().fg(accent))
            .cell_highlight_style(Style::new().add_modifier(Modifier::BOLD));

        self.table_state = match view.body {
            TableBody::Rows(_) => TableState::default()
                .with_selected(Some(data.selected_row))
                .with_selected_column(Some(data.selected_column)),
            TableBody::NoMatches => TableState::default(),
        };
        frame.render_stateful_widget(table, area, &mut self.table_state);

        if view.body == TableBody::NoMatches && inner.height > 1 {
            let message_area = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(NO_MATCHES_TEXT).centered().italic(),
                message_area,
            );
        }
    }

    fn pagination(view: &BrowserView, accent: Color) -> Paragraph<'static> {
        let mut spans = Vec::new();
        if !view.page_items.is_empty() {
            spans.push(Span::raw(" ‹ "));
            for item in view.page_items.iter() {
                match item {
                    PageItem::Page(n) if *n == view.page => spans.push(Span::styled(
                        format!("[{n}]"),
                        Style::new().fg(accent).add_modifier(Modifier::BOLD),
                    )),
                    PageItem::Page(n) => spans.push(Span::raw(format!(" {n} "))),
                    PageItem::Ellipsis => spans.push(Span::raw(" … ")),
                }
            }
            spans.push(Span::raw(" › "));
        }

        spans.push(Span::raw("  Rows per page:"));
        for size in view.page_sizes.iter() {
            if *size == view.page_size {
                spans.push(Span::styled(
                    format!(" [{size}]"),
                    Style::new().fg(accent).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw(format!(" {size}")));
            }
        }

        let showing = if view.filtered_count == 0 {
            format!("  Showing 0 of {}", view.total_count)
        } else {
            format!(
                "  Showing {}–{} of {}",
                view.first_shown, view.last_shown, view.filtered_count
            )
        };
        spans.push(Span::styled(showing, Style::new().dark_gray()));
        Paragraph::new(Line::from(spans))
    }

    fn render_cmdline(data: &UIData, frame: &mut Frame, area: Rect) {
        if data.active_cmdinput {
            let prompt = match data.cmd_mode {
                Some(CMDMode::Search) => "/",
                Some(CMDMode::JumpToPage) => ":",
                None => ">",
            };
            let line = Line::from(vec![
                Span::styled(prompt, Style::new().bold()),
                Span::raw(data.cmdinput.input.clone()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            let x = cursor_column(area, prompt.len() + data.cmdinput.cursor_pos);
            frame.set_cursor_position((x, area.y));
        } else {
            let style = if data.last_status_message_update.elapsed() < STATUS_MESSAGE_FRESH {
                Style::new()
            } else {
                Style::new().dark_gray()
            };
            let help = Span::styled("  ? help  q quit", Style::new().dark_gray());
            let line = Line::from(vec![
                Span::styled(format!(" {}", data.status_message), style),
                help,
            ]);
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    fn render_popup(data: &UIData, accent: Color, frame: &mut Frame) {
        let area = popup_area(frame.area(), 70, 70);
        let block = Block::bordered()
            .title(format!(" {} ", data.popup_title))
            .title_bottom(Line::from(" <Esc> close ").centered())
            .border_style(Style::new().fg(accent));
        let popup = Paragraph::new(data.popup_message.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Width per column: widest of header and visible cells plus a margin, capped except for the
/// trailing actions column.
pub fn column_widths(view: &BrowserView, max_column_width: usize) -> Vec<usize> {
    let rows: &[Vec<String>] = match &view.body {
        TableBody::Rows(rows) => rows,
        TableBody::NoMatches => &[],
    };
    view.header
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let content = rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0);
            let width = std::cmp::max(name.chars().count(), content) + COLUMN_WIDTH_MARGIN;
            if is_actions(view, idx) {
                width
            } else {
                std::cmp::min(width, max_column_width)
            }
        })
        .collect()
}

// Cursor column for an input offset, kept inside `area` however long the input grows.
fn cursor_column(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .min(area.right().saturating_sub(1))
}

fn is_actions(view: &BrowserView, idx: usize) -> bool {
    view.header.get(idx).is_some_and(|h| h == ACTIONS_HEADER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;
    use crate::session::Session;
    use ratatui::{Terminal, backend::TestBackend};
    use std::path::Path;

    fn render(model: &Model) -> String {
        let mut ui = TableUI::new(&SVConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|frame| ui.draw(model, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn model(data_dir: &Path) -> Model {
        let session = Session::new(
            Some("token".into()),
            Some("admin".into()),
            None,
            Some("COE".into()),
        );
        let config = SVConfig::default().with_data_dir(data_dir.to_path_buf());
        Model::init(&config, session).unwrap()
    }

    #[test]
    fn draws_branding_navigation_and_rows() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        let screen = render(&model(&fixtures));
        assert!(screen.contains("College of Engineering"));
        assert!(screen.contains("[assets/logos/coe.png]"));
        assert!(screen.contains("Audit Logs"));
        assert!(screen.contains("College of Computer Studies"));
        assert!(screen.contains("Rows per page:"));
    }

    #[test]
    fn draws_placeholder_for_empty_views() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/missing");
        let screen = render(&model(&fixtures));
        assert!(screen.contains(NO_MATCHES_TEXT));
        assert!(screen.contains("Showing 0 of 0"));
    }

    #[test]
    fn draws_help_popup() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        let mut model = model(&fixtures);
        model.update(Some(Message::Help)).unwrap();
        let screen = render(&model);
        assert!(screen.contains("<Esc> close"));
        assert!(screen.contains("jump to page"));
    }

    #[test]
    fn cursor_stays_on_the_command_line() {
        let area = Rect::new(10, 29, 130, 1);
        assert_eq!(cursor_column(area, 0), 10);
        assert_eq!(cursor_column(area, 5), 15);
        assert_eq!(cursor_column(area, 70_000), 139);
        assert_eq!(cursor_column(area, usize::MAX), 139);
        assert_eq!(cursor_column(Rect::new(u16::MAX - 2, 0, 2, 1), 10), u16::MAX - 1);
    }

    #[test]
    fn widths_are_capped_except_actions() {
        let view = BrowserView {
            header: vec!["Name".into(), "Actions".into()],
            body: TableBody::Rows(vec![vec!["x".repeat(80), "a".repeat(40)]]),
            page: 1,
            total_pages: 1,
            page_items: vec![PageItem::Page(1)],
            page_size: 10,
            page_sizes: vec![10],
            filtered_count: 1,
            total_count: 1,
            first_shown: 1,
            last_shown: 1,
            search: String::new(),
            filters: Vec::new(),
            sort: None,
        };
        assert_eq!(column_widths(&view, 20), vec![20, 41]);
    }
}
