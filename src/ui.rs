use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Cell, Row as TableRow, Table},
};

use crate::model::{Model, ViewerConfig};
use pageable::sorter::SortDirection;

pub const TABLE_HEADER_HEIGHT: u16 = 1;
pub const PAGEBAR_HEIGHT: u16 = 1;
pub const STATUSLINE_HEIGHT: u16 = 1;
pub const COLUMN_WIDTH_MARGIN: usize = 2;
pub const MAX_COLUMN_WIDTH: usize = 40;

pub struct TableUI {
    window_size: usize,
}

impl TableUI {
    pub fn new(cfg: &ViewerConfig) -> Self {
        Self {
            window_size: cfg.window_size,
        }
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let [table_area, pagebar_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(PAGEBAR_HEIGHT),
            Constraint::Length(STATUSLINE_HEIGHT),
        ])
        .areas(frame.area());

        self.draw_table(model, frame, table_area);
        self.draw_pagebar(model, frame, pagebar_area);
        self.draw_statusline(model, frame, status_area);
    }

    fn draw_table(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let pager = model.paginator();
        let columns = model.columns();

        // Render the current page as strings once, widths derive from it
        let cells: Vec<Vec<String>> = pager
            .content()
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|name| {
                        row.get(name).map(|v| v.to_string()).unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        let widths = column_widths(columns, &cells);

        let header_cells: Vec<Cell> = columns
            .iter()
            .enumerate()
            .map(|(cidx, name)| {
                let mut label = name.clone();
                if pager.sort_by() == Some(name.as_str()) {
                    label.push_str(match pager.sort_direction() {
                        SortDirection::Ascending => " ▲",
                        SortDirection::Descending => " ▼",
                    });
                }
                let span = if cidx == model.selected_column() {
                    label.bold().reversed()
                } else {
                    label.bold()
                };
                Cell::from(span)
            })
            .collect();
        let header = TableRow::new(header_cells).height(TABLE_HEADER_HEIGHT);

        let body: Vec<TableRow> = cells.into_iter().map(TableRow::new).collect();
        let constraints: Vec<Constraint> = widths
            .iter()
            .map(|&w| Constraint::Length(w as u16))
            .collect();

        let title = Line::from(format!(" {} ", model.file_name()).bold());
        let instructions = Line::from(vec![
            " Prev ".into(),
            "<Left>".blue().bold(),
            " Next ".into(),
            "<Right>".blue().bold(),
            " Column ".into(),
            "<Tab>".blue().bold(),
            " Sort ".into(),
            "<S>".blue().bold(),
            " Quit ".into(),
            "<Q> ".blue().bold(),
        ]);
        let block = Block::bordered()
            .title(title.centered())
            .title_bottom(instructions.centered());

        let table = Table::new(body, constraints).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn draw_pagebar(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let pager = model.paginator();
        let mut spans: Vec<Span> = Vec::new();

        spans.push(if pager.has_previous_page() {
            " Prev ".blue().bold()
        } else {
            " Prev ".dim()
        });
        for page in pager.pages(self.window_size) {
            let label = format!(" {page} ");
            spans.push(if page == pager.current_page() {
                label.bold().reversed()
            } else {
                label.into()
            });
        }
        spans.push(if pager.has_next_page() {
            " Next ".blue().bold()
        } else {
            " Next ".dim()
        });
        spans.push(format!("  page {}/{}", pager.current_page(), pager.total_pages()).into());

        frame.render_widget(Line::from(spans), area);
    }

    fn draw_statusline(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let pager = model.paginator();
        let sort = match pager.sort_by() {
            Some(field) => format!("sort: {field} {:?}", pager.sort_direction()),
            None => "unsorted".to_string(),
        };
        let line = Line::from(vec![
            format!(" {} rows | {sort} | ", pager.len()).into(),
            model.status_message().to_string().yellow(),
        ]);
        frame.render_widget(line, area);
    }
}

/// Column widths from header and visible cell lengths, capped so one wide
/// column cannot push the others off screen.
fn column_widths(columns: &[String], cells: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(cidx, name)| {
            let body = cells
                .iter()
                .map(|row| row[cidx].chars().count())
                .max()
                .unwrap_or(0);
            let width = std::cmp::max(name.chars().count(), body) + COLUMN_WIDTH_MARGIN;
            std::cmp::min(width, MAX_COLUMN_WIDTH)
        })
        .collect()
}
