// src/core/grid.rs
//! Table grid: `Document` → `Table` → `Row` → `Cell`.
//!
//! Built in one pass over the tokenizer stream by a four-state machine
//! (`Outside`, `InTable`, `InRow`, `InCell`). All buffers live inside the
//! builder; what comes out is an immutable [`Document`].
//!
//! Flat grids only: `rowspan`/`colspan` are recorded on the cell but never
//! expanded, so a spanning cell shifts the cells after it out of their visual
//! column. [`Table::has_spans`] lets callers refuse such tables.
//!
//! Recovery rules for markup that is not well formed:
//! - an end tag that does not match the current state is a no-op (counted in
//!   [`Document::stray_end_tags`]);
//! - `<tr>` or `</table>` while a row is open closes that row first;
//! - inside a cell, a nested cell of the same tag (nested table) is kept as
//!   markup and does not close the outer cell;
//! - structures still open at end of input are closed.

use super::tokenizer::{tokenize, Attr, Token};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    text: String,
    markup: String,
    row_span: u32,
    col_span: u32,
}

impl Cell {
    /// Literal text of the cell, trimmed. Entities are not decoded.
    pub fn text(&self) -> &str { &self.text }

    /// Inner HTML of the cell (without its own `<td>`/`<th>`), trimmed.
    pub fn markup(&self) -> &str { &self.markup }

    pub fn row_span(&self) -> u32 { self.row_span }
    pub fn col_span(&self) -> u32 { self.col_span }

    pub fn is_spanning(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn cells(&self) -> &[Cell] { &self.cells }
    pub fn get(&self, ix: usize) -> Option<&Cell> { self.cells.get(ix) }
    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(Cell::text)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Row 0. Conventionally the header, not guaranteed to be one.
    pub fn header(&self) -> Option<&Row> { self.rows.first() }

    /// Every row after the header.
    pub fn body(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn has_spans(&self) -> bool {
        self.rows.iter().flat_map(|r| r.cells.iter()).any(Cell::is_spanning)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    tables: Vec<Table>,
    stray_end_tags: usize,
}

impl Document {
    /// Parse a full HTML document into its tables, in document order.
    /// Tables without any row are left out.
    pub fn parse(html: &str) -> Self {
        let mut b = GridBuilder::default();
        for tok in tokenize(html) {
            b.feed(tok);
        }
        b.finish()
    }

    pub fn tables(&self) -> &[Table] { &self.tables }
    pub fn len(&self) -> usize { self.tables.len() }
    pub fn is_empty(&self) -> bool { self.tables.is_empty() }

    /// End tags that matched nothing open and were ignored.
    pub fn stray_end_tags(&self) -> usize { self.stray_end_tags }
}

/* ---------- builder ---------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Outside,
    InTable,
    InRow,
    InCell,
}

#[derive(Default)]
struct CellBuf {
    tag: &'static str, // "td" | "th"
    depth: usize,      // same-tag cells nested inside this one
    text: String,
    markup: String,
    row_span: u32,
    col_span: u32,
}

#[derive(Default)]
struct GridBuilder {
    state: State,
    tables: Vec<Table>,
    rows: Vec<Row>,
    cells: Vec<Cell>,
    cell: CellBuf,
    stray: usize,
}

impl GridBuilder {
    fn feed(&mut self, tok: Token<'_>) {
        match self.state {
            State::Outside => self.outside(&tok),
            State::InTable => self.in_table(&tok),
            State::InRow => self.in_row(&tok),
            State::InCell => self.in_cell(&tok),
        }
    }

    fn outside(&mut self, tok: &Token<'_>) {
        match tok {
            t if t.is_start("table") => {
                self.rows.clear();
                self.state = State::InTable;
            }
            Token::End { name } if is_structural(name) => self.stray += 1,
            _ => {}
        }
    }

    fn in_table(&mut self, tok: &Token<'_>) {
        match tok {
            t if t.is_start("tr") => self.open_row(),
            t if t.is_end("table") => self.close_table(),
            Token::End { name } if is_structural(name) => self.stray += 1,
            _ => {}
        }
    }

    fn in_row(&mut self, tok: &Token<'_>) {
        match tok {
            Token::Start { name, .. } if name == "td" || name == "th" => {
                self.open_cell(if name == "td" { "td" } else { "th" }, tok);
            }
            t if t.is_end("tr") => self.close_row(),
            t if t.is_start("tr") => {
                self.close_row();
                self.open_row();
            }
            t if t.is_end("table") => {
                self.close_row();
                self.close_table();
            }
            Token::End { name } if is_structural(name) => self.stray += 1,
            _ => {}
        }
    }

    fn in_cell(&mut self, tok: &Token<'_>) {
        match tok {
            Token::Text(s) => {
                self.cell.text.push_str(s);
                self.cell.markup.push_str(s);
            }
            Token::Start { name, attrs, .. } => {
                if name == self.cell.tag {
                    self.cell.depth += 1;
                }
                push_start_tag(&mut self.cell.markup, name, attrs);
            }
            Token::End { name } => {
                if name == self.cell.tag {
                    if self.cell.depth == 0 {
                        self.close_cell();
                        return;
                    }
                    self.cell.depth -= 1;
                }
                self.cell.markup.push_str("</");
                self.cell.markup.push_str(name);
                self.cell.markup.push('>');
            }
        }
    }

    fn open_row(&mut self) {
        self.cells.clear();
        self.state = State::InRow;
    }

    /// Empty rows are kept; callers filter them.
    fn close_row(&mut self) {
        let cells = std::mem::take(&mut self.cells);
        self.rows.push(Row { cells });
        self.state = State::InTable;
    }

    fn close_table(&mut self) {
        let rows = std::mem::take(&mut self.rows);
        if !rows.is_empty() {
            self.tables.push(Table { rows });
        }
        self.state = State::Outside;
    }

    fn open_cell(&mut self, tag: &'static str, start: &Token<'_>) {
        self.cell = CellBuf {
            tag,
            row_span: span_attr(start, "rowspan"),
            col_span: span_attr(start, "colspan"),
            ..CellBuf::default()
        };
        self.state = State::InCell;
    }

    fn close_cell(&mut self) {
        let buf = std::mem::take(&mut self.cell);
        self.cells.push(Cell {
            text: s!(buf.text.trim()),
            markup: s!(buf.markup.trim()),
            row_span: buf.row_span,
            col_span: buf.col_span,
        });
        self.state = State::InRow;
    }

    fn finish(mut self) -> Document {
        // close whatever EOF left open, innermost first
        if self.state == State::InCell { self.close_cell(); }
        if self.state == State::InRow { self.close_row(); }
        if self.state == State::InTable { self.close_table(); }
        Document { tables: self.tables, stray_end_tags: self.stray }
    }
}

fn is_structural(name: &str) -> bool {
    matches!(name, "table" | "tr" | "td" | "th")
}

fn span_attr(start: &Token<'_>, name: &str) -> u32 {
    start
        .attr(name)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(1)
}

/// `<name a="b" c>`: tag name plus attributes as written.
fn push_start_tag(out: &mut String, name: &str, attrs: &[Attr<'_>]) {
    out.push('<');
    out.push_str(name);
    for a in attrs {
        out.push(' ');
        out.push_str(a.name);
        if let Some(v) = a.value {
            let q = if v.contains('"') { '\'' } else { '"' };
            out.push('=');
            out.push(q);
            out.push_str(v);
            out.push(q);
        }
    }
    out.push('>');
}
