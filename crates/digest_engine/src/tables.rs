use std::str::FromStr;
use std::sync::LazyLock;

use digest_logging::{digest_debug, digest_warn};
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

use crate::clean::collapse_whitespace;
use crate::dom::{self, static_selector, ParsedDocument};
use crate::workbook::{MAX_SHEET_COLUMNS, MAX_SHEET_ROWS};
use crate::{Table, TableParseError};

static TABLE: LazyLock<Selector> = LazyLock::new(|| static_selector("table"));

/// HTML caps on cell spans; anything larger is treated as malformed.
const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

/// Decides whether a table's first row becomes its header instead of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// Header only when every cell of the first row is a `th`.
    #[default]
    AllHeaderCells,
    /// The first row is always the header.
    FirstRow,
    /// Every row is data.
    None,
}

impl FromStr for HeaderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_header_cells" => Ok(HeaderPolicy::AllHeaderCells),
            "first_row" => Ok(HeaderPolicy::FirstRow),
            "none" => Ok(HeaderPolicy::None),
            other => Err(format!(
                "unknown header policy '{other}' (expected all-header-cells, first-row or none)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableSettings {
    pub header_policy: HeaderPolicy,
}

#[derive(Debug, Default)]
pub struct TableExtractor {
    settings: TableSettings,
}

impl TableExtractor {
    pub fn new(settings: TableSettings) -> Self {
        Self { settings }
    }

    /// Every `table` element in document order, nested ones included.
    ///
    /// Ids count attempted tables, so a skipped table leaves a gap.
    pub fn extract_tables(&self, doc: &ParsedDocument) -> Vec<Table> {
        doc.select(&TABLE)
            .enumerate()
            .filter_map(|(index, element)| {
                let id = index + 1;
                match parse_table(element, self.settings.header_policy) {
                    Ok((header, rows)) => {
                        digest_debug!("Table {} parsed: {} rows", id, rows.len());
                        Some(Table { id, header, rows })
                    }
                    Err(err) => {
                        digest_warn!("Skipping table {}: {}", id, err);
                        None
                    }
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Cell {
    text: String,
    is_header: bool,
}

struct RawCell {
    cell: Cell,
    colspan: usize,
    rowspan: usize,
}

type ParsedTable = (Option<Vec<String>>, Vec<Vec<String>>);

fn parse_table(table: ElementRef<'_>, policy: HeaderPolicy) -> Result<ParsedTable, TableParseError> {
    let raw_rows = table_rows(table)
        .into_iter()
        .map(row_cells)
        .collect::<Result<Vec<_>, _>>()?;

    let mut grid = layout(&raw_rows)?;
    grid.retain(|row| !row.is_empty());
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Err(TableParseError::Empty);
    }
    if grid.len() > MAX_SHEET_ROWS {
        return Err(TableParseError::TooManyRows {
            rows: grid.len(),
            limit: MAX_SHEET_ROWS,
        });
    }

    let header = match policy {
        HeaderPolicy::AllHeaderCells => grid[0]
            .iter()
            .all(|slot| slot.as_ref().is_some_and(|cell| cell.is_header)),
        HeaderPolicy::FirstRow => true,
        HeaderPolicy::None => false,
    };

    let mut rows = grid.into_iter().map(|row| {
        let mut values: Vec<String> = row
            .into_iter()
            .map(|slot| slot.map(|cell| cell.text).unwrap_or_default())
            .collect();
        values.resize(width, String::new());
        values
    });
    let header_row = if header { rows.next() } else { None };
    Ok((header_row, rows.collect()))
}

/// The table's own rows: direct `tr` children plus those in row groups.
/// Rows of nested tables belong to the nested table.
fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn row_cells(row: ElementRef<'_>) -> Result<Vec<RawCell>, TableParseError> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .map(|el| {
            Ok(RawCell {
                cell: Cell {
                    text: collapse_whitespace(&dom::element_text(el)),
                    is_header: el.value().name() == "th",
                },
                colspan: span(el, "colspan", MAX_COLSPAN)?,
                rowspan: span(el, "rowspan", MAX_ROWSPAN)?,
            })
        })
        .collect()
}

/// Missing, unparseable and zero spans count as 1.
fn span(el: ElementRef<'_>, attribute: &'static str, limit: usize) -> Result<usize, TableParseError> {
    let value = dom::attribute(el, attribute)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1);
    if value > limit {
        return Err(TableParseError::SpanTooLarge {
            attribute,
            value,
            limit,
        });
    }
    Ok(value)
}

/// Places cells on a grid, copying spanned values into every covered slot.
/// Row spans stop at the last row of the table. Fails as soon as a row grows
/// past what one sheet can hold.
fn layout(raw_rows: &[Vec<RawCell>]) -> Result<Vec<Vec<Option<Cell>>>, TableParseError> {
    let mut grid: Vec<Vec<Option<Cell>>> = vec![Vec::new(); raw_rows.len()];
    for (r, cells) in raw_rows.iter().enumerate() {
        let mut col = 0;
        for raw in cells {
            while grid[r].get(col).is_some_and(Option::is_some) {
                col += 1;
            }
            let end = col + raw.colspan;
            if end > MAX_SHEET_COLUMNS {
                return Err(TableParseError::TooManyColumns {
                    columns: end,
                    limit: MAX_SHEET_COLUMNS,
                });
            }
            let last_row = (r + raw.rowspan).min(raw_rows.len());
            for row in &mut grid[r..last_row] {
                if row.len() < end {
                    row.resize(end, None);
                }
                for slot in &mut row[col..end] {
                    *slot = Some(raw.cell.clone());
                }
            }
            col = end;
        }
    }
    Ok(grid)
}
