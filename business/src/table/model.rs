//! Table state: columns derived from a header tree, rows, sort and page.

use log::{debug, warn};
use serde_json::Value;

use super::sort::sorted_order;
use super::{
    AccessPath, Align, CellContent, Header, HeaderSpec, Pagination, RowId, SortDirection,
    SortState, TableError, TableRow,
};

/// Header as the view needs it.
#[derive(Debug)]
pub struct HeaderCell<'a> {
    pub path: AccessPath,
    pub header: &'a Header,
    pub sortable: bool,
    /// Set when this column is the active sort key.
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub content: CellContent,
    pub align: Align,
}

/// One row of the current page.
#[derive(Debug)]
pub struct PageRow<'a, R> {
    pub id: RowId,
    pub row: &'a R,
    pub cells: Vec<Cell>,
}

/// Generic sortable, paginated table over rows of type `R`.
///
/// The header tree fixes the columns. Every row handed to the model must
/// have a value at every column path, which is checked up front so that
/// rendering can never hit a missing field.
#[derive(Debug)]
pub struct TableModel<R> {
    columns: Vec<(AccessPath, Header)>,
    sortable: Vec<String>,
    rows: Vec<R>,
    // leaves[row][column], read once from the serialized row
    leaves: Vec<Vec<Value>>,
    order: Vec<usize>,
    sort: SortState,
    pagination: Pagination,
}

impl<R: TableRow> TableModel<R> {
    pub fn new(header: HeaderSpec) -> Result<Self, TableError> {
        let columns = header.columns()?;
        Ok(Self {
            columns,
            sortable: Vec::new(),
            rows: Vec::new(),
            leaves: Vec::new(),
            order: Vec::new(),
            sort: SortState::default(),
            pagination: Pagination::default(),
        })
    }

    /// Header labels that act as sort controls.
    pub fn with_sortable<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable = labels.into_iter().map(Into::into).collect();
        for label in &self.sortable {
            if !self.columns.iter().any(|(_, header)| header.label() == label) {
                warn!("sortable label `{label}` matches no column");
            }
        }
        self
    }

    /// Replaces the header tree and re-derives the columns.
    ///
    /// Existing rows are checked against the new columns; on error the model
    /// keeps its previous header.
    pub fn set_header(&mut self, header: HeaderSpec) -> Result<(), TableError> {
        let columns = header.columns()?;
        let leaves = extract_leaves(&columns, &self.rows)?;

        self.columns = columns;
        self.leaves = leaves;

        if let Some((path, _)) = self.sort.active()
            && self.column_index(&path).is_none()
        {
            self.sort.clear();
        }
        self.resort();
        Ok(())
    }

    /// Replaces all rows.
    ///
    /// Fails with [`TableError::PathMismatch`] if any row lacks a column
    /// field; the previous rows are kept in that case.
    pub fn set_rows(&mut self, rows: Vec<R>) -> Result<(), TableError> {
        let leaves = extract_leaves(&self.columns, &rows)?;

        self.rows = rows;
        self.leaves = leaves;
        self.resort();
        self.pagination.clamp(self.rows.len());
        Ok(())
    }

    pub fn access_paths(&self) -> impl Iterator<Item = AccessPath> + '_ {
        self.columns.iter().map(|(path, _)| *path)
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_sortable(&self, label: &str) -> bool {
        self.sortable.iter().any(|sortable| sortable == label)
    }

    pub fn headers(&self) -> Vec<HeaderCell<'_>> {
        self.columns
            .iter()
            .map(|(path, header)| HeaderCell {
                path: *path,
                header,
                sortable: self.is_sortable(header.label()),
                direction: self.sort.direction_of(path),
            })
            .collect()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Sort toggle for the column at `path`.
    pub fn toggle_sort(&mut self, path: AccessPath) -> Result<(), TableError> {
        let index = self
            .column_index(&path)
            .ok_or_else(|| TableError::UnknownPath {
                path: path.to_string(),
            })?;
        let label = self.columns[index].1.label();
        if !self.is_sortable(label) {
            return Err(TableError::NotSortable {
                label: label.to_string(),
            });
        }

        self.sort.toggle(path);
        debug!("sorting by {path} ({:?})", self.sort.direction_of(&path));
        self.resort();
        self.pagination.clamp(self.rows.len());
        Ok(())
    }

    /// Sort toggle for the first column labelled `label`.
    pub fn toggle_sort_by_label(&mut self, label: &str) -> Result<(), TableError> {
        if !self.is_sortable(label) {
            return Err(TableError::NotSortable {
                label: label.to_string(),
            });
        }
        let path = self
            .columns
            .iter()
            .find(|(_, header)| header.label() == label)
            .map(|(path, _)| *path)
            .ok_or_else(|| TableError::UnknownPath {
                path: label.to_string(),
            })?;
        self.toggle_sort(path)
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.rows.len())
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.rows.len());
    }

    pub fn set_rows_per_page(&mut self, size: usize) -> Result<(), TableError> {
        self.pagination.set_rows_per_page(size)?;
        debug!("showing {size} rows per page");
        Ok(())
    }

    /// All rows in display order.
    pub fn sorted_rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.order.iter().map(|&index| &self.rows[index])
    }

    /// Rows of the current page with their rendered cells.
    pub fn page_rows(&self) -> Vec<PageRow<'_, R>> {
        let range = self.pagination.range(self.rows.len());
        self.order[range]
            .iter()
            .map(|&index| {
                let row = &self.rows[index];
                let cells = self
                    .columns
                    .iter()
                    .zip(&self.leaves[index])
                    .map(|((_, header), value)| Cell {
                        content: header.render(value),
                        align: header.alignment(),
                    })
                    .collect();
                PageRow {
                    id: row.id(),
                    row,
                    cells,
                }
            })
            .collect()
    }

    fn column_index(&self, path: &AccessPath) -> Option<usize> {
        self.columns.iter().position(|(column, _)| column == path)
    }

    fn resort(&mut self) {
        self.order = match self.sort.active() {
            Some((path, direction)) => match self.column_index(&path) {
                Some(column) => {
                    let keys: Vec<&Value> = self.leaves.iter().map(|row| &row[column]).collect();
                    sorted_order(&keys, direction)
                }
                None => (0..self.rows.len()).collect(),
            },
            None => (0..self.rows.len()).collect(),
        };
    }
}

fn extract_leaves<R: TableRow>(
    columns: &[(AccessPath, Header)],
    rows: &[R],
) -> Result<Vec<Vec<Value>>, TableError> {
    rows.iter()
        .map(|row| -> Result<Vec<Value>, TableError> {
            let value = serde_json::to_value(row).map_err(|err| TableError::Serialize {
                reason: err.to_string(),
            })?;
            columns
                .iter()
                .map(|(path, _)| {
                    path.resolve(&value)
                        .cloned()
                        .map_err(|_| TableError::PathMismatch {
                            row: row.id().to_string(),
                            path: path.to_string(),
                        })
                })
                .collect()
        })
        .collect()
}
