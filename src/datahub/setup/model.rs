/// In-memory representation of one parsed spreadsheet: the sheets in
/// workbook order. Delimited files (CSV/TSV) load as a single-sheet
/// document named after the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sheets: Vec<Sheet>,
}

impl Document {
    /// Creates a document from sheets in their original workbook order.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Returns the sheets in workbook order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Looks up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// One tabular sheet: a header row followed by data rows. All cells are
/// carried as plain strings; rows may be ragged, so cells are addressed
/// with [`Sheet::cell`] rather than direct indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name as it appears in the workbook (or the file stem for
    /// delimited input).
    pub name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Creates a sheet from a header row and data rows.
    pub fn new<N, H>(name: N, headers: Vec<H>, rows: Vec<Vec<H>>) -> Self
    where
        N: Into<String>,
        H: Into<String>,
    {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Returns the header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Position of the named column, if the sheet carries it.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|name| name == header)
    }

    /// Cell at the given row and column, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Iterates over the non-empty trimmed values of the named column.
    pub fn column<'a>(&'a self, header: &str) -> Option<impl Iterator<Item = &'a str>> {
        let index = self.column_index(header)?;
        Some(
            self.rows
                .iter()
                .filter_map(move |row| row.get(index))
                .map(|value| value.trim())
                .filter(|value| !value.is_empty()),
        )
    }

    /// Looks up the value cell of a labelled row in a field/value sheet:
    /// the row whose `label_column` cell equals `label` yields its
    /// `value_column` cell.
    pub fn labelled_value(
        &self,
        label_column: usize,
        value_column: usize,
        label: &str,
    ) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.get(label_column).map(|cell| cell.trim()) == Some(label))
            .and_then(|row| row.get(value_column))
            .map(String::as_str)
    }
}
