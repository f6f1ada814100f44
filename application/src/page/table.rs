//! Plain text [`Table`] rendering.

use std::fmt;

use itertools::Itertools as _;

/// Table of text cells, aligned into columns.
#[derive(Clone, Debug)]
pub(crate) struct Table {
    /// Column headers.
    headers: Vec<&'static str>,

    /// Rows of cells, each as long as the headers.
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a new empty [`Table`] with the provided column headers.
    pub(crate) fn new(headers: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            headers: headers.into_iter().collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row of cells, padding or truncating it to the headers.
    pub(crate) fn row<T: ToString>(&mut self, cells: impl IntoIterator<Item = T>) {
        let mut row = cells
            .into_iter()
            .map(|c| c.to_string())
            .take(self.headers.len())
            .collect::<Vec<_>>();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Indicates whether this [`Table`] has no rows.
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain([h.chars().count()])
                    .max()
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();

        let line = |cells: &mut dyn Iterator<Item = &str>| {
            cells
                .zip(&widths)
                .map(|(c, &w)| format!("{c:<w$}"))
                .join("  ")
                .trim_end()
                .to_owned()
        };

        writeln!(f, "{}", line(&mut self.headers.iter().copied()))?;
        writeln!(
            f,
            "{}",
            widths.iter().map(|w| "-".repeat(*w)).join("  "),
        )?;
        for row in &self.rows {
            writeln!(f, "{}", line(&mut row.iter().map(String::as_str)))?;
        }
        Ok(())
    }
}
