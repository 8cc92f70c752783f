use std::{fs::File, io::Read, path::Path};

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::{Error, Result};

/// Cell values read as missing, the same set dataframe CSV readers use by default.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A raw CSV table: one header row, then one row per time step.
///
/// Cells stay as text until [`Table::split_target`] parses the remaining
/// columns, so non-numeric columns such as the date can be dropped first.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
struct Row {
    /// Line of the record in the source file, header included.
    line: u64,
    cells: Vec<String>,
}

/// Numeric features and the regression target, row-aligned.
#[derive(Debug, Clone)]
pub struct FeatureTarget {
    pub feature_names: Vec<String>,
    /// Shape `[rows, features]`.
    pub features: Array2<f64>,
    /// Shape `[rows]`.
    pub targets: Array1<f64>,
}

impl Table {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        debug!(
            path = %path.display(),
            rows = table.len(),
            columns = table.headers.len(),
            "read csv"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let rows = reader
            .records()
            .map(|record| {
                let record = record?;
                let line = record.position().map_or(0, |p| p.line());
                let cells = record.iter().map(str::to_string).collect();
                Ok::<_, Error>(Row { line, cells })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let index = self.column_index(name)?;
        self.headers.remove(index);
        for row in &mut self.rows {
            row.cells.remove(index);
        }
        Ok(())
    }

    /// Parses every cell as `f64` and separates the `target` column from the
    /// features. Empty cells and missing-value markers such as
    /// `NA`, `N/A` or `null` become `NaN`.
    pub fn split_target(&self, target: &str) -> Result<FeatureTarget> {
        let target_index = self.column_index(target)?;
        let feature_columns: Vec<usize> = (0..self.headers.len())
            .filter(|&i| i != target_index)
            .collect();

        let mut features = Vec::with_capacity(self.rows.len() * feature_columns.len());
        let mut targets = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            for &column in &feature_columns {
                features.push(self.parse_cell(row, column)?);
            }
            targets.push(self.parse_cell(row, target_index)?);
        }

        Ok(FeatureTarget {
            feature_names: feature_columns
                .iter()
                .map(|&i| self.headers[i].clone())
                .collect(),
            features: Array2::from_shape_vec((self.rows.len(), feature_columns.len()), features)?,
            targets: Array1::from_vec(targets),
        })
    }

    fn parse_cell(&self, row: &Row, column: usize) -> Result<f64> {
        let raw = row.cells[column].trim();
        if NA_VALUES.contains(&raw) {
            return Ok(f64::NAN);
        }
        raw.parse().map_err(|_| Error::ParseValue {
            line: row.line,
            column: self.headers[column].clone(),
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn table() -> Table {
        let csv = "date,open,DAX,volume\n\
                   2020-01-02,1.0,13000.5,10\n\
                   2020-01-03,2.0,13100.0,20\n\
                   2020-01-06,3.0,13050.25,30\n";
        Table::from_reader(csv.as_bytes()).unwrap()
    }

    #[rstest]
    fn reads_headers_and_rows(table: Table) {
        assert_eq!(table.headers(), ["date", "open", "DAX", "volume"]);
        assert_eq!(table.len(), 3);
    }

    #[rstest]
    fn drop_then_split(mut table: Table) {
        table.drop_column("date").unwrap();
        let split = table.split_target("DAX").unwrap();

        assert_eq!(split.feature_names, ["open", "volume"]);
        assert_eq!(split.features.dim(), (3, 2));
        assert_eq!(split.features.row(1).to_vec(), vec![2.0, 20.0]);
        assert_eq!(split.targets.to_vec(), vec![13000.5, 13100.0, 13050.25]);
    }

    #[rstest]
    #[case::date("date")]
    #[case::target("DAX")]
    fn missing_columns_are_reported(#[case] name: &str) {
        let mut table = Table::from_reader("open,volume\n1,2\n".as_bytes()).unwrap();
        let err = if name == "date" {
            table.drop_column(name).unwrap_err()
        } else {
            table.split_target(name).unwrap_err()
        };
        assert!(matches!(err, Error::MissingColumn(col) if col == name));
    }

    #[rstest]
    fn date_left_in_fails_to_parse(table: Table) {
        let err = table.split_target("DAX").unwrap_err();
        match err {
            Error::ParseValue { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "date");
                assert_eq!(value, "2020-01-02");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case::empty("")]
    #[case::na("NA")]
    #[case::null("null")]
    #[case::slash("N/A")]
    #[case::upper_null("NULL")]
    #[case::excel("#N/A")]
    #[case::none("None")]
    fn missing_markers_are_nan(#[case] marker: &str) {
        let csv = format!("date,open,DAX\n2020-01-02,{marker},1.0\n2020-01-03,2.0,{marker}\n");
        let mut table = Table::from_reader(csv.as_bytes()).unwrap();
        table.drop_column("date").unwrap();
        let split = table.split_target("DAX").unwrap();

        assert!(split.features[[0, 0]].is_nan());
        assert_eq!(split.targets[0], 1.0);
        assert_eq!(split.features[[1, 0]], 2.0);
        assert!(split.targets[1].is_nan());
    }

    #[rstest]
    fn unknown_text_is_not_missing() {
        let table = Table::from_reader("a,DAX\nmissing,1.0\n".as_bytes()).unwrap();
        let err = table.split_target("DAX").unwrap_err();
        assert!(matches!(err, Error::ParseValue { value, .. } if value == "missing"));
    }

    #[rstest]
    fn ragged_rows_are_rejected() {
        let err = Table::from_reader("a,DAX\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[rstest]
    fn missing_file_is_io_error() {
        let err = Table::from_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
