//! Historical sales series and the CSV loader that builds it

use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

const DATE_COLUMN: &str = "date";
const SALES_COLUMN: &str = "sales";
const PROMOTION_COLUMN: &str = "onpromotion";

/// One day of recorded sales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Units (or revenue) sold that day
    pub sales: f64,
    /// Promotion indicator for that day
    pub onpromotion: f64,
}

impl SalesRecord {
    /// Create a new sales record
    pub fn new(date: NaiveDate, sales: f64, onpromotion: f64) -> Self {
        Self {
            date,
            sales,
            onpromotion,
        }
    }
}

/// Daily sales history ordered by strictly increasing date
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesHistory {
    records: Vec<SalesRecord>,
}

impl SalesHistory {
    /// Create a history from records already sorted by date.
    ///
    /// Dates must be strictly increasing; duplicates and out-of-order
    /// records are rejected. An empty history is allowed.
    pub fn new(records: Vec<SalesRecord>) -> Result<Self> {
        if let Some(pair) = records.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(ForecastError::DataError(format!(
                "Dates must be strictly increasing: {} is followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { records })
    }

    /// Create a history from `(date, sales)` pairs with no promotion
    pub fn from_sales(points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        Self::new(
            points
                .into_iter()
                .map(|(date, sales)| SalesRecord::new(date, sales, 0.0))
                .collect(),
        )
    }

    /// Get the records
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the number of recorded days
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// First recorded date
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    /// Last recorded date, the anchor for future dates
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Get the sales values as a vector
    pub fn sales(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.sales).collect()
    }

    /// Get the promotion indicators as a vector
    pub fn promotions(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.onpromotion).collect()
    }

    /// The last `n` records (all of them when fewer exist)
    pub fn tail(&self, n: usize) -> &[SalesRecord] {
        &self.records[self.records.len().saturating_sub(n)..]
    }
}

/// Counts of cells replaced by zero during ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoercionReport {
    /// `sales` cells that were missing or non-numeric
    pub sales: usize,
    /// `onpromotion` cells that were missing or non-numeric
    pub onpromotion: usize,
}

impl CoercionReport {
    /// Total number of coerced cells
    pub fn total(&self) -> usize {
        self.sales + self.onpromotion
    }

    /// Whether any cell had to be coerced
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// History produced by the loader along with its coercion report
#[derive(Debug, Clone)]
pub struct LoadedHistory {
    pub history: SalesHistory,
    pub coercion: CoercionReport,
}

/// Loader options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Reject missing or non-numeric values instead of replacing them with zero
    pub strict: bool,
}

/// Data loader for daily sales tables
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    options: LoaderOptions,
}

impl DataLoader {
    /// Create a loader with the given options
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Load a sales history from a CSV file, coercing bad values to zero
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SalesHistory> {
        Ok(Self::default().load_csv(path)?.history)
    }

    /// Load a sales history from a CSV file with a `date` and `sales` header
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<LoadedHistory> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let loaded = self.load_dataframe(&df)?;
        info!(
            path = %path.display(),
            rows = loaded.history.len(),
            "loaded sales history"
        );
        Ok(loaded)
    }

    /// Build a sales history from an existing DataFrame
    pub fn from_dataframe(df: &DataFrame) -> Result<SalesHistory> {
        Ok(Self::default().load_dataframe(df)?.history)
    }

    /// Build a sales history and coercion report from an existing DataFrame
    pub fn load_dataframe(&self, df: &DataFrame) -> Result<LoadedHistory> {
        let date_column = Self::find_column(df, DATE_COLUMN).ok_or_else(|| {
            ForecastError::DataError(format!("No '{}' column found in data", DATE_COLUMN))
        })?;
        let sales_column = Self::find_column(df, SALES_COLUMN).ok_or_else(|| {
            ForecastError::DataError(format!("No '{}' column found in data", SALES_COLUMN))
        })?;

        let dates = Self::parse_dates(df, &date_column)?;
        let (sales, sales_coerced) = Self::coerce_numeric(df, &sales_column)?;
        let (promotions, promo_coerced) = match Self::find_column(df, PROMOTION_COLUMN) {
            Some(name) => Self::coerce_numeric(df, &name)?,
            None => (vec![0.0; dates.len()], 0),
        };

        let coercion = CoercionReport {
            sales: sales_coerced,
            onpromotion: promo_coerced,
        };
        if !coercion.is_clean() {
            if self.options.strict {
                return Err(ForecastError::DataError(format!(
                    "{} missing or non-numeric cells ({} in '{}', {} in '{}')",
                    coercion.total(),
                    coercion.sales,
                    SALES_COLUMN,
                    coercion.onpromotion,
                    PROMOTION_COLUMN
                )));
            }
            warn!(
                sales = coercion.sales,
                onpromotion = coercion.onpromotion,
                "replaced missing or non-numeric cells with zero"
            );
        }

        let mut records: Vec<SalesRecord> = dates
            .into_iter()
            .zip(sales)
            .zip(promotions)
            .map(|((date, sales), onpromotion)| SalesRecord::new(date, sales, onpromotion))
            .collect();
        records.sort_by_key(|r| r.date);

        Ok(LoadedHistory {
            history: SalesHistory::new(records)?,
            coercion,
        })
    }

    /// Find a column by case-insensitive name
    fn find_column(df: &DataFrame, wanted: &str) -> Option<String> {
        df.get_column_names()
            .into_iter()
            .find(|name| name.trim().eq_ignore_ascii_case(wanted))
            .map(|name| name.to_string())
    }

    fn parse_dates(df: &DataFrame, column: &str) -> Result<Vec<NaiveDate>> {
        let series = df.column(column)?.cast(&DataType::Utf8)?;
        let cells = series.utf8()?;

        cells
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                let text = cell.ok_or_else(|| {
                    ForecastError::DataError(format!("Missing date in row {}", row + 1))
                })?;
                parse_date(text).ok_or_else(|| {
                    ForecastError::DataError(format!(
                        "Unparseable date '{}' in row {}",
                        text,
                        row + 1
                    ))
                })
            })
            .collect()
    }

    /// Cast a column to f64, replacing nulls and non-finite values with zero
    fn coerce_numeric(df: &DataFrame, column: &str) -> Result<(Vec<f64>, usize)> {
        let series = df.column(column)?.cast(&DataType::Float64)?;
        let mut coerced = 0;
        let values: Vec<f64> = series
            .f64()?
            .into_iter()
            .map(|cell| match cell {
                Some(v) if v.is_finite() => v,
                _ => {
                    coerced += 1;
                    0.0
                }
            })
            .collect();

        Ok((values, coerced))
    }
}

/// Parse a calendar day from `YYYY-MM-DD`, optionally followed by a time
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
