//! Loading of the forest-fires record set from CSV.
//!
//! Records with any missing field are dropped silently. Month and day names
//! are recoded to fixed indices; a name outside the known tables aborts the
//! load, since it indicates a malformed file rather than a missing value.

use crate::error::{FireError, Result};
use crate::table::Table;
use ndarray::Array2;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Month names in index order: jan = 0 .. dec = 11.
pub const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Day-of-week names in index order: sun = 0 .. sat = 6.
pub const DAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Column names of the numeric observation table, in file order.
pub const RAW_COLUMNS: [&str; 13] = [
    "X", "Y", "month", "day", "FFMC", "DMC", "DC", "ISI", "temp", "RH", "wind", "rain", "area",
];

/// One CSV record with every field optional so that incomplete rows can be
/// detected and skipped instead of failing the whole parse.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "X")]
    x: Option<f64>,
    #[serde(rename = "Y")]
    y: Option<f64>,
    month: Option<String>,
    day: Option<String>,
    #[serde(rename = "FFMC")]
    ffmc: Option<f64>,
    #[serde(rename = "DMC")]
    dmc: Option<f64>,
    #[serde(rename = "DC")]
    dc: Option<f64>,
    #[serde(rename = "ISI")]
    isi: Option<f64>,
    temp: Option<f64>,
    #[serde(rename = "RH")]
    rh: Option<f64>,
    wind: Option<f64>,
    rain: Option<f64>,
    area: Option<f64>,
}

impl RawRecord {
    /// The numeric row, or None if any field is missing.
    fn to_row(&self) -> Result<Option<[f64; 13]>> {
        let (month, day) = match (&self.month, &self.day) {
            (Some(m), Some(d)) => (month_index(m)?, day_index(d)?),
            _ => return Ok(None),
        };
        let floats = [
            self.x, self.y, self.ffmc, self.dmc, self.dc, self.isi, self.temp, self.rh, self.wind,
            self.rain, self.area,
        ];
        if floats.iter().any(Option::is_none) {
            return Ok(None);
        }
        Ok(Some([
            self.x.unwrap(),
            self.y.unwrap(),
            month as f64,
            day as f64,
            self.ffmc.unwrap(),
            self.dmc.unwrap(),
            self.dc.unwrap(),
            self.isi.unwrap(),
            self.temp.unwrap(),
            self.rh.unwrap(),
            self.wind.unwrap(),
            self.rain.unwrap(),
            self.area.unwrap(),
        ]))
    }
}

/// Look up a month name, e.g. "aug" -> 7.
pub fn month_index(name: &str) -> Result<usize> {
    MONTHS
        .iter()
        .position(|&m| m == name)
        .ok_or_else(|| FireError::UnrecognizedCategory {
            kind: "month",
            value: name.to_string(),
        })
}

/// Look up a day-of-week name, e.g. "sun" -> 0.
pub fn day_index(name: &str) -> Result<usize> {
    DAYS.iter()
        .position(|&d| d == name)
        .ok_or_else(|| FireError::UnrecognizedCategory {
            kind: "day",
            value: name.to_string(),
        })
}

/// Read the observation table from any CSV source with a header row.
/// Returns the table along with the number of dropped incomplete records.
pub fn read_observations<R: Read>(reader: R) -> Result<(Table, usize)> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows: Vec<f64> = Vec::new();
    let mut n_rows = 0;
    let mut n_dropped = 0;
    for record in csv_reader.deserialize() {
        let record: RawRecord = record?;
        match record.to_row()? {
            Some(row) => {
                rows.extend_from_slice(&row);
                n_rows += 1;
            }
            None => n_dropped += 1,
        }
    }
    let data = Array2::from_shape_vec((n_rows, RAW_COLUMNS.len()), rows)
        .map_err(|e| FireError::BadInput(e.to_string()))?;
    let table = Table::new(RAW_COLUMNS.to_vec(), data)?;
    Ok((table, n_dropped))
}

/// Read the observation table from a CSV file on disk.
pub fn read_observations_file<P: AsRef<Path>>(path: P) -> Result<(Table, usize)> {
    let file = std::fs::File::open(path)?;
    read_observations(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "X,Y,month,day,FFMC,DMC,DC,ISI,temp,RH,wind,rain,area\n";

    #[test]
    fn month_and_day_tables() {
        assert_eq!(month_index("jan").unwrap(), 0);
        assert_eq!(month_index("dec").unwrap(), 11);
        assert_eq!(day_index("sat").unwrap(), 6);
        assert!(matches!(
            month_index("janvier"),
            Err(FireError::UnrecognizedCategory { kind: "month", .. })
        ));
    }

    #[test]
    fn incomplete_row_dropped() {
        // second record is missing its wind value
        let csv = format!(
            "{}7,5,mar,fri,86.2,26.2,94.3,5.1,8.2,51,6.7,0.0,0.0\n\
             7,4,oct,tue,90.6,35.4,669.1,6.7,18.0,33,,0.0,0.0\n",
            HEADER
        );
        let (table, dropped) = read_observations(csv.as_bytes()).unwrap();
        assert_eq!(table.n_rows(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn unknown_month_aborts() {
        let csv = format!("{}7,5,mars,fri,86.2,26.2,94.3,5.1,8.2,51,6.7,0.0,0.0\n", HEADER);
        assert!(read_observations(csv.as_bytes()).is_err());
    }
}
