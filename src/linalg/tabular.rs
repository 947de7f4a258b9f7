/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Conversion between matrices and row-oriented tables.

use crate::errors::shape_mismatch;
use crate::{Matrix, Result};
use ::indexmap::IndexMap;

/// One value of a table, before conversion to a number.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Bool(bool),
    Text(String),
    Missing,
}

impl Cell {
    /// Booleans become `1.0`/`0.0`.  Text is parsed as a float (surrounding
    /// whitespace allowed).  Anything else is NaN.
    pub fn to_f64(&self) -> f64 {
        match *self {
            Cell::Number(x) => x,
            Cell::Bool(b) => if b { 1.0 } else { 0.0 },
            Cell::Text(ref s) => s.trim().parse().unwrap_or(::std::f64::NAN),
            Cell::Missing => ::std::f64::NAN,
        }
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self { Cell::Number(x) }
}

impl From<i32> for Cell {
    fn from(x: i32) -> Self { Cell::Number(x.into()) }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self { Cell::Bool(b) }
}

impl<'a> From<&'a str> for Cell {
    fn from(s: &'a str) -> Self { Cell::Text(s.to_string()) }
}

impl From<String> for Cell {
    fn from(s: String) -> Self { Cell::Text(s) }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(x: Option<T>) -> Self { x.map_or(Cell::Missing, Into::into) }
}

/// A rectangular table that can be read one record (row) at a time.
pub trait TabularSource {
    fn ncols(&self) -> usize;

    fn records(&self) -> Box<dyn Iterator<Item = &[Cell]> + '_>;
}

impl<R: AsRef<[Cell]>> TabularSource for [R] {
    fn ncols(&self) -> usize { self.first().map_or(0, |r| r.as_ref().len()) }

    fn records(&self) -> Box<dyn Iterator<Item = &[Cell]> + '_> {
        Box::new(self.iter().map(|r| r.as_ref()))
    }
}

impl<R: AsRef<[Cell]>> TabularSource for Vec<R> {
    fn ncols(&self) -> usize { self[..].ncols() }

    fn records(&self) -> Box<dyn Iterator<Item = &[Cell]> + '_> { self[..].records() }
}

impl Matrix {
    /// One matrix row per record.  Every record must have `ncols()` cells.
    pub fn from_records<T: TabularSource + ?Sized>(table: &T) -> Result<Matrix> {
        let ncols = table.ncols();
        let mut rows = vec![];
        for record in table.records() {
            if record.len() != ncols {
                return Err(shape_mismatch("from_records", format!("records of {} cells", ncols), record.len()));
            }
            rows.push(record.iter().map(Cell::to_f64).collect::<Vec<_>>());
        }
        Matrix::from_rows(&rows)
    }

    /// One record per row, keyed by column name.
    ///
    /// Without `colnames`, columns are labeled `V0`, `V1`, ...
    pub fn to_records(&self, colnames: Option<&[String]>) -> Result<Vec<IndexMap<String, f64>>> {
        let labels: Vec<String> = match colnames {
            Some(names) if names.len() != self.ncols() => {
                return Err(shape_mismatch("to_records", format!("{} column names", self.ncols()), names.len()));
            },
            Some(names) => names.to_vec(),
            None => (0..self.ncols()).map(|j| format!("V{}", j)).collect(),
        };

        Ok(self.to_rows().into_iter().map(|row| {
            labels.iter().cloned().zip(row).collect()
        }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn cell_conversion() {
        let table = vec![
            vec![Cell::from(1.5), Cell::from(true), Cell::from(" 2e3 ")],
            vec![Cell::from(2), Cell::from(false), Cell::from("n/a")],
            vec![Cell::from(None::<f64>), Cell::from(Some(3.0)), Cell::from(String::from("-4"))],
        ];
        let m = Matrix::from_records(&table).unwrap();
        assert_eq!(m.dims(), (3, 3));
        assert_eq!(m.to_rows()[0], vec![1.5, 1.0, 2000.0]);
        assert_eq!(m.get(1, 0).unwrap(), 2.0);
        assert_eq!(m.get(1, 1).unwrap(), 0.0);
        assert!(m.get(1, 2).unwrap().is_nan());
        assert!(m.get(2, 0).unwrap().is_nan());
        assert_eq!(m.to_rows()[2][1..], [3.0, -4.0]);
    }

    #[test]
    fn ragged_records() {
        let table = vec![vec![Cell::from(1.0), Cell::from(2.0)], vec![Cell::from(3.0)]];
        assert!(match Matrix::from_records(&table) {
            Err(Error::ShapeMismatch { .. }) => true,
            _ => false,
        });
        let empty: Vec<Vec<Cell>> = vec![];
        assert_eq!(Matrix::from_records(&empty).unwrap().dims(), (0, 0));
    }

    #[test]
    fn records_default_labels() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let records = m.to_records(None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].keys().collect::<Vec<_>>(), vec!["V0", "V1"]);
        assert_eq!(records[1]["V0"], 3.0);
        assert_eq!(records[0]["V1"], 2.0);
    }

    #[test]
    fn records_named_columns() {
        let m = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
        let names = vec!["sr".to_string(), "pop15".to_string()];
        let records = m.to_records(Some(&names[..])).unwrap();
        assert_eq!(records[0].get_index(1), Some((&"pop15".to_string(), &2.0)));
        assert!(m.to_records(Some(&names[..1])).is_err());
    }
}
