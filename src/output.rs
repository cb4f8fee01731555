//! Writers for range values and grid rows.

use std::io::{self, Write};

use clap::ValueEnum;
use serde_json::{Map, Value};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One value per line, `name = value` for named ranges.
    #[default]
    Plain,
    /// JSON Lines.
    Json,
    Csv,
}

enum Sink<W: Write> {
    Plain(W),
    Json(W),
    Csv(csv::Writer<W>),
}

/// Streams values one at a time so unbounded ranges never buffer.
pub struct Emitter<W: Write> {
    sink: Sink<W>,
    rows: u64,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, format: Format) -> Emitter<W> {
        let sink = match format {
            Format::Plain => Sink::Plain(out),
            Format::Json => Sink::Json(out),
            Format::Csv => Sink::Csv(csv::Writer::from_writer(out)),
        };
        Emitter { sink, rows: 0 }
    }

    /// Column names. Only CSV writes a header.
    pub fn header(&mut self, names: &[&str]) -> io::Result<()> {
        if let Sink::Csv(w) = &mut self.sink {
            w.write_record(names).map_err(csv_io)?;
        }
        Ok(())
    }

    pub fn value(&mut self, name: Option<&str>, v: f64) -> io::Result<()> {
        match (&mut self.sink, name) {
            (Sink::Plain(w), None) => writeln!(w, "{v}")?,
            (Sink::Plain(w), Some(name)) => writeln!(w, "{name} = {v}")?,
            (Sink::Json(w), None) => {
                serde_json::to_writer(&mut *w, &json_number(v))?;
                writeln!(w)?;
            }
            (Sink::Json(w), Some(name)) => {
                let mut obj = Map::new();
                obj.insert("name".to_string(), Value::from(name));
                obj.insert("value".to_string(), json_number(v));
                serde_json::to_writer(&mut *w, &obj)?;
                writeln!(w)?;
            }
            (Sink::Csv(w), None) => w.write_record([v.to_string()]).map_err(csv_io)?,
            (Sink::Csv(w), Some(name)) => w
                .write_record([name.to_string(), v.to_string()])
                .map_err(csv_io)?,
        }
        self.rows += 1;
        Ok(())
    }

    /// One grid combination. `names` and `row` are parallel.
    pub fn row(&mut self, names: &[String], row: &[f64]) -> io::Result<()> {
        match &mut self.sink {
            Sink::Plain(w) => {
                if self.rows > 0 {
                    writeln!(w)?;
                }
                for (name, v) in names.iter().zip(row) {
                    writeln!(w, "{name} = {v}")?;
                }
            }
            Sink::Json(w) => {
                let obj: Map<String, Value> = names
                    .iter()
                    .zip(row)
                    .map(|(name, v)| (name.clone(), json_number(*v)))
                    .collect();
                serde_json::to_writer(&mut *w, &obj)?;
                writeln!(w)?;
            }
            Sink::Csv(w) => w
                .write_record(row.iter().map(|v| v.to_string()))
                .map_err(csv_io)?,
        }
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Plain(w) | Sink::Json(w) => w.flush(),
            Sink::Csv(w) => w.flush(),
        }
    }
}

/// Unwraps I/O failures from the CSV writer so their kind (e.g. a closed
/// pipe) survives.
fn csv_io(err: csv::Error) -> io::Error {
    if !err.is_io_error() {
        return err.into();
    }
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        kind => io::Error::other(format!("{kind:?}")),
    }
}

/// JSON has no infinities; they are written as the strings `"inf"`/`"-inf"`.
fn json_number(v: f64) -> Value {
    if v.is_finite() {
        Value::from(v)
    } else {
        Value::String(v.to_string())
    }
}
