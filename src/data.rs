//! Semicolon-separated files the calculator reads and writes.

pub mod catalog;
pub mod results;
pub mod series;

use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};

const DELIMITER: u8 = b';';

fn reader<R: Read>(inner: R) -> csv::Reader<R> {
    ReaderBuilder::new().delimiter(DELIMITER).trim(Trim::All).from_reader(inner)
}

fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new().delimiter(DELIMITER).from_writer(inner)
}

/// Writer which leaves the header to the caller, so that it is there even without any rows.
fn headless_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new().delimiter(DELIMITER).has_headers(false).from_writer(inner)
}
