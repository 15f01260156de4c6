//
//  klog-sdk
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! How the `klog` binary prints results. Two formats are supported:
//!
//! - **Table**: Human-readable, colored when the terminal allows it
//! - **JSON**: Pretty-printed, for scripting (`--json`)
//!
//! Lists are printed through [`TableRow`], single records through
//! [`TableOutput`].

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde::Serialize;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a single record.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes a list of records as one table.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values),
            OutputFormat::Table => {
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::HEADERS.iter().copied())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
                Ok(())
            }
        }
    }

    /// Writes any serializable value as JSON, or `text` in table mode.
    pub fn write_plain<T: Serialize + ?Sized>(&self, value: &T, text: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                println!("{text}");
                Ok(())
            }
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {msg}");
        }
    }

    /// Prints a success line. Suppressed in JSON mode so stdout stays parseable.
    pub fn write_success(&self, msg: &str) {
        if self.is_json() {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {msg}");
        }
    }
}

/// A record with a multi-line detail view.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// A record that renders as one row of a list table.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a `key: value` line, dimming the key when colored.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{key}: {value}");
    }
}

pub fn print_header(text: &str, color: bool) {
    if color {
        println!("{}", style(text).bold());
    } else {
        println!("{text}");
    }
    println!("{}", "-".repeat(text.chars().count()));
}
