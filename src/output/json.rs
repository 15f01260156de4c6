//
//  klog-sdk
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output for `--json`.

use std::io::{self, Write};

use serde::Serialize;

/// Pretty-prints `value` to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    write_json_to(&mut stdout.lock(), value)
}

/// Pretty-prints `value` to `writer`, followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_to_buffer() {
        let mut buf = Vec::new();
        write_json_to(&mut buf, &serde_json::json!({"slug": "rust"})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"slug\": \"rust\""));
        assert!(text.ends_with('\n'));
    }
}
