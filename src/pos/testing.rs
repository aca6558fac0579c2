//! Test support
//!
//! Builders for pos documents used by unit and integration tests. Keeping
//! the construction here means tests assert against documents whose byte
//! layout is known-good instead of each test hand-rolling tag lines.

use std::fmt::Write;

/// Build one `#[data]`...`#[done]` frame.
pub fn data_frame(labels: &[&str], rows: &[&[f32]]) -> String {
    let mut out = String::from("#[data]");
    for label in labels {
        write!(out, " {}", label).unwrap();
    }
    out.push('\n');
    push_rows(&mut out, rows);
    out.push_str("#[done]\n");
    out
}

/// Build one `box`...`eof` frame with optional `def` declarations.
pub fn box_frame(labels: &[&str], defs: &[&[&str]], rows: &[&[f32]]) -> String {
    let mut out = String::from("box");
    for label in labels {
        write!(out, " {}", label).unwrap();
    }
    out.push('\n');
    for def in defs {
        out.push_str("def");
        for token in *def {
            write!(out, " {}", token).unwrap();
        }
        out.push('\n');
    }
    push_rows(&mut out, rows);
    out.push_str("eof\n");
    out
}

/// A small well-formed trajectory: two data frames and two box frames.
pub fn sample_trajectory() -> String {
    format!(
        "{}{}{}{}",
        data_frame(&["x", "y", "z"], &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]),
        box_frame(&["lx", "ly"], &[&["A", "sphere"]], &[&[10.0, 10.0]]),
        data_frame(&["x", "y", "z"], &[&[7.0, 8.0, 9.0]]),
        box_frame(&["lx", "ly"], &[], &[&[12.0, 12.0]]),
    )
}

fn push_rows(out: &mut String, rows: &[&[f32]]) {
    for row in rows {
        let mut first = true;
        for value in *row {
            if first {
                first = false;
            } else {
                out.push(' ');
            }
            write!(out, "{}", value).unwrap();
        }
        out.push('\n');
    }
}
