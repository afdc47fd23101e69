//! Text rendering of a debug view.

use std::fmt::Write as _;

use stepwise_debug::{RunStatus, Snapshot};

pub fn render_text(status: RunStatus, snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let status = match status {
        RunStatus::Completed => "completed",
        RunStatus::Halted => "halted",
        RunStatus::Raised => "raised",
        RunStatus::NoScope => "no scope",
    };
    let _ = writeln!(out, "status: {status}");

    out.push_str("variables:\n");
    for line in snapshot.variables.to_string().lines() {
        let _ = writeln!(out, "  {line}");
    }

    if snapshot.banner.visible {
        out.push_str("exception:\n");
        for line in snapshot.banner.text().lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    if !snapshot.output.is_empty() {
        out.push_str("output:\n");
        for line in snapshot.output.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}
