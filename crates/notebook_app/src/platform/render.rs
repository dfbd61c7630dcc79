use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use results_core::{OutputBody, ResultListView};
use results_engine::Viewport;

/// Rows kept on screen when following the tail.
pub(crate) const DEFAULT_VIEWPORT_HEIGHT: usize = 40;

/// ANSI clear screen and cursor home; every frame replaces the previous one.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Terminal surface for the result list.
///
/// A scroll request only marks the next frame as tail-following; drawing happens
/// in [`TerminalViewport::draw`] once the signal has been handled.
#[derive(Debug)]
pub(crate) struct TerminalViewport {
    height: usize,
    follow_tail: AtomicBool,
}

impl TerminalViewport {
    pub(crate) fn new(height: usize) -> Self {
        Self {
            height,
            follow_tail: AtomicBool::new(false),
        }
    }

    pub(crate) fn draw(&self, view: &ResultListView, out: &mut impl Write) -> io::Result<()> {
        let lines = render_lines(view);
        let follow_tail = self.follow_tail.swap(false, Ordering::AcqRel);
        write!(out, "{CLEAR_SCREEN}")?;
        for line in visible_window(&lines, self.height, follow_tail) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

impl Viewport for TerminalViewport {
    fn scroll_to_bottom(&self) {
        self.follow_tail.store(true, Ordering::Release);
    }
}

/// Pure text rendering of the result list.
pub(crate) fn render_lines(view: &ResultListView) -> Vec<String> {
    let mode = if view.append_results { "append" } else { "replace" };
    let mut lines = vec![format!("── results ({} items, {mode} mode) ──", view.rows.len())];
    for row in &view.rows {
        lines.push(format!("[{}] {}", row.index + 1, row.mime_type));
        match &row.body {
            OutputBody::Text(text) | OutputBody::Html(text) | OutputBody::Json(text) => {
                lines.extend(text.lines().map(|line| format!("    {line}")));
            }
            OutputBody::Image { byte_len } => {
                lines.push(format!("    <image, {byte_len} bytes base64>"));
            }
        }
    }
    lines
}

fn visible_window(lines: &[String], height: usize, follow_tail: bool) -> &[String] {
    if lines.len() <= height {
        return lines;
    }
    if follow_tail {
        &lines[lines.len() - height..]
    } else {
        &lines[..height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use results_core::{update, Output, Signal, ViewerState};

    fn view_with(texts: &[&str]) -> ResultListView {
        let batch = texts
            .iter()
            .map(|text| Output::typed("text/plain", *text))
            .collect();
        let (state, _) = update(ViewerState::new(), Signal::Results(batch));
        state.view()
    }

    #[test]
    fn renders_header_and_indented_bodies() {
        let lines = render_lines(&view_with(&["a\nb", "c"]));
        assert_eq!(
            lines,
            vec![
                "── results (2 items, replace mode) ──",
                "[1] text/plain",
                "    a",
                "    b",
                "[2] text/plain",
                "    c",
            ]
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let view = view_with(&["x"]);
        assert_eq!(render_lines(&view), render_lines(&view));
    }

    #[test]
    fn scroll_request_shows_the_tail_once() {
        let viewport = TerminalViewport::new(2);
        let view = view_with(&["first", "second"]);

        viewport.scroll_to_bottom();
        let mut tail = Vec::new();
        viewport.draw(&view, &mut tail).unwrap();
        assert_eq!(
            String::from_utf8(tail).unwrap(),
            format!("{CLEAR_SCREEN}[2] text/plain\n    second\n")
        );

        let mut head = Vec::new();
        viewport.draw(&view, &mut head).unwrap();
        assert!(String::from_utf8(head)
            .unwrap()
            .starts_with(&format!("{CLEAR_SCREEN}── results")));
    }

    #[test]
    fn each_frame_replaces_the_previous_one() {
        let viewport = TerminalViewport::new(DEFAULT_VIEWPORT_HEIGHT);
        let mut out = Vec::new();
        viewport.draw(&view_with(&["one"]), &mut out).unwrap();
        viewport.draw(&view_with(&["two"]), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(CLEAR_SCREEN).count(), 2);
        let last_frame = out.rsplit(CLEAR_SCREEN).next().unwrap();
        assert_eq!(
            last_frame,
            "── results (1 items, replace mode) ──\n[1] text/plain\n    two\n"
        );
    }
}
