use crate::app::{App, PatchSource};
use crate::config::Config;
use crate::ui;
use ratatui::{backend::TestBackend, buffer::Buffer, style::Modifier, Terminal};
use tandem_core::{DiffSession, ViewMode};

const PATCH: &str = "\
diff --git a/greet.py b/greet.py
index 5d1c0aa..9e2b7f1 100644
--- a/greet.py
+++ b/greet.py
@@ -1,5 +1,4 @@
 def greet(name):
-    print(\"hi\")
-    print(name)
+    print(f\"hi {name}\")
     return None
 # end
@@ -20,2 +19,3 @@ def main():
     greet(\"a\")
+    greet(\"b\")
     greet(\"c\")
diff --git a/logo.png b/logo.png
index 3333333..4444444 100644
Binary files a/logo.png and b/logo.png differ
";

fn make_app(view_mode: ViewMode) -> App {
    let session = DiffSession::from_patch(PATCH, view_mode).expect("patch parses");
    App::new(session, PatchSource::Stdin, &Config::default())
}

fn render_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|frame| ui::draw(frame, app)).expect("draw");
    terminal.backend().buffer().clone()
}

fn buffer_text(buf: &Buffer) -> Vec<String> {
    let mut lines = Vec::new();
    for y in 0..buf.area.height {
        let mut line = String::new();
        for x in 0..buf.area.width {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line);
    }
    lines
}

#[test]
fn test_split_render_aligns_replacement() {
    let mut app = make_app(ViewMode::SideBySide);
    let lines = buffer_text(&render_buffer(&mut app, 80, 14));

    assert!(lines[0].contains("greet.py"));
    assert!(lines[0].contains("+2"));
    assert!(lines[0].contains("[1/2]"));

    // Body starts on row 1; aligned row 2 pairs the first deletion
    // with its replacement
    let row = &lines[3];
    assert!(row.contains("print(\"hi\")"), "{row}");
    assert!(row.contains("print(f\"hi {name}\")"), "{row}");
    assert!(row.contains('▶'), "caret marker on the new column");

    let padded = &lines[4];
    assert!(padded.contains("print(name)"), "{padded}");
    assert!(padded.contains("╱╱╱"), "padding under the replacement");

    let status = &lines[13];
    assert!(status.contains("SPLIT"));
    assert!(status.contains("block 1/2"));
    assert!(status.contains("row 3/10"));
}

#[test]
fn test_split_extent_marker_on_unfocused_column() {
    let mut app = make_app(ViewMode::SideBySide);
    let lines = buffer_text(&render_buffer(&mut app, 80, 14));

    // Old column gutter of rows inside the current block
    assert!(lines[3].starts_with('▌'), "{}", lines[3]);
    assert!(lines[4].starts_with('▌'), "{}", lines[4]);
    assert!(lines[5].starts_with(' '), "{}", lines[5]);
}

#[test]
fn test_combined_render_shows_signs() {
    let mut app = make_app(ViewMode::Combined);
    let text = buffer_text(&render_buffer(&mut app, 80, 16));

    let deleted = text
        .iter()
        .find(|line| line.contains("-    print(\"hi\")"))
        .expect("deleted line rendered");
    assert!(deleted.starts_with('▶'));
    assert!(text.iter().any(|line| line.contains("+    print(f\"hi {name}\")")));
    assert!(text.iter().any(|line| line.contains("@@ -20,2 +19,3 @@ def main():")));
    assert!(!text.join("\n").contains('╱'));

    let status = &text[15];
    assert!(status.contains("COMBINED"));
    assert!(status.contains("row 3/11"));
}

#[test]
fn test_combined_without_line_numbers() {
    let mut app = make_app(ViewMode::Combined);
    app.line_numbers = false;
    let lines = buffer_text(&render_buffer(&mut app, 60, 16));

    assert!(lines[3].starts_with("▶-    print(\"hi\")"), "{}", lines[3]);
}

#[test]
fn test_selection_is_reversed() {
    let mut app = make_app(ViewMode::Combined);
    app.toggle_selection();
    let buf = render_buffer(&mut app, 80, 16);

    // Gutter is 11 columns wide; caret row 2 sits on screen row 3
    let cell = &buf[(11, 3)];
    assert_eq!(cell.symbol(), "-");
    assert!(cell.modifier.contains(Modifier::REVERSED));
    assert!(!buf[(11, 4)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn test_binary_file_placeholder() {
    let mut app = make_app(ViewMode::SideBySide);
    app.next_file();
    let text = buffer_text(&render_buffer(&mut app, 80, 14)).join("\n");

    assert!(text.contains("logo.png"));
    assert!(text.contains("Binary file (not shown)"));
    assert!(text.contains("block -/-"));
}

#[test]
fn test_status_shows_mapped_selection() {
    let mut app = make_app(ViewMode::SideBySide);
    app.map_selection();
    let lines = buffer_text(&render_buffer(&mut app, 80, 14));

    assert!(lines[13].contains("lines 5-5 (old -, new 2)"), "{}", lines[13]);
}

#[test]
fn test_help_popover() {
    let mut app = make_app(ViewMode::Combined);
    app.show_help = true;
    let text = buffer_text(&render_buffer(&mut app, 80, 24)).join("\n");

    assert!(text.contains(" Help "));
    assert!(text.contains("Next/prev block"));
    assert!(text.contains("Prev/next file"));
}
