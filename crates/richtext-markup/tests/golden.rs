use ratatui::text::Line;
use richtext_core::theme::Theme;
use richtext_markup::view::{FormattedTextView, FormattedTextViewOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
struct GoldenCase {
    name: &'static str,
    fixture: &'static str,
    width: u16,
    options: FormattedTextViewOptions,
}

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .expect("repo root")
}

fn read_fixture(rel: &str) -> String {
    fs::read_to_string(repo_root().join(rel)).expect("read fixture")
}

fn golden_path(case: &GoldenCase) -> PathBuf {
    repo_root()
        .join("docs/fixtures/golden/richtext")
        .join(format!("{}__w{}.txt", case.name, case.width))
}

fn normalize(s: &str) -> String {
    let mut out = String::new();
    for (i, line) in s.replace("\r\n", "\n").split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end());
    }
    out.trim_end_matches('\n').to_string()
}

fn line_to_plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn render(case: &GoldenCase) -> String {
    let source = read_fixture(case.fixture);
    let mut view = FormattedTextView::with_options(case.options.clone());
    view.set_text(&source);
    let lines = view
        .lines_for_width(case.width, &Theme::default())
        .iter()
        .map(line_to_plain)
        .collect::<Vec<_>>()
        .join("\n");
    normalize(&lines)
}

fn update_goldens_enabled() -> bool {
    matches!(
        std::env::var("UPDATE_GOLDENS").as_deref(),
        Ok("1" | "true" | "yes")
    )
}

fn check_golden(case: GoldenCase) {
    let got = render(&case);
    let path = golden_path(&case);

    if update_goldens_enabled() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create golden dir");
        }
        fs::write(&path, format!("{got}\n")).expect("write golden");
        return;
    }

    let expected = fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!(
            "missing golden file: {}\nRun: UPDATE_GOLDENS=1 cargo test -p richtext-markup golden",
            path.display()
        )
    });
    assert_eq!(
        got,
        normalize(&expected),
        "golden mismatch: {}\nRun: UPDATE_GOLDENS=1 cargo test -p richtext-markup golden",
        path.display()
    );
}

#[test]
fn golden_sample_w80() {
    check_golden(GoldenCase {
        name: "sample",
        fixture: "docs/fixtures/sample.txt",
        width: 80,
        options: FormattedTextViewOptions::default(),
    });
}

#[test]
fn golden_sample_w30() {
    check_golden(GoldenCase {
        name: "sample",
        fixture: "docs/fixtures/sample.txt",
        width: 30,
        options: FormattedTextViewOptions::default(),
    });
}

#[test]
fn golden_lists_renumbered_w20() {
    check_golden(GoldenCase {
        name: "lists__renumbered",
        fixture: "docs/fixtures/lists.txt",
        width: 20,
        options: FormattedTextViewOptions {
            renumber_ordered: true,
            ..FormattedTextViewOptions::default()
        },
    });
}
