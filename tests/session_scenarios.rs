use logscope::render::RenderPhase;
use logscope::{Command, Config, LogscopeError, Outcome, Session};
use proptest::prelude::*;

fn texts(session: &Session) -> Vec<String> {
    session
        .view()
        .visible_lines()
        .iter()
        .map(|line| line.text.clone())
        .collect()
}

fn tagged(session: &Session) -> Vec<(String, String, usize)> {
    session
        .view()
        .visible_lines()
        .iter()
        .map(|line| {
            (
                line.source_name.to_string(),
                line.text.clone(),
                line.original_index,
            )
        })
        .collect()
}

#[test]
fn errors_only_keeps_source_indices() {
    let mut session = Session::default();
    session
        .execute(Command::Import {
            file_name: "app.log".to_string(),
            raw_text: "INFO start\nERROR disk full\nINFO stop".to_string(),
        })
        .unwrap();
    session.execute(Command::ToggleErrorOnly).unwrap();

    assert_eq!(texts(&session), ["ERROR disk full"]);
    assert_eq!(session.view().visible_lines()[0].original_index, 1);

    let frame = session.frame();
    assert_eq!(frame.rows.len(), 1);
    assert_eq!(frame.rows[0].line_number, 2);
}

#[test]
fn mass_search_groups_by_selection_order() {
    let mut session = Session::default();
    session.import("a.log", "x\nerror y").unwrap();
    session.import("b.log", "z\nerror w").unwrap();
    session.execute(Command::ToggleChecked("a.log".into())).unwrap();
    session.execute(Command::ToggleChecked("b.log".into())).unwrap();

    let outcome = session
        .execute(Command::MassSearch("error".into()))
        .unwrap();
    assert_eq!(outcome, Outcome::Matches(2));
    assert_eq!(session.view().active_source(), Some("Query"));
    assert_eq!(
        tagged(&session),
        [
            ("a.log".to_string(), "error y".to_string(), 1),
            ("b.log".to_string(), "error w".to_string(), 1),
        ]
    );

    // Synthetic rows are prefixed with their source and carry its color
    let frame = session.frame();
    assert_eq!(frame.rows[0].text, "[a.log] error y");
    assert_eq!(
        frame.rows[1].color,
        Some(session.store().get("b.log").unwrap().color)
    );
}

#[test]
fn large_view_materializes_only_the_window() {
    let config = Config {
        row_height: 20,
        ..Config::default()
    };
    let mut session = Session::new(&config, 600);
    let text: Vec<String> = (0..10_000).map(|i| format!("line {i}")).collect();
    session.import("big.log", &text.join("\n")).unwrap();

    let frame = session.frame();
    assert_eq!(frame.total_height, 200_000);
    assert!(frame.rows.len() <= 31);
    assert_eq!(frame.rows[0].index, 0);

    session.execute(Command::Scroll(4_321)).unwrap();
    let frame = session.frame();
    assert_eq!(frame.phase, RenderPhase::Scrolled);
    assert!(frame.rows.len() <= 31);
    assert_eq!(frame.rows[0].index, 4_321);
    assert_eq!(frame.rows[0].top, 4_321 * 20);

    session.execute(Command::ScrollToBottom).unwrap();
    let frame = session.frame();
    assert!(frame.rows.len() <= 31);
    assert_eq!(frame.rows.last().unwrap().index, 9_999);
}

#[test]
fn replace_while_query_active_reruns_mass_search() {
    let mut session = Session::default();
    session.import("a.log", "INFO boot\nERROR disk full").unwrap();
    session.import("b.log", "ERROR disk slow\nINFO ok").unwrap();
    session.set_checked("a.log", true);
    session.set_checked("b.log", true);
    session.mass_search("error").unwrap();

    let outcome = session
        .execute(Command::Replace {
            find: "disk".into(),
            replace: "volume".into(),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Replaced(2));
    assert_eq!(session.view().active_source(), Some("Query"));
    assert_eq!(texts(&session), ["ERROR volume full", "ERROR volume slow"]);
    assert_eq!(
        session.store().get("a.log").unwrap().lines(),
        ["INFO boot", "ERROR volume full"]
    );
}

#[test]
fn failed_commands_leave_state_unchanged() {
    let mut session = Session::default();
    session.import("a.log", "one\ntwo").unwrap();

    let err = session
        .execute(Command::Import {
            file_name: "a.log".into(),
            raw_text: "again".into(),
        })
        .unwrap_err();
    assert!(matches!(err, LogscopeError::DuplicateSource { .. }));
    let err = session
        .execute(Command::MassSearch("one".into()))
        .unwrap_err();
    assert!(matches!(err, LogscopeError::NoSourceChecked));

    assert_eq!(session.store().len(), 1);
    assert_eq!(texts(&session), ["one", "two"]);
    assert!(session.store().synthetic().is_none());
}

#[test]
fn export_writes_what_is_shown() {
    let mut session = Session::default();
    session.import("app.log", "INFO a\nERROR b\nERROR c").unwrap();
    session.search("error").unwrap();

    match session.execute(Command::Export).unwrap() {
        Outcome::Exported(payload) => {
            assert_eq!(payload.file_name, "app.log_export.log");
            assert_eq!(payload.bytes, b"ERROR b\nERROR c");
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

proptest! {
    #[test]
    fn search_results_are_ordered_and_match(
        lines in prop::collection::vec("[a-eE ]{0,12}", 0..60),
        term in "[a-e]{1,2}",
    ) {
        let mut session = Session::default();
        session.import("p.log", &lines.join("\n")).unwrap();
        session.search(&term).unwrap();

        let visible = session.view().visible_lines();
        let source = session.store().get("p.log").unwrap();
        prop_assert!(visible.len() <= source.line_count());
        for pair in visible.windows(2) {
            prop_assert!(pair[0].original_index < pair[1].original_index);
        }
        for line in visible {
            prop_assert_eq!(&line.text, &source.lines()[line.original_index]);
            prop_assert!(line.text.to_lowercase().contains(&term));
        }
    }
}
