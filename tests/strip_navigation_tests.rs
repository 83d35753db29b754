use pagebar::main_app::{App, run_app_with_event_source};
use pagebar::pager::PagerConfig;
use pagebar::query_store::{PageStore, QueryStringStore};
use pagebar::test_utils::test_helpers::TestScenarioBuilder;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn config(total_pages: u32, initial_page: u32) -> PagerConfig {
    PagerConfig {
        total_pages,
        button_count: 10,
        initial_page,
        page_query: None,
    }
}

// With an 80x24 terminal the strip renders on row 22:
// " First  Prev  1  2  3 ... Next  Last" with " First " at columns 0..7,
// " Prev " at 7..13 and the first number button at column 13.
const STRIP_ROW: u16 = 22;

#[test]
fn keyboard_script_lands_on_expected_page() {
    let mut app = App::new(config(20, 1)).unwrap();
    let mut event_source = TestScenarioBuilder::new()
        .next_page(3)
        .prev_page(1)
        .last_page()
        .quit()
        .build();

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    run_app_with_event_source(&mut terminal, &mut app, &mut event_source).unwrap();

    assert_eq!(app.pager().current_page(), 20);
    assert_eq!(app.page_changes(), vec![2, 3, 4, 3, 20]);
}

#[test]
fn clicking_a_number_button_jumps_to_its_page() {
    let mut app = App::new(config(20, 1)).unwrap();
    // Third number button " 3 " spans columns 19..22.
    let mut event_source = TestScenarioBuilder::new().click(20, STRIP_ROW).quit().build();

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    run_app_with_event_source(&mut terminal, &mut app, &mut event_source).unwrap();

    assert_eq!(app.pager().current_page(), 3);
    assert_eq!(app.page_changes(), vec![3]);
}

#[test]
fn clicking_disabled_prev_on_first_page_is_absorbed() {
    let mut app = App::new(config(20, 1)).unwrap();
    // " Prev " spans columns 7..13; it is disabled on page 1.
    let mut event_source = TestScenarioBuilder::new().click(8, STRIP_ROW).quit().build();

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    run_app_with_event_source(&mut terminal, &mut app, &mut event_source).unwrap();

    assert_eq!(app.pager().current_page(), 1);
    assert!(app.page_changes().is_empty());
}

#[test]
fn scrolling_over_the_strip_pages_forward() {
    let mut app = App::new(config(20, 5)).unwrap();
    let mut event_source = TestScenarioBuilder::new()
        .scroll_down(10, STRIP_ROW)
        .quit()
        .build();

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    run_app_with_event_source(&mut terminal, &mut app, &mut event_source).unwrap();

    assert_eq!(app.pager().current_page(), 6);
}

#[test]
fn transitions_write_through_to_the_query_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.txt");

    let store = QueryStringStore::with_file(&path);
    let mut app = App::with_store(
        PagerConfig {
            total_pages: 20,
            button_count: 10,
            initial_page: 1,
            page_query: Some("page".to_string()),
        },
        Box::new(store),
    )
    .unwrap();

    let mut event_source = TestScenarioBuilder::new().press_char('7').quit().build();
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    run_app_with_event_source(&mut terminal, &mut app, &mut event_source).unwrap();

    assert_eq!(app.pager().current_page(), 7);
    assert_eq!(app.page_changes(), vec![7]);

    let reloaded = QueryStringStore::load_from_file(&path).unwrap();
    assert_eq!(reloaded.get("page"), Some(7));
}

#[test]
fn stored_page_restores_on_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.txt");
    std::fs::write(&path, "page=5").unwrap();

    let store = QueryStringStore::load_from_file(&path).unwrap();
    let initial_page = store.get("page").unwrap_or(1);

    let app = App::with_store(
        PagerConfig {
            total_pages: 20,
            button_count: 10,
            initial_page,
            page_query: Some("page".to_string()),
        },
        Box::new(store),
    )
    .unwrap();

    assert_eq!(app.pager().current_page(), 5);
}
