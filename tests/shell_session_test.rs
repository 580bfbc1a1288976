use anyhow::Result;
use artic_table::{ArticFetcher, Command, SelectionReconciler, Shell};
use httpmock::prelude::*;
use std::io::Cursor;

fn mock_catalog(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/artworks")
            .query_param("page", "1")
            .query_param("limit", "3");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "pagination": {"total": 7},
                "data": [
                    {"id": 101, "title": "Nighthawks", "place_of_origin": "United States",
                     "artist_display": "Edward Hopper", "inscriptions": null,
                     "date_start": 1942, "date_end": 1942},
                    {"id": 102, "title": "The Bedroom", "place_of_origin": "France",
                     "artist_display": "Vincent van Gogh", "inscriptions": null,
                     "date_start": 1889, "date_end": null},
                    {"id": 103, "title": "American Gothic", "place_of_origin": null,
                     "artist_display": "Grant Wood", "date_start": 1930}
                ]
            }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/artworks")
            .query_param("page", "2")
            .query_param("limit", "3");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "pagination": {"total": 7},
                "data": [{"id": 201}, {"id": 202}, {"id": 203}]
            }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/artworks")
            .query_param("page", "3")
            .query_param("limit", "3");
        then.status(500);
    });
}

async fn new_shell(server: &MockServer) -> Shell<ArticFetcher> {
    let fetcher = ArticFetcher::new(server.url("/artworks"));
    let mut reconciler = SelectionReconciler::new(fetcher, 3);
    assert!(reconciler.load_page(1).await);
    Shell::new(reconciler)
}

#[tokio::test]
async fn test_selection_survives_page_round_trip() -> Result<()> {
    let server = MockServer::start();
    mock_catalog(&server);
    let mut shell = new_shell(&server).await;

    shell.execute("check 101,103".parse::<Command>()?).await?;
    shell.execute(Command::Next).await?;
    assert_eq!(shell.reconciler().window().page_number, 2);
    assert!(shell.reconciler().checked_on_page().is_empty());

    shell.execute("toggle 202".parse()?).await?;
    let reply = shell.execute(Command::Prev).await?;

    assert_eq!(shell.reconciler().checked_on_page(), vec![101, 103]);
    assert!(reply.output.contains("[x] | 101"));
    assert!(reply.output.contains("[ ] | 102"));
    assert!(reply.output.contains("3 selected"));

    let selected: Vec<u64> = shell.reconciler().selection().ids().collect();
    assert_eq!(selected, vec![101, 103, 202]);
    Ok(())
}

#[tokio::test]
async fn test_failed_navigation_keeps_stale_page() -> Result<()> {
    let server = MockServer::start();
    mock_catalog(&server);
    let mut shell = new_shell(&server).await;

    shell.execute(Command::Page(3)).await?;
    let reply = shell.execute(Command::Show).await?;

    assert_eq!(shell.reconciler().window().page_number, 1);
    assert!(reply.output.contains("Nighthawks"));
    Ok(())
}

#[tokio::test]
async fn test_rendered_page_never_shows_null() -> Result<()> {
    let server = MockServer::start();
    mock_catalog(&server);
    let mut shell = new_shell(&server).await;

    let reply = shell.execute(Command::Show).await?;
    assert!(!reply.output.contains("null"));

    shell.execute("check all".parse()?).await?;
    let csv = shell.execute("export csv".parse()?).await?.output;
    assert!(csv.contains("102,The Bedroom,France,Vincent van Gogh,,1889,\n"));
    assert!(!csv.contains("null"));
    Ok(())
}

#[tokio::test]
async fn test_scripted_session() -> Result<()> {
    let server = MockServer::start();
    mock_catalog(&server);
    let mut shell = new_shell(&server).await;

    let script = "toggle 102\nselect 5\nbogus\n\nselected\nselect 2\nselected\nquit\nshow\n";
    let mut output = Vec::new();
    shell.run(Cursor::new(script.as_bytes()), &mut output).await?;
    let output = String::from_utf8(output)?;

    assert!(output.contains("Selected 102 (1 selected)"));
    // 102 first, then 101 and 103 from this page, then 201 and 202 from page 2.
    assert!(output.contains("5 selected (+4 -0, 1 extra pages fetched)"));
    assert!(output.contains("error: unknown command 'bogus'"));
    assert_eq!(output.matches("Loading...").count(), 2);
    assert!(output.contains("   5. 202"));
    assert!(output.contains("2 selected (+0 -3, 0 extra pages fetched)"));

    let selected: Vec<u64> = shell.reconciler().selection().ids().collect();
    assert_eq!(selected, vec![102, 101]);

    // Nothing after `quit` runs: the header of the initial render is the only table.
    assert_eq!(output.matches("Place of Origin").count(), 1);
    Ok(())
}
