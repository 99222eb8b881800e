//! Integration tests for the busy times pages

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use scraper::{Html, Selector};
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_string, snapshot_source, test_app, test_app_with};

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .uri("/setdata")
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn get_page(app: &Router, uri: &str) -> Html {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        Html::parse_document(&body_to_string(response.into_body()).await)
    }

    fn count(doc: &Html, selector: &str) -> usize {
        doc.select(&Selector::parse(selector).unwrap()).count()
    }

    fn attr(doc: &Html, selector: &str, name: &str) -> Option<String> {
        doc.select(&Selector::parse(selector).unwrap())
            .next()
            .and_then(|el| el.value().attr(name))
            .map(String::from)
    }

    fn cell_texts(doc: &Html) -> Vec<Vec<String>> {
        let row = Selector::parse("table.busy-times tbody tr").unwrap();
        let cell = Selector::parse("td").unwrap();
        doc.select(&row)
            .map(|tr| {
                tr.select(&cell)
                    .map(|td| td.text().collect::<String>())
                    .collect()
            })
            .collect()
    }

    /// Tests the first visit shows defaults and the authorization prompt
    #[tokio::test]
    async fn it_renders_defaults_on_first_visit() {
        let app = test_app();
        let doc = get_page(&app, "/").await;

        assert_eq!(attr(&doc, "input[name=begin_time]", "value").unwrap(), "09:00");
        assert_eq!(attr(&doc, "input[name=end_time]", "value").unwrap(), "17:00");

        // Tomorrow through a week from the pinned 2024-01-03
        assert_eq!(
            attr(&doc, "input[name=daterange]", "value").unwrap(),
            "01/04/2024 - 01/10/2024"
        );

        assert_eq!(count(&doc, "p.authorize"), 1);
        assert_eq!(count(&doc, "input[type=checkbox]"), 0);
        assert_eq!(count(&doc, "table.busy-times"), 0);
        assert_eq!(attr(&doc, "input#submit", "disabled"), None);
    }

    /// Tests /index is the same page as /
    #[tokio::test]
    async fn it_serves_the_index_alias() {
        let app = test_app();
        let doc = get_page(&app, "/index").await;
        assert_eq!(count(&doc, "form[action='/setdata']"), 1);
    }

    /// Tests a valid submission is stored and redirects to /display
    #[tokio::test]
    async fn it_stores_a_valid_submission() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_form(
                "begin_time=08%3A30&end_time=1%3A30pm&daterange=01%2F01%2F2024+-+01%2F07%2F2024",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/display"
        );

        let doc = get_page(&app, "/").await;
        assert_eq!(attr(&doc, "input[name=begin_time]", "value").unwrap(), "08:30");
        assert_eq!(attr(&doc, "input[name=end_time]", "value").unwrap(), "13:30");
        assert_eq!(
            attr(&doc, "input[name=daterange]", "value").unwrap(),
            "01/01/2024 - 01/07/2024"
        );
    }

    /// Tests the server rejects a window that ends before it begins
    #[tokio::test]
    async fn it_rejects_an_inverted_window() {
        let app = test_app();

        let response = app
            .oneshot(post_form(
                "begin_time=17%3A00&end_time=09%3A00&daterange=01%2F01%2F2024+-+01%2F07%2F2024",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("must be before"));
    }

    /// Tests equal begin and end times count as invalid
    #[tokio::test]
    async fn it_rejects_an_empty_window() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_form(
                "begin_time=09%3A00&end_time=09%3A00&daterange=01%2F01%2F2024+-+01%2F07%2F2024",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Nothing was stored
        let doc = get_page(&app, "/").await;
        assert_eq!(attr(&doc, "input[name=end_time]", "value").unwrap(), "17:00");
    }

    /// Tests unreadable times and dates are rejected
    #[tokio::test]
    async fn it_rejects_unreadable_values() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_form(
                "begin_time=soon&end_time=09%3A00&daterange=01%2F01%2F2024+-+01%2F07%2F2024",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(post_form(
                "begin_time=08%3A00&end_time=09%3A00&daterange=next+week",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post_form(
                "begin_time=08%3A00&end_time=09%3A00&daterange=01%2F07%2F2024+-+01%2F01%2F2024",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests a submission missing fields never reaches the handler
    #[tokio::test]
    async fn it_rejects_missing_fields() {
        let app = test_app();

        let response = app.oneshot(post_form("begin_time=08%3A00")).await.unwrap();
        assert!(response.status().is_client_error());
    }

    /// Tests /display without a calendar source stays unauthorized
    #[tokio::test]
    async fn it_displays_prompt_without_a_source() {
        let app = test_app();
        let doc = get_page(&app, "/display").await;

        assert_eq!(count(&doc, "p.authorize"), 1);
        assert_eq!(count(&doc, "input[type=checkbox]"), 0);
    }

    /// Tests the first /display lists selected calendars but no busy times
    #[tokio::test]
    async fn it_lists_calendars_after_authorization() {
        let app = test_app_with(Some(snapshot_source()));
        let doc = get_page(&app, "/display").await;

        assert_eq!(count(&doc, "p.authorize"), 0);
        assert_eq!(count(&doc, "table.busy-times"), 0);

        let values: Vec<String> = doc
            .select(&Selector::parse("input[type=checkbox]").unwrap())
            .filter_map(|el| el.value().attr("value").map(String::from))
            .collect();
        // Primary first, unselected calendars are not offered
        assert_eq!(values, vec!["me@example.com", "home"]);
    }

    /// Tests the full submit then display flow produces busy times
    #[tokio::test]
    async fn it_displays_busy_times_for_selected_calendars() {
        let app = test_app_with(Some(snapshot_source()));

        let response = app
            .clone()
            .oneshot(post_form(
                "begin_time=09%3A00&end_time=17%3A00\
                 &daterange=01%2F01%2F2024+-+01%2F07%2F2024\
                 &checkbox=me%40example.com&checkbox=home",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let doc = get_page(&app, "/display").await;
        assert_eq!(
            cell_texts(&doc),
            vec![
                vec![
                    "Standup".to_string(),
                    "Tue 01/02/2024 09:00".to_string(),
                    "Tue 01/02/2024 09:15".to_string(),
                ],
                vec![
                    "Plumber".to_string(),
                    "Wed 01/03/2024 11:00".to_string(),
                    "Wed 01/03/2024 12:00".to_string(),
                ],
                vec![
                    "Offsite".to_string(),
                    "Thu 01/04/2024 00:00".to_string(),
                    "Thu 01/04/2024 23:59".to_string(),
                ],
                vec![
                    "Trip".to_string(),
                    "Fri 01/05/2024 00:00".to_string(),
                    "Sat 01/06/2024 23:59".to_string(),
                ],
            ]
        );

        // The index keeps showing the last result
        let doc = get_page(&app, "/").await;
        assert_eq!(cell_texts(&doc).len(), 4);
    }

    /// Tests the defaults used by /display track the configured date
    #[tokio::test]
    async fn it_displays_with_defaults_before_any_submission() {
        let app = test_app_with(Some(snapshot_source()));
        let doc = get_page(&app, "/display").await;
        assert_eq!(
            attr(&doc, "input[name=daterange]", "value").unwrap(),
            "01/04/2024 - 01/10/2024"
        );
    }

    /// Tests a listed calendar with no exported events shows no busy times
    #[tokio::test]
    async fn it_displays_nothing_for_a_calendar_without_events() {
        let app = test_app_with(Some(snapshot_source()));

        let response = app
            .clone()
            .oneshot(post_form(
                "begin_time=09%3A00&end_time=17%3A00\
                 &daterange=01%2F01%2F2024+-+01%2F07%2F2024&checkbox=holidays",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let doc = get_page(&app, "/display").await;
        assert_eq!(count(&doc, "table.busy-times"), 0);
    }

    /// Tests an unknown calendar id surfaces as a server error
    #[tokio::test]
    async fn it_returns_500_for_unknown_calendar() {
        let app = test_app_with(Some(snapshot_source()));

        let response = app
            .clone()
            .oneshot(post_form(
                "begin_time=09%3A00&end_time=17%3A00\
                 &daterange=01%2F01%2F2024+-+01%2F07%2F2024&checkbox=missing",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app.oneshot(get("/display")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
