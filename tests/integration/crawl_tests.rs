//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_scribe::config::{Config, UserAgentConfig};
use site_scribe::crawler::{crawl, Crawler, StopReason};
use site_scribe::output::ReportWriter;
use site_scribe::summarize::{summarize, Confidence, Question, QuestionKey, Summarizer};
use site_scribe::SkipReason;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(max_pages: usize, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.max_depth = max_depth;
    config.crawler.delay_seconds = 0.0;
    config.crawler.timeout_seconds = 5.0;
    config.user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: Some("https://example.com/contact".to_string()),
    };
    config
}

/// Builds a page with a title, a paragraph of body text, and links
fn html_page(title: &str, body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<li><a href="{}">{}</a></li>"#, href, href))
        .collect();
    format!(
        r#"<html><head><title>{}</title></head><body>
        <nav><ul>{}</ul></nav>
        <main><article><h1>{}</h1><p>{}</p></article></main>
        <footer>Copyright Acme</footer>
        </body></html>"#,
        title, anchors, title, body
    )
}

async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

async fn mount_page_expecting(server: &MockServer, route: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

fn seed(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

fn paths(report: &site_scribe::CrawlReport) -> Vec<String> {
    report
        .corpus
        .iter()
        .map(|p| url::Url::parse(&p.url).unwrap().path().to_string())
        .collect()
}

#[tokio::test]
async fn test_max_depth_one_stops_at_children() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html_page("Home", "Welcome to the home page of our test site.", &["/a", "/b", "/c"]),
    )
    .await;

    for child in ["a", "b", "c"] {
        let grandchildren = [format!("/{}/1", child), format!("/{}/2", child)];
        let links: Vec<&str> = grandchildren.iter().map(String::as_str).collect();
        mount_page(
            &server,
            &format!("/{}", child),
            html_page(child, "A child page with a little bit of text on it.", &links),
        )
        .await;
        for grandchild in &grandchildren {
            mount_page_expecting(
                &server,
                grandchild,
                html_page("Deep", "Should never be fetched at depth two.", &[]),
                0,
            )
            .await;
        }
    }

    let report = crawl(&seed(&server), create_test_config(50, 1)).await.unwrap();

    assert_eq!(report.corpus.len(), 4);
    assert!(report.corpus.iter().all(|p| p.depth <= 1));
    assert_eq!(paths(&report), vec!["/", "/a", "/b", "/c"]);
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
}

#[tokio::test]
async fn test_max_pages_halts_traversal() {
    let server = MockServer::start().await;

    mount_page_expecting(
        &server,
        "/",
        html_page("Home", "The seed page links to five other pages.", &["/1", "/2", "/3", "/4", "/5"]),
        1,
    )
    .await;
    mount_page_expecting(&server, "/1", html_page("One", "The first linked page.", &[]), 1).await;
    for route in ["/2", "/3", "/4", "/5"] {
        mount_page_expecting(&server, route, html_page("Other", "Never fetched.", &[]), 0).await;
    }

    let report = crawl(&seed(&server), create_test_config(2, 5)).await.unwrap();

    assert_eq!(report.corpus.len(), 2);
    assert_eq!(report.stop_reason, StopReason::PageLimit);
}

#[tokio::test]
async fn test_timeout_is_skipped_and_crawl_continues() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html_page("Home", "A home page with one slow link and one fast link.", &["/slow", "/fast"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html_page("Slow", "Too slow.", &[]), "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/fast", html_page("Fast", "This page answers quickly.", &[])).await;

    let mut config = create_test_config(50, 5);
    config.crawler.timeout_seconds = 1.0;

    let report = crawl(&seed(&server), config).await.unwrap();

    assert_eq!(paths(&report), vec!["/", "/fast"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::Timeout);
}

#[tokio::test]
async fn test_server_error_is_skipped() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_page("Home", "Links to a broken page.", &["/broken", "/ok"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", html_page("Ok", "This page works fine.", &[])).await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();

    assert_eq!(paths(&report), vec!["/", "/ok"]);
    assert_eq!(report.skipped[0].reason, SkipReason::HttpError(500));
}

#[tokio::test]
async fn test_non_html_is_skipped() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_page("Home", "Links to a data file.", &["/data"])).await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"a\": 1}", "application/json"))
        .mount(&server)
        .await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();

    assert_eq!(report.corpus.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::NotHtml);
}

#[tokio::test]
async fn test_cycles_are_fetched_once() {
    let server = MockServer::start().await;

    mount_page_expecting(
        &server,
        "/",
        html_page("Home", "Home links to A and to itself.", &["/a", "/", "/#top"]),
        1,
    )
    .await;
    mount_page_expecting(
        &server,
        "/a",
        html_page("A", "A links back home and to itself.", &["/", "/a/", "/a?utm_source=x"]),
        1,
    )
    .await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();

    assert_eq!(report.corpus.len(), 2);
    assert_eq!(report.fetch_count(), 2);
}

#[tokio::test]
async fn test_breadth_first_order() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_page("Home", "The root of the tree.", &["/a", "/b"])).await;
    mount_page(&server, "/a", html_page("A", "First child of the root.", &["/a1"])).await;
    mount_page(&server, "/b", html_page("B", "Second child of the root.", &["/b1"])).await;
    mount_page(&server, "/a1", html_page("A1", "Grandchild under A.", &[])).await;
    mount_page(&server, "/b1", html_page("B1", "Grandchild under B.", &[])).await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();

    assert_eq!(paths(&report), vec!["/", "/a", "/b", "/a1", "/b1"]);
    let depths: Vec<u32> = report.corpus.iter().map(|p| p.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 2]);
}

#[tokio::test]
async fn test_off_domain_links_not_followed() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            "We link to partners elsewhere on the web.",
            &["https://partner.example.org/", "/about"],
        ),
    )
    .await;
    mount_page(&server, "/about", html_page("About", "About this site.", &[])).await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();

    assert_eq!(paths(&report), vec!["/", "/about"]);
    assert!(report.off_domain.contains("https://partner.example.org/"));
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0 (+https://example.com/contact)"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html_page("Home", "Checking the user agent.", &[]), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();
    assert_eq!(report.corpus.len(), 1);
}

#[tokio::test]
async fn test_contact_email_answered_end_to_end() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html_page("Home - Acme", "Acme builds dependable widgets for workshops everywhere.", &["/contact"]),
    )
    .await;
    mount_page(
        &server,
        "/contact",
        html_page(
            "Contact - Acme",
            "Questions about an order? Write to info@acme.com and our team will reply within a day.",
            &[],
        ),
    )
    .await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();
    let contact_url = report.corpus.pages()[1].final_url.clone();

    let questions = vec![
        Question::new("contact", QuestionKey::Named("email".to_string()), "What is the contact email?"),
        Question::freeform("What is the airspeed velocity of an unladen swallow?"),
    ];
    let answers = Summarizer::new().answer_all(&report.corpus, &questions);

    let email = &answers.answers()[0];
    assert!(email.answer_text.as_deref().unwrap().contains("info@acme.com"));
    assert!(email.source_urls.contains(&contact_url));
    assert_eq!(email.confidence, Confidence::High);

    let unknown = &answers.answers()[1];
    assert_eq!(unknown.answer_text, None);
    assert!(unknown.source_urls.is_empty());
}

#[tokio::test]
async fn test_missing_seed_yields_empty_corpus() {
    // No mocks mounted, so the seed answers 404
    let server = MockServer::start().await;

    let report = crawl(&seed(&server), create_test_config(50, 5)).await.unwrap();
    assert!(report.corpus.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::HttpError(404));

    let summary = summarize(&report.corpus, &[Question::freeform("What is the mission?")]);
    assert_eq!(summary.answers.answered_count(), 0);

    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path(), &report).unwrap();
    assert!(writer.write_dump(&report).unwrap().exists());
    assert!(writer.write_summary(&summary).unwrap().exists());
}

#[tokio::test]
async fn test_invalid_seed_fails_before_fetching() {
    let result = crawl("ftp://example.com/", create_test_config(50, 5)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cancellation_stops_crawl() {
    let server = MockServer::start().await;
    mount_page_expecting(&server, "/", html_page("Home", "Never fetched.", &[]), 0).await;

    let mut crawler = Crawler::new(create_test_config(50, 5)).unwrap();
    crawler.cancellation_token().cancel();
    let report = crawler.crawl(&seed(&server)).await.unwrap();

    assert!(report.corpus.is_empty());
    assert_eq!(report.stop_reason, StopReason::Cancelled);
}
