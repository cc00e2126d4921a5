//! Integration tests for the harvester
//!
//! These tests use wiremock to serve listing and topic pages and drive the
//! full crawl cycle through the real HTTP page source.

use tempfile::TempDir;
use topic_trawl::config::{Config, CrawlerConfig, SiteConfig};
use topic_trawl::storage::{SqliteTopicStore, TopicStore};
use topic_trawl::{ClientProfile, Crawler, TrawlError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HTML: &str = "text/html; charset=utf-8";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, db_path: &str) -> Config {
    let mut config = Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            subforums: vec!["career".to_string()],
        },
        crawler: CrawlerConfig {
            topic_workers: 2,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    };
    config.client.desktop_user_agent = "TestDesktop/1.0".to_string();
    config.client.mobile_user_agent = "TestMobile/1.0".to_string();
    config.storage.database_path = db_path.to_string();
    config
}

fn listing_page(hrefs: &[&str]) -> String {
    let entries: String = hrefs
        .iter()
        .map(|h| format!(r#"<article class="b-postcard"><h2><a href="{h}">topic</a></h2></article>"#))
        .collect();
    format!("<html><body><div class=\"b-content\">{entries}</div></body></html>")
}

fn topic_page(title: &str, views: &str) -> String {
    format!(
        r#"<html><body>
        <article>
            <h1>{title}</h1>
            <div class="author"><div class="name"><a href="/users/alice/">alice</a></div></div>
            <span class="date">12 січня 2024</span>
            <span class="pageviews">{views}</span>
            <p>Body of {title}</p>
        </article>
        <div id="commentsList">
            <div class="b-comment level-0"><div><div>
                <div><a class="avatar" href="/users/bob/">bob</a><a class="link" href="/c/1">10:00</a></div>
                <div>First!</div>
            </div></div></div>
            <div class="b-comment level-1"><div><div>
                <div><a class="avatar" href="/users/carol/">carol</a><a class="link" href="/c/2">10:05</a></div>
                <div>Reply</div>
                <div><a href="/users/bob/">bob</a></div>
                <div><span>7</span></div>
            </div></div></div>
        </div>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, HTML))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_listing_pagination_over_http() {
    let server = MockServer::start().await;
    mount_html(&server, "/forums/page/1", listing_page(&["/t/1/", "/t/2/"])).await;
    mount_html(&server, "/forums/page/2", listing_page(&["/t/3/", "/t/4/"])).await;

    let config = create_test_config(&server.uri(), "unused.db");
    let crawler = Crawler::from_config(&config).unwrap();
    let prefix = crawler.listing_prefix(None).unwrap();

    let refs = crawler.get_topic_reference_list(&prefix, 3).await.unwrap();
    assert_eq!(refs, vec!["/t/1/", "/t/2/", "/t/3/"]);
}

#[tokio::test]
async fn test_exhausted_listing_returns_what_was_found() {
    let server = MockServer::start().await;
    mount_html(&server, "/forums/career/page/1", listing_page(&["/t/1/"])).await;
    mount_html(&server, "/forums/career/page/2", listing_page(&[])).await;
    mount_html(&server, "/forums/career/page/3", listing_page(&[])).await;

    let config = create_test_config(&server.uri(), "unused.db");
    let crawler = Crawler::from_config(&config).unwrap();
    let prefix = crawler.listing_prefix(Some("career")).unwrap();

    let refs = crawler.get_topic_reference_list(&prefix, 5).await.unwrap();
    assert_eq!(refs, vec!["/t/1/"]);
}

#[tokio::test]
async fn test_user_agent_follows_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t/1/"))
        .and(header("user-agent", "TestDesktop/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(topic_page("Desk", "1"), HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/t/1/"))
        .and(header("user-agent", "TestMobile/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(topic_page("Phone", "1"), HTML))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "unused.db");

    let mobile = Crawler::from_config(&config).unwrap();
    assert_eq!(mobile.profile(), ClientProfile::Mobile);
    assert_eq!(mobile.get_topic("/t/1/").await.unwrap().title, "Phone");

    let desktop = Crawler::from_config(&config)
        .unwrap()
        .with_profile(ClientProfile::Desktop);
    assert_eq!(desktop.get_topic("/t/1/").await.unwrap().title, "Desk");
}

#[tokio::test]
async fn test_topic_extracted_over_http() {
    let server = MockServer::start().await;
    mount_html(&server, "/t/1/", topic_page("Hello", "Views: 1,234")).await;

    let config = create_test_config(&server.uri(), "unused.db");
    let crawler = Crawler::from_config(&config).unwrap();

    let topic = crawler.get_topic("/t/1/").await.unwrap();
    assert_eq!(topic.title, "Hello");
    assert_eq!(topic.body, "Body of Hello");
    assert_eq!(topic.author.name, "alice");
    assert_eq!(topic.view_count, 1);
    assert_eq!(topic.url, format!("{}/t/1/", server.uri()));

    assert_eq!(topic.comments.len(), 2);
    assert_eq!(topic.comments[0].nesting_level, 0);
    assert_eq!(topic.comments[0].in_reply_to_author_name, "");
    assert_eq!(topic.comments[0].like_count, 0);
    assert_eq!(topic.comments[1].nesting_level, 1);
    assert_eq!(topic.comments[1].in_reply_to_author_name, "bob");
    assert_eq!(topic.comments[1].like_count, 7);
    assert_eq!(topic.comments[1].permalink, "/c/2");
}

#[tokio::test]
async fn test_missing_topic_aborts_crawl() {
    let server = MockServer::start().await;
    mount_html(&server, "/forums/page/1", listing_page(&["/t/1/", "/t/gone/"])).await;
    mount_html(&server, "/t/1/", topic_page("One", "3")).await;
    Mock::given(method("GET"))
        .and(path("/t/gone/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "unused.db");
    let crawler = Crawler::from_config(&config).unwrap();

    let err = crawler.get_topic_list(2).await.unwrap_err();
    assert!(err.is_fetch_error());
    assert!(matches!(err, TrawlError::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_non_markup_response_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "unused.db");
    let crawler = Crawler::from_config(&config).unwrap();

    let err = crawler.get_topic("/t/1/").await.unwrap_err();
    assert!(matches!(err, TrawlError::Parse { .. }));
}

#[tokio::test]
async fn test_empty_body_is_parse_error() {
    let server = MockServer::start().await;
    mount_html(&server, "/forums/page/1", String::new()).await;

    let config = create_test_config(&server.uri(), "unused.db");
    let crawler = Crawler::from_config(&config).unwrap();

    let err = crawler.get_topic_list(1).await.unwrap_err();
    assert!(matches!(err, TrawlError::Parse { .. }));
}

#[tokio::test]
async fn test_harvest_into_cache() {
    let server = MockServer::start().await;
    mount_html(&server, "/forums/page/1", listing_page(&["/t/1/", "/t/2/", "/t/3/"])).await;
    for n in 1..=3 {
        mount_html(&server, &format!("/t/{n}/"), topic_page(&format!("T{n}"), "42")).await;
    }

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cache.db");
    let config = create_test_config(&server.uri(), db_path.to_str().unwrap());

    let crawler = Crawler::from_config(&config).unwrap();
    let topics = crawler.get_topic_list(3).await.unwrap();
    let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["T1", "T2", "T3"]);

    let mut store = SqliteTopicStore::new(&db_path).unwrap();
    assert_eq!(store.store(&topics).unwrap(), 3);
    drop(store);

    // Reopen to make sure the cache survives on disk
    let store = SqliteTopicStore::new(&db_path).unwrap();
    assert_eq!(store.count_topics().unwrap(), 3);
    assert_eq!(store.count_comments().unwrap(), 6);

    let recent = store.load_recent(1).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].title, "T3");
    assert_eq!(recent[0].comments, topics[2].comments);
}
