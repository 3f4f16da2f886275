//! Caller-driven paging over `ByStatement` services

use super::support::{self, CountingIdentity, StubTransport, envelope};
use ad_manager::api::{ByStatement, PageResult, StatementBuilder};
use ad_manager::versions::v202202;

fn users_page(start_index: u32, ids: &[i64], total: u32) -> String {
    let results: String = ids
        .iter()
        .map(|id| format!("<results><id>{}</id><name>user {}</name></results>", id, id))
        .collect();
    envelope(
        "v202202",
        "getUsersByStatement",
        &format!(
            "<rval><totalResultSetSize>{}</totalResultSetSize><startIndex>{}</startIndex>{}</rval>",
            total, start_index, results
        ),
    )
}

/// Reads every page the way a caller is expected to
async fn read_all<S: ByStatement>(service: &S, mut builder: StatementBuilder) -> (Vec<S::Entity>, usize) {
    let mut all = Vec::new();
    let mut pages = 0;

    loop {
        let page: PageResult<S::Entity> = service.get_by_statement(&builder.to_statement()).await.unwrap();
        pages += 1;
        assert!(page.is_consistent(), "page overruns the result set");

        let last = page.is_last_page();
        let read = page.len() as u32;
        all.extend(page.into_results());
        if last {
            break;
        }
        builder.increase_offset_by(read);
        assert!(pages < 100, "paging did not terminate");
    }

    (all, pages)
}

#[tokio::test]
async fn test_paging_terminates_at_total() {
    let transport = StubTransport::new();
    transport
        .reply(200, users_page(0, &[1, 2], 5))
        .reply(200, users_page(2, &[3, 4], 5))
        .reply(200, users_page(4, &[5], 5));
    let client = support::client(transport.clone(), CountingIdentity::new());
    let users = client.service::<v202202::UserService>().await.unwrap();

    let builder = StatementBuilder::new().order_by("id", true).limit(2);
    let (all, pages) = read_all(users.as_ref(), builder).await;

    let ids: Vec<i64> = all.iter().filter_map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(pages, 3);

    let queries: Vec<String> = transport.requests().into_iter().map(|r| r.body).collect();
    assert!(queries[0].contains("<query>ORDER BY id ASC LIMIT 2</query>"));
    assert!(queries[1].contains("<query>ORDER BY id ASC LIMIT 2 OFFSET 2</query>"));
    assert!(queries[2].contains("<query>ORDER BY id ASC LIMIT 2 OFFSET 4</query>"));
}

#[tokio::test]
async fn test_empty_page_stops_paging() {
    let transport = StubTransport::new();
    transport
        .reply(200, users_page(0, &[1, 2], 10))
        .reply(200, users_page(2, &[], 10));
    let client = support::client(transport.clone(), CountingIdentity::new());
    let users = client.service::<v202202::UserService>().await.unwrap();

    let (all, pages) = read_all(users.as_ref(), StatementBuilder::new().limit(2)).await;

    assert_eq!(all.len(), 2);
    assert_eq!(pages, 2);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_missing_results_is_empty_page() {
    let transport = StubTransport::new();
    transport.reply(200, users_page(0, &[], 0));
    let client = support::client(transport, CountingIdentity::new());

    let page = client
        .service::<v202202::UserService>()
        .await
        .unwrap()
        .get_users_by_statement(&StatementBuilder::new().limit(500).to_statement())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_result_set_size, 0);
    assert!(page.is_last_page());
}

#[tokio::test]
async fn test_start_index_at_u32_max_ends_paging() {
    let transport = StubTransport::new();
    transport.reply(200, users_page(u32::MAX, &[7], u32::MAX));
    let client = support::client(transport.clone(), CountingIdentity::new());
    let users = client.service::<v202202::UserService>().await.unwrap();

    let page = users
        .get_by_statement(&StatementBuilder::new().limit(1).to_statement())
        .await
        .unwrap();

    assert_eq!(page.start_index, u32::MAX);
    assert_eq!(page.next_start_index(), u32::MAX);
    assert!(page.is_last_page());
}
