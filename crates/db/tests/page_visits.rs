//! Integration tests for the append-only page-visit log.

use sqlx::PgPool;
use zemli_db::models::page_visit::CreatePageVisit;
use zemli_db::repositories::PageVisitRepo;

fn visit(path: &str) -> CreatePageVisit {
    CreatePageVisit {
        path: path.to_string(),
        user_agent: Some("Mozilla/5.0".to_string()),
        ip: Some("203.0.113.7".to_string()),
        referer: None,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_stats_group_by_path(pool: PgPool) {
    PageVisitRepo::record(&pool, &visit("/")).await.unwrap();
    PageVisitRepo::record(&pool, &visit("/")).await.unwrap();
    PageVisitRepo::record(&pool, &visit("/plots/uchastok-u-lesa"))
        .await
        .unwrap();

    let stats = PageVisitRepo::stats(&pool, None, None).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_path.len(), 2);
    assert_eq!(stats.by_path[0].path, "/");
    assert_eq!(stats.by_path[0].visits, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_stats_respect_range_bounds(pool: PgPool) {
    PageVisitRepo::record(&pool, &visit("/")).await.unwrap();

    let future = chrono::Utc::now() + chrono::Duration::days(1);
    let stats = PageVisitRepo::stats(&pool, Some(future), None).await.unwrap();
    assert_eq!(stats.total, 0);

    let past = chrono::Utc::now() - chrono::Duration::days(1);
    let stats = PageVisitRepo::stats(&pool, Some(past), Some(future))
        .await
        .unwrap();
    assert_eq!(stats.total, 1);
}
