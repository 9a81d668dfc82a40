use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use yatube_core::domain::{NewPost, Post, PostFilter};
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

use super::entity::{group, post, user};
use super::postgres_repo::{
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

fn post_model(id: i64, group_id: Option<i64>) -> post::Model {
    post::Model {
        id,
        text: format!("Post #{id}"),
        author_id: 1,
        group_id,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    // Mock the query expectation
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(7, Some(3))]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, 7);
    assert_eq!(post.text, "Post #7");
    assert_eq!(post.group_id, Some(3));
}

#[tokio::test]
async fn test_list_posts_maps_rows_in_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(2, None), post_model(1, Some(3))]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.list(PostFilter::All, 0, 10).await.unwrap();
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_create_post_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(11, None)]])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 11,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .create(NewPost::new("Post #11".to_string(), 1, None))
        .await
        .unwrap();
    assert_eq!(post.id, 11);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: 1,
            username: "test_user".to_owned(),
            password_hash: "hash".to_owned(),
            created_at: Utc::now().into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_username("test_user").await.unwrap().unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.username, "test_user");
}

#[tokio::test]
async fn test_find_group_by_slug_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<group::Model>::new()])
        .into_connection();

    let repo = PostgresGroupRepository::new(db);

    assert!(repo.find_by_slug("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_query_failure_maps_to_repo_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![sea_orm::DbErr::Custom("boom".to_string())])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.list(PostFilter::Author(1), 0, 10).await,
        Err(RepoError::Query(_))
    ));
}
