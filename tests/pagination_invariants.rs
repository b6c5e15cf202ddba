//! Pagination invariants across the listing repositories.
//!
//! For every listing: `items.len() <= limit`, `total >= items.len()`, and a
//! page past the end is empty with the total unchanged.

use uuid::Uuid;

use vidhub::api::query::{PageQuery, MAX_PAGE_LIMIT};
use vidhub::api::SortOrder;
use vidhub::comments::{Comment, CommentRepository, InMemoryCommentRepository};
use vidhub::videos::{InMemoryVideoRepository, Video, VideoFilter, VideoRepository, VideoSort};

fn seed_comments(repo: &InMemoryCommentRepository, video: Uuid, count: usize) {
    let author = Uuid::new_v4();
    for i in 0..count {
        repo.insert(&Comment::new(video, author, format!("comment {i}")))
            .unwrap();
    }
}

#[test]
fn comment_pages_are_bounded_by_limit() {
    let repo = InMemoryCommentRepository::new();
    let video = Uuid::new_v4();
    seed_comments(&repo, video, 23);

    for page in 1..=6 {
        let query = PageQuery { page, limit: 5 };
        let (_, limit) = query.normalized();
        let (items, total) = repo.list_by_video(video, query.offset(), limit).unwrap();

        assert!(items.len() <= limit);
        assert!(total >= items.len());
        assert_eq!(total, 23);
    }
}

#[test]
fn page_past_the_end_is_empty_with_unchanged_total() {
    let repo = InMemoryCommentRepository::new();
    let video = Uuid::new_v4();
    seed_comments(&repo, video, 4);

    let query = PageQuery { page: 9, limit: 10 };
    let (_, limit) = query.normalized();
    let (items, total) = repo.list_by_video(video, query.offset(), limit).unwrap();

    assert!(items.is_empty());
    assert_eq!(total, 4);
}

#[test]
fn oversized_limit_is_clamped_not_honored() {
    let query = PageQuery {
        page: 1,
        limit: 1_000_000,
    };
    assert_eq!(query.normalized().1, MAX_PAGE_LIMIT);
}

#[test]
fn video_listing_respects_filter_and_bounds() {
    let repo = InMemoryVideoRepository::new();
    let channel = Uuid::new_v4();

    for i in 0..12 {
        repo.insert(&Video::new(
            channel,
            format!("episode {i}"),
            String::new(),
            format!("https://media.test/ep{i}.mp4"),
            format!("asset-{i}"),
        ))
        .unwrap();
    }

    let filter = VideoFilter {
        owner: Some(channel),
        title_query: Some("episode".to_string()),
    };
    let (items, total) = repo
        .list(&filter, VideoSort::CreatedAt, SortOrder::Desc, 0, 5)
        .unwrap();

    assert_eq!(items.len(), 5);
    assert_eq!(total, 12);
}

#[test]
fn repeated_reads_are_identical_without_writes() {
    let repo = InMemoryCommentRepository::new();
    let video = Uuid::new_v4();
    seed_comments(&repo, video, 8);

    let query = PageQuery { page: 2, limit: 3 };
    let (_, limit) = query.normalized();

    let first = repo.list_by_video(video, query.offset(), limit).unwrap();
    let second = repo.list_by_video(video, query.offset(), limit).unwrap();

    let first_json = serde_json::to_string(&first.0).unwrap();
    let second_json = serde_json::to_string(&second.0).unwrap();
    assert_eq!(first_json, second_json);
    assert_eq!(first.1, second.1);
}
