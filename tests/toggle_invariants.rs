//! Toggle protocol invariants over the join repositories.
//!
//! Sequential toggles with the same key strictly alternate, record
//! existence always matches the last outcome, and the race-closing rules
//! (duplicate insert, remove of absent) never surface as faults.

use uuid::Uuid;

use vidhub::engagement::toggle::JoinStore;
use vidhub::engagement::{
    toggle, InMemoryLikeRepository, InMemorySubscriptionRepository, LikeTarget,
};
use vidhub::store::StoreError;

#[test]
fn like_toggles_alternate_and_match_storage() {
    let likes = InMemoryLikeRepository::new();
    let user = Uuid::new_v4();
    let target = LikeTarget::Video(Uuid::new_v4());

    for round in 0..6 {
        let outcome = toggle(&likes, (user, target)).unwrap();
        let expect_added = round % 2 == 0;

        assert_eq!(outcome.was_added(), expect_added, "round {round}");
        assert_eq!(
            likes.find((user, target)).unwrap().is_some(),
            expect_added,
            "storage after round {round}"
        );
    }
}

#[test]
fn subscription_toggles_alternate_and_match_storage() {
    let subscriptions = InMemorySubscriptionRepository::new();
    let subscriber = Uuid::new_v4();
    let channel = Uuid::new_v4();

    assert!(toggle(&subscriptions, (subscriber, channel)).unwrap().was_added());
    assert!(!toggle(&subscriptions, (subscriber, channel)).unwrap().was_added());
    assert!(toggle(&subscriptions, (subscriber, channel)).unwrap().was_added());

    assert!(subscriptions.find((subscriber, channel)).unwrap().is_some());
}

#[test]
fn toggles_by_different_actors_are_independent() {
    let likes = InMemoryLikeRepository::new();
    let ann = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let target = LikeTarget::Tweet(Uuid::new_v4());

    assert!(toggle(&likes, (ann, target)).unwrap().was_added());
    assert!(toggle(&likes, (bob, target)).unwrap().was_added());
    assert!(!toggle(&likes, (ann, target)).unwrap().was_added());

    // Bob's like survives Ann's unlike
    assert!(likes.find((bob, target)).unwrap().is_some());
    assert!(likes.find((ann, target)).unwrap().is_none());
}

#[test]
fn join_stores_enforce_uniqueness() {
    let likes = InMemoryLikeRepository::new();
    let subscriptions = InMemorySubscriptionRepository::new();
    let actor = Uuid::new_v4();
    let video = LikeTarget::Video(Uuid::new_v4());
    let channel = Uuid::new_v4();

    likes.insert((actor, video)).unwrap();
    assert!(matches!(
        likes.insert((actor, video)),
        Err(StoreError::Duplicate(_))
    ));

    subscriptions.insert((actor, channel)).unwrap();
    assert!(matches!(
        subscriptions.insert((actor, channel)),
        Err(StoreError::Duplicate(_))
    ));
}

#[test]
fn remove_of_absent_record_is_not_a_fault() {
    let likes = InMemoryLikeRepository::new();
    let subscriptions = InMemorySubscriptionRepository::new();

    assert!(!likes
        .remove((Uuid::new_v4(), LikeTarget::Comment(Uuid::new_v4())))
        .unwrap());
    assert!(!subscriptions.remove((Uuid::new_v4(), Uuid::new_v4())).unwrap());
}
