//! Forum flows: voting, viewing, commenting and listing under contention.

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

use chrono::Utc;
use forum_core::{Author, Ballot, ForumError, Outcome, Post};

use crate::support::{forum_with_users, link_draft, text_draft};

#[test]
fn concurrent_votes_are_all_counted() {
    const VOTERS: i64 = 40;

    let (forum, authors) = forum_with_users(&["alice"]);
    let forum = Arc::new(forum);
    forum.submit(authors[0].clone(), text_draft("music", "gig"), Utc::now()).unwrap();
    let start = Arc::new(Barrier::new(VOTERS as usize));

    let handles: Vec<_> = (0..VOTERS)
        .map(|n| {
            let forum = Arc::clone(&forum);
            let start = Arc::clone(&start);
            // Ids 100.. never collide with the author.
            let voter = 100 + n;
            let ballot = if n % 4 == 0 { Ballot::Down } else { Ballot::Up };
            thread::spawn(move || {
                start.wait();
                forum.vote(1, voter, ballot).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let post = forum.posts().fetch(1).unwrap();
    // Author's upvote, 30 up, 10 down.
    assert_eq!(post.votes.len(), 41);
    assert_eq!(post.score, 21);
    assert_eq!(post.upvote_percentage, 76);
}

#[test]
fn concurrent_comments_get_unique_ids() {
    const WRITERS: usize = 6;
    const EACH: usize = 10;

    let (forum, authors) = forum_with_users(&["alice", "bob"]);
    let forum = Arc::new(forum);
    forum.submit(authors[0].clone(), text_draft("news", "story"), Utc::now()).unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let forum = Arc::clone(&forum);
            let bob = authors[1].clone();
            thread::spawn(move || {
                for i in 0..EACH {
                    forum
                        .comment(1, bob.clone(), &format!("{w}-{i}"), Utc::now())
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let post = forum.view(1).unwrap();
    let ids: BTreeSet<u64> = post.comments.iter().map(|c| c.id).collect();
    assert_eq!(post.comments.len(), WRITERS * EACH);
    assert_eq!(ids.len(), WRITERS * EACH);
    assert_eq!(post.next_comment_id, (WRITERS * EACH) as u64);
}

#[test]
fn delete_races_with_viewers() {
    let (forum, authors) = forum_with_users(&["alice"]);
    let forum = Arc::new(forum);
    forum.submit(authors[0].clone(), text_draft("news", "brief"), Utc::now()).unwrap();
    let start = Arc::new(Barrier::new(5));

    let viewers: Vec<_> = (0..4)
        .map(|_| {
            let forum = Arc::clone(&forum);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                let mut seen = 0;
                loop {
                    match forum.view(1) {
                        Ok(_) => seen += 1,
                        Err(err) => {
                            assert_eq!(err, ForumError::PostNotFound(1));
                            assert_eq!(err.outcome(), Outcome::NotFound);
                            return seen;
                        }
                    }
                }
            })
        })
        .collect();

    start.wait();
    forum.delete(1, &authors[0]).unwrap();

    for viewer in viewers {
        viewer.join().unwrap();
    }
    assert!(!forum.posts().exists(1).unwrap());
}

#[test]
fn listing_filters_by_category_and_author() {
    let (forum, authors) = forum_with_users(&["alice", "bob"]);
    let (alice, bob) = (&authors[0], &authors[1]);
    let now = Utc::now();

    forum.submit(alice.clone(), text_draft("music", "one"), now).unwrap();
    forum.submit(bob.clone(), link_draft("music", "two", "https://example.org"), now).unwrap();
    forum.submit(alice.clone(), text_draft("news", "three"), now).unwrap();
    forum.submit(bob.clone(), text_draft("music", "four"), now).unwrap();

    forum.vote(4, alice.id, Ballot::Up).unwrap();
    forum.vote(1, bob.id, Ballot::Down).unwrap();

    let music: Vec<Post> = serde_json::from_slice(&forum.list("music", "").unwrap()).unwrap();
    let ids: Vec<u64> = music.iter().map(|p| p.id).collect();
    // Scores: 4 -> 2, 2 -> 1, 1 -> 0.
    assert_eq!(ids, vec![4, 2, 1]);
    assert!(music.iter().all(|p| p.category == "music"));

    let bobs: Vec<Post> = serde_json::from_slice(&forum.list("", "bob").unwrap()).unwrap();
    assert_eq!(bobs.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 2]);
    assert!(bobs.iter().all(|p| p.is_authored_by(bob)));

    let alice_news: Vec<Post> =
        serde_json::from_slice(&forum.list("news", "alice").unwrap()).unwrap();
    assert_eq!(alice_news.len(), 1);
    assert_eq!(alice_news[0].title, "three");

    assert_eq!(forum.list("", "nobody").unwrap(), b"[]");
    assert_eq!(forum.list("sports", "").unwrap(), b"[]");
    assert_eq!(forum.posts().list("", "").unwrap().len(), 4);
}

#[test]
fn listing_json_uses_wire_field_names() {
    let (forum, authors) = forum_with_users(&["alice"]);
    forum
        .submit(
            authors[0].clone(),
            link_draft("music", "tune", "https://example.org/tune"),
            Utc::now(),
        )
        .unwrap();

    let listed: serde_json::Value = serde_json::from_slice(&forum.list("", "").unwrap()).unwrap();
    let post = &listed[0];
    assert_eq!(post["type"], "link");
    assert_eq!(post["upvotePercentage"], 100);
    assert_eq!(post["score"], 1);
    assert_eq!(post["author"]["username"], "alice");
    assert!(post.get("nextCommentId").is_none());
}

#[test]
fn other_users_cannot_delete() {
    let (forum, authors) = forum_with_users(&["alice", "bob"]);
    forum.submit(authors[0].clone(), text_draft("news", "mine"), Utc::now()).unwrap();

    let err = forum.delete(1, &authors[1]).unwrap_err();
    assert_eq!(err.outcome(), Outcome::Forbidden);
    assert!(forum.posts().exists(1).unwrap());

    let impostor = Author::new("alice", authors[1].id);
    assert_eq!(forum.delete(1, &impostor), Err(ForumError::NotPostOwner(1)));
}
