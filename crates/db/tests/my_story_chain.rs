//! Integration tests for MyStory persistence and substory chain assembly.
//!
//! Exercises the repository layer against a real database:
//! - Chain insertion links nodes in order with a single end-marked tail
//! - Chain walking returns nodes in link order
//! - Finalization update inside a transaction, and rollback on abort
//! - Deleting a MyStory cascades to its chain and characters
//! - Per-user listing with and without a story filter

use assert_matches::assert_matches;
use sqlx::PgPool;
use taleweave_core::chain::{plan_chain, verify_chain, ChainNode};
use taleweave_core::types::DbId;
use taleweave_db::models::my_character::CreateMyCharacter;
use taleweave_db::models::my_story::CreateMyStory;
use taleweave_db::repositories::{MyCharacterRepo, MyStoryRepo, MySubstoryRepo, SubstoryRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO users (username) VALUES ($1) RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .expect("user insert should succeed")
}

async fn seed_story(pool: &PgPool, title: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO stories (title) VALUES ($1) RETURNING id")
        .bind(title)
        .fetch_one(pool)
        .await
        .expect("story insert should succeed")
}

async fn seed_substory(pool: &PgPool, story_id: DbId, title: &str, sort_order: i32) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO substories (story_id, title, sort_order) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(story_id)
    .bind(title)
    .bind(sort_order)
    .fetch_one(pool)
    .await
    .expect("substory insert should succeed")
}

async fn seed_character(pool: &PgPool, story_id: DbId, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO characters (story_id, name) VALUES ($1, $2) RETURNING id")
        .bind(story_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("character insert should succeed")
}

fn new_my_story(story_id: DbId, name: &str) -> CreateMyStory {
    CreateMyStory {
        story_id,
        story_name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Chain assembly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_chain_links_nodes_in_order(pool: PgPool) {
    let user = seed_user(&pool, "reader").await;
    let story = seed_story(&pool, "The Lighthouse").await;
    let s1 = seed_substory(&pool, story, "Arrival", 1).await;
    let s2 = seed_substory(&pool, story, "Storm", 2).await;
    let s3 = seed_substory(&pool, story, "Dawn", 3).await;
    let my_story = MyStoryRepo::create(&pool, user, &new_my_story(story, "Mine"))
        .await
        .unwrap();

    let links = plan_chain(&[s1, s2, s3]).unwrap();
    let mut tx = pool.begin().await.unwrap();
    let nodes = MySubstoryRepo::insert_chain(&mut tx, my_story.id, &links)
        .await
        .unwrap();
    let updated = MyStoryRepo::attach_chain(&mut tx, my_story.id, nodes[0].id, true, false)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(updated.first_substory_id, Some(nodes[0].id));
    assert!(updated.finished);
    assert!(!updated.is_default);
    assert_eq!(updated.story_name, "Mine");

    let chain = MySubstoryRepo::list_chain(&pool, nodes[0].id).await.unwrap();
    let substories: Vec<DbId> = chain.iter().map(|n| n.substory_id).collect();
    assert_eq!(substories, vec![s1, s2, s3]);

    let as_nodes: Vec<ChainNode> = chain.iter().map(ChainNode::from).collect();
    verify_chain(&as_nodes).expect("persisted chain must be well formed");
    assert_eq!(chain.iter().filter(|n| n.is_end).count(), 1);
    assert!(chain[2].is_end);
    assert_eq!(chain[2].next_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_node_chain_is_its_own_tail(pool: PgPool) {
    let user = seed_user(&pool, "solo").await;
    let story = seed_story(&pool, "Short").await;
    let s1 = seed_substory(&pool, story, "Only", 1).await;
    let my_story = MyStoryRepo::create(&pool, user, &new_my_story(story, "One"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let nodes = MySubstoryRepo::insert_chain(&mut tx, my_story.id, &plan_chain(&[s1]).unwrap())
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].is_end);
    assert_eq!(nodes[0].next_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn aborted_transaction_leaves_no_chain(pool: PgPool) {
    let user = seed_user(&pool, "quitter").await;
    let story = seed_story(&pool, "Unfinished").await;
    let s1 = seed_substory(&pool, story, "A", 1).await;
    let s2 = seed_substory(&pool, story, "B", 2).await;
    let my_story = MyStoryRepo::create(&pool, user, &new_my_story(story, "Draft"))
        .await
        .unwrap();

    {
        let mut tx = pool.begin().await.unwrap();
        let locked = MyStoryRepo::lock_for_update(&mut tx, my_story.id)
            .await
            .unwrap()
            .expect("row should exist");
        assert!(!locked.is_finalized());
        let nodes = MySubstoryRepo::insert_chain(&mut tx, my_story.id, &plan_chain(&[s1, s2]).unwrap())
            .await
            .unwrap();
        MyStoryRepo::attach_chain(&mut tx, my_story.id, nodes[0].id, true, true)
            .await
            .unwrap();
        tx.rollback().await.unwrap();
    }

    let reloaded = MyStoryRepo::find_by_id(&pool, my_story.id).await.unwrap().unwrap();
    assert_eq!(reloaded.first_substory_id, None);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM my_substories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn chain_rejects_unknown_substory(pool: PgPool) {
    let user = seed_user(&pool, "typo").await;
    let story = seed_story(&pool, "Typos").await;
    let my_story = MyStoryRepo::create(&pool, user, &new_my_story(story, "Oops"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let result =
        MySubstoryRepo::insert_chain(&mut tx, my_story.id, &plan_chain(&[999_999]).unwrap()).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_ids_in_story_excludes_other_stories(pool: PgPool) {
    let story_a = seed_story(&pool, "A").await;
    let story_b = seed_story(&pool, "B").await;
    let a1 = seed_substory(&pool, story_a, "a1", 1).await;
    let b1 = seed_substory(&pool, story_b, "b1", 1).await;

    let found = SubstoryRepo::filter_ids_in_story(&pool, story_a, &[a1, b1])
        .await
        .unwrap();
    assert_eq!(found, vec![a1]);
}

// ---------------------------------------------------------------------------
// Delete and list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascades_to_chain_and_characters(pool: PgPool) {
    let user = seed_user(&pool, "cleaner").await;
    let story = seed_story(&pool, "Cascade").await;
    let s1 = seed_substory(&pool, story, "A", 1).await;
    let s2 = seed_substory(&pool, story, "B", 2).await;
    let hero = seed_character(&pool, story, "Hero").await;
    let my_story = MyStoryRepo::create(&pool, user, &new_my_story(story, "Gone"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let nodes = MySubstoryRepo::insert_chain(&mut tx, my_story.id, &plan_chain(&[s1, s2]).unwrap())
        .await
        .unwrap();
    MyStoryRepo::attach_chain(&mut tx, my_story.id, nodes[0].id, true, false)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    MyCharacterRepo::create(
        &pool,
        my_story.id,
        &CreateMyCharacter {
            character_id: hero,
            name: "Me".to_string(),
            image: None,
        },
    )
    .await
    .unwrap();

    assert!(MyStoryRepo::delete(&pool, my_story.id).await.unwrap());
    assert!(!MyStoryRepo::delete(&pool, my_story.id).await.unwrap());

    let nodes_left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM my_substories")
        .fetch_one(&pool)
        .await
        .unwrap();
    let characters_left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM my_characters")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(nodes_left, 0);
    assert_eq!(characters_left, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_user_filters_by_story(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let story_a = seed_story(&pool, "A").await;
    let story_b = seed_story(&pool, "B").await;

    MyStoryRepo::create(&pool, alice, &new_my_story(story_a, "a")).await.unwrap();
    MyStoryRepo::create(&pool, alice, &new_my_story(story_b, "b")).await.unwrap();
    MyStoryRepo::create(&pool, bob, &new_my_story(story_a, "bob's")).await.unwrap();

    let all = MyStoryRepo::list_by_user(&pool, alice, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|m| m.user_id == alice));

    let only_a = MyStoryRepo::list_by_user(&pool, alice, Some(story_a)).await.unwrap();
    assert_eq!(only_a.len(), 1);
    assert_eq!(only_a[0].story_name, "a");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn basic_assignments_are_oldest_first(pool: PgPool) {
    let user = seed_user(&pool, "caster").await;
    let story = seed_story(&pool, "Casting").await;
    let hero = seed_character(&pool, story, "Hero").await;
    let villain = seed_character(&pool, story, "Villain").await;
    let my_story = MyStoryRepo::create(&pool, user, &new_my_story(story, "Cast"))
        .await
        .unwrap();

    for name in ["First", "Second"] {
        MyCharacterRepo::create(
            &pool,
            my_story.id,
            &CreateMyCharacter {
                character_id: hero,
                name: name.to_string(),
                image: None,
            },
        )
        .await
        .unwrap();
    }

    let basic = MyCharacterRepo::list_basic_for_characters(&pool, my_story.id, &[hero, villain])
        .await
        .unwrap();
    let names: Vec<&str> = basic.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}
