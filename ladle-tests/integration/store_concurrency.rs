//! Recipe store behavior under concurrent callers

use std::sync::Arc;

use futures::future::join_all;
use ladle_core::recipe::{RecipeDto, RecipeId};
use ladle_core::store::{RecipeStore, StoreError};

fn dto(title: &str) -> RecipeDto {
    RecipeDto {
        title: title.to_string(),
        description: format!("{title} description"),
        ..RecipeDto::default()
    }
}

#[tokio::test]
async fn test_parallel_creates_never_collide() {
    let store = Arc::new(RecipeStore::new());

    let results = join_all((0..128).map(|n| {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.create(dto(&format!("Recipe {n}"))).await })
    }))
    .await;

    let mut ids: Vec<u64> = results
        .into_iter()
        .map(|task| task.unwrap().unwrap().id.as_u64())
        .collect();

    ids.sort_unstable();
    assert_eq!(ids, (1..=128).collect::<Vec<u64>>());
    assert_eq!(store.recipe_count().await, 128);
}

#[tokio::test]
async fn test_interleaved_creates_and_deletes_keep_ids_fresh() {
    let store = Arc::new(RecipeStore::new());

    for round in 0..10 {
        let recipe = store.create(dto(&format!("Round {round}"))).await.unwrap();
        assert_eq!(recipe.id.as_u64(), round + 1);
        store.remove(recipe.id).await.unwrap();
    }

    // Ten creations happened, ten ids were burned; the table is empty but
    // the counter never rewinds.
    assert_eq!(store.recipe_count().await, 0);
    let next = store.create(dto("Eleventh")).await.unwrap();
    assert_eq!(next.id, RecipeId::new(11));
}

#[tokio::test]
async fn test_concurrent_replace_and_remove_agree_on_one_winner() {
    let store = Arc::new(RecipeStore::new());
    let created = store.create(dto("Contested")).await.unwrap();

    let replacer = {
        let store = Arc::clone(&store);
        let id = created.id;
        tokio::spawn(async move { store.replace(id, dto("Replaced")).await })
    };
    let remover = {
        let store = Arc::clone(&store);
        let id = created.id;
        tokio::spawn(async move { store.remove(id).await })
    };

    let replaced = replacer.await.unwrap();
    let removed = remover.await.unwrap();

    // The remove always wins a slot: either it takes the original before the
    // replace (which then sees an absent id), or it takes the replacement.
    assert!(removed.is_ok());
    match replaced {
        Ok(updated) => assert_eq!(updated.title, "Replaced"),
        Err(StoreError::NotFound { id }) => assert_eq!(id, created.id),
        Err(other) => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.recipe_count().await, 0);
}

#[tokio::test]
async fn test_snapshot_reads_are_consistent_under_writes() {
    let store = Arc::new(RecipeStore::new());
    for n in 0..50 {
        store.create(dto(&format!("Recipe {n}"))).await.unwrap();
    }

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for n in 0..25 {
                    store
                        .create(dto(&format!("Writer {w} recipe {n}")))
                        .await
                        .unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for _ in 0..25 {
                    let snapshot = store.all_recipes().await;
                    // Every observed snapshot holds fully-formed records
                    assert!(snapshot.len() >= 50);
                    for recipe in &snapshot {
                        assert!(!recipe.title.is_empty());
                    }
                }
            })
        })
        .collect();

    join_all(writers).await.into_iter().for_each(|t| t.unwrap());
    join_all(readers).await.into_iter().for_each(|t| t.unwrap());

    assert_eq!(store.recipe_count().await, 150);
}
