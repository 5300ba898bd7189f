//! Integration tests for the persistence layer, run against in-memory
//! SQLite pools.

use sqlx::SqlitePool;

use inkpress_core::{PostStatus, policy::Actor};
use inkpress_store::users::{AccountUpdate, NewUser};
use inkpress_store::posts::PostInput;
use inkpress_store::reactions::Toggle;
use inkpress_store::{comments, connect_in_memory, pages, posts, reactions, users, StoreError};

const TEST_BCRYPT_COST: u32 = 4;

async fn pool() -> SqlitePool {
    connect_in_memory().await.expect("in-memory pool")
}

async fn register(pool: &SqlitePool, username: &str) -> inkpress_core::User {
    users::register(
        pool,
        &NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "correct horse".to_string(),
        },
        TEST_BCRYPT_COST,
    )
    .await
    .expect("register")
}

fn post_input(title: &str, status: PostStatus) -> PostInput {
    PostInput {
        title: title.to_string(),
        content: "content".to_string(),
        excerpt: String::new(),
        featured_image: "placeholder".to_string(),
        status,
        categories: Vec::new(),
    }
}

fn actor_of(user: &inkpress_core::User) -> Actor {
    Actor {
        id: user.id,
        username: user.username.clone(),
        is_staff: user.is_staff,
    }
}

#[tokio::test]
async fn test_register_provisions_profile() {
    let pool = pool().await;
    let user = register(&pool, "ada").await;

    let profile = users::profile_of(&pool, user.id).await.expect("profile");
    assert_eq!(profile.user_id, user.id);
    assert_eq!(profile.profile_image, "placeholder");
    assert_eq!(profile.about, "");
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let pool = pool().await;
    register(&pool, "ada").await;

    let result = users::register(
        &pool,
        &NewUser {
            username: "ada".to_string(),
            email: "other@example.com".to_string(),
            password: "pw123456".to_string(),
        },
        TEST_BCRYPT_COST,
    )
    .await;
    assert!(matches!(result, Err(StoreError::Conflict("username"))));
}

#[tokio::test]
async fn test_credentials_and_sessions() {
    let pool = pool().await;
    let user = register(&pool, "ada").await;

    let found = users::verify_credentials(&pool, "ada", "correct horse")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let wrong = users::verify_credentials(&pool, "ada", "wrong").await.unwrap();
    assert!(wrong.is_none());

    let token = users::create_session(&pool, user.id).await.unwrap();
    let actor = users::actor_for_token(&pool, &token).await.unwrap().unwrap();
    assert_eq!(actor.id, user.id);
    assert!(!actor.is_staff);

    users::delete_session(&pool, &token).await.unwrap();
    assert!(users::actor_for_token(&pool, &token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_account_is_atomic_on_conflict() {
    let pool = pool().await;
    register(&pool, "ada").await;
    let bob = register(&pool, "bob").await;

    let result = users::update_account(
        &pool,
        bob.id,
        &AccountUpdate {
            username: "ada".to_string(),
            email: "bob@new.example.com".to_string(),
            profile_image: "new-image".to_string(),
            about: "new bio".to_string(),
        },
    )
    .await;
    assert!(matches!(result, Err(StoreError::Conflict("username"))));

    let unchanged = users::find_by_id(&pool, bob.id).await.unwrap().unwrap();
    assert_eq!(unchanged.username, "bob");
    assert_eq!(unchanged.email, "bob@example.com");
    let profile = users::profile_of(&pool, bob.id).await.unwrap();
    assert_eq!(profile.about, "");
}

#[tokio::test]
async fn test_update_account_updates_both_halves() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;

    let (user, profile) = users::update_account(
        &pool,
        ada.id,
        &AccountUpdate {
            username: "ada_lovelace".to_string(),
            email: "ada@analytical.example.com".to_string(),
            profile_image: "portrait".to_string(),
            about: "first programmer".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(user.username, "ada_lovelace");
    assert_eq!(profile.about, "first programmer");
}

#[tokio::test]
async fn test_listing_excludes_drafts() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;

    posts::create(&pool, ada.id, &post_input("Draft thoughts", PostStatus::Draft))
        .await
        .unwrap();
    let published = posts::create(&pool, ada.id, &post_input("Hello World", PostStatus::Published))
        .await
        .unwrap();

    let page = posts::list_published(&pool, 1, 6, None).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].id, published.id);

    // Draft is invisible by slug through the published lookup too.
    assert!(posts::find_published_by_slug(&pool, "draft-thoughts")
        .await
        .unwrap()
        .is_none());
    assert!(posts::find_by_slug(&pool, "draft-thoughts").await.unwrap().is_some());
}

#[tokio::test]
async fn test_pagination_is_fixed_size() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;

    for i in 0..8 {
        posts::create(
            &pool,
            ada.id,
            &post_input(&format!("Post number {i}"), PostStatus::Published),
        )
        .await
        .unwrap();
    }

    let first = posts::list_published(&pool, 1, 6, None).await.unwrap();
    assert_eq!(first.posts.len(), 6);
    assert_eq!(first.total, 8);

    let second = posts::list_published(&pool, 2, 6, None).await.unwrap();
    assert_eq!(second.posts.len(), 2);

    // Newest first.
    assert_eq!(first.posts[0].title, "Post number 7");
}

#[tokio::test]
async fn test_category_filter_is_case_sensitive() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let rust = posts::create_category(&pool, "Rust").await.unwrap();

    let mut input = post_input("Borrow checker tales", PostStatus::Published);
    input.categories = vec![rust.id];
    let post = posts::create(&pool, ada.id, &input).await.unwrap();

    let hit = posts::list_published(&pool, 1, 6, Some("Rust")).await.unwrap();
    assert_eq!(hit.posts.len(), 1);
    assert_eq!(hit.posts[0].id, post.id);

    let miss = posts::list_published(&pool, 1, 6, Some("rust")).await.unwrap();
    assert!(miss.posts.is_empty());

    let cats = posts::categories_of(&pool, post.id).await.unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].name, "Rust");
}

#[tokio::test]
async fn test_unknown_category_id_is_not_found() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let rust = posts::create_category(&pool, "Rust").await.unwrap();

    let known = posts::existing_category_ids(&pool, &[rust.id, 999]).await.unwrap();
    assert_eq!(known, vec![rust.id]);
    assert!(posts::existing_category_ids(&pool, &[]).await.unwrap().is_empty());

    let mut input = post_input("Ghost category", PostStatus::Published);
    input.categories = vec![999];
    let result = posts::create(&pool, ada.id, &input).await;
    assert!(matches!(result, Err(StoreError::NotFound("category"))));

    // The failed insert rolled back with the post.
    assert!(posts::find_by_slug(&pool, "ghost-category").await.unwrap().is_none());

    let post = posts::create(&pool, ada.id, &post_input("Real post", PostStatus::Published))
        .await
        .unwrap();
    input.title = "Real post".to_string();
    let result = posts::update(&pool, post.id, &input).await;
    assert!(matches!(result, Err(StoreError::NotFound("category"))));
}

#[tokio::test]
async fn test_slug_regenerated_on_update() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;

    let post = posts::create(&pool, ada.id, &post_input("First Title", PostStatus::Published))
        .await
        .unwrap();
    assert_eq!(post.slug, "first-title");

    let updated = posts::update(&pool, post.id, &post_input("Second Title!", PostStatus::Published))
        .await
        .unwrap();
    assert_eq!(updated.slug, "second-title");
    assert_eq!(updated.id, post.id);
}

#[tokio::test]
async fn test_duplicate_title_is_conflict() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;

    posts::create(&pool, ada.id, &post_input("Unique Title", PostStatus::Published))
        .await
        .unwrap();
    let result =
        posts::create(&pool, ada.id, &post_input("Unique Title", PostStatus::Draft)).await;
    assert!(matches!(result, Err(StoreError::Conflict("post title"))));
}

#[tokio::test]
async fn test_post_delete_cascades() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let bob = register(&pool, "bob").await;

    let post = posts::create(&pool, ada.id, &post_input("Doomed", PostStatus::Published))
        .await
        .unwrap();
    let comment = comments::create(&pool, post.id, bob.id, "nice post").await.unwrap();
    reactions::toggle_like(&pool, bob.id, post.id).await.unwrap();
    reactions::toggle_favorite(&pool, bob.id, post.id).await.unwrap();

    posts::delete(&pool, post.id).await.unwrap();

    assert!(comments::find(&pool, comment.id).await.unwrap().is_none());
    assert_eq!(reactions::like_count(&pool, post.id).await.unwrap(), 0);
    assert_eq!(reactions::favorite_count(&pool, post.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_comment_starts_unapproved_and_visibility_tiers() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let bob = register(&pool, "bob").await;
    let staff_user = register(&pool, "mod").await;
    users::set_staff(&pool, staff_user.id, true).await.unwrap();

    let post = posts::create(&pool, ada.id, &post_input("Open thread", PostStatus::Published))
        .await
        .unwrap();

    let pending = comments::create(&pool, post.id, bob.id, "waiting").await.unwrap();
    assert!(!pending.approved);
    let approved = comments::create(&pool, post.id, ada.id, "visible").await.unwrap();
    comments::set_approved(&pool, approved.id, true).await.unwrap();

    // Public: approved only.
    let public = comments::visible_for_post(&pool, post.id, None).await.unwrap();
    assert_eq!(public.iter().map(|c| c.id).collect::<Vec<_>>(), vec![approved.id]);

    // The pending comment's author also sees their own.
    let bob_actor = actor_of(&bob);
    let as_bob = comments::visible_for_post(&pool, post.id, Some(&bob_actor))
        .await
        .unwrap();
    assert_eq!(as_bob.len(), 2);

    // Another non-staff user does not see bob's pending comment.
    let ada_actor = actor_of(&ada);
    let as_ada = comments::visible_for_post(&pool, post.id, Some(&ada_actor))
        .await
        .unwrap();
    assert_eq!(as_ada.iter().map(|c| c.id).collect::<Vec<_>>(), vec![approved.id]);

    // Staff see everything.
    let staff_actor = Actor {
        id: staff_user.id,
        username: staff_user.username.clone(),
        is_staff: true,
    };
    let as_staff = comments::visible_for_post(&pool, post.id, Some(&staff_actor))
        .await
        .unwrap();
    assert_eq!(as_staff.len(), 2);

    assert_eq!(comments::approved_count(&pool, post.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_comment_edit_resets_approval() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let post = posts::create(&pool, ada.id, &post_input("Thread", PostStatus::Published))
        .await
        .unwrap();

    let comment = comments::create(&pool, post.id, ada.id, "v1").await.unwrap();
    comments::set_approved(&pool, comment.id, true).await.unwrap();

    let edited = comments::update_body(&pool, comment.id, "v2").await.unwrap();
    assert_eq!(edited.body, "v2");
    assert!(!edited.approved);
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let post = posts::create(&pool, ada.id, &post_input("Likeable", PostStatus::Published))
        .await
        .unwrap();

    assert_eq!(
        reactions::toggle_like(&pool, ada.id, post.id).await.unwrap(),
        Toggle::Added
    );
    assert!(reactions::is_liked(&pool, ada.id, post.id).await.unwrap());
    assert_eq!(reactions::like_count(&pool, post.id).await.unwrap(), 1);

    assert_eq!(
        reactions::toggle_like(&pool, ada.id, post.id).await.unwrap(),
        Toggle::Removed
    );
    assert!(!reactions::is_liked(&pool, ada.id, post.id).await.unwrap());
    assert_eq!(reactions::like_count(&pool, post.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_favorite_toggle_and_uniqueness() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let post = posts::create(&pool, ada.id, &post_input("Keeper", PostStatus::Published))
        .await
        .unwrap();

    assert_eq!(
        reactions::toggle_favorite(&pool, ada.id, post.id).await.unwrap(),
        Toggle::Added
    );

    // A direct second insert for the pair is rejected by the constraint.
    let dup = reactions::insert_favorite(&pool, ada.id, post.id).await;
    assert!(matches!(dup, Err(StoreError::Conflict("favorite"))));

    assert_eq!(
        reactions::toggle_favorite(&pool, ada.id, post.id).await.unwrap(),
        Toggle::Removed
    );
    assert!(!reactions::is_favorited(&pool, ada.id, post.id).await.unwrap());
}

#[tokio::test]
async fn test_favorites_listing() {
    let pool = pool().await;
    let ada = register(&pool, "ada").await;
    let first = posts::create(&pool, ada.id, &post_input("First", PostStatus::Published))
        .await
        .unwrap();
    let second = posts::create(&pool, ada.id, &post_input("Second", PostStatus::Published))
        .await
        .unwrap();

    reactions::toggle_favorite(&pool, ada.id, first.id).await.unwrap();
    reactions::toggle_favorite(&pool, ada.id, second.id).await.unwrap();

    let favorites = reactions::favorites_of(&pool, ada.id).await.unwrap();
    assert_eq!(favorites.len(), 2);
    assert_eq!(favorites[0].id, second.id);
}

#[tokio::test]
async fn test_about_upsert_keeps_single_entry() {
    let pool = pool().await;
    assert!(pages::get_about(&pool).await.unwrap().is_none());

    let created = pages::upsert_about(&pool, "About me", "portrait", "hello").await.unwrap();
    let replaced = pages::upsert_about(&pool, "Still me", "portrait", "updated").await.unwrap();
    assert_eq!(created.id, replaced.id);

    let current = pages::get_about(&pool).await.unwrap().unwrap();
    assert_eq!(current.title, "Still me");
    assert_eq!(current.content, "updated");
}

#[tokio::test]
async fn test_collaborate_flow() {
    let pool = pool().await;
    let first = pages::create_collaborate(&pool, "Ada", "ada@x.com", "", "hi").await.unwrap();
    let second = pages::create_collaborate(&pool, "Bob", "bob@x.com", "555", "hello")
        .await
        .unwrap();
    assert!(!first.read);

    let changed = pages::mark_read(&pool, &[first.id]).await.unwrap();
    assert_eq!(changed, 1);

    // Unread first, then read.
    let listed = pages::list_collaborate(&pool).await.unwrap();
    assert_eq!(listed[0].id, second.id);
    assert!(!listed[0].read);
    assert!(listed[1].read);

    assert_eq!(pages::mark_read(&pool, &[]).await.unwrap(), 0);
}
