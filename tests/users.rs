use marcenaria::Store;

async fn open_store() -> anyhow::Result<Store> {
    Ok(Store::open("sqlite::memory:").await?)
}

#[tokio::test]
async fn registered_user_can_log_in() -> anyhow::Result<()> {
    let store = open_store().await?;

    assert!(!store.user_exists("joao").await);
    assert!(store.add_user("joao", "1234").await);
    assert!(store.user_exists("joao").await);

    let user = store.verify_user("joao", "1234").await.expect("valid login");
    assert_eq!(user.username, "joao");
    assert!(store.verify_user("joao", "wrong").await.is_none());

    Ok(())
}

#[tokio::test]
async fn unknown_user_does_not_verify() -> anyhow::Result<()> {
    let store = open_store().await?;
    assert!(store.verify_user("ninguem", "1234").await.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected() -> anyhow::Result<()> {
    let store = open_store().await?;

    assert!(store.add_user("maria", "abc").await);
    assert!(!store.add_user("maria", "outra").await);

    // the first registration keeps its password
    assert!(store.verify_user("maria", "abc").await.is_some());
    assert!(store.verify_user("maria", "outra").await.is_none());

    Ok(())
}

#[tokio::test]
async fn empty_credentials_are_rejected() -> anyhow::Result<()> {
    let store = open_store().await?;

    assert!(!store.add_user("", "1234").await);
    assert!(!store.add_user("   ", "1234").await);
    assert!(!store.add_user("pedro", "").await);
    assert!(!store.user_exists("pedro").await);

    Ok(())
}

#[tokio::test]
async fn password_is_not_stored_in_plain_text() -> anyhow::Result<()> {
    use marcenaria::entity::Users;
    use sea_orm::EntityTrait;

    let store = open_store().await?;
    assert!(store.add_user("ana", "segredo").await);

    let row = Users::find_by_id("ana".to_string())
        .one(store.connection())
        .await?
        .expect("user row");
    assert_ne!(row.password_hash, "segredo");
    assert!(row.password_hash.starts_with("$argon2"));

    Ok(())
}

#[tokio::test]
async fn username_is_matched_exactly_as_registered() -> anyhow::Result<()> {
    let store = open_store().await?;

    assert!(store.add_user(" joao ", "1234").await);
    assert!(store.user_exists(" joao ").await);
    let user = store.verify_user(" joao ", "1234").await.expect("valid login");
    assert_eq!(user.username, " joao ");

    // a differently spaced name is another key
    assert!(!store.user_exists("joao").await);
    assert!(store.verify_user("joao", "1234").await.is_none());
    assert!(!store.add_user(" joao ", "outra").await);
    assert!(store.add_user("joao", "5678").await);

    Ok(())
}
