use marcenaria::{Store, config::AppConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let store = Store::open(&config.database_url).await?;

    ensure_user(&store, "admin", "admin123").await;
    seed_products(&store).await;

    store.close().await?;
    println!("Seed completed");
    Ok(())
}

async fn ensure_user(store: &Store, username: &str, password: &str) {
    if store.user_exists(username).await {
        println!("User {username} already present");
        return;
    }
    if store.add_user(username, password).await {
        println!("Registered user {username}");
    } else {
        println!("Could not register user {username}");
    }
}

async fn seed_products(store: &Store) {
    let products = [
        ("Mesa de Jantar", "Mesa em madeira maciça para 6 lugares", 1850.0),
        ("Cadeira Colonial", "Cadeira em imbuia com assento de palha", 320.0),
        ("Estante Modular", "Estante em pinus com 5 prateleiras", 740.0),
        ("Tábua de Corte", "Tábua de cedro tratada com óleo mineral", 85.0),
    ];

    let existing: Vec<String> = store
        .list_products()
        .await
        .into_iter()
        .map(|p| p.name)
        .collect();

    for (name, desc, price) in products {
        if existing.iter().any(|n| n == name) {
            continue;
        }
        if !store.add_product(name, Some(desc), price).await {
            println!("Could not seed product {name}");
        }
    }

    println!("Seeded products");
}
