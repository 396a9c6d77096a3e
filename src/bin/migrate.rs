use marcenaria::{config::AppConfig, db::{create_orm_conn, ensure_schema}};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    ensure_schema(&orm).await?;
    orm.close().await?;
    println!("Schema ensured");
    Ok(())
}
