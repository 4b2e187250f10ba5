use super::memory_pool;
use crate::store::{ProductoStore, SqliteProductoStore};
use crate::types::{Categoria, Producto};

#[tokio::test]
async fn init_db_creates_productos_table() {
    let pool = memory_pool().await;

    let tables: Vec<String> = sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert!(tables.contains(&"productos".to_string()));

    // Idempotent
    crate::db::init_db(&pool).await.unwrap();
}

#[tokio::test]
async fn save_assigns_id_once() {
    let store = SqliteProductoStore::new(memory_pool().await);

    let saved = store.save(Producto::new("Mouse", 15.5, Categoria::new("c1", "Electrónica"))).await.unwrap();
    let id = saved.id.clone().unwrap();
    assert!(!id.is_empty());

    let mut changed = saved.clone();
    changed.nombre = "Mouse Pro".into();
    let resaved = store.save(changed).await.unwrap();

    assert_eq!(resaved.id.as_deref(), Some(id.as_str()));
    assert_eq!(store.find_all().await.unwrap().len(), 1);
    assert_eq!(store.find_by_id(&id).await.unwrap().unwrap().nombre, "Mouse Pro");
}

#[tokio::test]
async fn embedded_category_and_optional_fields_round_trip() {
    let store = SqliteProductoStore::new(memory_pool().await);
    let now = chrono::Utc::now();
    let mut producto = Producto::new("Mouse", 15.5, Categoria::new("c1", "Electrónica"));
    producto.foto = Some("abc-mouse.png".into());
    producto.create_at = Some(now);

    let id = store.save(producto).await.unwrap().id.unwrap();
    let stored = store.find_by_id(&id).await.unwrap().unwrap();

    assert_eq!(stored.categoria, Some(Categoria::new("c1", "Electrónica")));
    assert_eq!(stored.foto.as_deref(), Some("abc-mouse.png"));
    assert_eq!(stored.precio, Some(15.5));
    assert_eq!(stored.create_at.map(|t| t.timestamp_millis()), Some(now.timestamp_millis()));

    let bare = Producto { nombre: "Sin categoría".into(), ..Default::default() };
    let bare_id = store.save(bare).await.unwrap().id.unwrap();
    let bare = store.find_by_id(&bare_id).await.unwrap().unwrap();
    assert!(bare.categoria.is_none());
    assert!(bare.precio.is_none());
    assert!(bare.create_at.is_none());
}

#[tokio::test]
async fn find_missing_is_none() {
    let store = SqliteProductoStore::new(memory_pool().await);
    assert!(store.find_by_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let store = SqliteProductoStore::new(memory_pool().await);
    let saved = store.save(Producto::new("Mouse", 15.5, Categoria::new("c1", "Electrónica"))).await.unwrap();

    store.delete(&saved).await.unwrap();
    store.delete(&saved).await.unwrap();

    assert!(store.find_by_id(saved.id.as_deref().unwrap()).await.unwrap().is_none());
    assert!(store.find_all().await.unwrap().is_empty());
}
