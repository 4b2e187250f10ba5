//! Persistence for product documents.
//!
//! Handlers only talk to [`ProductoStore`]; [`SqliteProductoStore`] is the
//! implementation wired up at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::types::{Categoria, Producto};

#[async_trait]
pub trait ProductoStore: Send + Sync {
    /// All products, in no particular order.
    async fn find_all(&self) -> AppResult<Vec<Producto>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Producto>>;

    /// Inserts or replaces the product. A product without an id gets a fresh
    /// one; the stored record is returned.
    async fn save(&self, producto: Producto) -> AppResult<Producto>;

    /// Removes the product. Deleting an absent record is not an error.
    async fn delete(&self, producto: &Producto) -> AppResult<()>;
}

#[derive(Clone)]
pub struct SqliteProductoStore {
    pool: SqlitePool,
}

impl SqliteProductoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductoRow {
    id: String,
    nombre: String,
    precio: Option<f64>,
    create_at: Option<DateTime<Utc>>,
    foto: Option<String>,
    categoria_id: Option<String>,
    categoria_nombre: Option<String>,
}

impl From<ProductoRow> for Producto {
    fn from(row: ProductoRow) -> Self {
        let categoria = match (row.categoria_id, row.categoria_nombre) {
            (None, None) => None,
            (id, nombre) => Some(Categoria { id, nombre: nombre.unwrap_or_default() }),
        };
        Producto {
            id: Some(row.id),
            nombre: row.nombre,
            precio: row.precio,
            create_at: row.create_at,
            foto: row.foto,
            categoria,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, nombre, precio, create_at, foto, categoria_id, categoria_nombre FROM productos";

#[async_trait]
impl ProductoStore for SqliteProductoStore {
    async fn find_all(&self) -> AppResult<Vec<Producto>> {
        let items: Vec<Producto> = sqlx::query_as::<_, ProductoRow>(SELECT_COLUMNS)
            .fetch(&self.pool)
            .map_ok(Producto::from)
            .try_collect()
            .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Producto>> {
        let row = sqlx::query_as::<_, ProductoRow>(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Producto::from))
    }

    async fn save(&self, mut producto: Producto) -> AppResult<Producto> {
        let id = producto.id.get_or_insert_with(|| Uuid::new_v4().to_string()).clone();
        let (categoria_id, categoria_nombre) = match &producto.categoria {
            Some(c) => (c.id.clone(), Some(c.nombre.clone())),
            None => (None, None),
        };

        sqlx::query(
            r#"INSERT INTO productos (id, nombre, precio, create_at, foto, categoria_id, categoria_nombre)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               ON CONFLICT(id) DO UPDATE SET
                   nombre = excluded.nombre,
                   precio = excluded.precio,
                   create_at = excluded.create_at,
                   foto = excluded.foto,
                   categoria_id = excluded.categoria_id,
                   categoria_nombre = excluded.categoria_nombre"#,
        )
        .bind(&id)
        .bind(&producto.nombre)
        .bind(producto.precio)
        .bind(producto.create_at)
        .bind(&producto.foto)
        .bind(categoria_id)
        .bind(categoria_nombre)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Saved producto {}", id);
        Ok(producto)
    }

    async fn delete(&self, producto: &Producto) -> AppResult<()> {
        if let Some(id) = producto.id.as_deref() {
            sqlx::query("DELETE FROM productos WHERE id = ?1").bind(id).execute(&self.pool).await?;
            tracing::debug!("Deleted producto {}", id);
        }
        Ok(())
    }
}
