use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, OptionExt},
    state::AppState,
    types::{field_error_messages, Categoria, Producto},
    uploads::{unique_filename, MultipartForm},
};

/// 201 with the stored product and its `Location`.
fn created(producto: Producto) -> Response {
    let location = producto.location();
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(producto)).into_response()
}

/// Reads and parses a JSON body. An empty body yields `None`.
async fn decode_json<T: DeserializeOwned>(body: Body, limit: usize) -> AppResult<Option<T>> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))?;
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

pub async fn list_productos(State(state): State<AppState>) -> AppResult<Json<Vec<Producto>>> {
    let items = state.productos.find_all().await?;
    Ok(Json(items))
}

pub async fn get_producto(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Producto>> {
    let producto = state.productos.find_by_id(&id).await?.ok_or_not_found("producto")?;
    Ok(Json(producto))
}

pub async fn create_producto(State(state): State<AppState>, body: Body) -> AppResult<Response> {
    let mut producto: Producto = decode_json(body, state.config.server.max_body_bytes)
        .await?
        .ok_or_else(|| AppError::BadRequest("Request body is empty".to_string()))?;
    if let Err(errors) = producto.validate() {
        state.metrics.inc_validation_failures();
        return Err(AppError::Validation(field_error_messages(&errors)));
    }

    // The store owns id assignment
    producto.id = None;
    if producto.create_at.is_none() {
        producto.create_at = Some(Utc::now());
    }

    let saved = state.productos.save(producto).await?;
    state.metrics.inc_created();
    tracing::info!("Created producto {}", saved.id.as_deref().unwrap_or_default());
    Ok(created(saved))
}

/// Replaces name, price and category of an existing product.
///
/// The lookup and the body decode run concurrently; the merge happens once both
/// are done. An unknown id wins over an undecodable body, and an empty body
/// leaves nothing to merge, which also answers 404. Answers 201 like the other
/// write paths.
pub async fn update_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Body,
) -> AppResult<Response> {
    let limit = state.config.server.max_body_bytes;
    let (existing, incoming) =
        tokio::join!(state.productos.find_by_id(&id), decode_json::<Producto>(body, limit));

    let mut producto = existing?.ok_or_not_found("producto")?;
    producto.merge_from(incoming?.ok_or_not_found("producto body")?);

    let saved = state.productos.save(producto).await?;
    state.metrics.inc_updated();
    tracing::info!("Updated producto {}", id);
    Ok(created(saved))
}

pub async fn delete_producto(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let producto = state.productos.find_by_id(&id).await?.ok_or_not_found("producto")?;
    state.productos.delete(&producto).await?;
    state.metrics.inc_deleted();
    tracing::info!("Deleted producto {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Attaches a photo to an existing product.
///
/// The file lands on disk before the record is saved; a failed save leaves the
/// file behind.
pub async fn upload_foto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Response> {
    let mut form = MultipartForm::from_multipart(multipart).await?;
    let file = form.take_file("file")?;

    let mut producto = state.productos.find_by_id(&id).await?.ok_or_not_found("producto")?;

    let foto = unique_filename(&file.filename);
    file.transfer_to(&state.upload_dir(), &foto).await?;
    producto.foto = Some(foto);

    let saved = state.productos.save(producto).await?;
    state.metrics.add_upload(file.bytes.len() as u64);
    Ok(created(saved))
}

/// Creates a product from form fields plus a photo in one request.
///
/// No field validation runs here and the creation time is always now.
pub async fn create_producto_con_foto(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = MultipartForm::from_multipart(multipart).await?;

    let nombre = form.text("nombre")?;
    let precio_raw = form.text("precio")?;
    let precio: f64 = precio_raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("precio is not a number: {}", precio_raw)))?;
    let categoria = Categoria::new(form.text("categoria.id")?, form.text("categoria.nombre")?);
    let file = form.file("file")?;

    let mut producto = Producto::new(nombre, precio, categoria);
    let foto = unique_filename(&file.filename);
    producto.foto = Some(foto.clone());
    producto.create_at = Some(Utc::now());

    file.transfer_to(&state.upload_dir(), &foto).await?;
    let saved = state.productos.save(producto).await?;
    state.metrics.inc_created();
    state.metrics.add_upload(file.bytes.len() as u64);
    tracing::info!("Created producto {} with foto {}", saved.id.as_deref().unwrap_or_default(), foto);
    Ok(created(saved))
}
