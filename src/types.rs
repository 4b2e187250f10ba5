use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Product category. Embedded by value inside a [`Producto`], never stored on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nombre: String,
}

impl Categoria {
    pub fn new(id: impl Into<String>, nombre: impl Into<String>) -> Self {
        Self { id: Some(id.into()), nombre: nombre.into() }
    }
}

/// A catalogue product as it travels over the wire and through the store.
///
/// `id` stays `None` until the store assigns one on the first save and never
/// changes afterwards. Field rules are only checked on the plain create path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub nombre: String,
    #[serde(default)]
    #[validate(
        required(message = "no puede ser nulo"),
        range(exclusive_min = 0.0, message = "debe ser mayor que 0")
    )]
    pub precio: Option<f64>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub categoria: Option<Categoria>,
}

impl Producto {
    pub fn new(nombre: impl Into<String>, precio: f64, categoria: Categoria) -> Self {
        Self {
            nombre: nombre.into(),
            precio: Some(precio),
            categoria: Some(categoria),
            ..Default::default()
        }
    }

    /// Copies the mutable catalogue fields from `incoming`. Identity, photo and
    /// creation time stay as they are.
    pub fn merge_from(&mut self, incoming: Producto) {
        self.nombre = incoming.nombre;
        self.precio = incoming.precio;
        self.categoria = incoming.categoria;
    }

    /// Path under which the persisted product is addressable.
    pub fn location(&self) -> String {
        format!("/api/v2/productos/{}", self.id.as_deref().unwrap_or_default())
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("no puede estar vacío")));
    }
    Ok(())
}

/// Flattens validator output into `"El campo {field} {message}"` lines, sorted by field.
pub fn field_error_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = Vec::new();
    for (field, errs) in fields {
        for err in errs.iter() {
            let message = err.message.as_deref().unwrap_or(err.code.as_ref());
            out.push(format!("El campo {} {}", field, message));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_producto_passes() {
        let p = Producto::new("Mouse", 15.5, Categoria::new("c1", "Electrónica"));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn blank_name_and_missing_price_are_reported() {
        let p = Producto { nombre: "   ".into(), ..Default::default() };
        let errors = p.validate().unwrap_err();
        let messages = field_error_messages(&errors);
        assert_eq!(
            messages,
            vec![
                "El campo nombre no puede estar vacío".to_string(),
                "El campo precio no puede ser nulo".to_string(),
            ]
        );
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let p = Producto { nombre: "Mouse".into(), precio: Some(0.0), ..Default::default() };
        let messages = field_error_messages(&p.validate().unwrap_err());
        assert_eq!(messages, vec!["El campo precio debe ser mayor que 0".to_string()]);
    }

    #[test]
    fn merge_keeps_identity_and_photo() {
        let mut existing = Producto {
            id: Some("abc".into()),
            nombre: "Mouse".into(),
            precio: Some(15.5),
            foto: Some("x-foto.png".into()),
            create_at: Some(Utc::now()),
            categoria: Some(Categoria::new("c1", "Electrónica")),
        };
        let created = existing.create_at;
        existing.merge_from(Producto::new("Mouse Pro", 20.0, Categoria::new("c2", "Gaming")));

        assert_eq!(existing.id.as_deref(), Some("abc"));
        assert_eq!(existing.foto.as_deref(), Some("x-foto.png"));
        assert_eq!(existing.create_at, created);
        assert_eq!(existing.nombre, "Mouse Pro");
        assert_eq!(existing.precio, Some(20.0));
        assert_eq!(existing.categoria, Some(Categoria::new("c2", "Gaming")));
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let json = serde_json::json!({
            "nombre": "Mouse",
            "precio": 15.5,
            "createAt": "2024-01-02T03:04:05Z",
            "categoria": { "id": "c1", "nombre": "Electrónica" }
        });
        let p: Producto = serde_json::from_value(json).unwrap();
        assert!(p.id.is_none());
        assert!(p.create_at.is_some());
        assert_eq!(p.categoria.unwrap().nombre, "Electrónica");
    }
}
