use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    is_valid_email, is_valid_name, is_valid_phone, is_valid_postal_code, is_valid_tax_id,
    non_empty, normalize_tax_id, FieldErrors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoCliente {
    #[default]
    Empresa,
    Particular,
}

impl TipoCliente {
    pub fn label(&self) -> &'static str {
        match self {
            TipoCliente::Empresa => "Empresa",
            TipoCliente::Particular => "Particular",
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            TipoCliente::Empresa => "EMPRESA",
            TipoCliente::Particular => "PARTICULAR",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "PARTICULAR" => TipoCliente::Particular,
            _ => TipoCliente::Empresa,
        }
    }
}

/// Customer record, `/api/{slug}/clientes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: i64,
    #[serde(default)]
    pub tipo: TipoCliente,
    pub nombre: String,
    #[serde(default)]
    pub nif: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub codigo_postal: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub provincia: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_true() -> bool {
    true
}

impl Cliente {
    /// Case-insensitive match on name, tax id, email and city.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(self.nombre.as_str()),
            self.nif.as_deref(),
            self.email.as_deref(),
            self.ciudad.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|v| v.to_lowercase().contains(&needle))
    }
}

/// POST/PUT body. Optional fields are sent as `null` when blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    pub tipo: TipoCliente,
    pub nombre: String,
    pub nif: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub codigo_postal: Option<String>,
    pub ciudad: Option<String>,
    pub provincia: Option<String>,
    pub notas: Option<String>,
    pub activo: bool,
}

/// Soft deactivation body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClienteActivoPatch {
    pub activo: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClienteForm {
    pub tipo: TipoCliente,
    pub nombre: String,
    pub nif: String,
    pub email: String,
    pub telefono: String,
    pub direccion: String,
    pub codigo_postal: String,
    pub ciudad: String,
    pub provincia: String,
    pub notas: String,
    pub activo: bool,
}

impl Default for ClienteForm {
    fn default() -> Self {
        Self {
            tipo: TipoCliente::default(),
            nombre: String::new(),
            nif: String::new(),
            email: String::new(),
            telefono: String::new(),
            direccion: String::new(),
            codigo_postal: String::new(),
            ciudad: String::new(),
            provincia: String::new(),
            notas: String::new(),
            activo: true,
        }
    }
}

impl ClienteForm {
    pub fn from_cliente(c: &Cliente) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            tipo: c.tipo,
            nombre: c.nombre.clone(),
            nif: text(&c.nif),
            email: text(&c.email),
            telefono: text(&c.telefono),
            direccion: text(&c.direccion),
            codigo_postal: text(&c.codigo_postal),
            ciudad: text(&c.ciudad),
            provincia: text(&c.provincia),
            notas: text(&c.notas),
            activo: c.activo,
        }
    }

    pub fn validate(&self) -> Result<ClientePayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        if !is_valid_name(&self.nombre) {
            errors.add("nombre", "El nombre debe tener entre 3 y 100 caracteres");
        }
        if non_empty(&self.nif).is_some() && !is_valid_tax_id(&self.nif) {
            errors.add("nif", "NIF/CIF no válido");
        }
        if non_empty(&self.email).is_some() && !is_valid_email(&self.email) {
            errors.add("email", "Email no válido");
        }
        if non_empty(&self.telefono).is_some() && !is_valid_phone(&self.telefono) {
            errors.add("telefono", "Teléfono no válido (9 dígitos)");
        }
        if non_empty(&self.codigo_postal).is_some() && !is_valid_postal_code(&self.codigo_postal) {
            errors.add("codigo_postal", "Código postal de 5 dígitos");
        }

        errors.into_result(ClientePayload {
            tipo: self.tipo,
            nombre: self.nombre.trim().to_string(),
            nif: non_empty(&self.nif).map(|n| normalize_tax_id(&n)),
            email: non_empty(&self.email),
            telefono: non_empty(&self.telefono),
            direccion: non_empty(&self.direccion),
            codigo_postal: non_empty(&self.codigo_postal),
            ciudad: non_empty(&self.ciudad),
            provincia: non_empty(&self.provincia),
            notas: non_empty(&self.notas),
            activo: self.activo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::{submit_validated, SubmitError};
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn particular(nombre: &str) -> ClienteForm {
        ClienteForm {
            tipo: TipoCliente::Particular,
            nombre: nombre.to_string(),
            ..ClienteForm::default()
        }
    }

    #[test]
    fn test_short_name_is_rejected_without_request() {
        let sent: RefCell<Vec<ClientePayload>> = RefCell::new(Vec::new());
        let form = particular("Bo");

        let result = block_on(submit_validated(form.validate(), |payload| {
            sent.borrow_mut().push(payload);
            async { Ok::<i64, String>(1) }
        }));

        match result {
            Err(SubmitError::Invalid(errors)) => assert!(errors.contains("nombre")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn test_valid_form_sends_one_trimmed_payload() {
        let sent: RefCell<Vec<ClientePayload>> = RefCell::new(Vec::new());
        let mut form = particular("  Bodega X ");
        form.codigo_postal = "49000".into();
        form.email = "   ".into();
        form.ciudad = " Toro ".into();

        let result = block_on(submit_validated(form.validate(), |payload| {
            sent.borrow_mut().push(payload);
            async { Ok::<i64, String>(42) }
        }));

        assert_eq!(result, Ok(42));
        let sent = sent.into_inner();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].nombre, "Bodega X");
        assert_eq!(sent[0].ciudad.as_deref(), Some("Toro"));
        assert_eq!(sent[0].email, None);

        let json = serde_json::to_value(&sent[0]).unwrap();
        assert!(json["email"].is_null());
        assert_eq!(json["codigoPostal"], "49000");
        assert_eq!(json["tipo"], "PARTICULAR");
    }

    #[test]
    fn test_field_level_errors() {
        let mut form = particular("Bodega X");
        form.telefono = "12345".into();
        form.codigo_postal = "4900".into();
        form.email = "a@b".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("telefono"));
        assert!(errors.contains("codigo_postal"));
        assert!(errors.contains("email"));
        assert!(!errors.contains("nombre"));

        form.telefono = "622334455".into();
        form.codigo_postal = "49000".into();
        form.email = "a@b.com".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_untouched_new_form_sends_one_payload() {
        let sent: RefCell<Vec<ClientePayload>> = RefCell::new(Vec::new());
        let form = ClienteForm {
            nombre: "Bodega X".into(),
            codigo_postal: "49000".into(),
            ..ClienteForm::default()
        };

        let result = block_on(submit_validated(form.validate(), |payload| {
            sent.borrow_mut().push(payload);
            async { Ok::<i64, String>(7) }
        }));

        assert_eq!(result, Ok(7));
        let sent = sent.into_inner();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].tipo, TipoCliente::Empresa);
        assert_eq!(sent[0].nif, None);
        assert_eq!(sent[0].codigo_postal.as_deref(), Some("49000"));
    }

    #[test]
    fn test_company_tax_id_is_optional_but_checked() {
        let mut form = ClienteForm {
            nombre: "Vinos del Duero SL".into(),
            ..ClienteForm::default()
        };
        assert!(form.validate().is_ok());
        form.nif = "123".into();
        assert!(form.validate().unwrap_err().contains("nif"));
    }

    #[test]
    fn test_filter() {
        let cliente = Cliente {
            id: 1,
            tipo: TipoCliente::Empresa,
            nombre: "Vinoteca Sol".into(),
            nif: Some("B49123456".into()),
            email: None,
            telefono: None,
            direccion: None,
            codigo_postal: None,
            ciudad: Some("Zamora".into()),
            provincia: None,
            notas: None,
            activo: true,
        };
        assert!(cliente.matches_filter("zamo"));
        assert!(cliente.matches_filter("b491"));
        assert!(cliente.matches_filter(""));
        assert!(!cliente.matches_filter("toro"));
    }
}
