use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    is_valid_name, non_empty, parse_optional_decimal, parse_optional_int, FieldErrors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoProducto {
    #[default]
    Vino,
    Material,
}

impl TipoProducto {
    pub fn label(&self) -> &'static str {
        match self {
            TipoProducto::Vino => "Vino",
            TipoProducto::Material => "Material",
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            TipoProducto::Vino => "VINO",
            TipoProducto::Material => "MATERIAL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "VINO" => Some(TipoProducto::Vino),
            "MATERIAL" => Some(TipoProducto::Material),
            _ => None,
        }
    }
}

/// Packaging material family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FamiliaMaterial {
    Botella,
    Corcho,
    Capsula,
    Etiqueta,
    Caja,
    #[default]
    #[serde(other)]
    Otro,
}

impl FamiliaMaterial {
    pub const ALL: [FamiliaMaterial; 6] = [
        FamiliaMaterial::Botella,
        FamiliaMaterial::Corcho,
        FamiliaMaterial::Capsula,
        FamiliaMaterial::Etiqueta,
        FamiliaMaterial::Caja,
        FamiliaMaterial::Otro,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FamiliaMaterial::Botella => "Botella",
            FamiliaMaterial::Corcho => "Corcho",
            FamiliaMaterial::Capsula => "Cápsula",
            FamiliaMaterial::Etiqueta => "Etiqueta",
            FamiliaMaterial::Caja => "Caja",
            FamiliaMaterial::Otro => "Otro",
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            FamiliaMaterial::Botella => "BOTELLA",
            FamiliaMaterial::Corcho => "CORCHO",
            FamiliaMaterial::Capsula => "CAPSULA",
            FamiliaMaterial::Etiqueta => "ETIQUETA",
            FamiliaMaterial::Caja => "CAJA",
            FamiliaMaterial::Otro => "OTRO",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.as_code() == code)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vino {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub variedad: Option<String>,
    #[serde(default)]
    pub anada: Option<i32>,
    /// Price for trade customers.
    #[serde(default)]
    pub precio_profesional: Option<f64>,
    /// Price for private customers.
    #[serde(default)]
    pub precio_particular: Option<f64>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub familia: FamiliaMaterial,
    #[serde(default)]
    pub stock_unidades: i64,
    #[serde(default)]
    pub stock_minimo_unidades: i64,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_true() -> bool {
    true
}

impl Material {
    /// Stock at or below the configured minimum.
    pub fn is_stock_critical(&self) -> bool {
        self.stock_unidades <= self.stock_minimo_unidades
    }
}

/// Inventory product, tagged on `tipo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Producto {
    Vino(Vino),
    Material(Material),
}

impl Producto {
    pub fn id(&self) -> i64 {
        match self {
            Producto::Vino(v) => v.id,
            Producto::Material(m) => m.id,
        }
    }

    pub fn nombre(&self) -> &str {
        match self {
            Producto::Vino(v) => &v.nombre,
            Producto::Material(m) => &m.nombre,
        }
    }

    pub fn activo(&self) -> bool {
        match self {
            Producto::Vino(v) => v.activo,
            Producto::Material(m) => m.activo,
        }
    }

    pub fn tipo(&self) -> TipoProducto {
        match self {
            Producto::Vino(_) => TipoProducto::Vino,
            Producto::Material(_) => TipoProducto::Material,
        }
    }

    pub fn is_stock_critical(&self) -> bool {
        match self {
            Producto::Vino(_) => false,
            Producto::Material(m) => m.is_stock_critical(),
        }
    }

    pub fn as_vino(&self) -> Option<&Vino> {
        match self {
            Producto::Vino(v) => Some(v),
            Producto::Material(_) => None,
        }
    }

    pub fn as_material(&self) -> Option<&Material> {
        match self {
            Producto::Material(m) => Some(m),
            Producto::Vino(_) => None,
        }
    }
}

/// Materials that need reordering.
pub fn critical_materials(productos: &[Producto]) -> Vec<&Material> {
    productos
        .iter()
        .filter_map(Producto::as_material)
        .filter(|m| m.activo && m.is_stock_critical())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductoActivoPatch {
    pub activo: bool,
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinoPayload {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub variedad: Option<String>,
    pub anada: Option<i32>,
    pub precio_profesional: Option<f64>,
    pub precio_particular: Option<f64>,
    pub activo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPayload {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub familia: FamiliaMaterial,
    pub stock_unidades: i64,
    pub stock_minimo_unidades: i64,
    pub activo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductoPayload {
    Vino(VinoPayload),
    Material(MaterialPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductoForm {
    pub tipo: TipoProducto,
    pub nombre: String,
    pub descripcion: String,
    pub variedad: String,
    pub anada: String,
    pub precio_profesional: String,
    pub precio_particular: String,
    pub familia: FamiliaMaterial,
    pub stock_unidades: String,
    pub stock_minimo_unidades: String,
    pub activo: bool,
}

impl Default for ProductoForm {
    fn default() -> Self {
        Self {
            tipo: TipoProducto::Vino,
            nombre: String::new(),
            descripcion: String::new(),
            variedad: String::new(),
            anada: String::new(),
            precio_profesional: String::new(),
            precio_particular: String::new(),
            familia: FamiliaMaterial::default(),
            stock_unidades: "0".to_string(),
            stock_minimo_unidades: "0".to_string(),
            activo: true,
        }
    }
}

impl ProductoForm {
    pub fn from_producto(p: &Producto) -> Self {
        match p {
            Producto::Vino(v) => Self {
                tipo: TipoProducto::Vino,
                nombre: v.nombre.clone(),
                descripcion: v.descripcion.clone().unwrap_or_default(),
                variedad: v.variedad.clone().unwrap_or_default(),
                anada: v.anada.map(|a| a.to_string()).unwrap_or_default(),
                precio_profesional: v.precio_profesional.map(|x| x.to_string()).unwrap_or_default(),
                precio_particular: v.precio_particular.map(|x| x.to_string()).unwrap_or_default(),
                activo: v.activo,
                ..Self::default()
            },
            Producto::Material(m) => Self {
                tipo: TipoProducto::Material,
                nombre: m.nombre.clone(),
                descripcion: m.descripcion.clone().unwrap_or_default(),
                familia: m.familia,
                stock_unidades: m.stock_unidades.to_string(),
                stock_minimo_unidades: m.stock_minimo_unidades.to_string(),
                activo: m.activo,
                ..Self::default()
            },
        }
    }

    pub fn validate(&self) -> Result<ProductoPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !is_valid_name(&self.nombre) {
            errors.add("nombre", "El nombre debe tener entre 3 y 100 caracteres");
        }

        match self.tipo {
            TipoProducto::Vino => {
                let price = |raw: &str, field: &'static str, errors: &mut FieldErrors| {
                    match parse_optional_decimal(raw) {
                        Ok(Some(p)) if p < 0.0 => {
                            errors.add(field, "El precio no puede ser negativo");
                            None
                        }
                        Ok(p) => p,
                        Err(()) => {
                            errors.add(field, "Precio no válido");
                            None
                        }
                    }
                };
                let precio_profesional =
                    price(&self.precio_profesional, "precio_profesional", &mut errors);
                let precio_particular =
                    price(&self.precio_particular, "precio_particular", &mut errors);

                let anada = match parse_optional_int(&self.anada) {
                    Ok(Some(a)) if (1900..=2100).contains(&a) => Some(a as i32),
                    Ok(None) => None,
                    _ => {
                        errors.add("anada", "Añada no válida");
                        None
                    }
                };

                errors.into_result(ProductoPayload::Vino(VinoPayload {
                    nombre: self.nombre.trim().to_string(),
                    descripcion: non_empty(&self.descripcion),
                    variedad: non_empty(&self.variedad),
                    anada,
                    precio_profesional,
                    precio_particular,
                    activo: self.activo,
                }))
            }
            TipoProducto::Material => {
                let count = |raw: &str, field: &'static str, errors: &mut FieldErrors| {
                    match parse_optional_int(raw) {
                        Ok(Some(n)) if n >= 0 => n,
                        Ok(None) => 0,
                        _ => {
                            errors.add(field, "Debe ser un número entero no negativo");
                            0
                        }
                    }
                };
                let stock_unidades = count(&self.stock_unidades, "stock_unidades", &mut errors);
                let stock_minimo_unidades =
                    count(&self.stock_minimo_unidades, "stock_minimo_unidades", &mut errors);

                errors.into_result(ProductoPayload::Material(MaterialPayload {
                    nombre: self.nombre.trim().to_string(),
                    descripcion: non_empty(&self.descripcion),
                    familia: self.familia,
                    stock_unidades,
                    stock_minimo_unidades,
                    activo: self.activo,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(stock: i64, minimo: i64) -> Material {
        Material {
            id: 1,
            nombre: "Corcho natural".into(),
            descripcion: None,
            familia: FamiliaMaterial::Corcho,
            stock_unidades: stock,
            stock_minimo_unidades: minimo,
            activo: true,
        }
    }

    #[test]
    fn test_stock_critical_boundary() {
        assert!(material(100, 100).is_stock_critical());
        assert!(material(99, 100).is_stock_critical());
        assert!(!material(101, 100).is_stock_critical());
    }

    #[test]
    fn test_tagged_deserialization() {
        let json = r#"[
            {"tipo":"VINO","id":1,"nombre":"Toro Crianza","precioProfesional":8.5,"precioParticular":12.0},
            {"tipo":"MATERIAL","id":2,"nombre":"Botella bordelesa","familia":"BOTELLA","stockUnidades":50,"stockMinimoUnidades":200},
            {"tipo":"MATERIAL","id":3,"nombre":"Precinto","familia":"PRECINTO","stockUnidades":500,"stockMinimoUnidades":10}
        ]"#;
        let productos: Vec<Producto> = serde_json::from_str(json).unwrap();
        assert_eq!(productos[0].tipo(), TipoProducto::Vino);
        assert_eq!(productos[0].as_vino().unwrap().precio_particular, Some(12.0));
        assert!(productos[1].is_stock_critical());
        assert_eq!(productos[2].as_material().unwrap().familia, FamiliaMaterial::Otro);

        let critical = critical_materials(&productos);
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, 2);
    }

    #[test]
    fn test_wine_form() {
        let mut form = ProductoForm {
            nombre: "Toro Roble".into(),
            precio_profesional: "-1".into(),
            anada: "20x".into(),
            ..ProductoForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("precio_profesional"));
        assert!(errors.contains("anada"));

        form.precio_profesional = "7,25".into();
        form.anada = "2022".into();
        match form.validate().unwrap() {
            ProductoPayload::Vino(v) => {
                assert_eq!(v.precio_profesional, Some(7.25));
                assert_eq!(v.anada, Some(2022));
                assert_eq!(v.precio_particular, None);
            }
            other => panic!("expected wine payload, got {:?}", other),
        }
    }

    #[test]
    fn test_material_form_payload_tag() {
        let form = ProductoForm {
            tipo: TipoProducto::Material,
            nombre: "Caja 6 botellas".into(),
            familia: FamiliaMaterial::Caja,
            stock_unidades: "40".into(),
            stock_minimo_unidades: "".into(),
            ..ProductoForm::default()
        };
        let payload = form.validate().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tipo"], "MATERIAL");
        assert_eq!(json["familia"], "CAJA");
        assert_eq!(json["stockUnidades"], 40);
        assert_eq!(json["stockMinimoUnidades"], 0);
    }
}
