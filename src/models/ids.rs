// El backend devuelve `idResultado` como número, pero registros recién
// creados o parámetros de ruta pueden llegar como texto ("12").

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Identificador de entidad en el backend
pub type Id = i64;

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = Option<Id>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("un identificador numérico (número o texto)")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(IdVisitor)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Id::try_from(v).map(Some).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 {
            Ok(Some(v as Id))
        } else {
            Err(E::custom(format!("identificador no entero: {}", v)))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.trim().is_empty() {
            return Ok(None);
        }
        v.trim()
            .parse()
            .map(Some)
            .map_err(|_| E::custom(format!("identificador inválido: {:?}", v)))
    }
}

/// `deserialize_with` para campos `Option<Id>`
pub fn deserialize_opt_id<'de, D>(d: D) -> Result<Option<Id>, D::Error>
where
    D: Deserializer<'de>,
{
    d.deserialize_option(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct ConId {
        #[serde(default, deserialize_with = "deserialize_opt_id")]
        id: Option<Id>,
    }

    fn parse(v: serde_json::Value) -> Option<Id> {
        serde_json::from_value::<ConId>(v).unwrap().id
    }

    #[test]
    fn test_numero_y_texto_dan_el_mismo_id() {
        assert_eq!(parse(json!({ "id": 7 })), Some(7));
        assert_eq!(parse(json!({ "id": "7" })), Some(7));
        assert_eq!(parse(json!({ "id": 7.0 })), Some(7));
    }

    #[test]
    fn test_ausente_o_nulo() {
        assert_eq!(parse(json!({})), None);
        assert_eq!(parse(json!({ "id": null })), None);
        assert_eq!(parse(json!({ "id": "" })), None);
    }

    #[test]
    fn test_texto_no_numerico_es_error() {
        assert!(serde_json::from_value::<ConId>(json!({ "id": "abc" })).is_err());
        assert!(serde_json::from_value::<ConId>(json!({ "id": 1.5 })).is_err());
    }
}
