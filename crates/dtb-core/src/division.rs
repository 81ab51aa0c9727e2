//! Territorial division rows and their schema-aware views.

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnRole, EntityKind};
use crate::value::Value;

/// One row of any division kind.
///
/// Ancestor keys are denormalized: a municipality carries its microregion,
/// mesoregion and state. Which keys are required depends on the kind the row
/// is stored under (see [`EntityKind::ancestors`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_distrito: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_municipio: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_microrregiao: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_mesorregiao: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_uf: Option<i64>,
    pub nome: String,
}

impl Division {
    /// Create a row with no ancestor keys.
    pub fn new(id: i64, nome: impl Into<String>) -> Self {
        Self {
            id,
            id_distrito: None,
            id_municipio: None,
            id_microrregiao: None,
            id_mesorregiao: None,
            id_uf: None,
            nome: nome.into(),
        }
    }

    /// Set the key referencing an ancestor of the given kind.
    pub fn with_ref(mut self, kind: EntityKind, id: i64) -> Self {
        if let Some(slot) = self.reference_mut(kind) {
            *slot = Some(id);
        }
        self
    }

    /// Key referencing an ancestor of the given kind, if set.
    pub fn reference(&self, kind: EntityKind) -> Option<i64> {
        match kind {
            EntityKind::Uf => self.id_uf,
            EntityKind::Mesorregiao => self.id_mesorregiao,
            EntityKind::Microrregiao => self.id_microrregiao,
            EntityKind::Municipio => self.id_municipio,
            EntityKind::Distrito => self.id_distrito,
            EntityKind::Subdistrito => None,
        }
    }

    fn reference_mut(&mut self, kind: EntityKind) -> Option<&mut Option<i64>> {
        match kind {
            EntityKind::Uf => Some(&mut self.id_uf),
            EntityKind::Mesorregiao => Some(&mut self.id_mesorregiao),
            EntityKind::Microrregiao => Some(&mut self.id_microrregiao),
            EntityKind::Municipio => Some(&mut self.id_municipio),
            EntityKind::Distrito => Some(&mut self.id_distrito),
            EntityKind::Subdistrito => None,
        }
    }
}

/// A row viewed through its kind's schema.
#[derive(Debug, Clone, Copy)]
pub struct Entity<'a> {
    kind: EntityKind,
    row: &'a Division,
}

impl<'a> Entity<'a> {
    pub fn new(kind: EntityKind, row: &'a Division) -> Self {
        Self { kind, row }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn row(&self) -> &'a Division {
        self.row
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn table(&self) -> &'static str {
        self.kind.table_name()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> {
        self.kind.column_names()
    }

    /// Field values in column order.
    ///
    /// A foreign key that is unset on the row is left out.
    pub fn data(&self) -> Vec<(&'static str, Value)> {
        self.kind
            .columns()
            .iter()
            .filter_map(|column| {
                let value = match column.role {
                    ColumnRole::PrimaryKey => Value::Int(self.row.id),
                    ColumnRole::ForeignKey(target) => Value::Int(self.row.reference(target)?),
                    ColumnRole::Name => Value::Text(self.row.nome.clone()),
                };
                Some((column.name, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_follows_column_order() {
        let row = Division::new(1101, "Madeira-Guaporé").with_ref(EntityKind::Uf, 11);
        let entity = Entity::new(EntityKind::Mesorregiao, &row);
        assert_eq!(entity.table(), "mesorregiao");
        assert_eq!(
            entity.data(),
            vec![
                ("id", Value::Int(1101)),
                ("id_uf", Value::Int(11)),
                ("nome", Value::from("Madeira-Guaporé")),
            ]
        );
    }

    #[test]
    fn extra_references_are_ignored() {
        let row = Division::new(11, "Rondônia").with_ref(EntityKind::Mesorregiao, 1);
        let entity = Entity::new(EntityKind::Uf, &row);
        assert_eq!(entity.data().len(), 2);
        assert_eq!(entity.columns().collect::<Vec<_>>(), ["id", "nome"]);
    }

    #[test]
    fn json_shape() {
        let row = Division::new(110001, "Alta Floresta D'Oeste")
            .with_ref(EntityKind::Microrregiao, 11006)
            .with_ref(EntityKind::Mesorregiao, 1102)
            .with_ref(EntityKind::Uf, 11);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id_uf"], 11);
        assert!(json.get("id_distrito").is_none());

        let back: Division = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }
}
