//! Territorial data tree container.
//!
//! Holds one ordered table of rows per entity kind. The tree is filled once
//! (by a parser or by direct inserts) and then read by the serializer and
//! encoders.

use std::collections::HashMap;

use tracing::debug;

use crate::dict::{Dataset, RowData, RowKey, TableData, ToDictOptions};
use crate::division::{Division, Entity};
use crate::error::{DataError, Result};
use crate::parse::DatasetParser;
use crate::schema::EntityKind;

/// Rows of one kind with a primary-key index.
#[derive(Debug, Clone, Default)]
struct DivisionTable {
    rows: Vec<Division>,
    index: HashMap<i64, usize>,
}

impl DivisionTable {
    fn get(&self, id: i64) -> Option<&Division> {
        self.index.get(&id).map(|&pos| &self.rows[pos])
    }
}

/// The whole territorial dataset.
#[derive(Debug, Clone)]
pub struct TerritorialData {
    name: String,
    raw: Option<Vec<u8>>,
    tables: [DivisionTable; 6],
}

impl TerritorialData {
    /// Create an empty dataset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: None,
            tables: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store raw source bytes for a later [`parse`](Self::parse).
    pub fn load(&mut self, raw: impl Into<Vec<u8>>) {
        self.raw = Some(raw.into());
    }

    /// Bytes from the last [`load`](Self::load), if any.
    pub fn raw(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    /// Replace all tables with what `parser` reads from the loaded bytes.
    ///
    /// Rows go through [`insert`](Self::insert), so duplicate keys and
    /// missing ancestor keys fail the parse. On error the tree is unchanged.
    pub fn parse(&mut self, parser: &dyn DatasetParser) -> Result<()> {
        let raw = self.raw().ok_or(DataError::NotLoaded)?;
        let parsed = parser.parse(raw)?;

        let mut fresh = TerritorialData::new(self.name.clone());
        for (kind, rows) in parsed {
            for row in rows {
                fresh.insert(kind, row)?;
            }
        }
        debug!(parser = parser.name(), rows = fresh.total_rows(), "parsed territorial data");

        self.tables = fresh.tables;
        Ok(())
    }

    /// Append a row to the table of `kind`.
    pub fn insert(&mut self, kind: EntityKind, row: Division) -> Result<()> {
        let table_name = kind.table_name();
        for &ancestor in kind.ancestors() {
            if row.reference(ancestor).is_none() {
                return Err(DataError::MissingColumn {
                    table: table_name,
                    id: row.id,
                    column: ancestor.foreign_key_column(),
                });
            }
        }

        let table = &mut self.tables[kind.index()];
        if table.index.contains_key(&row.id) {
            return Err(DataError::DuplicateKey {
                table: table_name,
                id: row.id,
            });
        }
        table.index.insert(row.id, table.rows.len());
        table.rows.push(row);
        Ok(())
    }

    /// Rows of `kind` in insertion order.
    pub fn rows(&self, kind: EntityKind) -> &[Division] {
        &self.tables[kind.index()].rows
    }

    pub fn get(&self, kind: EntityKind, id: i64) -> Option<&Division> {
        self.tables[kind.index()].get(id)
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.tables[kind.index()].rows.len()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }

    /// Schema-aware views over the rows of `kind`.
    pub fn entities(&self, kind: EntityKind) -> impl Iterator<Item = Entity<'_>> {
        self.rows(kind).iter().map(move |row| Entity::new(kind, row))
    }

    /// Build the normalized table → row key → field map structure.
    ///
    /// Tables without rows are skipped.
    pub fn to_dict(&self, options: ToDictOptions) -> Dataset {
        let mut tables = Vec::new();
        for kind in EntityKind::ALL {
            if self.len(kind) == 0 {
                debug!(table = kind.table_name(), "skipping empty table");
                continue;
            }

            let columns: Vec<&'static str> = kind
                .columns()
                .iter()
                .filter(|c| options.include_key || !c.is_primary_key())
                .map(|c| c.name)
                .collect();

            let rows = self
                .entities(kind)
                .map(|entity| {
                    let key = if options.string_keys {
                        RowKey::Text(entity.id().to_string())
                    } else {
                        RowKey::Int(entity.id())
                    };
                    let fields = entity
                        .data()
                        .into_iter()
                        .filter(|(name, _)| options.include_key || *name != "id")
                        .map(|(name, value)| {
                            if options.force_text {
                                (name, value.into_text())
                            } else {
                                (name, value)
                            }
                        })
                        .collect();
                    RowData::new(key, fields)
                })
                .collect();

            tables.push(TableData::new(kind, columns, rows));
        }
        Dataset::new(tables)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::value::Value;
    use proptest::prelude::*;

    /// Rondônia down to one subdistrict.
    pub(crate) fn sample() -> TerritorialData {
        let mut data = TerritorialData::new("dtb_2013");
        data.insert(EntityKind::Uf, Division::new(11, "Rondônia")).unwrap();
        data.insert(EntityKind::Uf, Division::new(12, "Acre")).unwrap();
        data.insert(
            EntityKind::Mesorregiao,
            Division::new(1102, "Leste Rondoniense").with_ref(EntityKind::Uf, 11),
        )
        .unwrap();
        data.insert(
            EntityKind::Microrregiao,
            Division::new(11006, "Cacoal")
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        )
        .unwrap();
        data.insert(
            EntityKind::Municipio,
            Division::new(1100015, "Alta Floresta D'Oeste")
                .with_ref(EntityKind::Microrregiao, 11006)
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        )
        .unwrap();
        data.insert(
            EntityKind::Distrito,
            Division::new(110001505, "Alta Floresta D'Oeste")
                .with_ref(EntityKind::Municipio, 1100015)
                .with_ref(EntityKind::Microrregiao, 11006)
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        )
        .unwrap();
        data.insert(
            EntityKind::Subdistrito,
            Division::new(11000150500, "Alta Floresta D'Oeste")
                .with_ref(EntityKind::Distrito, 110001505)
                .with_ref(EntityKind::Municipio, 1100015)
                .with_ref(EntityKind::Microrregiao, 11006)
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        )
        .unwrap();
        data
    }

    #[test]
    fn counts_per_kind() {
        let data = sample();
        assert_eq!(data.len(EntityKind::Uf), 2);
        assert_eq!(data.len(EntityKind::Subdistrito), 1);
        assert_eq!(data.total_rows(), 7);
        assert!(!data.is_empty());
        assert_eq!(data.get(EntityKind::Uf, 12).unwrap().nome, "Acre");
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut data = sample();
        let err = data
            .insert(EntityKind::Uf, Division::new(11, "Rondônia again"))
            .unwrap_err();
        assert_eq!(err, DataError::DuplicateKey { table: "uf", id: 11 });
        assert_eq!(data.len(EntityKind::Uf), 2);
    }

    #[test]
    fn same_id_in_different_tables_is_fine() {
        let mut data = TerritorialData::new("t");
        data.insert(EntityKind::Uf, Division::new(11, "Rondônia")).unwrap();
        data.insert(
            EntityKind::Mesorregiao,
            Division::new(11, "Odd").with_ref(EntityKind::Uf, 11),
        )
        .unwrap();
        assert_eq!(data.total_rows(), 2);
    }

    #[test]
    fn missing_ancestor_key_rejected() {
        let mut data = TerritorialData::new("t");
        let err = data
            .insert(
                EntityKind::Microrregiao,
                Division::new(11001, "Porto Velho").with_ref(EntityKind::Mesorregiao, 1101),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DataError::MissingColumn {
                table: "microrregiao",
                id: 11001,
                column: "id_uf"
            }
        );
    }

    #[test]
    fn to_dict_default_drops_key() {
        let dict = sample().to_dict(ToDictOptions::default());
        let uf = dict.table(EntityKind::Uf).unwrap();
        assert_eq!(uf.columns(), &["nome"]);
        let row = &uf.rows()[0];
        assert_eq!(row.key(), &RowKey::Int(11));
        assert_eq!(row.fields(), &[("nome", Value::from("Rondônia"))]);
    }

    #[test]
    fn to_dict_string_keys_and_text() {
        let dict = sample().to_dict(ToDictOptions {
            string_keys: true,
            force_text: true,
            include_key: true,
        });
        let meso = dict.table(EntityKind::Mesorregiao).unwrap();
        let row = &meso.rows()[0];
        assert_eq!(row.key(), &RowKey::Text("1102".into()));
        assert_eq!(row.get("id"), Some(&Value::from("1102")));
        assert_eq!(row.get("id_uf"), Some(&Value::from("11")));
        assert_eq!(meso.columns(), &["id", "id_uf", "nome"]);
    }

    #[test]
    fn to_dict_skips_empty_tables() {
        let mut data = TerritorialData::new("t");
        data.insert(EntityKind::Uf, Division::new(35, "São Paulo")).unwrap();
        let dict = data.to_dict(ToDictOptions::default());
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.tables()[0].name(), "uf");
    }

    #[test]
    fn parse_requires_loaded_bytes() {
        let mut data = TerritorialData::new("t");
        let err = data.parse(&crate::parse::JsonParser).unwrap_err();
        assert_eq!(err, DataError::NotLoaded);
    }

    proptest! {
        #[test]
        fn include_key_only_adds_the_key(
            ufs in proptest::collection::hash_set(1i64..100, 1..10),
            municipios in proptest::collection::hash_set(1_000_000i64..10_000_000, 0..40),
        ) {
            let mut data = TerritorialData::new("t");
            for id in &ufs {
                data.insert(EntityKind::Uf, Division::new(*id, format!("uf {id}"))).unwrap();
            }
            for id in &municipios {
                let municipio = Division::new(*id, format!("municipio {id}"))
                    .with_ref(EntityKind::Microrregiao, id / 100)
                    .with_ref(EntityKind::Mesorregiao, id / 1000)
                    .with_ref(EntityKind::Uf, id / 100_000);
                data.insert(EntityKind::Municipio, municipio).unwrap();
            }
            prop_assert_eq!(data.len(EntityKind::Uf), ufs.len());
            prop_assert_eq!(data.len(EntityKind::Municipio), municipios.len());

            let with = data.to_dict(ToDictOptions { include_key: true, ..Default::default() });
            let without = data.to_dict(ToDictOptions::default());
            prop_assert_eq!(with.total_rows(), without.total_rows());
            prop_assert_eq!(with.len(), if municipios.is_empty() { 1 } else { 2 });

            for (a, b) in with.tables().iter().zip(without.tables()) {
                for (full, stripped) in a.rows().iter().zip(b.rows()) {
                    prop_assert_eq!(full.key(), stripped.key());
                    prop_assert_eq!(full.get("id").map(Value::to_string), Some(full.key().to_string()));
                    prop_assert!(stripped.get("id").is_none());
                    let rest: Vec<_> = full.fields().iter().filter(|(name, _)| *name != "id").collect();
                    prop_assert_eq!(rest, stripped.fields().iter().collect::<Vec<_>>());
                }
            }
        }
    }
}
