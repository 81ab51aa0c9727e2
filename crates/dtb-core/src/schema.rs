//! Entity schema: the six territorial division kinds, their columns, and the
//! foreign-key edges between them.
//!
//! Kinds are declared in dependency order. Any operation that must respect
//! referential order (relational export, integrity checks) iterates
//! [`EntityKind::ALL`] front to back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One level of the territorial hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// State.
    Uf,
    Mesorregiao,
    Microrregiao,
    /// Municipality.
    Municipio,
    /// District.
    Distrito,
    /// Subdistrict.
    Subdistrito,
}

/// SQL-level column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    SmallInt,
    Integer,
    BigInt,
    Varchar(usize),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::SmallInt => write!(f, "SMALLINT"),
            ColumnType::Integer => write!(f, "INTEGER"),
            ColumnType::BigInt => write!(f, "BIGINT"),
            ColumnType::Varchar(len) => write!(f, "VARCHAR({len})"),
        }
    }
}

/// What a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    PrimaryKey,
    /// Reference to the primary key of another kind.
    ForeignKey(EntityKind),
    Name,
}

/// A column declaration. Every column is NOT NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub role: ColumnRole,
    pub indexed: bool,
}

impl Column {
    const fn primary_key(ty: ColumnType) -> Self {
        Self {
            name: "id",
            ty,
            role: ColumnRole::PrimaryKey,
            indexed: false,
        }
    }

    const fn foreign_key(target: EntityKind) -> Self {
        Self {
            name: target.foreign_key_column(),
            ty: target.key_type(),
            role: ColumnRole::ForeignKey(target),
            indexed: true,
        }
    }

    const fn nome(len: usize) -> Self {
        Self {
            name: "nome",
            ty: ColumnType::Varchar(len),
            role: ColumnRole::Name,
            indexed: true,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.role == ColumnRole::PrimaryKey
    }
}

use EntityKind::*;

static UF_COLUMNS: [Column; 2] = [Column::primary_key(ColumnType::SmallInt), Column::nome(32)];

static MESORREGIAO_COLUMNS: [Column; 3] = [
    Column::primary_key(ColumnType::SmallInt),
    Column::foreign_key(Uf),
    Column::nome(64),
];

static MICRORREGIAO_COLUMNS: [Column; 4] = [
    Column::primary_key(ColumnType::Integer),
    Column::foreign_key(Mesorregiao),
    Column::foreign_key(Uf),
    Column::nome(64),
];

static MUNICIPIO_COLUMNS: [Column; 5] = [
    Column::primary_key(ColumnType::Integer),
    Column::foreign_key(Microrregiao),
    Column::foreign_key(Mesorregiao),
    Column::foreign_key(Uf),
    Column::nome(64),
];

static DISTRITO_COLUMNS: [Column; 6] = [
    Column::primary_key(ColumnType::Integer),
    Column::foreign_key(Municipio),
    Column::foreign_key(Microrregiao),
    Column::foreign_key(Mesorregiao),
    Column::foreign_key(Uf),
    Column::nome(64),
];

static SUBDISTRITO_COLUMNS: [Column; 7] = [
    Column::primary_key(ColumnType::BigInt),
    Column::foreign_key(Distrito),
    Column::foreign_key(Municipio),
    Column::foreign_key(Microrregiao),
    Column::foreign_key(Mesorregiao),
    Column::foreign_key(Uf),
    Column::nome(64),
];

impl EntityKind {
    /// All kinds, parents before children.
    pub const ALL: [EntityKind; 6] = [Uf, Mesorregiao, Microrregiao, Municipio, Distrito, Subdistrito];

    /// Table name.
    pub const fn table_name(self) -> &'static str {
        match self {
            Uf => "uf",
            Mesorregiao => "mesorregiao",
            Microrregiao => "microrregiao",
            Municipio => "municipio",
            Distrito => "distrito",
            Subdistrito => "subdistrito",
        }
    }

    /// Name of the column other tables use to reference this kind.
    pub const fn foreign_key_column(self) -> &'static str {
        match self {
            Uf => "id_uf",
            Mesorregiao => "id_mesorregiao",
            Microrregiao => "id_microrregiao",
            Municipio => "id_municipio",
            Distrito => "id_distrito",
            Subdistrito => "id_subdistrito",
        }
    }

    /// Type of this kind's primary key.
    pub const fn key_type(self) -> ColumnType {
        match self {
            Uf | Mesorregiao => ColumnType::SmallInt,
            Microrregiao | Municipio | Distrito => ColumnType::Integer,
            Subdistrito => ColumnType::BigInt,
        }
    }

    /// Parse a kind from its table name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.table_name() == name)
    }

    /// Position in dependency order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Columns in declaration order.
    pub fn columns(self) -> &'static [Column] {
        match self {
            Uf => &UF_COLUMNS,
            Mesorregiao => &MESORREGIAO_COLUMNS,
            Microrregiao => &MICRORREGIAO_COLUMNS,
            Municipio => &MUNICIPIO_COLUMNS,
            Distrito => &DISTRITO_COLUMNS,
            Subdistrito => &SUBDISTRITO_COLUMNS,
        }
    }

    pub fn column_names(self) -> impl Iterator<Item = &'static str> {
        self.columns().iter().map(|c| c.name)
    }

    /// Immediate parent kind, `None` for states.
    pub fn parent(self) -> Option<EntityKind> {
        self.ancestors().first().copied()
    }

    /// Every kind this one references, nearest parent first.
    pub fn ancestors(self) -> &'static [EntityKind] {
        static CHAIN: [EntityKind; 5] = [Distrito, Municipio, Microrregiao, Mesorregiao, Uf];
        &CHAIN[CHAIN.len() - self.index()..]
    }

    /// Foreign-key columns with their target kind, in declaration order.
    pub fn foreign_keys(self) -> impl Iterator<Item = (&'static Column, EntityKind)> {
        self.columns().iter().filter_map(|c| match c.role {
            ColumnRole::ForeignKey(target) => Some((c, target)),
            _ => None,
        })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
