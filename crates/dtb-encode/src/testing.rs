//! Fixtures shared by unit tests.

use dtb_core::{Division, EntityKind, TerritorialData};

/// Two states and one full chain down to a subdistrict.
pub(crate) fn sample() -> TerritorialData {
    let mut data = TerritorialData::new("dtb_2013");
    let rows = [
        (EntityKind::Uf, Division::new(11, "Rondônia")),
        (EntityKind::Uf, Division::new(12, "Acre")),
        (
            EntityKind::Mesorregiao,
            Division::new(1102, "Leste Rondoniense").with_ref(EntityKind::Uf, 11),
        ),
        (
            EntityKind::Microrregiao,
            Division::new(11006, "Cacoal")
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        ),
        (
            EntityKind::Municipio,
            Division::new(1100015, "Alta Floresta D'Oeste")
                .with_ref(EntityKind::Microrregiao, 11006)
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        ),
        (
            EntityKind::Distrito,
            Division::new(110001505, "Alta Floresta D'Oeste")
                .with_ref(EntityKind::Municipio, 1100015)
                .with_ref(EntityKind::Microrregiao, 11006)
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        ),
        (
            EntityKind::Subdistrito,
            Division::new(11000150500, "Alta Floresta D'Oeste")
                .with_ref(EntityKind::Distrito, 110001505)
                .with_ref(EntityKind::Municipio, 1100015)
                .with_ref(EntityKind::Microrregiao, 11006)
                .with_ref(EntityKind::Mesorregiao, 1102)
                .with_ref(EntityKind::Uf, 11),
        ),
    ];
    for (kind, row) in rows {
        data.insert(kind, row).unwrap();
    }
    data
}
