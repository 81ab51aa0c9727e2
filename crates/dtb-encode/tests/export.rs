use std::collections::BTreeMap;

use dtb_core::{DataError, EntityKind, JsonParser, TerritorialData, Value};
use dtb_encode::{
    decode_records, export, EncodeContext, EncodeError, EncoderRegistry, ExportOptions, OutputTarget,
};

const SOURCE: &str = r#"{
    "uf": [
        {"id": 11, "nome": "Rondônia"},
        {"id": 12, "nome": "Acre"}
    ],
    "mesorregiao": [
        {"id": 1101, "id_uf": 11, "nome": "Madeira-Guaporé"},
        {"id": 1201, "id_uf": 12, "nome": "Vale do Juruá"}
    ],
    "microrregiao": [
        {"id": 11001, "id_mesorregiao": 1101, "id_uf": 11, "nome": "Porto Velho"}
    ],
    "municipio": [
        {"id": 1100205, "id_microrregiao": 11001, "id_mesorregiao": 1101, "id_uf": 11, "nome": "Porto Velho"}
    ]
}"#;

fn load(source: &str) -> TerritorialData {
    let mut data = TerritorialData::new("dtb");
    data.load(source.as_bytes());
    data.parse(&JsonParser).unwrap();
    data
}

fn encode(format: &str, data: &TerritorialData) -> Vec<u8> {
    let registry = EncoderRegistry::with_defaults();
    registry
        .get(format)
        .unwrap()
        .encode(data, &EncodeContext::default())
        .unwrap()
        .into_bytes()
}

#[test]
fn parsed_tree_keeps_every_row() {
    let data = load(SOURCE);
    assert_eq!(data.len(EntityKind::Uf), 2);
    assert_eq!(data.len(EntityKind::Mesorregiao), 2);
    assert_eq!(data.len(EntityKind::Distrito), 0);
    assert_eq!(data.total_rows(), 6);
    assert!(data.check_integrity().is_empty());
}

#[test]
fn msgpack_round_trip_matches_normalized_structure() {
    let data = load(SOURCE);
    let bytes = encode("msgpack", &data);

    let decoded: BTreeMap<String, BTreeMap<i64, BTreeMap<String, Value>>> =
        rmp_serde::from_slice(&bytes).unwrap();

    let expected = dtb_core::Serializer::new().with_include_key(true).serialize(&data);
    assert_eq!(decoded.len(), expected.len());
    for table in expected.tables() {
        let rows = &decoded[table.name()];
        assert_eq!(rows.len(), table.len());
        for row in table.rows() {
            let key: i64 = row.key().to_string().parse().unwrap();
            let fields = &rows[&key];
            assert_eq!(fields.len(), row.fields().len());
            for (column, value) in row.fields() {
                assert_eq!(&fields[*column], value);
            }
        }
    }
}

#[test]
fn xml_for_single_state_has_one_table() {
    let data = load(r#"{"uf": [{"id": 35, "nome": "São Paulo"}]}"#);
    let xml = String::from_utf8(encode("xml", &data)).unwrap();
    assert_eq!(xml.matches("<table ").count(), 1);
    assert!(xml.contains("<table name=\"uf\">"));
    assert!(!xml.contains("mesorregiao"));
}

#[test]
fn empty_tables_never_appear() {
    let data = load(SOURCE);
    for format in ["csv", "json", "sql", "tsv", "xml"] {
        let text = String::from_utf8(encode(format, &data)).unwrap();
        assert!(!text.contains("distrito"), "{format} mentions an empty table");
    }
}

#[test]
fn records_round_trip_through_file() {
    let data = load(SOURCE);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dtb.dtb");
    let options = ExportOptions {
        minified: false,
        output: OutputTarget::Path(path.clone()),
    };
    let summary = export(
        &EncoderRegistry::with_defaults(),
        &data,
        "records",
        "dtb",
        &options,
        &mut std::io::sink(),
    )
    .unwrap();
    assert!(summary.format.binary);

    let decoded = decode_records(&std::fs::read(&path).unwrap(), "dtb").unwrap();
    for kind in EntityKind::ALL {
        assert_eq!(decoded.rows(kind), data.rows(kind));
    }
}

#[test]
fn unsupported_format_performs_no_write() {
    let data = load(SOURCE);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dtb.out");
    let options = ExportOptions {
        minified: false,
        output: OutputTarget::Path(path.clone()),
    };
    let mut stdout: Vec<u8> = Vec::new();
    let err = export(
        &EncoderRegistry::with_defaults(),
        &data,
        "fictional-format",
        "dtb",
        &options,
        &mut stdout,
    )
    .unwrap_err();

    assert!(matches!(err, EncodeError::UnsupportedFormat { .. }));
    assert!(!path.exists());
    assert!(stdout.is_empty());
}

#[test]
fn contradictory_state_is_flagged() {
    let data = load(
        r#"{
        "uf": [{"id": 11, "nome": "Rondônia"}, {"id": 12, "nome": "Acre"}],
        "mesorregiao": [{"id": 1101, "id_uf": 11, "nome": "Madeira-Guaporé"}],
        "microrregiao": [{"id": 11001, "id_mesorregiao": 1101, "id_uf": 12, "nome": "Porto Velho"}]
    }"#,
    );
    let problems = data.check_integrity();
    assert_eq!(problems.len(), 1);
    assert!(matches!(
        problems[0],
        DataError::InconsistentReference {
            table: "microrregiao",
            column: "id_uf",
            expected: 11,
            found: 12,
            ..
        }
    ));
}
