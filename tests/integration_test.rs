use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shimdb::database::HEADER_SIZE;
use shimdb::tag::catalog::*;
use shimdb::{tag_to_name, Database, SdbError, Tag, TagId};
use std::fs;
use tempfile::tempdir;

fn put_tag(bytes: &mut Vec<u8>, tag: Tag) {
    bytes.extend_from_slice(&tag.0.to_le_bytes());
}

fn put_u32(bytes: &mut Vec<u8>, value: u32) {
    bytes.extend_from_slice(&value.to_le_bytes());
}

/// Header `(2, 1, "sdbf")`, SIZE=5, FLAG_LUA=0xDEADBEEF, NAME -> "temp" and a
/// trailing string table holding "temp".
fn handcrafted_database() -> Vec<u8> {
    let text: Vec<u8> = "temp\0"
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();

    let mut bytes = Vec::new();
    put_u32(&mut bytes, 2);
    put_u32(&mut bytes, 1);
    bytes.extend_from_slice(b"sdbf");
    put_tag(&mut bytes, TAG_SIZE);
    put_u32(&mut bytes, 5);
    put_tag(&mut bytes, TAG_FLAG_LUA);
    bytes.extend_from_slice(&0xDEADBEEFu64.to_le_bytes());
    put_tag(&mut bytes, TAG_NAME);
    put_u32(&mut bytes, 6);
    put_tag(&mut bytes, TAG_STRINGTABLE);
    put_u32(&mut bytes, text.len() as u32 + 6);
    put_tag(&mut bytes, TAG_STRINGTABLE_ITEM);
    put_u32(&mut bytes, text.len() as u32);
    bytes.extend_from_slice(&text);
    bytes
}

#[test]
fn test_open_handcrafted_database() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("temp.sdb");
    fs::write(&db_path, handcrafted_database())?;

    let db = Database::open(&db_path)?;

    let tag_id = db.first_child(TagId::ROOT).unwrap();
    assert_eq!(tag_id, TagId(HEADER_SIZE));
    assert_eq!(db.tag_at(tag_id), TAG_SIZE);
    assert_eq!(tag_to_name(db.tag_at(tag_id)), "SIZE");
    assert_eq!(db.read_dword_tag(tag_id, 0), 5);

    let tag_id = db.next_child(TagId::ROOT, tag_id).unwrap();
    assert_eq!(tag_id, TagId(HEADER_SIZE + 6));
    assert_eq!(tag_to_name(db.tag_at(tag_id)), "FLAG_LUA");
    assert_eq!(db.read_qword_tag(tag_id, 0), 0xDEADBEEF);

    let tag_id = db.next_child(TagId::ROOT, tag_id).unwrap();
    assert_eq!(db.string_tag(tag_id).as_deref(), Some("temp"));

    let table = db.next_child(TagId::ROOT, tag_id).unwrap();
    assert_eq!(db.string_table(), Some(table));
    assert_eq!(db.next_child(TagId::ROOT, table), None);

    let item = db.first_child(table).unwrap();
    assert_eq!(db.string_tag(item).as_deref(), Some("temp"));

    let mut buffer = [0u16; 6];
    assert_eq!(db.read_string_tag(item, &mut buffer)?, 5);
    let mut small = [0u16; 3];
    assert!(matches!(
        db.read_string_tag(item, &mut small),
        Err(SdbError::BufferTooSmall { .. })
    ));

    assert_eq!(db.children(TagId::ROOT).count(), 4);
    Ok(())
}

#[test]
fn test_truncated_record_does_not_read_past_end() -> Result<()> {
    let mut bytes = handcrafted_database();
    bytes.truncate(bytes.len() - 4);
    let db = Database::from_bytes(&bytes)?;

    let table = db.string_table().unwrap();
    let item = db.first_child(table).unwrap();
    assert_eq!(db.string_tag(item), None);
    assert!(matches!(
        db.resolve_string(item),
        Err(SdbError::OutOfRange { .. })
    ));
    Ok(())
}

#[test]
fn test_write_flush_and_reopen() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("roundtrip.sdb");

    let mut db = Database::create(&db_path)?;
    let database = db.begin_list(TAG_DATABASE)?;
    db.write_interned_string_tag(TAG_NAME, "Test database")?;
    let exe = db.begin_list(TAG_EXE)?;
    db.write_interned_string_tag(TAG_NAME, "app.exe")?;
    db.write_dword_tag(TAG_SIZE, 4096)?;
    db.write_qword_tag(TAG_BIN_FILE_VERSION, 0x0001_0002_0003_0004)?;
    db.write_binary_tag(TAG_EXE_ID, &[0xAB; 16])?;
    db.write_string_tag(TAG_STRINGTABLE_ITEM, "inline")?;
    db.write_string_ref_tag(TAG_VENDOR, 1234)?;
    db.end_list(exe)?;
    db.end_list(database)?;
    db.close_and_flush()?;

    let db = Database::open(&db_path)?;
    let database = db.find_first_tag(TagId::ROOT, TAG_DATABASE).unwrap();
    let name = db.find_first_tag(database, TAG_NAME).unwrap();
    assert_eq!(db.string_tag(name).as_deref(), Some("Test database"));

    let exe = db.find_first_tag(database, TAG_EXE).unwrap();
    let values: Vec<_> = db.children(exe).collect();
    assert_eq!(values.len(), 6);
    assert_eq!(db.string_tag(values[0]).as_deref(), Some("app.exe"));
    assert_eq!(db.read_dword_tag(values[1], 0), 4096);
    assert_eq!(db.read_qword_tag(values[2], 0), 0x0001_0002_0003_0004);
    assert_eq!(db.binary_tag_data(values[3]), Some(&[0xAB; 16][..]));
    assert_eq!(db.string_tag(values[4]).as_deref(), Some("inline"));
    assert_eq!(db.read_string_ref_tag(values[5], 0), 1234);

    let root: Vec<_> = db.children(TagId::ROOT).collect();
    assert_eq!(root, vec![database, db.string_table().unwrap()]);
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Dword(u32),
    Qword(u64),
    Text(String),
    Binary(Vec<u8>),
    List(Vec<Value>),
}

/// ASCII, Latin-1, CJK and characters outside the BMP (surrogate pairs).
const TEXT_CHARS: &[char] = &['a', 'q', 'z', ' ', 'é', 'ß', '中', '語', '😀', '𝄞'];

fn random_values(rng: &mut StdRng, depth: usize) -> Vec<Value> {
    let count = rng.gen_range(0..6);
    (0..count)
        .map(|_| match rng.gen_range(0..5) {
            0 => Value::Dword(rng.gen()),
            1 => Value::Qword(rng.gen()),
            2 => {
                let len = rng.gen_range(0..12);
                Value::Text(
                    (0..len)
                        .map(|_| TEXT_CHARS[rng.gen_range(0..TEXT_CHARS.len())])
                        .collect(),
                )
            }
            3 => {
                let len = rng.gen_range(0..24);
                Value::Binary((0..len).map(|_| rng.gen()).collect())
            }
            _ if depth < 3 => Value::List(random_values(rng, depth + 1)),
            _ => Value::Dword(0),
        })
        .collect()
}

fn write_values(db: &mut Database, values: &[Value]) -> Result<()> {
    for value in values {
        match value {
            Value::Dword(v) => db.write_dword_tag(TAG_SIZE, *v)?,
            Value::Qword(v) => db.write_qword_tag(TAG_TIME, *v)?,
            Value::Text(v) => db.write_interned_string_tag(TAG_NAME, v)?,
            Value::Binary(v) => db.write_binary_tag(TAG_DATA_BITS, v)?,
            Value::List(children) => {
                let list = db.begin_list(TAG_DATA)?;
                write_values(db, children)?;
                db.end_list(list)?;
            }
        }
    }
    Ok(())
}

fn read_values(db: &Database, parent: TagId) -> Vec<Value> {
    db.children(parent)
        .filter(|&child| db.tag_at(child) != TAG_STRINGTABLE)
        .map(|child| match db.tag_at(child) {
            TAG_SIZE => Value::Dword(db.read_dword_tag(child, 0)),
            TAG_TIME => Value::Qword(db.read_qword_tag(child, 0)),
            TAG_NAME => Value::Text(db.string_tag(child).unwrap_or_default()),
            TAG_DATA_BITS => Value::Binary(db.binary_tag_data(child).unwrap_or_default().to_vec()),
            _ => Value::List(read_values(db, child)),
        })
        .collect()
}

#[test]
fn test_random_round_trip() -> Result<()> {
    let dir = tempdir()?;
    let mut rng = StdRng::seed_from_u64(0x5DB);

    for round in 0..20 {
        let values = random_values(&mut rng, 0);
        let db_path = dir.path().join(format!("random_{}.sdb", round));

        let mut db = Database::create(&db_path)?;
        write_values(&mut db, &values)?;
        db.close_and_flush()?;

        let db = Database::open(&db_path)?;
        assert_eq!(read_values(&db, TagId::ROOT), values, "round {}", round);
    }
    Ok(())
}

#[test]
fn test_find_matching_executable_on_disk() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("apps.sdb");
    let app_dir = dir.path().join("app");
    fs::create_dir(&app_dir)?;
    fs::write(app_dir.join("app.exe"), b"MZ")?;

    let mut db = Database::create(&db_path)?;
    let mut database = db.list(TAG_DATABASE)?;
    let mut exe = database.list(TAG_EXE)?;
    exe.write_interned_string_tag(TAG_NAME, "app.exe")?;
    let mut matching = exe.list(TAG_MATCHING_FILE)?;
    matching.write_interned_string_tag(TAG_NAME, "helper.dll")?;
    matching.finish()?;
    exe.finish()?;
    database.finish()?;
    db.close_and_flush()?;

    let db = Database::open(&db_path)?;
    let exe_path = app_dir.join("app.exe");
    assert!(matches!(
        db.find_matching_executable(&exe_path),
        Err(SdbError::NotFound(_))
    ));

    fs::write(app_dir.join("helper.dll"), b"MZ")?;
    let result = db.find_matching_executable(&exe_path)?;
    assert_eq!(db.tag_at(result.exe), TAG_EXE);
    assert_eq!(result.attributes.size, Some(2));
    Ok(())
}

#[test]
fn test_string_with_nul_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("nul.sdb");

    let mut db = Database::create(&db_path)?;
    assert!(matches!(
        db.write_string_tag(TAG_STRINGTABLE_ITEM, "a\0b"),
        Err(SdbError::Format(_))
    ));
    db.write_string_tag(TAG_STRINGTABLE_ITEM, "a")?;
    db.close_and_flush()?;

    let db = Database::open(&db_path)?;
    let item = db.first_child(TagId::ROOT).unwrap();
    assert_eq!(db.string_tag(item).as_deref(), Some("a"));
    assert_eq!(db.next_child(TagId::ROOT, item), None);
    Ok(())
}

#[test]
fn test_tag_to_name_is_total() {
    for raw in 0..=u16::MAX {
        let name = tag_to_name(Tag(raw));
        assert!(!name.is_empty());
    }
    assert_eq!(tag_to_name(Tag(0)), "NULL");
    assert_eq!(tag_to_name(Tag(0xFFFF)), "InvalidTag");
}
