mod common;
use common::{setup_test_db, temp_out};
use std::fs;
use std::io::Read;
use teamclock::core::backup::BackupLogic;
use teamclock::core::entities::EntityLogic;
use teamclock::db::pool::DbPool;

fn seeded_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    let mut pool = DbPool::open_initialized(&db_path).unwrap();
    EntityLogic::add_user(&mut pool, "acme", "alice").unwrap();
    db_path
}

fn single_entry(zip_path: &str) -> (String, Vec<u8>) {
    let mut archive = zip::ZipArchive::new(fs::File::open(zip_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);

    let mut entry = archive.by_index(0).unwrap();
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    (entry.name().to_string(), bytes)
}

#[test]
fn test_compressed_backup_to_zip_destination_holds_database() {
    let db_path = seeded_db("bk_zip_dest");
    let out = temp_out("bk_zip_dest", "zip");
    let original = fs::read(&db_path).unwrap();

    let written = BackupLogic::backup(&db_path, &out, true, true).unwrap();
    assert_eq!(written.to_string_lossy(), out);

    let (name, bytes) = single_entry(&out);
    assert_eq!(name, "bk_zip_dest_teamclock.sqlite");
    assert_eq!(bytes, original);

    assert!(fs::metadata(format!("{}.tmp", out)).is_err());
}

#[test]
fn test_compressed_backup_replaces_plain_copy() {
    let db_path = seeded_db("bk_plain_dest");
    let out = temp_out("bk_plain_dest", "sqlite");
    let zip = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();
    let original = fs::read(&db_path).unwrap();

    BackupLogic::backup(&db_path, &out, true, true).unwrap();

    let (_, bytes) = single_entry(&zip);
    assert_eq!(bytes, original);
    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_plain_backup_copies_database() {
    let db_path = seeded_db("bk_copy");
    let out = temp_out("bk_copy", "sqlite");
    let original = fs::read(&db_path).unwrap();

    BackupLogic::backup(&db_path, &out, false, true).unwrap();

    assert_eq!(fs::read(&out).unwrap(), original);
}
