//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashMap;

use gendat_core::{
  domain::RecordDomain,
  fields::FieldSet,
  person::{PersonFactsKind, PersonLink},
  search::Criteria,
  store::{RecordStore, SearchTarget},
};

use crate::{Error, SqliteStore, StoreOptions};

const PGV_URL: &str = "http://pgv.example/";

fn options(person_facts: PersonFactsKind) -> StoreOptions {
  StoreOptions {
    pgv_base_url: PGV_URL.into(),
    person_facts,
    ..StoreOptions::default()
  }
}

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory(options(PersonFactsKind::Gedcom))
    .await
    .expect("in-memory store")
}

async fn seed(s: &SqliteStore, sql: &'static str) {
  s.conn
    .call(move |conn| Ok(conn.execute_batch(sql)?))
    .await
    .expect("seed data");
}

const SOURCE_RECORDS: &str = "
INSERT INTO ns_births (BirthID, FirstName, LastName, Day, Month, Year, Place, County)
VALUES (98,  'Mary', 'Smith', 3, 5, 1901, 'Truro', 'Colchester'),
       (100, 'John', 'Smith', NULL, NULL, 1899, NULL, 'Colchester'),
       (105, 'Ann',  'Hiltz', 1, 1, 1900, 'Mahone Bay', 'Lunenburg'),
       (110, 'Ann',  'Brown', NULL, NULL, 1902, 'Truro', 'Colchester');
INSERT INTO ns_deaths (Deathid, FirstName, LastName, Year, County)
VALUES (7, 'Adam', 'Smith', 1950, 'Halifax');
INSERT INTO ns_marriages (MarriageID, GroomFirstName, GroomLastName, BrideFirstName, BrideLastName, Year, County)
VALUES (3, 'John', 'Himmelman', 'Ann', 'Hiltz', 1870, 'Lunenburg');
";

fn birth_form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
  let mut form: HashMap<String, String> = RecordDomain::Birth
    .field_names()
    .into_iter()
    .map(|n| (n.to_string(), String::new()))
    .collect();
  for (k, v) in pairs {
    form.insert(k.to_string(), v.to_string());
  }
  form
}

// ─── Source records ──────────────────────────────────────────────────────────

#[tokio::test]
async fn source_record_found_and_missing() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  let row = s.source_record(RecordDomain::Birth, 98).await.unwrap().unwrap();
  assert_eq!(row.get("FirstName"), Some("Mary"));
  assert_eq!(row.get("Year"), Some("1901"));
  assert!(s.source_record(RecordDomain::Birth, 99).await.unwrap().is_none());
}

#[tokio::test]
async fn source_exists_per_domain() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  assert!(s.source_exists(RecordDomain::Death, 7).await.unwrap());
  assert!(!s.source_exists(RecordDomain::Death, 8).await.unwrap());
  assert!(s.source_exists(RecordDomain::Marriage, 3).await.unwrap());
}

#[tokio::test]
async fn next_record_id_is_smallest_greater_key() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  assert_eq!(s.next_record_id(RecordDomain::Birth, 100).await.unwrap(), Some(105));
  assert_eq!(s.next_record_id(RecordDomain::Birth, 99).await.unwrap(), Some(100));
  assert_eq!(s.next_record_id(RecordDomain::Birth, 110).await.unwrap(), None);
}

// ─── Overlay records ─────────────────────────────────────────────────────────

#[tokio::test]
async fn overlay_absent_until_saved() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;
  assert!(s.overlay(RecordDomain::Birth, 98).await.unwrap().is_none());
}

#[tokio::test]
async fn new_overlay_is_inserted_then_updated() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  let form = birth_form(&[("name", " Mary Smith "), ("n_id", "I1"), ("notes", "  ")]);
  let fields = FieldSet::from_form(RecordDomain::Birth, &form).unwrap();
  let affected = s.save_overlay(98, fields, true).await.unwrap();
  assert_eq!(affected, 1);

  let stored = s.overlay(RecordDomain::Birth, 98).await.unwrap().unwrap();
  assert_eq!(stored.get("name"), Some("Mary Smith"));
  assert_eq!(stored.get("n_id"), Some("I1"));
  // Blank input is stored as NULL, never as an empty string.
  assert_eq!(stored.get("notes"), None);
}

#[tokio::test]
async fn existing_overlay_is_updated_in_place() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  let first = FieldSet::from_form(RecordDomain::Birth, &birth_form(&[("name", "Mary")])).unwrap();
  s.save_overlay(98, first, true).await.unwrap();

  let second =
    FieldSet::from_form(RecordDomain::Birth, &birth_form(&[("mother", "Jane")])).unwrap();
  assert_eq!(s.save_overlay(98, second, false).await.unwrap(), 1);

  let stored = s.overlay(RecordDomain::Birth, 98).await.unwrap().unwrap();
  assert_eq!(stored.get("name"), None);
  assert_eq!(stored.get("mother"), Some("Jane"));
}

#[tokio::test]
async fn update_without_row_touches_nothing() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  let fields = FieldSet::from_form(RecordDomain::Birth, &birth_form(&[])).unwrap();
  assert_eq!(s.save_overlay(98, fields, false).await.unwrap(), 0);
  assert!(s.overlay(RecordDomain::Birth, 98).await.unwrap().is_none());
}

#[tokio::test]
async fn repeated_new_record_insert_is_fatal() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  let fields = FieldSet::empty(RecordDomain::Birth);
  s.save_overlay(98, fields.clone(), true).await.unwrap();
  let err = s.save_overlay(98, fields, true).await.unwrap_err();
  assert!(matches!(err, Error::Sqlite(_)), "got {err:?}");
}

#[tokio::test]
async fn list_joins_source_and_overlay_in_name_order() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  for (id, name) in [(98, "Mary"), (100, "John"), (105, "Ann")] {
    let form = birth_form(&[("name", name)]);
    let fields = FieldSet::from_form(RecordDomain::Birth, &form).unwrap();
    s.save_overlay(id, fields, true).await.unwrap();
  }

  let rows = s.list_records(RecordDomain::Birth).await.unwrap();
  let ids: Vec<_> = rows.iter().map(|r| r.text("BirthID").to_string()).collect();
  // Hiltz, then the Smiths by year.
  assert_eq!(ids, ["105", "100", "98"]);
  assert_eq!(rows[0].get("name"), Some("Ann"));
}

#[tokio::test]
async fn marriage_list_finds_family() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;
  seed(&s, "INSERT INTO pgv_families VALUES ('F1', 'I10', 'I11');").await;

  let mut form: HashMap<String, String> = RecordDomain::Marriage
    .field_names()
    .into_iter()
    .map(|n| (n.to_string(), String::new()))
    .collect();
  form.insert("n_id_g".into(), "I10".into());
  form.insert("n_id_b".into(), "I11".into());
  let fields = FieldSet::from_form(RecordDomain::Marriage, &form).unwrap();
  s.save_overlay(3, fields, true).await.unwrap();

  let rows = s.list_records(RecordDomain::Marriage).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].get("f_id"), Some("F1"));
  assert_eq!(rows[0].get("GroomLastName"), Some("Himmelman"));
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn birth_search_by_name() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  let mut criteria = Criteria::new();
  criteria.add("LastName", "Sm*").add("FirstName", "");
  let page = s.search(SearchTarget::Births, criteria, 100).await.unwrap();
  assert_eq!(page.row_count, 2);
  assert_eq!(page.total_matches, 2);
  assert!(!page.is_truncated());
}

#[tokio::test]
async fn truncated_search_reports_true_total() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;

  let mut criteria = Criteria::new();
  criteria.add("County", "Colchester");
  let page = s.search(SearchTarget::Births, criteria, 2).await.unwrap();
  assert_eq!(page.rows.len(), 2);
  assert_eq!(page.total_matches, 3);
  assert!(page.is_truncated());
}

#[tokio::test]
async fn place_search_and_detail() {
  let s = store().await;
  seed(
    &s,
    "INSERT INTO ns_geonames (OBJECTID, GEONAME, LOCN_NARR, COUNTY, NAD83_LAT, NAD83_LON)
     VALUES (1, 'Musquodoboit Harbour', 'on Highway 7', 'Halifax', 44.79, -63.15),
            (2, 'Truro', NULL, 'Colchester', 45.36, -63.28);",
  )
  .await;

  let mut criteria = Criteria::new();
  criteria.add("GEONAME", "musq*").add("COUNTY", "*Halifax*");
  let page = s.search(SearchTarget::Places, criteria, 20).await.unwrap();
  assert_eq!(page.row_count, 1);
  assert_eq!(page.rows[0].get("OBJECTID"), Some("1"));

  let place = s.place(2).await.unwrap().unwrap();
  assert_eq!(place.get("GEONAME"), Some("Truro"));
  assert_eq!(place.get("NAD83_LAT"), Some("45.36"));
  assert!(s.place(3).await.unwrap().is_none());
}

#[tokio::test]
async fn exact_match_ignores_case() {
  let s = store().await;
  seed(&s, SOURCE_RECORDS).await;
  seed(
    &s,
    "INSERT INTO ns_geonames (OBJECTID, GEONAME, COUNTY)
     VALUES (2, 'Truro', 'Colchester');",
  )
  .await;

  let mut criteria = Criteria::new();
  criteria.add("LastName", "smith").add("County", "colchester");
  let page = s.search(SearchTarget::Births, criteria, 100).await.unwrap();
  assert_eq!(page.row_count, 2);
  assert_eq!(page.total_matches, 2);

  let mut criteria = Criteria::new();
  criteria.add("GEONAME", "truro");
  let page = s.search(SearchTarget::Places, criteria, 20).await.unwrap();
  assert_eq!(page.row_count, 1);
  assert_eq!(page.rows[0].get("GEONAME"), Some("Truro"));
}

// ─── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn gedcom_person_view() {
  let s = store().await;
  seed(
    &s,
    "INSERT INTO pgv_name VALUES ('I1', 'John /Smith/'), ('I2', '@N.N. /Smith/');
     INSERT INTO pgv_individuals VALUES ('I1',
       '0 @I1@ INDI\n1 BIRT\n2 DATE 1 JAN 1900\n1 DEAT\n2 PLAC Truro\n1 FAMC @F1@\n');
     INSERT INTO pgv_families VALUES ('F1', 'I2', 'I3');",
  )
  .await;

  let v = s.person_view("I1").await.unwrap();
  assert!(v.is_known());
  assert_eq!(v.birth_date.as_deref(), Some("1 JAN 1900"));
  assert_eq!(v.death_place.as_deref(), Some("Truro"));
  assert_eq!(v.death_date, None);
  assert_eq!(v.father.as_ref().map(PersonLink::text), Some("(unknown) /Smith/"));
  assert_eq!(v.mother, Some(PersonLink::bare("I3")));
}

#[tokio::test]
async fn structured_person_view() {
  let s = SqliteStore::open_in_memory(options(PersonFactsKind::Structured))
    .await
    .unwrap();
  seed(
    &s,
    "INSERT INTO pgv_name VALUES ('I1', 'John /Smith/');
     INSERT INTO births_2 VALUES ('I1', 'Halifax');",
  )
  .await;

  let v = s.person_view("I1").await.unwrap();
  assert_eq!(v.birth_place.as_deref(), Some("Halifax"));
  assert_eq!(v.birth_date, None);
  assert_eq!(v.father, None);
}

#[tokio::test]
async fn unknown_person_is_bare_id() {
  let s = store().await;
  let v = s.person_view("I404").await.unwrap();
  assert!(!v.is_known());
  assert_eq!(v.link.text(), "I404");
}

#[tokio::test]
async fn attached_genealogy_database() {
  let s = SqliteStore::open_in_memory(StoreOptions {
    pgv_database: Some(":memory:".into()),
    pgv_prefix: "gv_".into(),
    ..options(PersonFactsKind::Structured)
  })
  .await
  .unwrap();
  seed(&s, "INSERT INTO pgv.gv_pgv_name VALUES ('I1', 'John /Smith/');").await;

  let v = s.person_view("I1").await.unwrap();
  assert_eq!(
    v.link.url.as_deref(),
    Some("http://pgv.example/individual.php?pid=I1&ged=base.ged")
  );
}
