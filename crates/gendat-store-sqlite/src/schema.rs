//! SQL schema for the GenDat SQLite store.
//!
//! Applied on every open; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
//! Official source tables are loaded from the provincial datasets and are
//! never written by the application.

use crate::pgv::PgvTables;

/// Vital-statistics and place-name tables.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Official source records (read-only). Searched text columns compare
-- without regard to case, for `=` as well as LIKE.
CREATE TABLE IF NOT EXISTS ns_births (
    BirthID   INTEGER PRIMARY KEY,
    FirstName TEXT COLLATE NOCASE,
    LastName  TEXT COLLATE NOCASE,
    Day       INTEGER,
    Month     INTEGER,
    Year      INTEGER,
    Place     TEXT COLLATE NOCASE,
    County    TEXT COLLATE NOCASE,
    RegBook   TEXT,
    RegPage   TEXT
);

CREATE TABLE IF NOT EXISTS ns_deaths (
    Deathid   INTEGER PRIMARY KEY,
    FirstName TEXT COLLATE NOCASE,
    LastName  TEXT COLLATE NOCASE,
    Day       INTEGER,
    Month     INTEGER,
    Year      INTEGER,
    Place     TEXT COLLATE NOCASE,
    County    TEXT COLLATE NOCASE,
    RegBook   TEXT,
    RegPage   TEXT
);

CREATE TABLE IF NOT EXISTS ns_marriages (
    MarriageID     INTEGER PRIMARY KEY,
    GroomFirstName TEXT COLLATE NOCASE,
    GroomLastName  TEXT COLLATE NOCASE,
    BrideFirstName TEXT COLLATE NOCASE,
    BrideLastName  TEXT COLLATE NOCASE,
    Day            INTEGER,
    Month          INTEGER,
    Year           INTEGER,
    Place          TEXT COLLATE NOCASE,
    County         TEXT COLLATE NOCASE,
    RegBook        TEXT,
    RegPage        TEXT
);

CREATE INDEX IF NOT EXISTS ns_births_name_idx ON ns_births(LastName, FirstName);

-- Overlay records: one row per transcribed source record, same key.
CREATE TABLE IF NOT EXISTS ns_births_data (
    BirthID          INTEGER PRIMARY KEY,
    name             TEXT,
    birth_date       TEXT,
    birth_place      TEXT,
    father           TEXT,
    mother           TEXT,
    father_residence TEXT,
    marriage_date    TEXT,
    marriage_place   TEXT,
    notes            TEXT,
    n_id             TEXT,
    n_id_f           TEXT,
    n_id_m           TEXT
);

CREATE TABLE IF NOT EXISTS ns_deaths_data (
    Deathid           INTEGER PRIMARY KEY,
    name              TEXT,
    death_date        TEXT,
    death_place       TEXT,
    death_age         TEXT,
    death_residence   TEXT,
    birth_date        TEXT,
    birth_place       TEXT,
    mar_status        TEXT,
    spouse            TEXT,
    father            TEXT,
    father_birthplace TEXT,
    mother            TEXT,
    mother_birthplace TEXT,
    informant         TEXT,
    notes             TEXT,
    n_id              TEXT
);

CREATE TABLE IF NOT EXISTS ns_marriages_data (
    MarriageID              INTEGER PRIMARY KEY,
    groom                   TEXT,
    groom_age               TEXT,
    groom_status            TEXT,
    groom_residence         TEXT,
    groom_birthplace        TEXT,
    groom_occupation        TEXT,
    groom_father            TEXT,
    groom_father_birthplace TEXT,
    groom_mother            TEXT,
    groom_mother_birthplace TEXT,
    bride                   TEXT,
    bride_age               TEXT,
    bride_status            TEXT,
    bride_residence         TEXT,
    bride_birthplace        TEXT,
    bride_occupation        TEXT,
    bride_father            TEXT,
    bride_father_birthplace TEXT,
    bride_mother            TEXT,
    bride_mother_birthplace TEXT,
    date                    TEXT,
    place                   TEXT,
    notes                   TEXT,
    n_id_g                  TEXT,
    n_id_b                  TEXT
);

-- Nova Scotia geoNAMES place-name dataset.
CREATE TABLE IF NOT EXISTS ns_geonames (
    OBJECTID   INTEGER PRIMARY KEY,
    GEONAME    TEXT COLLATE NOCASE,
    CGNDB_KEY  TEXT,
    LOCN_NARR  TEXT COLLATE NOCASE,
    GENERIC_CD TEXT,
    GENERIC_TM TEXT,
    CONCISE_DS TEXT,
    ADMIN_LOC  TEXT,
    COUNTY     TEXT COLLATE NOCASE,
    STATUS_DS  TEXT,
    NTS_MAP    TEXT,
    JURR_NARR  TEXT,
    ORIG_NARR  TEXT,
    NAD83_LAT  REAL,
    NAD83_LON  REAL
);

CREATE INDEX IF NOT EXISTS ns_geonames_name_idx ON ns_geonames(GEONAME);
";

/// Genealogy (PhpGedView) tables, addressed through `tables` so they land in
/// the attached database and carry the installation's prefix.
pub fn genealogy_schema(tables: &PgvTables) -> String {
  format!(
    "
CREATE TABLE IF NOT EXISTS {name} (
    n_id   TEXT NOT NULL,
    n_list TEXT
);

CREATE TABLE IF NOT EXISTS {individuals} (
    i_id     TEXT PRIMARY KEY,
    i_gedcom TEXT
);

CREATE TABLE IF NOT EXISTS {families} (
    f_id   TEXT PRIMARY KEY,
    f_husb TEXT,
    f_wife TEXT
);

CREATE TABLE IF NOT EXISTS {births_1} (i_id TEXT NOT NULL, DoB TEXT);
CREATE TABLE IF NOT EXISTS {births_2} (i_id TEXT NOT NULL, PoB TEXT);
CREATE TABLE IF NOT EXISTS {deaths_1} (i_id TEXT NOT NULL, DoD TEXT);
CREATE TABLE IF NOT EXISTS {deaths_2} (i_id TEXT NOT NULL, PoD TEXT);

CREATE TABLE IF NOT EXISTS {parents} (
    i_id   TEXT NOT NULL,
    father TEXT,
    mother TEXT
);
",
    name = tables.names(),
    individuals = tables.individuals(),
    families = tables.families(),
    births_1 = tables.table("births_1"),
    births_2 = tables.table("births_2"),
    deaths_1 = tables.table("deaths_1"),
    deaths_2 = tables.table("deaths_2"),
    parents = tables.table("parents"),
  )
}
