//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use gendat_core::{
  domain::RecordDomain,
  fields::FieldSet,
  person::{PersonFactsKind, PersonView},
  record::Row,
  search::Criteria,
  store::{RecordStore, SearchPage, SearchTarget},
};

use crate::{
  Error, Result,
  pgv::{GedcomBlob, PersonFactSource, PgvTables, StructuredTables, build_person_view},
  safe::{insert_row, next_key_after, row_exists, safe_select, select_rows, update_row},
  schema::{SCHEMA, genealogy_schema},
  search::WildcardSearch,
};

/// Schema name the genealogy database is attached under.
const PGV_SCHEMA: &str = "pgv";

const BIRTH_SEARCH: &str =
  "SELECT BirthID, LastName, FirstName, Year, Place, County FROM ns_births";

const PLACE_SEARCH: &str =
  "SELECT OBJECTID, GEONAME, LOCN_NARR, COUNTY FROM ns_geonames";

// ─── Options ─────────────────────────────────────────────────────────────────

/// How to reach the genealogy database.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
  /// Separate SQLite file holding the genealogy tables; `None` means they
  /// live in the main database.
  pub pgv_database: Option<PathBuf>,
  /// Table-name prefix of the PhpGedView installation.
  pub pgv_prefix:   String,
  /// Base URL of the PhpGedView web pages, ending in `/`.
  pub pgv_base_url: String,
  pub person_facts: PersonFactsKind,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A GenDat record store backed by one SQLite file, optionally with the
/// genealogy database attached.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  tables:          PgvTables,
  facts:           Arc<dyn PersonFactSource>,
  pgv_base_url:    Arc<str>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, options).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory(options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, options).await
  }

  async fn init(conn: tokio_rusqlite::Connection, options: StoreOptions) -> Result<Self> {
    let schema = options.pgv_database.as_ref().map(|_| PGV_SCHEMA);
    let facts: Arc<dyn PersonFactSource> = match options.person_facts {
      PersonFactsKind::Gedcom => Arc::new(GedcomBlob),
      PersonFactsKind::Structured => Arc::new(StructuredTables),
    };

    let store = Self {
      conn,
      tables: PgvTables::new(schema, &options.pgv_prefix),
      facts,
      pgv_base_url: options.pgv_base_url.into(),
    };
    store.init_schema(options.pgv_database).await?;
    Ok(store)
  }

  async fn init_schema(&self, pgv_database: Option<PathBuf>) -> Result<()> {
    let tables = self.tables.clone();
    self
      .run(move |conn| {
        if let Some(path) = pgv_database {
          let path = path.to_string_lossy().into_owned();
          tracing::debug!(%path, "attaching genealogy database");
          conn.execute(&format!("ATTACH DATABASE ?1 AS {PGV_SCHEMA}"), [path])?;
        }
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(&genealogy_schema(&tables))?;
        Ok(())
      })
      .await
  }

  /// Run `f` on the connection thread, carrying crate errors through
  /// [`tokio_rusqlite`] unchanged.
  async fn run<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R> + Send + 'static,
    R: Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        f(conn).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
      })
      .await
      .map_err(Error::from_call)
  }

  fn list_query(&self, domain: RecordDomain) -> String {
    match domain {
      RecordDomain::Birth | RecordDomain::Death => {
        let key = domain.key_field();
        format!(
          "SELECT a.*, b.name
           FROM {source} a
           JOIN {overlay} b USING ({key})
           ORDER BY a.LastName, a.Year, a.FirstName, a.{key}",
          source = domain.source_table(),
          overlay = domain.overlay_table(),
        )
      }
      RecordDomain::Marriage => format!(
        "SELECT a.*, b.groom, b.bride, b.n_id_g, b.n_id_b, c.f_id
         FROM ns_marriages a
         JOIN ns_marriages_data b USING (MarriageID)
         LEFT JOIN {families} c ON b.n_id_g = c.f_husb AND b.n_id_b = c.f_wife
         ORDER BY a.GroomLastName, a.Year, a.BrideLastName, a.MarriageID",
        families = self.tables.families(),
      ),
    }
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Official source records ─────────────────────────────────────────────

  async fn source_record(&self, domain: RecordDomain, id: i64) -> Result<Option<Row>> {
    self
      .run(move |conn| {
        let rows = select_rows(
          conn,
          domain.source_table(),
          &["*"],
          domain.key_field(),
          &id.to_string(),
        )?;
        Ok(rows.into_iter().next())
      })
      .await
  }

  async fn source_exists(&self, domain: RecordDomain, id: i64) -> Result<bool> {
    self
      .run(move |conn| {
        row_exists(conn, domain.source_table(), domain.key_field(), &id.to_string())
      })
      .await
  }

  async fn next_record_id(&self, domain: RecordDomain, id: i64) -> Result<Option<i64>> {
    let next = self
      .run(move |conn| {
        next_key_after(conn, domain.source_table(), domain.key_field(), &id.to_string())
      })
      .await?;

    next
      .map(|key| key.parse::<i64>().map_err(|_| Error::InvalidKey(key)))
      .transpose()
  }

  // ── Overlay records ─────────────────────────────────────────────────────

  async fn overlay(&self, domain: RecordDomain, id: i64) -> Result<Option<FieldSet>> {
    self
      .run(move |conn| {
        let rows = select_rows(
          conn,
          domain.overlay_table(),
          &domain.field_names(),
          domain.key_field(),
          &id.to_string(),
        )?;
        Ok(rows.first().map(|row| FieldSet::from_row(domain, row)))
      })
      .await
  }

  async fn save_overlay(&self, id: i64, fields: FieldSet, new_record: bool) -> Result<usize> {
    let domain = fields.domain();
    let affected = self
      .run(move |conn| {
        let key = id.to_string();
        if new_record {
          let key_value = [Some(key.as_str())];
          insert_row(conn, domain.overlay_table(), &[domain.key_field()], &key_value)?;
        }
        update_row(
          conn,
          domain.overlay_table(),
          &fields.names(),
          &fields.values(),
          domain.key_field(),
          &key,
        )
      })
      .await?;

    tracing::info!(domain = domain.slug(), id, new_record, affected, "saved overlay record");
    Ok(affected)
  }

  async fn list_records(&self, domain: RecordDomain) -> Result<Vec<Row>> {
    let query = self.list_query(domain);
    self.run(move |conn| safe_select(conn, &query, &[])).await
  }

  // ── Genealogy database ──────────────────────────────────────────────────

  async fn person_view<'a>(&'a self, person_id: &'a str) -> Result<PersonView> {
    let tables = self.tables.clone();
    let facts = Arc::clone(&self.facts);
    let base_url = Arc::clone(&self.pgv_base_url);
    let person_id = person_id.to_string();

    self
      .run(move |conn| {
        build_person_view(conn, &tables, facts.as_ref(), &base_url, &person_id)
      })
      .await
  }

  // ── Search and place names ──────────────────────────────────────────────

  async fn search(
    &self,
    target: SearchTarget,
    criteria: Criteria,
    max_rows: usize,
  ) -> Result<SearchPage> {
    let base_query = match target {
      SearchTarget::Births => BIRTH_SEARCH,
      SearchTarget::Places => PLACE_SEARCH,
    };

    self
      .run(move |conn| {
        let mut search = WildcardSearch::with_criteria(criteria);
        search.execute(conn, base_query, max_rows)?;
        let row_count = search.row_count();
        let total_matches = search.total_match_count(conn)?;
        let rows = std::iter::from_fn(|| search.fetch_row()).collect();
        search.close();
        Ok(SearchPage { rows, row_count, total_matches, max_rows })
      })
      .await
  }

  async fn place(&self, id: i64) -> Result<Option<Row>> {
    self
      .run(move |conn| {
        let rows = select_rows(conn, "ns_geonames", &["*"], "OBJECTID", &id.to_string())?;
        Ok(rows.into_iter().next())
      })
      .await
  }
}
