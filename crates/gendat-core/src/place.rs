//! Nova Scotia place names (the provincial geoNAMES dataset).

use crate::record::Row;

/// County choices for the place-name search; index 0 means any county.
pub const COUNTIES: [&str; 19] = [
  "Any County",
  "Annapolis",
  "Antigonish",
  "Cape Breton",
  "Colchester",
  "Cumberland",
  "Digby",
  "Guysborough",
  "Halifax",
  "Hants",
  "Inverness",
  "Kings",
  "Lunenburg",
  "Pictou",
  "Queens",
  "Richmond",
  "Shelburne",
  "Victoria",
  "Yarmouth",
];

/// Search pattern for a county choice, or `None` for "any county".
///
/// The dataset's `COUNTY` column may list several counties, so the name is
/// matched anywhere in it.
pub fn county_pattern(index: usize) -> Option<String> {
  match index {
    0 => None,
    i => COUNTIES.get(i).map(|c| format!("*{c}*")),
  }
}

/// OpenStreetMap view centred on the place.
pub fn map_url(row: &Row) -> String {
  format!(
    "http://www.openstreetmap.org/?mlat={}&mlon={}&zoom=14",
    row.text("NAD83_LAT"),
    row.text("NAD83_LON"),
  )
}

/// Definition of the geographic feature type.
pub fn feature_type_url(row: &Row) -> String {
  format!(
    "http://geogratis.gc.ca/services/geoname/en/codes/generic/{}",
    row.text("GENERIC_CD"),
  )
}

/// The record in the Canadian Geographical Names Data Base.
pub fn cgndb_url(row: &Row) -> String {
  format!(
    "http://www4.rncan.gc.ca/search-place-names/unique?id={}",
    row.text("CGNDB_KEY"),
  )
}
