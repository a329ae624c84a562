//! Id and timestamp helpers shared by the preset and history stores

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random suffix on generated ids
const ID_SUFFIX_LEN: usize = 9;

/// Current wall-clock time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Build an id of the form `<prefix>_<millis>_<random>`
///
/// The random part is lowercase alphanumeric, so generated ids never
/// collide with the fixed `default_*` preset ids.
pub fn generate_id(prefix: &str, at: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}_{}_{}", prefix, at.timestamp_millis(), suffix)
}
