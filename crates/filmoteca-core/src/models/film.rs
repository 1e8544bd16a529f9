use serde::{Deserialize, Serialize};

/// A catalog record as stored in the `films` table.
///
/// `id` and `created_at` are server-assigned and immutable. `genres_string`
/// is derived: it must always equal `genres_list.join(", ")`, or be null
/// when the list is empty. The write path recomputes it on every submit;
/// nothing else may set it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year_film: Option<String>,
    #[serde(default)]
    pub film_type: Vec<String>,
    #[serde(default)]
    pub cult_film: bool,
    #[serde(default)]
    pub cult_brand: Option<String>,
    #[serde(default)]
    pub genres_list: Vec<String>,
    #[serde(default)]
    pub genres_string: Option<String>,
    #[serde(default = "default_q_disks")]
    pub q_disks: i32,
    #[serde(default)]
    pub special_edittion: bool,
    #[serde(default)]
    pub is_premiere: bool,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub subs: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_q_disks() -> i32 {
    1
}

/// Write payload for a catalog record.
///
/// Every optional field serializes explicitly (as `null` when unset): the
/// remote store distinguishes "field not sent" from "field explicitly
/// nulled", and clearing a value requires the explicit null. `id` and
/// `created_at` are never part of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmPayload {
    pub title: String,
    pub year_film: Option<String>,
    pub film_type: Vec<String>,
    pub cult_film: bool,
    pub cult_brand: Option<String>,
    pub genres_list: Vec<String>,
    pub genres_string: Option<String>,
    pub q_disks: i32,
    pub special_edittion: bool,
    pub is_premiere: bool,
    pub poster_url: Option<String>,
    pub original_language: Option<String>,
    pub audio: Option<String>,
    pub subs: Option<String>,
}

/// Compute the derived display string for a genre list.
pub fn genres_string(genres_list: &[String]) -> Option<String> {
    if genres_list.is_empty() {
        None
    } else {
        Some(genres_list.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_string_joins_with_comma_space() {
        let list = vec!["Terror".to_string(), "Comedia".to_string()];
        assert_eq!(genres_string(&list), Some("Terror, Comedia".to_string()));
    }

    #[test]
    fn genres_string_is_none_for_empty_list() {
        assert_eq!(genres_string(&[]), None);
    }

    #[test]
    fn payload_serializes_unset_optionals_as_explicit_null() {
        let payload = FilmPayload {
            title: "Test Film".to_string(),
            year_film: None,
            film_type: vec![],
            cult_film: false,
            cult_brand: None,
            genres_list: vec![],
            genres_string: None,
            q_disks: 1,
            special_edittion: false,
            is_premiere: false,
            poster_url: None,
            original_language: None,
            audio: None,
            subs: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("poster_url").unwrap().is_null());
        assert!(value.get("cult_brand").unwrap().is_null());
        assert!(value.get("genres_string").unwrap().is_null());
        assert!(value.get("id").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn film_deserializes_with_missing_optionals() {
        let film: Film =
            serde_json::from_str(r#"{"id":"42","title":"Matrix","q_disks":2}"#).unwrap();
        assert_eq!(film.id, "42");
        assert_eq!(film.q_disks, 2);
        assert!(film.film_type.is_empty());
        assert!(film.poster_url.is_none());
    }
}
