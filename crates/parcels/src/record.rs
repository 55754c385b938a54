//! The parcel record: the only entity the application knows about.
//!
//! Two shapes of the same row exist. [`NewParcel`] is what the entry form
//! submits (no id, no timestamp); [`ParcelRecord`] is what the store echoes
//! back once it has assigned both. Records are never updated or deleted.

use serde::{Deserialize, Deserializer, Serialize};

/// One vertex of a parcel outline, stored as a two-element numeric array.
///
/// The renderer reads it as screen `(x, y)`; the map overlay reads the same
/// pair as `(lng, lat)`.
pub type Coordinate = [f64; 2];

/// A parcel as submitted by the entry form, before the store has seen it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewParcel {
    pub ada_no: String,
    pub parsel_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub il: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ilce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mahalle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<Coordinate>>,
}

/// A persisted parcel row as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub ada_no: String,
    pub parsel_no: String,
    #[serde(default)]
    pub il: Option<String>,
    #[serde(default)]
    pub ilce: Option<String>,
    #[serde(default)]
    pub mahalle: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Vec<Coordinate>>,
    pub created_at: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ParcelRecord {
    /// Attach store-assigned identity to a submitted parcel.
    pub fn from_new(parcel: NewParcel, id: String, created_at: String) -> Self {
        Self {
            id,
            ada_no: parcel.ada_no,
            parsel_no: parcel.parsel_no,
            il: parcel.il,
            ilce: parcel.ilce,
            mahalle: parcel.mahalle,
            coordinates: parcel.coordinates,
            created_at,
            user_id: None,
        }
    }

    /// The outline vertices, empty when the row carries no geometry.
    pub fn geometry(&self) -> &[Coordinate] {
        self.coordinates.as_deref().unwrap_or(&[])
    }

    /// Card heading, e.g. `Ada: 123 / Parsel: 45`.
    pub fn title(&self) -> String {
        format!("Ada: {} / Parsel: {}", self.ada_no, self.parsel_no)
    }

    /// `il / ilce / mahalle`, skipping blanks. `None` unless `il` is set,
    /// since the district and neighborhood only make sense under a province.
    pub fn location_line(&self) -> Option<String> {
        let il = non_blank(&self.il)?;
        let mut line = il.to_string();
        for part in [non_blank(&self.ilce), non_blank(&self.mahalle)]
            .into_iter()
            .flatten()
        {
            line.push_str(" / ");
            line.push_str(part);
        }
        Some(line)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Row ids are uuids on some deployments and serial integers on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}
