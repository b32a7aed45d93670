use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_minor_units, null_as_default};

/// Price breakdown for a ticket tier, in minor currency units (pence, cents).
///
/// Amounts may arrive as floats or numeric strings; they are rounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TicketPrice {
    #[serde(default, deserialize_with = "deserialize_minor_units")]
    pub total: i64,
    #[serde(default, deserialize_with = "deserialize_minor_units")]
    pub fees: i64,
    #[serde(default, deserialize_with = "deserialize_minor_units")]
    pub face_value: i64,
}

/// A purchasable ticket tier for an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketType {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: TicketPrice,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sold_out: bool,
}

/// One performer slot in an event lineup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineupItem {
    /// Performer label as shown on the listing
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
    /// Stage time, free-form ("20:00", "8:30 PM"); empty when unannounced
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VenueCity {
    #[serde(default)]
    pub code: Option<String>,
    /// ISO-3166 alpha-3 country code, drives currency resolution
    #[serde(default)]
    pub country_alpha3: Option<String>,
    #[serde(default)]
    pub country_id: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Structured venue reference attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Venue {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub city: Option<VenueCity>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EventImages {
    #[serde(default)]
    pub square: Option<String>,
    #[serde(default)]
    pub landscape: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artist {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Base price as sent by the API: either a JSON number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

/// A single listed event.
///
/// Events are immutable once received and are shared between the page that
/// fetched them and the accumulated result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Start timestamp (RFC 3339)
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub event_images: Option<EventImages>,
    /// Venue display name
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub venues: Option<Vec<Venue>>,
    /// Track references; only their presence matters, so any shape is kept
    #[serde(default)]
    pub apple_music_tracks: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub spotify_tracks: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub sale_start_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<Artist>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub price: Option<PriceField>,
    #[serde(default)]
    pub lineup: Option<Vec<LineupItem>>,
    #[serde(default)]
    pub ticket_types: Option<Vec<TicketType>>,
}

impl Event {
    /// Create a bare event with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: None,
            event_images: None,
            venue: None,
            venues: None,
            apple_music_tracks: None,
            spotify_tracks: None,
            sale_start_date: None,
            description: None,
            artists: None,
            featured: None,
            price: None,
            lineup: None,
            ticket_types: None,
        }
    }

    /// First structured venue, if any.
    pub fn primary_venue(&self) -> Option<&Venue> {
        self.venues.as_ref().and_then(|v| v.first())
    }

    /// Country code of the primary venue's city.
    pub fn primary_country(&self) -> Option<&str> {
        self.primary_venue()
            .and_then(|v| v.city.as_ref())
            .and_then(|c| c.country_alpha3.as_deref())
    }

    /// City name of the primary venue.
    pub fn primary_city(&self) -> Option<&str> {
        self.primary_venue()
            .and_then(|v| v.city.as_ref())
            .and_then(|c| c.name.as_deref())
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// Whether the card has an expandable details section.
    pub fn has_details(&self) -> bool {
        self.description.is_some() || self.lineup.is_some() || self.ticket_types.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserialize_full() {
        let json = r#"{
            "id": "abc",
            "name": "Late Show",
            "date": "2025-12-31T20:00:00Z",
            "event_images": {"square": "https://img/sq.jpg", "landscape": "https://img/ls.jpg"},
            "venue": "Test Venue",
            "venues": [{
                "id": 7,
                "name": "Test Venue",
                "url": "https://venue",
                "city": {"code": "LON", "country_alpha3": "GBR", "country_id": "1",
                         "country_name": "United Kingdom", "id": "2", "name": "London"}
            }],
            "apple_music_tracks": [],
            "spotify_tracks": ["track-1"],
            "lineup": [{"details": "Artist 1", "time": "20:00"}],
            "ticket_types": [{"id": 1, "name": "GA",
                              "price": {"total": 2500, "fees": 250, "face_value": 2250},
                              "sold_out": false}],
            "featured": true,
            "price": 25
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "abc");
        assert_eq!(event.primary_country(), Some("GBR"));
        assert_eq!(event.primary_city(), Some("London"));
        assert_eq!(event.primary_venue().unwrap().id, "7");
        assert!(event.is_featured());
        assert_eq!(event.price, Some(PriceField::Number(25.0)));
        let tiers = event.ticket_types.as_ref().unwrap();
        assert_eq!(tiers[0].id, "1");
        assert_eq!(tiers[0].price.total, 2500);
    }

    #[test]
    fn test_event_deserialize_minimal() {
        let event: Event = serde_json::from_str(r#"{"id": 42, "name": "Bare"}"#).unwrap();
        assert_eq!(event.id, "42");
        assert!(event.date.is_none());
        assert!(!event.is_featured());
        assert!(!event.has_details());
        assert!(event.primary_country().is_none());
    }

    #[test]
    fn test_price_field_accepts_string() {
        let event: Event =
            serde_json::from_str(r#"{"id": "1", "name": "x", "price": "25.50"}"#).unwrap();
        assert_eq!(event.price, Some(PriceField::Text("25.50".to_string())));
    }

    #[test]
    fn test_lineup_time_optional() {
        let item: LineupItem = serde_json::from_str(r#"{"details": "Headliner"}"#).unwrap();
        assert_eq!(item.details, "Headliner");
        assert!(item.time.is_none());
    }

    #[test]
    fn test_event_tolerates_loose_shapes() {
        let json = r#"{
            "id": "odd",
            "name": null,
            "spotify_tracks": [{"uri": "spotify:track:1"}],
            "lineup": [{"details": null, "time": "20:00"}],
            "ticket_types": [{"id": "t", "name": null,
                              "price": {"total": 2500.0, "fees": "250"},
                              "sold_out": null}]
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.name, "");
        assert_eq!(event.spotify_tracks.as_ref().map(Vec::len), Some(1));
        assert_eq!(event.lineup.as_ref().unwrap()[0].details, "");
        let tier = &event.ticket_types.as_ref().unwrap()[0];
        assert_eq!(tier.price.total, 2500);
        assert_eq!(tier.price.fees, 250);
        assert_eq!(tier.price.face_value, 0);
        assert!(!tier.sold_out);
    }

    #[test]
    fn test_has_details_with_lineup_only() {
        let mut event = Event::new("1", "x");
        event.lineup = Some(vec![]);
        assert!(event.has_details());
    }
}
