use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An activity is a planned event at a specific date and place.
///
/// Activities are identified by a client-generated UUID. Updates replace the
/// record wholesale; there is no partial-update representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: String,
    pub city: String,
    pub venue: String,
}

impl Activity {
    pub fn new(title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            description: String::new(),
            category: String::new(),
            city: String::new(),
            venue: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the city and venue for this activity.
    pub fn with_location(
        mut self,
        city: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        self.city = city.into();
        self.venue = venue.into();
        self
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        writeln!(f, "Id: {}", self.id)?;
        writeln!(f, "Date: {}", self.date.format("%Y-%m-%d %H:%M"))?;

        if !self.category.is_empty() {
            writeln!(f, "Category: {}", self.category)?;
        }
        if !self.city.is_empty() || !self.venue.is_empty() {
            writeln!(f, "Where: {} ({})", self.venue, self.city)?;
        }
        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_activity_new() {
        let activity = Activity::new("Pub quiz", sample_date());

        assert_eq!(activity.title, "Pub quiz");
        assert_eq!(activity.date, sample_date());
        assert!(activity.description.is_empty());
        assert!(activity.category.is_empty());
    }

    #[test]
    fn test_activity_builders() {
        let activity = Activity::new("Gallery opening", sample_date())
            .with_description("Modern art exhibition")
            .with_category("culture")
            .with_location("London", "Tate Modern");

        assert_eq!(activity.description, "Modern art exhibition");
        assert_eq!(activity.category, "culture");
        assert_eq!(activity.city, "London");
        assert_eq!(activity.venue, "Tate Modern");
    }

    #[test]
    fn test_activity_display() {
        let activity = Activity::new("Pub quiz", sample_date())
            .with_category("drinks")
            .with_location("Bristol", "The Crown");

        let output = format!("{}", activity);
        assert!(output.contains("Pub quiz"));
        assert!(output.contains("2025-06-15"));
        assert!(output.contains("drinks"));
        assert!(output.contains("The Crown (Bristol)"));
    }

    #[test]
    fn test_activity_json_roundtrip() {
        let activity = Activity::new("Food festival", sample_date())
            .with_category("food")
            .with_location("Manchester", "Piccadilly Gardens");

        let json = serde_json::to_string(&activity).unwrap();
        let parsed: Activity = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, activity);
    }

    #[test]
    fn test_activity_json_field_names() {
        let activity = Activity::new("Film night", sample_date());
        let json = serde_json::to_string(&activity).unwrap();

        for field in ["id", "title", "date", "description", "category", "city", "venue"] {
            assert!(json.contains(&format!("\"{}\"", field)), "missing {}", field);
        }
    }
}
