use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Args, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::api::ActivityApi;
use crate::models::Activity;
use crate::store::ActivityStore;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ActivityCommand {
    #[command(subcommand)]
    pub command: ActivitySubcommand,
}

#[derive(Subcommand)]
pub enum ActivitySubcommand {
    /// List all activities, ordered by date
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show an activity's details
    Show {
        /// Activity ID (UUID)
        id: Uuid,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new activity
    Create {
        /// Title of the activity
        title: String,

        /// Date (YYYY-MM-DD or "YYYY-MM-DD HH:MM")
        #[arg(long, short)]
        date: String,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Category (e.g. culture, drinks, film, food, music, travel)
        #[arg(long)]
        category: Option<String>,

        /// City
        #[arg(long)]
        city: Option<String>,

        /// Venue
        #[arg(long)]
        venue: Option<String>,
    },

    /// Update an existing activity
    Update {
        /// Activity ID (UUID)
        id: Uuid,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New date (YYYY-MM-DD or "YYYY-MM-DD HH:MM")
        #[arg(long, short)]
        date: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New city
        #[arg(long)]
        city: Option<String>,

        /// New venue
        #[arg(long)]
        venue: Option<String>,
    },

    /// Delete an activity
    Delete {
        /// Activity ID (UUID)
        id: Uuid,
    },
}

impl ActivityCommand {
    pub async fn run<A: ActivityApi>(
        &self,
        store: &mut ActivityStore<A>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ActivitySubcommand::List { format } => {
                store.load_activities().await;
                let activities = store.activities_by_date();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&activities)?);
                    }
                    OutputFormat::Text => {
                        if activities.is_empty() {
                            println!("No activities found");
                        }
                        for activity in &activities {
                            println!(
                                "{}  {}  {}",
                                activity.date.format("%Y-%m-%d %H:%M"),
                                activity.id,
                                activity.title
                            );
                        }
                    }
                }
                Ok(())
            }

            ActivitySubcommand::Show { id, format } => {
                store.load_activity(*id).await;

                match store.selected_activity() {
                    Some(activity) => match format {
                        OutputFormat::Json => {
                            println!("{}", serde_json::to_string_pretty(activity)?);
                        }
                        OutputFormat::Text => print!("{}", activity),
                    },
                    None => println!("Activity not found: {}", id),
                }
                Ok(())
            }

            ActivitySubcommand::Create {
                title,
                date,
                description,
                category,
                city,
                venue,
            } => {
                let date = parse_date(date)?;

                let mut activity = Activity::new(title, date);
                if let Some(description) = description {
                    activity = activity.with_description(description);
                }
                if let Some(category) = category {
                    activity = activity.with_category(category);
                }
                activity = activity.with_location(
                    city.clone().unwrap_or_default(),
                    venue.clone().unwrap_or_default(),
                );

                let id = activity.id;
                store.open_create_form();
                store.create_activity(activity).await;

                if let Some(created) = store.activity(id) {
                    println!("Created activity:");
                    print!("{}", created);
                }
                Ok(())
            }

            ActivitySubcommand::Update {
                id,
                title,
                date,
                description,
                category,
                city,
                venue,
            } => {
                // Populate the cache so the edit starts from server state
                store.load_activities().await;
                store.open_edit_form(*id);

                let Some(mut activity) = store.selected_activity().cloned() else {
                    println!("Activity not found: {}", id);
                    return Ok(());
                };

                if let Some(title) = title {
                    activity.title = title.clone();
                }
                if let Some(date) = date {
                    activity.date = parse_date(date)?;
                }
                if let Some(description) = description {
                    activity.description = description.clone();
                }
                if let Some(category) = category {
                    activity.category = category.clone();
                }
                if let Some(city) = city {
                    activity.city = city.clone();
                }
                if let Some(venue) = venue {
                    activity.venue = venue.clone();
                }

                store.edit_activity(activity).await;

                if let Some(updated) = store.activity(*id) {
                    println!("Updated activity:");
                    print!("{}", updated);
                }
                Ok(())
            }

            ActivitySubcommand::Delete { id } => {
                store.load_activities().await;
                if store.activity(*id).is_none() {
                    println!("Activity not found: {}", id);
                    return Ok(());
                }

                store.delete_activity(*id).await;

                if store.activity(*id).is_none() {
                    println!("Deleted activity {}", id);
                }
                Ok(())
            }
        }
    }
}

fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            format!(
                "Invalid date '{}'. Use YYYY-MM-DD or \"YYYY-MM-DD HH:MM\".",
                s
            )
        })
}
