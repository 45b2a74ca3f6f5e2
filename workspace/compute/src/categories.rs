//! Category registry: the default taxonomy and per-user seeding.
//!
//! Seeding is an explicit, idempotent step invoked at onboarding.
//! Listing is a pure read. This keeps the write out of the read path so
//! a `GET` never mutates state.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

use model::entities::category::{self, CategoryKind};

use crate::error::Result;

/// One entry of the default taxonomy.
#[derive(Debug, Clone)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub kind: CategoryKind,
    pub icon: &'static str,
}

/// The default taxonomy materialized into every user's category set.
///
/// Names must stay in sync with the consolidation table in
/// [`crate::report`], which maps several of them onto coarser buckets.
pub const DEFAULT_CATEGORIES: &[DefaultCategory] = &[
    // Essentials
    DefaultCategory { name: "Rent", kind: CategoryKind::Fixed, icon: "Home" },
    DefaultCategory { name: "EMI / Loans", kind: CategoryKind::Fixed, icon: "Banknote" },
    DefaultCategory { name: "Electricity", kind: CategoryKind::Fixed, icon: "Zap" },
    DefaultCategory { name: "Water", kind: CategoryKind::Fixed, icon: "Droplets" },
    DefaultCategory { name: "Gas", kind: CategoryKind::Fixed, icon: "Flame" },
    DefaultCategory { name: "Internet", kind: CategoryKind::Fixed, icon: "Wifi" },
    DefaultCategory { name: "Mobile", kind: CategoryKind::Fixed, icon: "Smartphone" },
    DefaultCategory { name: "Insurance", kind: CategoryKind::Fixed, icon: "Shield" },
    DefaultCategory { name: "Taxes", kind: CategoryKind::Fixed, icon: "FileText" },
    DefaultCategory { name: "Maintenance", kind: CategoryKind::Fixed, icon: "Tool" },
    // Food & daily needs
    DefaultCategory { name: "Groceries", kind: CategoryKind::Variable, icon: "ShoppingCart" },
    DefaultCategory { name: "Dining Out", kind: CategoryKind::Variable, icon: "Utensils" },
    DefaultCategory { name: "Food Delivery", kind: CategoryKind::Variable, icon: "Truck" },
    DefaultCategory { name: "Snacks & Beverages", kind: CategoryKind::Variable, icon: "Coffee" },
    // Transport
    DefaultCategory { name: "Fuel", kind: CategoryKind::Variable, icon: "Fuel" },
    DefaultCategory { name: "Public Transport", kind: CategoryKind::Variable, icon: "Bus" },
    DefaultCategory { name: "Cab / Ride-hailing", kind: CategoryKind::Variable, icon: "Car" },
    DefaultCategory { name: "Vehicle Maintenance", kind: CategoryKind::Variable, icon: "Wrench" },
    DefaultCategory { name: "Parking & Tolls", kind: CategoryKind::Variable, icon: "Ticket" },
    // Lifestyle & entertainment
    DefaultCategory { name: "Movies", kind: CategoryKind::Variable, icon: "Film" },
    DefaultCategory { name: "OTT Subscriptions", kind: CategoryKind::Fixed, icon: "Tv" },
    DefaultCategory { name: "Music", kind: CategoryKind::Fixed, icon: "Music" },
    DefaultCategory { name: "Gaming", kind: CategoryKind::Variable, icon: "Gamepad" },
    DefaultCategory { name: "Events", kind: CategoryKind::Variable, icon: "Calendar" },
    DefaultCategory { name: "Hobbies", kind: CategoryKind::Variable, icon: "Palette" },
    // Shopping
    DefaultCategory { name: "Clothing", kind: CategoryKind::Variable, icon: "Shirt" },
    DefaultCategory { name: "Footwear", kind: CategoryKind::Variable, icon: "Footprints" },
    DefaultCategory { name: "Electronics", kind: CategoryKind::Variable, icon: "Laptop" },
    DefaultCategory { name: "Online Shopping", kind: CategoryKind::Variable, icon: "ShoppingBag" },
    DefaultCategory { name: "Accessories", kind: CategoryKind::Variable, icon: "Watch" },
    // Health & wellness
    DefaultCategory { name: "Medical", kind: CategoryKind::Variable, icon: "Stethoscope" },
    DefaultCategory { name: "Pharmacy", kind: CategoryKind::Variable, icon: "Pill" },
    DefaultCategory { name: "Doctor Visits", kind: CategoryKind::Variable, icon: "UserPlus" },
    DefaultCategory { name: "Gym / Fitness", kind: CategoryKind::Fixed, icon: "Dumbbell" },
    DefaultCategory { name: "Mental Wellness", kind: CategoryKind::Variable, icon: "Brain" },
    // Travel
    DefaultCategory { name: "Flights", kind: CategoryKind::Variable, icon: "Plane" },
    DefaultCategory { name: "Hotels", kind: CategoryKind::Variable, icon: "Hotel" },
    DefaultCategory { name: "Local Travel", kind: CategoryKind::Variable, icon: "MapPin" },
    DefaultCategory { name: "Travel Food", kind: CategoryKind::Variable, icon: "Utensils" },
    DefaultCategory { name: "Travel Shopping", kind: CategoryKind::Variable, icon: "ShoppingBag" },
    // Education
    DefaultCategory { name: "Courses", kind: CategoryKind::Fixed, icon: "BookOpen" },
    DefaultCategory { name: "Books", kind: CategoryKind::Variable, icon: "Book" },
    DefaultCategory { name: "Online Learning", kind: CategoryKind::Fixed, icon: "Monitor" },
    DefaultCategory { name: "Exams & Certifications", kind: CategoryKind::Variable, icon: "Award" },
    // Subscriptions
    DefaultCategory { name: "Streaming", kind: CategoryKind::Fixed, icon: "Play" },
    DefaultCategory { name: "Software", kind: CategoryKind::Fixed, icon: "Disc" },
    DefaultCategory { name: "Cloud Services", kind: CategoryKind::Fixed, icon: "Cloud" },
    // Personal & misc
    DefaultCategory { name: "Gifts", kind: CategoryKind::Variable, icon: "Gift" },
    DefaultCategory { name: "Donations", kind: CategoryKind::Variable, icon: "Heart" },
    DefaultCategory { name: "Personal Care", kind: CategoryKind::Variable, icon: "Smile" },
    DefaultCategory { name: "Miscellaneous", kind: CategoryKind::Variable, icon: "HelpCircle" },
];

/// Inserts every default-taxonomy entry the user does not already have.
///
/// Deduplication is by name, so calling this any number of times yields
/// the same category set as calling it once. Returns how many
/// categories were inserted.
#[instrument(skip(db))]
pub async fn ensure_defaults_seeded(db: &DatabaseConnection, user_id: i32) -> Result<usize> {
    let existing: HashSet<String> = category::Entity::find()
        .filter(category::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let missing: Vec<&DefaultCategory> = DEFAULT_CATEGORIES
        .iter()
        .filter(|d| !existing.contains(d.name))
        .collect();

    if missing.is_empty() {
        debug!("All default categories already present for user {}", user_id);
        return Ok(0);
    }

    let inserted = missing.len();
    for default in missing {
        category::ActiveModel {
            user_id: Set(user_id),
            name: Set(default.name.to_string()),
            kind: Set(default.kind.clone()),
            icon: Set(default.icon.to_string()),
            color: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    info!("Seeded {} default categories for user {}", inserted, user_id);
    Ok(inserted)
}

/// Lists the user's categories, ordered by name ascending.
#[instrument(skip(db))]
pub async fn list_categories(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<category::Model>> {
    let categories = category::Entity::find()
        .filter(category::Column::UserId.eq(user_id))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;

    Ok(categories)
}
