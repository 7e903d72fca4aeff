//! Entity Module
//! The game collections the admin panel can export and import.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A collection managed through the admin data tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Users,
    Students,
    Levels,
    Tasks,
    ShopItems,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Users,
        EntityKind::Students,
        EntityKind::Levels,
        EntityKind::Tasks,
        EntityKind::ShopItems,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Students => "students",
            EntityKind::Levels => "levels",
            EntityKind::Tasks => "tasks",
            EntityKind::ShopItems => "shop-items",
        }
    }

    /// Column order used when exporting this collection.
    ///
    /// | entity | columns |
    /// |---|---|
    /// | users | `_id,username,email,role,coins,createdAt` |
    /// | students | `_id,name,email,className,teacherId,score` |
    /// | levels | `_id,order,title,difficulty,unlocked` |
    /// | tasks | `_id,levelId,question,answer,points` |
    /// | shop-items | `_id,name,description,price,category` |
    pub fn default_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Users => &["_id", "username", "email", "role", "coins", "createdAt"],
            EntityKind::Students => &["_id", "name", "email", "className", "teacherId", "score"],
            EntityKind::Levels => &["_id", "order", "title", "difficulty", "unlocked"],
            EntityKind::Tasks => &["_id", "levelId", "question", "answer", "points"],
            EntityKind::ShopItems => &["_id", "name", "description", "price", "category"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown entity '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
