//! Persisted row types
//!
//! Field order defines the CSV column order, so these structs are the
//! single source of truth for the store schemas.

use crate::scrape::{AthleteSummary, PhysicalProfile, TestResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the athlete database: one test result for one athlete
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AthleteRow {
    pub favorite_discipline: String,
    pub name: String,
    pub athlete_id: u32,
    pub age: u32,
    pub country: String,
    pub sex: String,
    pub secondary_id: u32,
    pub specialty: String,
    pub mood: String,
    pub experience: String,
    pub form: String,
    pub height: String,
    pub weight: String,
    pub club_flag: bool,
    pub discipline: String,
    pub result: String,
    pub points: String,
    pub week: u32,
    pub care: u32,
    pub strength: u32,
    pub endurance: u32,
    pub speed: u32,
    pub agility: u32,
    pub jumping: u32,
    pub throwing: u32,
    pub sp1: u32,
    pub sp2: u32,
}

impl AthleteRow {
    /// Builds one database row from the crawl output for one discipline
    pub fn from_parts(
        summary: &AthleteSummary,
        profile: &PhysicalProfile,
        result: &TestResult,
    ) -> Self {
        let [care, strength, endurance, speed, agility, jumping, throwing, sp1, sp2] =
            summary.skills;

        Self {
            favorite_discipline: profile.favorite_discipline.clone(),
            name: summary.name.clone(),
            athlete_id: summary.athlete_id,
            age: summary.age,
            country: summary.country.clone(),
            sex: summary.sex.clone(),
            secondary_id: summary.secondary_id,
            specialty: summary.specialty.clone(),
            mood: profile.mood.clone(),
            experience: profile.experience.clone(),
            form: profile.form.clone(),
            height: profile.height.clone(),
            weight: profile.weight.clone(),
            club_flag: profile.has_club,
            discipline: result.discipline.clone(),
            result: result.performance.clone(),
            points: result.points.clone(),
            week: result.week,
            care,
            strength,
            endurance,
            speed,
            agility,
            jumping,
            throwing,
            sp1,
            sp2,
        }
    }

    /// Dedup key of the athlete database
    pub fn key(&self) -> (u32, u32, &str) {
        (self.athlete_id, self.week, self.discipline.as_str())
    }
}

/// One row of a dated open-transfers snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub favorite_discipline: String,
    pub name: String,
    pub athlete_id: u32,
    pub age: u32,
    pub country: String,
    pub sex: String,
    pub secondary_id: u32,
    pub specialty: String,
    pub mood: String,
    pub experience: String,
    pub form: String,
    pub height: String,
    pub weight: String,
    /// Transfer deadline, formatted `%Y-%m-%d %H:%M:%S`; empty when unknown
    pub deadline: String,
    pub care: u32,
    pub strength: u32,
    pub endurance: u32,
    pub speed: u32,
    pub agility: u32,
    pub jumping: u32,
    pub throwing: u32,
    pub sp1: u32,
    pub sp2: u32,
}

impl SnapshotRow {
    /// Builds one snapshot row from the crawl output for one listed athlete
    pub fn from_parts(summary: &AthleteSummary, profile: &PhysicalProfile) -> Self {
        let [care, strength, endurance, speed, agility, jumping, throwing, sp1, sp2] =
            summary.skills;

        Self {
            favorite_discipline: profile.favorite_discipline.clone(),
            name: summary.name.clone(),
            athlete_id: summary.athlete_id,
            age: summary.age,
            country: summary.country.clone(),
            sex: summary.sex.clone(),
            secondary_id: summary.secondary_id,
            specialty: summary.specialty.clone(),
            mood: profile.mood.clone(),
            experience: profile.experience.clone(),
            form: profile.form.clone(),
            height: profile.height.clone(),
            weight: profile.weight.clone(),
            deadline: profile
                .deadline
                .map(|d| d.format(DEADLINE_FORMAT).to_string())
                .unwrap_or_default(),
            care,
            strength,
            endurance,
            speed,
            agility,
            jumping,
            throwing,
            sp1,
            sp2,
        }
    }

    /// The deadline parsed back out of its stored form
    pub fn deadline_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.deadline, DEADLINE_FORMAT).ok()
    }

    /// Annotates this snapshot row with an assessed value, producing the
    /// transfer-database row for a completed transfer
    pub fn into_completion(self, assessed_value: i64) -> TransferRow {
        TransferRow {
            favorite_discipline: self.favorite_discipline,
            name: self.name,
            athlete_id: self.athlete_id,
            age: self.age,
            country: self.country,
            sex: self.sex,
            secondary_id: self.secondary_id,
            specialty: self.specialty,
            mood: self.mood,
            experience: self.experience,
            form: self.form,
            height: self.height,
            weight: self.weight,
            deadline: self.deadline,
            care: self.care,
            strength: self.strength,
            endurance: self.endurance,
            speed: self.speed,
            agility: self.agility,
            jumping: self.jumping,
            throwing: self.throwing,
            sp1: self.sp1,
            sp2: self.sp2,
            assessed_value,
        }
    }
}

/// One row of the transfer database: a completed transfer with its
/// assessed value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferRow {
    pub favorite_discipline: String,
    pub name: String,
    pub athlete_id: u32,
    pub age: u32,
    pub country: String,
    pub sex: String,
    pub secondary_id: u32,
    pub specialty: String,
    pub mood: String,
    pub experience: String,
    pub form: String,
    pub height: String,
    pub weight: String,
    pub deadline: String,
    pub care: u32,
    pub strength: u32,
    pub endurance: u32,
    pub speed: u32,
    pub agility: u32,
    pub jumping: u32,
    pub throwing: u32,
    pub sp1: u32,
    pub sp2: u32,
    pub assessed_value: i64,
}
