use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `country` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub cname: String,
    #[serde(deserialize_with = "crate::fields::required")]
    pub population: Option<i64>,
}

/// A row of the `users` table. Every doctor, public servant and patient is a user first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub email: String,
    #[serde(deserialize_with = "crate::fields::required")]
    pub name: Option<String>,
    #[serde(deserialize_with = "crate::fields::required")]
    pub surname: Option<String>,
    #[serde(deserialize_with = "crate::fields::required")]
    pub salary: Option<i32>,
    #[serde(deserialize_with = "crate::fields::required")]
    pub phone: Option<String>,
    /// The user's country of residence.
    #[serde(deserialize_with = "crate::fields::required")]
    pub cname: Option<String>,
}

/// A row of the `doctor` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Doctor {
    pub email: String,
    #[serde(deserialize_with = "crate::fields::required")]
    pub degree: Option<String>,
}

/// A row of the `publicservant` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PublicServant {
    pub email: String,
    #[serde(deserialize_with = "crate::fields::required")]
    pub department: Option<String>,
}

/// A row of the `patients` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Patient {
    pub email: String,
}

/// A row of the `diseasetype` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DiseaseType {
    pub id: i32,
    #[serde(deserialize_with = "crate::fields::required")]
    pub description: Option<String>,
}

/// A row of the `specialize` table: doctor `email` is specialised in disease type `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Specialization {
    pub id: i32,
    pub email: String,
}

/// A row of the `disease` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Disease {
    pub disease_code: String,
    #[serde(deserialize_with = "crate::fields::required")]
    pub pathogen: Option<String>,
    #[serde(deserialize_with = "crate::fields::required")]
    pub description: Option<String>,
    /// The disease type this disease belongs to.
    #[serde(deserialize_with = "crate::fields::required")]
    pub id: Option<i32>,
}

/// A row of the `discover` table.
///
/// Keyed by `disease_code` alone, so a disease has at most one discovery
/// country and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Discovery {
    #[serde(deserialize_with = "crate::fields::required")]
    pub cname: Option<String>,
    pub disease_code: String,
    #[serde(deserialize_with = "crate::fields::required")]
    pub first_enc_date: Option<NaiveDate>,
}

/// A row of the `patientdisease` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PatientDisease {
    pub email: String,
    pub disease_code: String,
}

/// A row of the `record` table: the counts a public servant reported for one
/// disease in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub email: String,
    pub cname: String,
    pub disease_code: String,
    #[serde(deserialize_with = "crate::fields::required")]
    pub total_deaths: Option<i32>,
    #[serde(deserialize_with = "crate::fields::required")]
    pub total_patients: Option<i32>,
}
