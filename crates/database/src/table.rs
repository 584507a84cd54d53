use core_types::{
    Country, Discovery, Disease, DiseaseType, Doctor, Patient, PatientDisease, PublicServant,
    Record, Specialization, User,
};
use serde::{Serialize, de::DeserializeOwned};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

/// A `query_as` builder on the Postgres driver.
pub type PgQueryAs<'q, O> = QueryAs<'q, Postgres, O, PgArguments>;

/// A primary key value that can be bound, column by column, to a query.
///
/// Binding order must follow `Table::KEY_COLUMNS`.
pub trait BindKey {
    fn bind_key<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O>;
}

impl BindKey for String {
    fn bind_key<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(self)
    }
}

impl BindKey for i32 {
    fn bind_key<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(*self)
    }
}

impl BindKey for (i32, String) {
    fn bind_key<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(self.0).bind(&self.1)
    }
}

impl BindKey for (String, String) {
    fn bind_key<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(&self.0).bind(&self.1)
    }
}

impl BindKey for (String, String, String) {
    fn bind_key<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(&self.0).bind(&self.1).bind(&self.2)
    }
}

/// Describes how one entity record maps onto its table.
///
/// The repository builds all of its CRUD statements from these constants, so
/// `COLUMNS` must list every column in the same order `bind_columns` binds them.
pub trait Table:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    /// The primary key, as it arrives in the URL path.
    type Key: BindKey + DeserializeOwned + Send + Sync + 'static;

    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const KEY_COLUMNS: &'static [&'static str];
    /// Human readable name used in response messages, e.g. "Disease type".
    const LABEL: &'static str;

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O>;
}

impl Table for Country {
    type Key = String;
    const TABLE: &'static str = "country";
    const COLUMNS: &'static [&'static str] = &["cname", "population"];
    const KEY_COLUMNS: &'static [&'static str] = &["cname"];
    const LABEL: &'static str = "Country";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(&self.cname).bind(self.population)
    }
}

impl Table for User {
    type Key = String;
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] =
        &["email", "name", "surname", "salary", "phone", "cname"];
    const KEY_COLUMNS: &'static [&'static str] = &["email"];
    const LABEL: &'static str = "User";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.email)
            .bind(&self.name)
            .bind(&self.surname)
            .bind(self.salary)
            .bind(&self.phone)
            .bind(&self.cname)
    }
}

impl Table for Doctor {
    type Key = String;
    const TABLE: &'static str = "doctor";
    const COLUMNS: &'static [&'static str] = &["email", "degree"];
    const KEY_COLUMNS: &'static [&'static str] = &["email"];
    const LABEL: &'static str = "Doctor";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(&self.email).bind(&self.degree)
    }
}

impl Table for PublicServant {
    type Key = String;
    const TABLE: &'static str = "publicservant";
    const COLUMNS: &'static [&'static str] = &["email", "department"];
    const KEY_COLUMNS: &'static [&'static str] = &["email"];
    const LABEL: &'static str = "Public servant";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(&self.email).bind(&self.department)
    }
}

impl Table for Patient {
    type Key = String;
    const TABLE: &'static str = "patients";
    const COLUMNS: &'static [&'static str] = &["email"];
    const KEY_COLUMNS: &'static [&'static str] = &["email"];
    const LABEL: &'static str = "Patient";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(&self.email)
    }
}

impl Table for DiseaseType {
    type Key = i32;
    const TABLE: &'static str = "diseasetype";
    const COLUMNS: &'static [&'static str] = &["id", "description"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const LABEL: &'static str = "Disease type";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(self.id).bind(&self.description)
    }
}

impl Table for Specialization {
    type Key = (i32, String);
    const TABLE: &'static str = "specialize";
    const COLUMNS: &'static [&'static str] = &["id", "email"];
    const KEY_COLUMNS: &'static [&'static str] = &["id", "email"];
    const LABEL: &'static str = "Specialization";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(self.id).bind(&self.email)
    }
}

impl Table for Disease {
    type Key = String;
    const TABLE: &'static str = "disease";
    const COLUMNS: &'static [&'static str] = &["disease_code", "pathogen", "description", "id"];
    const KEY_COLUMNS: &'static [&'static str] = &["disease_code"];
    const LABEL: &'static str = "Disease";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.disease_code)
            .bind(&self.pathogen)
            .bind(&self.description)
            .bind(self.id)
    }
}

impl Table for Discovery {
    type Key = String;
    const TABLE: &'static str = "discover";
    const COLUMNS: &'static [&'static str] = &["cname", "disease_code", "first_enc_date"];
    const KEY_COLUMNS: &'static [&'static str] = &["disease_code"];
    const LABEL: &'static str = "Discovery";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.cname)
            .bind(&self.disease_code)
            .bind(self.first_enc_date)
    }
}

impl Table for PatientDisease {
    type Key = (String, String);
    const TABLE: &'static str = "patientdisease";
    const COLUMNS: &'static [&'static str] = &["email", "disease_code"];
    const KEY_COLUMNS: &'static [&'static str] = &["email", "disease_code"];
    const LABEL: &'static str = "Patient-disease relationship";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query.bind(&self.email).bind(&self.disease_code)
    }
}

impl Table for Record {
    type Key = (String, String, String);
    const TABLE: &'static str = "record";
    const COLUMNS: &'static [&'static str] = &[
        "email",
        "cname",
        "disease_code",
        "total_deaths",
        "total_patients",
    ];
    const KEY_COLUMNS: &'static [&'static str] = &["email", "cname", "disease_code"];
    const LABEL: &'static str = "Record";

    fn bind_columns<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.email)
            .bind(&self.cname)
            .bind(&self.disease_code)
            .bind(self.total_deaths)
            .bind(self.total_patients)
    }
}
