//! Shared fixtures for the database integration tests.
//!
//! Requires a running PostgreSQL database.
//! Run with: DATABASE_URL="postgresql:///epirecords" cargo test -p database -- --ignored

#![allow(dead_code)]

use core_types::{
    Country, Disease, DiseaseType, Doctor, PublicServant, Record, Specialization, User,
};
use database::DbRepository;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// A pool whose connections all work inside a private, freshly created schema.
pub struct TestDb {
    pub pool: PgPool,
    pub repo: DbRepository,
    schema: String,
    url: String,
}

pub async fn test_db() -> TestDb {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let schema = format!("test_{}", Uuid::new_v4().simple());

    let admin = PgPool::connect(&url).await.expect("failed to connect to test database");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("failed to create test schema");
    admin.close().await;

    let search_path = schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                let statement = format!("SET search_path TO {search_path}");
                sqlx::query(&statement).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("failed to connect to test schema");

    database::create_schema(&pool).await.expect("failed to create tables");

    TestDb {
        repo: DbRepository::new(pool.clone()),
        pool,
        schema,
        url,
    }
}

impl TestDb {
    pub async fn teardown(self) {
        self.pool.close().await;
        let admin = PgPool::connect(&self.url).await.expect("failed to reconnect");
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&admin)
            .await
            .expect("failed to drop test schema");
        admin.close().await;
    }

    pub async fn country(&self, cname: &str) -> Country {
        self.repo
            .create(&Country {
                cname: cname.to_string(),
                population: Some(1_000_000),
            })
            .await
            .expect("failed to seed country")
    }

    pub async fn user(&self, email: &str, name: &str, salary: i32, cname: &str) -> User {
        self.repo
            .create(&User {
                email: email.to_string(),
                name: Some(name.to_string()),
                surname: Some("Testov".to_string()),
                salary: Some(salary),
                phone: None,
                cname: Some(cname.to_string()),
            })
            .await
            .expect("failed to seed user")
    }

    pub async fn doctor(&self, email: &str, degree: &str) -> Doctor {
        self.repo
            .create(&Doctor {
                email: email.to_string(),
                degree: Some(degree.to_string()),
            })
            .await
            .expect("failed to seed doctor")
    }

    pub async fn servant(&self, email: &str, department: &str) -> PublicServant {
        self.repo
            .create(&PublicServant {
                email: email.to_string(),
                department: Some(department.to_string()),
            })
            .await
            .expect("failed to seed public servant")
    }

    pub async fn disease_type(&self, id: i32, description: &str) -> DiseaseType {
        self.repo
            .create(&DiseaseType {
                id,
                description: Some(description.to_string()),
            })
            .await
            .expect("failed to seed disease type")
    }

    pub async fn specialization(&self, id: i32, email: &str) -> Specialization {
        self.repo
            .create(&Specialization {
                id,
                email: email.to_string(),
            })
            .await
            .expect("failed to seed specialization")
    }

    pub async fn disease(&self, code: &str, pathogen: &str, description: &str, type_id: i32) -> Disease {
        self.repo
            .create(&Disease {
                disease_code: code.to_string(),
                pathogen: Some(pathogen.to_string()),
                description: Some(description.to_string()),
                id: Some(type_id),
            })
            .await
            .expect("failed to seed disease")
    }

    pub async fn record(&self, email: &str, cname: &str, code: &str, patients: i32) -> Record {
        self.repo
            .create(&Record {
                email: email.to_string(),
                cname: cname.to_string(),
                disease_code: code.to_string(),
                total_deaths: Some(0),
                total_patients: Some(patients),
            })
            .await
            .expect("failed to seed record")
    }
}
