//! Table definitions for the epidemiological record store.
//!
//! Every foreign key cascades both on delete and on update, so removing a
//! country removes its users, and removing a user removes the doctor, public
//! servant, patient and record rows that hang off that user.

/// DDL for all tables, ordered so that referenced tables are created first.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS country (
        cname VARCHAR(50) PRIMARY KEY,
        population BIGINT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        email VARCHAR(60) PRIMARY KEY,
        name VARCHAR(30),
        surname VARCHAR(40),
        salary INTEGER,
        phone VARCHAR(20),
        cname VARCHAR(50) REFERENCES country (cname) ON DELETE CASCADE ON UPDATE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS doctor (
        email VARCHAR(60) PRIMARY KEY
            REFERENCES users (email) ON DELETE CASCADE ON UPDATE CASCADE,
        degree VARCHAR(20)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS publicservant (
        email VARCHAR(60) PRIMARY KEY
            REFERENCES users (email) ON DELETE CASCADE ON UPDATE CASCADE,
        department VARCHAR(50)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS patients (
        email VARCHAR(60) PRIMARY KEY
            REFERENCES users (email) ON DELETE CASCADE ON UPDATE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS diseasetype (
        id INTEGER PRIMARY KEY,
        description VARCHAR(140)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS specialize (
        id INTEGER REFERENCES diseasetype (id) ON DELETE CASCADE ON UPDATE CASCADE,
        email VARCHAR(60) REFERENCES doctor (email) ON DELETE CASCADE ON UPDATE CASCADE,
        PRIMARY KEY (id, email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS disease (
        disease_code VARCHAR(50) PRIMARY KEY,
        pathogen VARCHAR(20),
        description VARCHAR(140),
        id INTEGER REFERENCES diseasetype (id) ON DELETE CASCADE ON UPDATE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS discover (
        cname VARCHAR(50) REFERENCES country (cname) ON DELETE CASCADE ON UPDATE CASCADE,
        disease_code VARCHAR(50) PRIMARY KEY
            REFERENCES disease (disease_code) ON DELETE CASCADE ON UPDATE CASCADE,
        first_enc_date DATE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS patientdisease (
        email VARCHAR(60) REFERENCES users (email) ON DELETE CASCADE ON UPDATE CASCADE,
        disease_code VARCHAR(50)
            REFERENCES disease (disease_code) ON DELETE CASCADE ON UPDATE CASCADE,
        PRIMARY KEY (email, disease_code)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS record (
        email VARCHAR(60)
            REFERENCES publicservant (email) ON DELETE CASCADE ON UPDATE CASCADE,
        cname VARCHAR(50) REFERENCES country (cname) ON DELETE CASCADE ON UPDATE CASCADE,
        disease_code VARCHAR(50)
            REFERENCES disease (disease_code) ON DELETE CASCADE ON UPDATE CASCADE,
        total_deaths INTEGER,
        total_patients INTEGER,
        PRIMARY KEY (email, cname, disease_code)
    )
    "#,
];
