//! Job entity - one scheduled or executed unit of work

use super::{Audit, Entity, SqlValue, ValidityWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct Job {
    pub job_id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
    pub application_name: Option<String>,
    pub status_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    // last response of the endpoint the job called
    pub response_status: Option<i32>,
    pub response_body: Option<String>,
    pub response_json: Option<serde_json::Value>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Job {
    type Key = i32;

    const TABLE: &'static str = "jobs";
    const KEY_COLUMNS: &'static [&'static str] = &["job_id"];
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "alternate_name",
        "description",
        "application_name",
        "status_id",
        "start_date",
        "end_date",
        "response_status",
        "response_body",
        "response_json",
    ];

    fn key(&self) -> i32 {
        self.job_id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.alternate_name.clone().into(),
            self.description.clone().into(),
            self.application_name.clone().into(),
            self.status_id.into(),
            self.start_date.into(),
            self.end_date.into(),
            self.response_status.into(),
            self.response_body.clone().into(),
            self.response_json.clone().into(),
        ]
    }
}

impl ValidityWindow for Job {}
