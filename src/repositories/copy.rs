//! COPY text-format payloads for bulk loads
//!
//! Rows are tab separated, newline terminated, NULL as `\N`. Generated keys
//! are left to their sequence; every row of one load shares the same audit
//! timestamp.

use crate::entities::{AUDIT_COLUMNS, Entity, EntityKey, SqlValue};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Columns written by a bulk load, in payload order
pub(crate) fn copy_columns<E: Entity>() -> Vec<&'static str> {
    let mut columns = Vec::new();
    if !E::GENERATED_KEY {
        columns.extend(E::KEY_COLUMNS.iter().copied());
    }
    columns.push("uuid");
    columns.extend(E::COLUMNS.iter().copied());
    columns.extend(AUDIT_COLUMNS);
    columns
}

pub(crate) fn copy_statement<E: Entity>() -> String {
    format!(
        "COPY {} ({}) FROM STDIN",
        E::TABLE,
        copy_columns::<E>().join(", ")
    )
}

fn write_row<E: Entity>(entity: &E, now: DateTime<Utc>, out: &mut String) {
    let mut fields: Vec<SqlValue> = Vec::new();
    if !E::GENERATED_KEY {
        fields.extend(entity.key().values());
    }
    let uuid = match entity.uuid() {
        uuid if uuid.is_nil() => Uuid::new_v4(),
        uuid => uuid,
    };
    fields.push(uuid.into());
    fields.extend(entity.values());
    let audit = entity.audit();
    fields.push(audit.creator().into());
    fields.push(now.into());
    fields.push(audit.updater().into());
    fields.push(now.into());

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push('\t');
        }
        field.write_copy_text(out);
    }
    out.push('\n');
}

/// Encodes `entities` as one COPY payload
pub(crate) fn encode_rows<E: Entity>(entities: &[E], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for entity in entities {
        write_row(entity, now, &mut out);
    }
    out
}
