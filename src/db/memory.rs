// src/db/memory.rs

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::common::error::AppError;
use super::data_api::{DataApi, Row, SelectQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

/// Escrita registrada pelo fake, para as asserções dos testes.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub operation: Operation,
    pub table: String,
    pub id: Option<String>,
    pub fields: Row,
}

/// `DataApi` em memória com a mesma semântica do backend real:
/// relações embutidas (ou `null`), ordenação no servidor e ids atribuídos no insert.
#[derive(Default)]
pub struct InMemoryDataApi {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    failures: Mutex<HashMap<Operation, String>>,
    writes: Mutex<Vec<Write>>,
    selects: Mutex<Vec<String>>,
    clock: AtomicI64,
}

impl InMemoryDataApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insere uma linha pronta (com `id` e `created_at`), sem registrar escrita.
    pub fn seed(&self, table: &str, row: Value) {
        if let Value::Object(row) = row {
            self.tables
                .lock()
                .unwrap()
                .entry(table.to_string())
                .or_default()
                .push(row);
        }
    }

    /// A próxima chamada da operação falha com a mensagem informada.
    pub fn fail_next(&self, operation: Operation, message: &str) {
        self.failures.lock().unwrap().insert(operation, message.to_string());
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    /// Tabelas consultadas, na ordem das chamadas.
    pub fn selected_tables(&self) -> Vec<String> {
        self.selects.lock().unwrap().clone()
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
    }

    fn take_failure(&self, operation: Operation) -> Result<(), AppError> {
        match self.failures.lock().unwrap().remove(&operation) {
            Some(message) => Err(AppError::Backend(message)),
            None => Ok(()),
        }
    }

    fn record(&self, operation: Operation, table: &str, id: Option<&str>, fields: &Row) {
        self.writes.lock().unwrap().push(Write {
            operation,
            table: table.to_string(),
            id: id.map(str::to_string),
            fields: fields.clone(),
        });
    }

    // Timestamps estritamente crescentes, para a ordenação ser determinística.
    fn next_timestamp(&self) -> String {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        (base + Duration::seconds(tick)).to_rfc3339()
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        _ => std::cmp::Ordering::Equal,
    }
}

#[async_trait]
impl DataApi for InMemoryDataApi {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, AppError> {
        self.selects.lock().unwrap().push(query.table.to_string());
        self.take_failure(Operation::Select)?;

        let tables = self.tables.lock().unwrap();
        let mut rows = tables.get(query.table).cloned().unwrap_or_default();

        for row in rows.iter_mut() {
            for rel in query.relations {
                let related = row
                    .get(rel.foreign_key)
                    .and_then(|fk| {
                        tables
                            .get(rel.table)?
                            .iter()
                            .find(|r| r.get("id") == Some(fk))
                    })
                    .map(|r| {
                        let projected: Row = rel
                            .columns
                            .iter()
                            .filter_map(|c| r.get(*c).map(|v| (c.to_string(), v.clone())))
                            .collect();
                        Value::Object(projected)
                    })
                    .unwrap_or(Value::Null);
                row.insert(rel.alias.to_string(), related);
            }
        }

        if let Some(order) = query.order {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(order.column), b.get(order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, fields: Row) -> Result<(), AppError> {
        self.take_failure(Operation::Insert)?;
        self.record(Operation::Insert, table, None, &fields);

        let mut row = fields;
        row.insert("id".into(), Value::from(Uuid::new_v4().to_string()));
        row.insert("created_at".into(), Value::from(self.next_timestamp()));

        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn update(&self, table: &str, id: &str, fields: Row) -> Result<(), AppError> {
        self.take_failure(Operation::Update)?;
        self.record(Operation::Update, table, Some(id), &fields);

        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| r.get("id") == Some(&Value::from(id))))
            .ok_or(AppError::RecordNotFound)?;

        for (k, v) in fields {
            row.insert(k, v);
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), AppError> {
        self.take_failure(Operation::Delete)?;
        self.record(Operation::Delete, table, Some(id), &Row::new());

        let mut tables = self.tables.lock().unwrap();
        let rows = tables.get_mut(table).ok_or(AppError::RecordNotFound)?;
        let before = rows.len();
        rows.retain(|r| r.get("id") != Some(&Value::from(id)));

        if rows.len() == before {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }
}
