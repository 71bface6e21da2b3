// src/db/data_api.rs

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::common::error::AppError;

/// Uma linha como o backend a devolve: colunas da tabela + relações embutidas.
pub type Row = Map<String, Value>;

/// Relação embutida via chave estrangeira (`toner:toner_id(modelo, ...)`).
/// O alias e a coluna são contrato com o schema: não renomear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub alias: &'static str,
    pub foreign_key: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

impl Order {
    pub const fn asc(column: &'static str) -> Self {
        Self { column, ascending: true }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self { column, ascending: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: &'static str,
    pub relations: &'static [Relation],
    pub order: Option<Order>,
}

/// Cliente de dados injetado em todas as páginas.
/// Cada operação afeta exatamente uma tabela; mutações miram uma única linha.
#[async_trait]
pub trait DataApi: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, AppError>;

    async fn insert(&self, table: &str, fields: Row) -> Result<(), AppError>;

    async fn update(&self, table: &str, id: &str, fields: Row) -> Result<(), AppError>;

    async fn delete(&self, table: &str, id: &str) -> Result<(), AppError>;
}

// Tabelas e colunas vêm de constantes do código, mas as chaves de `Row`
// chegam em tempo de execução: só aceitamos identificadores simples.
fn ident(name: &str) -> Result<&str, AppError> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid_start && valid_rest {
        Ok(name)
    } else {
        Err(AppError::InvalidIdentifier(name.to_string()))
    }
}

fn column_list(fields: &Row, prefix: &str) -> Result<String, AppError> {
    let columns = fields
        .keys()
        .map(|k| ident(k).map(|c| format!("{prefix}{c}")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns.join(", "))
}

pub(crate) fn build_select_sql(query: &SelectQuery) -> Result<String, AppError> {
    let table = ident(query.table)?;

    let mut embeds = Vec::with_capacity(query.relations.len());
    for (i, rel) in query.relations.iter().enumerate() {
        let alias = format!("r{i}");
        let pairs = rel
            .columns
            .iter()
            .map(|c| ident(c).map(|c| format!("'{c}', {alias}.{c}")))
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");

        embeds.push(format!(
            "'{}', (SELECT jsonb_build_object({}) FROM {} {} WHERE {}.id = t.{})",
            ident(rel.alias)?,
            pairs,
            ident(rel.table)?,
            alias,
            alias,
            ident(rel.foreign_key)?,
        ));
    }

    let mut sql = format!(
        "SELECT to_jsonb(t) || jsonb_build_object({}) FROM {} t",
        embeds.join(", "),
        table
    );

    if let Some(order) = query.order {
        sql.push_str(&format!(
            " ORDER BY t.{} {}",
            ident(order.column)?,
            if order.ascending { "ASC" } else { "DESC" }
        ));
    }

    Ok(sql)
}

// Só as colunas presentes em `fields` são escritas; o resto fica com o default da tabela.
pub(crate) fn build_insert_sql(table: &str, fields: &Row) -> Result<String, AppError> {
    let table = ident(table)?;
    let columns = column_list(fields, "")?;
    let source = column_list(fields, "r.")?;

    Ok(format!(
        "INSERT INTO {table} ({columns}) SELECT {source} FROM jsonb_populate_record(NULL::{table}, $1) r"
    ))
}

pub(crate) fn build_update_sql(table: &str, fields: &Row) -> Result<String, AppError> {
    let table = ident(table)?;
    let columns = column_list(fields, "")?;
    let source = column_list(fields, "r.")?;

    Ok(format!(
        "UPDATE {table} SET ({columns}) = (SELECT {source} FROM jsonb_populate_record(NULL::{table}, $1) r) WHERE id = $2"
    ))
}

pub(crate) fn build_delete_sql(table: &str) -> Result<String, AppError> {
    Ok(format!("DELETE FROM {} WHERE id = $1", ident(table)?))
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::RecordNotFound)
}

/// Implementação sobre o PostgreSQL, no mesmo formato de uma API REST de dados:
/// linhas em JSON e escrita via `jsonb_populate_record`.
#[derive(Clone)]
pub struct PgDataApi {
    pool: PgPool,
}

impl PgDataApi {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataApi for PgDataApi {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, AppError> {
        let sql = build_select_sql(query)?;

        let rows = sqlx::query_scalar::<_, Json<Row>>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from_backend)?;

        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn insert(&self, table: &str, fields: Row) -> Result<(), AppError> {
        let sql = build_insert_sql(table, &fields)?;

        sqlx::query(&sql)
            .bind(Json(&fields))
            .execute(&self.pool)
            .await
            .map_err(AppError::from_backend)?;

        Ok(())
    }

    async fn update(&self, table: &str, id: &str, fields: Row) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if fields.is_empty() {
            return Ok(());
        }

        let sql = build_update_sql(table, &fields)?;

        let result = sqlx::query(&sql)
            .bind(Json(&fields))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_backend)?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;

        let result = sqlx::query(&build_delete_sql(table)?)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_backend)?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }
}
