// src/services/dashboard_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::{
    common::error::AppError,
    db::DataApi,
    models::{
        returned::{Destination, ReturnedItem},
        Record,
    },
};

/// Resumo dos retornados exibido na página inicial.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsSummary {
    pub total: usize,
    pub by_destination: Vec<(Destination, usize)>,
    pub recovered_value: Decimal,
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn DataApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn DataApi>) -> Self {
        Self { api }
    }

    pub async fn returns_summary(&self) -> Result<ReturnsSummary, AppError> {
        let rows = self.api.select(&ReturnedItem::query()).await?;
        let items = rows
            .into_iter()
            .map(|row| serde_json::from_value::<ReturnedItem>(Value::Object(row)))
            .collect::<Result<Vec<_>, _>>()?;

        let by_destination = Destination::iter()
            .map(|d| (d, items.iter().filter(|i| i.destino_final == d).count()))
            .collect();

        Ok(ReturnsSummary {
            total: items.len(),
            by_destination,
            recovered_value: items.iter().map(ReturnedItem::recovered_value).sum(),
        })
    }
}
