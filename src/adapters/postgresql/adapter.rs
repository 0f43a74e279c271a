//! PostgreSQL table sink
//!
//! Appends the dataset to one table. A missing table is created from the
//! dataset's columns; an existing table is never altered. The create and all
//! inserts share one transaction, so a failed append leaves the table as it
//! was.

use crate::adapters::postgresql::client::{ConnectionParams, PgSession};
use crate::adapters::postgresql::models::{
    bind_value, create_table_sql, infer_column_types, insert_sql,
};
use crate::adapters::sink::{Sink, SinkKind, SinkReceipt};
use crate::config::PostgresSinkConfig;
use crate::domain::{Dataset, Result};
use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tokio_postgres::Client;

/// Appends rows to a PostgreSQL table
pub struct PostgresSink {
    config: PostgresSinkConfig,
}

impl PostgresSink {
    pub fn new(config: PostgresSinkConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Sink for PostgresSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Postgres
    }

    fn target(&self) -> String {
        format!("table {}", self.config.table)
    }

    async fn write(&self, dataset: &Dataset) -> Result<SinkReceipt> {
        let params = ConnectionParams::from_config(&self.config)?;
        let target = format!("{} ({})", self.config.table, params.redacted());

        if dataset.is_empty() {
            tracing::info!(table = %self.config.table, "No records, skipping table append");
            return Ok(SinkReceipt { target, rows: 0 });
        }

        let mut session = PgSession::connect(&params).await?;
        let result = append(&mut session.client, &self.config.table, dataset).await;
        session.close().await;

        let rows = result?;
        Ok(SinkReceipt { target, rows })
    }
}

/// Creates the table if needed and inserts every record in one transaction
async fn append(client: &mut Client, table: &str, dataset: &Dataset) -> Result<usize> {
    let columns = dataset.columns();
    let tx = client.transaction().await?;

    let exists: bool = tx
        .query_one(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = $1::text)",
            &[&table],
        )
        .await?
        .try_get(0)?;

    if !exists {
        let types = infer_column_types(dataset, &columns);
        let ddl = create_table_sql(table, &columns, &types);
        tracing::info!(table = %table, columns = columns.len(), "Creating table");
        tx.batch_execute(&ddl).await?;
    }

    let statement = tx.prepare(&insert_sql(table, &columns)).await?;
    let param_types = statement.params().to_vec();

    for record in dataset {
        let values = columns
            .iter()
            .zip(&param_types)
            .map(|(column, ty)| bind_value(column, record.get(column), ty))
            .collect::<Result<Vec<_>>>()?;
        let refs: Vec<&(dyn ToSql + Sync)> = values
            .iter()
            .map(|v| &**v as &(dyn ToSql + Sync))
            .collect();
        tx.execute(&statement, &refs).await?;
    }

    tx.commit().await?;
    Ok(dataset.len())
}
