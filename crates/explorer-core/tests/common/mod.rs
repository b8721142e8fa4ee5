#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use explorer_core::dialect::GenericDialect;
use explorer_core::{
    Column, ColumnType, ExecOutcome, RecordService, RecordStore, ScannedValue, Schema, SqlValue,
    StoreError, Table,
};
use futures::future::BoxFuture;

/// A statement the fake store received.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Canned answer for the next store call.
pub enum Reply {
    Rows(Vec<Vec<ScannedValue>>),
    Exec(ExecOutcome),
    Fail(&'static str),
}

/// In-memory `RecordStore` that records every statement and answers from a
/// queue of canned replies.
#[derive(Default)]
pub struct FakeStore {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls().pop().expect("no statement was executed")
    }

    fn record(&self, sql: &str, params: &[SqlValue]) -> Option<Reply> {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        self.replies.lock().unwrap().pop_front()
    }
}

impl RecordStore for FakeStore {
    fn fetch_all<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<Vec<Vec<ScannedValue>>, StoreError>> {
        Box::pin(async move {
            match self.record(sql, params) {
                Some(Reply::Rows(rows)) => Ok(rows),
                Some(Reply::Fail(msg)) => Err(StoreError::backend(msg)),
                _ => Ok(vec![]),
            }
        })
    }

    fn fetch_optional<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<Option<Vec<ScannedValue>>, StoreError>> {
        Box::pin(async move {
            match self.record(sql, params) {
                Some(Reply::Rows(rows)) => Ok(rows.into_iter().next()),
                Some(Reply::Fail(msg)) => Err(StoreError::backend(msg)),
                _ => Ok(None),
            }
        })
    }

    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<ExecOutcome, StoreError>> {
        Box::pin(async move {
            match self.record(sql, params) {
                Some(Reply::Exec(outcome)) => Ok(outcome),
                Some(Reply::Fail(msg)) => Err(StoreError::backend(msg)),
                _ => Ok(ExecOutcome::default()),
            }
        })
    }
}

/// `items(id INTEGER PK, name TEXT NOT NULL, price DECIMAL NULL, qty INTEGER NULL)`.
pub fn items_table() -> Table {
    Table::new(
        "items",
        vec![
            Column::new("id", ColumnType::Integer).not_null().primary_key(),
            Column::new("name", ColumnType::String).not_null(),
            Column::new("price", ColumnType::Float),
            Column::new("qty", ColumnType::Integer),
        ],
    )
    .unwrap()
}

pub fn service(store: Arc<FakeStore>) -> RecordService {
    let schema: Schema = vec![items_table()].into_iter().collect();
    RecordService::new(Arc::new(schema), store, Arc::new(GenericDialect::new()))
}

pub fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn written(rows_affected: u64, last_insert_id: i64) -> Reply {
    Reply::Exec(ExecOutcome {
        rows_affected,
        last_insert_id,
    })
}
