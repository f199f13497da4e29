use std::collections::HashMap;

use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use payment_smoke_core::contract::StoredRecord;
use payment_smoke_core::scan::{RecordPage, RecordStore};
use serde_json::Value;

/// DynamoDB `LastEvaluatedKey`, fed back as `ExclusiveStartKey`.
pub type DynamoCursor = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoRecordStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_dynamodb::Client::new(config))
    }

    pub fn from_client(dynamodb_client: aws_sdk_dynamodb::Client) -> Self {
        Self { dynamodb_client }
    }
}

impl RecordStore for DynamoRecordStore {
    type Cursor = DynamoCursor;

    fn scan_page(
        &self,
        collection: &str,
        cursor: Option<DynamoCursor>,
        page_size: Option<u32>,
    ) -> Result<RecordPage<DynamoCursor>, String> {
        let client = self.dynamodb_client.clone();
        let table_name = collection.to_string();
        let limit = page_size.map(|size| i32::try_from(size).unwrap_or(i32::MAX));

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .scan()
                    .table_name(table_name)
                    .set_exclusive_start_key(cursor)
                    .set_limit(limit)
                    .send()
                    .await
                    .map(|output| RecordPage {
                        records: output.items().iter().map(item_to_record).collect(),
                        next: output
                            .last_evaluated_key()
                            .filter(|key| !key.is_empty())
                            .cloned(),
                    })
                    .map_err(|error| {
                        format!("dynamodb scan failed: {}", DisplayErrorContext(&error))
                    })
            })
        })
    }
}

pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> StoredRecord {
    item.iter()
        .map(|(name, value)| (name.clone(), attribute_to_json(value)))
        .collect()
}

pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(number) => number_to_json(number),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::M(map) => Value::Object(item_to_record(map)),
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_to_json(n)).collect()),
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

// Numbers that JSON cannot hold (e.g. 38-digit precision) stay strings.
fn number_to_json(number: &str) -> Value {
    serde_json::from_str::<serde_json::Number>(number)
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(number.to_string()))
}
