use crate::amount::parse_amount;
use crate::store::DEFAULT_COLLECTION;
use crate::tickets::{ServiceCategory, Ticket, TicketStatus, Timestamp};
use crate::wallet::{Transaction, TransactionKind};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) struct CollectedTicket {
    pub(crate) collection: String,
    pub(crate) ticket: Ticket,
}

pub(crate) fn parse_tickets<R: Read>(reader: R) -> Result<Vec<CollectedTicket>, csv::Error> {
    let mut csv_reader = csv_reader(reader);
    let mut tickets = Vec::new();

    for record in csv_reader.deserialize::<TicketRow>() {
        tickets.push(record?.into_collected());
    }

    Ok(tickets)
}

pub(crate) fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, csv::Error> {
    let mut csv_reader = csv_reader(reader);
    let mut transactions = Vec::new();

    for record in csv_reader.deserialize::<TransactionRow>() {
        transactions.push(record?.into_transaction());
    }

    Ok(transactions)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TicketRow {
    #[serde(default)]
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    collection: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    assigned_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    resolved_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    resolved_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    end_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    expected_end_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    service_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    commission_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_by: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    admin_email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    assigned_to: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sub_option: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    user_email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    user_name: Option<String>,
}

impl TicketRow {
    fn into_collected(self) -> CollectedTicket {
        let collection = self
            .collection
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let ticket = Ticket {
            id: self.id,
            status: TicketStatus::from(self.status),
            category: ServiceCategory::from(self.category),
            assigned_at: timestamp_cell(self.assigned_at),
            created_at: timestamp_cell(self.created_at),
            resolved_at: timestamp_cell(self.resolved_at),
            resolved_date: timestamp_cell(self.resolved_date),
            end_date: timestamp_cell(self.end_date),
            expected_end_date: timestamp_cell(self.expected_end_date),
            service_amount: amount_cell(self.service_amount.as_deref()),
            commission_amount: amount_cell(self.commission_amount.as_deref()),
            created_by: self.created_by,
            admin_email: self.admin_email,
            assigned_to: self.assigned_to,
            sub_option: self.sub_option,
            user_email: self.user_email,
            user_name: self.user_name,
        };

        CollectedTicket { collection, ticket }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    technician_id: String,
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
}

impl TransactionRow {
    fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            technician_id: self.technician_id,
            kind: TransactionKind::from(self.kind),
            amount: amount_cell(self.amount.as_deref()),
            date: timestamp_cell(self.date),
            description: self.description,
        }
    }
}

/// Smallest integer read as epoch milliseconds (late April 1970). Shorter
/// integers such as compact `20250314` dates stay text and score zero.
const MIN_EPOCH_MILLIS: i64 = 10_000_000_000;

/// Exports write epoch milliseconds as bare integers; everything else stays text.
fn timestamp_cell(value: Option<String>) -> Option<Timestamp> {
    value.map(|raw| match raw.parse::<i64>() {
        Ok(millis) if millis >= MIN_EPOCH_MILLIS => Timestamp::Millis(millis),
        _ => Timestamp::Text(raw),
    })
}

fn amount_cell(value: Option<&str>) -> rust_decimal::Decimal {
    value.map(parse_amount).unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
