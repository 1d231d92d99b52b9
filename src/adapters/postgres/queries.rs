//! Parameterized statement construction for the `subscriptions` table.
//!
//! Every value goes through `push_bind`; only fixed column names and
//! operators are pushed as SQL text. Predicates are always emitted in the
//! order `user_id`, `price`, `service_name`, `start_date`, `end_date`.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::foundation::UserId;
use crate::domain::subscription::{
    SpendQuery, Subscription, SubscriptionFilter, SubscriptionPatch,
};

const COLUMNS: &str = "service_name, price, user_id, start_date, end_date";
const ORDERING: &str = " ORDER BY start_date, service_name";

/// Appends `WHERE`/`AND` predicates as they are added.
struct Predicates<'q, 'a> {
    builder: &'q mut QueryBuilder<'a, Postgres>,
    any: bool,
}

impl<'q, 'a> Predicates<'q, 'a> {
    fn new(builder: &'q mut QueryBuilder<'a, Postgres>) -> Self {
        Self {
            builder,
            any: false,
        }
    }

    /// Pushes `<column> <op> $n` when a value is present.
    fn push<T>(&mut self, column: &str, op: &str, value: Option<T>)
    where
        T: 'a + sqlx::Encode<'a, Postgres> + sqlx::Type<Postgres> + Send,
    {
        let Some(value) = value else { return };
        self.builder.push(if self.any { " AND " } else { " WHERE " });
        self.builder.push(column).push(" ").push(op).push(" ");
        self.builder.push_bind(value);
        self.any = true;
    }

    fn push_filter(&mut self, filter: &'a SubscriptionFilter) {
        self.push("user_id", "=", filter.user_id.as_ref().map(UserId::as_str));
        self.push("price", ">=", filter.min_price);
        self.push("service_name", "=", filter.service_name.as_deref());
        self.push("start_date", ">=", filter.start_date.map(|d| d.as_date()));
        self.push("end_date", "<=", filter.end_date.map(|d| d.as_date()));
    }
}

pub(crate) fn insert_query(sub: &Subscription) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO subscriptions ({}) VALUES (", COLUMNS));
    let mut values = qb.separated(", ");
    values.push_bind(sub.service_name());
    values.push_bind(sub.price());
    values.push_bind(sub.user_id().as_str());
    values.push_bind(sub.start_date().as_date());
    values.push_bind(sub.end_date().map(|d| d.as_date()));
    values.push_unseparated(")");
    qb
}

pub(crate) fn select_by_user_query(user_id: &UserId) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM subscriptions", COLUMNS));
    Predicates::new(&mut qb).push("user_id", "=", Some(user_id.as_str()));
    qb.push(ORDERING).push(" LIMIT 1");
    qb
}

pub(crate) fn filtered_query(filter: &SubscriptionFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM subscriptions", COLUMNS));
    Predicates::new(&mut qb).push_filter(filter);
    qb.push(ORDERING);
    qb
}

/// `None` when the patch sets nothing.
pub(crate) fn update_query<'a>(
    user_id: &'a UserId,
    patch: &'a SubscriptionPatch,
) -> Option<QueryBuilder<'a, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::new("UPDATE subscriptions SET ");
    let mut set = qb.separated(", ");
    if let Some(name) = patch.service_name.as_deref() {
        set.push("service_name = ").push_bind_unseparated(name);
    }
    if let Some(price) = patch.price {
        set.push("price = ").push_bind_unseparated(price);
    }
    if let Some(start) = patch.start_date {
        set.push("start_date = ").push_bind_unseparated(start.as_date());
    }
    if let Some(end) = patch.end_date {
        set.push("end_date = ").push_bind_unseparated(end.as_date());
    }
    qb.push(" WHERE user_id = ").push_bind(user_id.as_str());
    Some(qb)
}

pub(crate) fn delete_query(user_id: &UserId) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("DELETE FROM subscriptions WHERE user_id = ");
    qb.push_bind(user_id.as_str());
    qb
}

pub(crate) fn sum_query(query: &SpendQuery) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COALESCE(SUM(price), 0) AS total FROM subscriptions");
    let mut predicates = Predicates::new(&mut qb);
    predicates.push("user_id", "=", query.user_id.as_ref().map(UserId::as_str));
    predicates.push("service_name", "=", query.service_name.as_deref());
    predicates.push("start_date", ">=", query.start_date.map(|d| d.as_date()));
    predicates.push("end_date", "<=", query.end_date.map(|d| d.as_date()));
    qb
}
