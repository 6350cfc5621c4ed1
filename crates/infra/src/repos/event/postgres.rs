use super::IEventRepo;
use chrono::{NaiveDate, NaiveTime};
use gemschihub_domain::{Event, EventCategory, InterclubMatch, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    category: String,
    title: String,
    date: NaiveDate,
    time: Option<NaiveTime>,
    all_day: bool,
    location: Option<String>,
    interclub: Option<Json<InterclubMatch>>,
    created: i64,
    updated: i64,
}

impl TryFrom<EventRaw> for Event {
    type Error = anyhow::Error;

    fn try_from(e: EventRaw) -> anyhow::Result<Self> {
        let category: EventCategory = e.category.parse()?;
        Ok(Self {
            id: e.event_uid.into(),
            category,
            title: e.title,
            date: e.date,
            time: e.time,
            all_day: e.all_day,
            location: e.location,
            interclub: e.interclub.map(|m| m.0),
            created: e.created,
            updated: e.updated,
        })
    }
}

fn into_events(rows: Vec<EventRaw>) -> Vec<Event> {
    rows.into_iter()
        .filter_map(|row| {
            let event_uid = row.event_uid;
            match Event::try_from(row) {
                Ok(e) => Some(e),
                Err(e) => {
                    error!("Skipping unreadable event {}: {:?}", event_uid, e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events(
                event_uid,
                category,
                title,
                date,
                time,
                all_day,
                location,
                interclub,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.category.label())
        .bind(&e.title)
        .bind(e.date)
        .bind(e.time)
        .bind(e.all_day)
        .bind(&e.location)
        .bind(e.interclub.as_ref().map(Json))
        .bind(e.created)
        .bind(e.updated)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            error!("Unable to insert event: {:?}. DB returned error: {:?}", e, err);
            err
        })?;

        Ok(())
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE events SET
                category = $2,
                title = $3,
                date = $4,
                time = $5,
                all_day = $6,
                location = $7,
                interclub = $8,
                created = $9,
                updated = $10
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.category.label())
        .bind(&e.title)
        .bind(e.date)
        .bind(e.time)
        .bind(e.all_day)
        .bind(&e.location)
        .bind(e.interclub.as_ref().map(Json))
        .bind(e.created)
        .bind(e.updated)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            error!("Unable to save event: {:?}. DB returned error: {:?}", e, err);
            err
        })?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        let row: EventRaw = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            error!("Find event with id: {} failed. DB returned error: {:?}", event_id, err);
            err
        })
        .ok()??;
        into_events(vec![row]).pop()
    }

    async fn find_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Event>> {
        let rows: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.date >= $1 AND e.date <= $2
            ORDER BY e.date, e.time NULLS FIRST
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_events(rows))
    }

    async fn delete(&self, event_id: &ID) -> Option<Event> {
        let row: EventRaw = sqlx::query_as(
            r#"
            DELETE FROM events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            error!("Delete event with id: {} failed. DB returned error: {:?}", event_id, err);
            err
        })
        .ok()??;
        into_events(vec![row]).pop()
    }
}
