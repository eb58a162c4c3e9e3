//! School repository backed by PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::domain::{Page, PageRequest, School};
use crate::error::{AppError, AppResult};
use crate::models::{NewSchool, SchoolRow};
use crate::repositories::{SchoolMutation, SchoolRepository, contains_pattern, escape_like};
use crate::schema::{schools, students};

/// Since `AsyncDbPool` (bb8::Pool) is reference counted, cloning is cheap.
#[derive(Clone)]
pub struct PgSchoolRepository {
    pool: AsyncDbPool,
}

impl PgSchoolRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

pub(crate) async fn count_students(conn: &mut AsyncPgConnection, school: Uuid) -> AppResult<i64> {
    students::table
        .filter(students::school_id.eq(school))
        .count()
        .get_result(conn)
        .await
        .map_err(AppError::from)
}

/// Loads and row-locks a school for the rest of the transaction.
pub(crate) async fn lock_school(conn: &mut AsyncPgConnection, id: Uuid) -> AppResult<School> {
    let row = schools::table
        .find(id)
        .select(SchoolRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()?
        .ok_or_else(|| AppError::school_not_found(id))?;
    let enrolled = count_students(conn, id).await?;
    row.into_domain(enrolled)
}

#[async_trait]
impl SchoolRepository for PgSchoolRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<School>> {
        let mut conn = self.pool.get().await?;

        let row = schools::table
            .find(id)
            .select(SchoolRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        match row {
            Some(row) => {
                let enrolled = count_students(&mut conn, id).await?;
                row.into_domain(enrolled).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let count: i64 = schools::table
            .filter(schools::id.eq(id))
            .count()
            .get_result(&mut conn)
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_name(&self, name: &str, excluding: Option<Uuid>) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let mut query = schools::table
            .filter(schools::name.ilike(escape_like(name.trim())))
            .into_boxed();
        if let Some(excluded) = excluding {
            query = query.filter(schools::id.ne(excluded));
        }

        let count: i64 = query.count().get_result(&mut conn).await?;
        Ok(count > 0)
    }

    async fn insert(&self, school: &School) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(schools::table)
            .values(NewSchool::from(school))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn update_locked(&self, id: Uuid, mutation: SchoolMutation) -> AppResult<School> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<School, AppError, _>(|conn| {
            async move {
                let mut school = lock_school(conn, id).await?;
                mutation(&mut school)?;

                let next_version = school.version() + 1;
                let updated_at = school.updated_at();
                let affected = diesel::update(
                    schools::table
                        .filter(schools::id.eq(id))
                        .filter(schools::version.eq(school.version())),
                )
                .set((
                    schools::name.eq(school.name()),
                    schools::capacity.eq(school.capacity().value()),
                    schools::updated_at.eq(Timestamp::from(updated_at)),
                    schools::version.eq(next_version),
                ))
                .execute(conn)
                .await?;

                if affected == 0 {
                    return Err(AppError::version_conflict("School", id));
                }
                school.committed(next_version, updated_at);
                Ok(school)
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(schools::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }

    async fn search(&self, query: &str, page: PageRequest) -> AppResult<Page<School>> {
        let mut conn = self.pool.get().await?;
        let pattern = contains_pattern(query);

        let total: i64 = schools::table
            .filter(schools::name.ilike(pattern.as_str()))
            .count()
            .get_result(&mut conn)
            .await?;

        let rows: Vec<SchoolRow> = schools::table
            .filter(schools::name.ilike(pattern.as_str()))
            .order((schools::name.asc(), schools::id.asc()))
            .limit(page.limit())
            .offset(page.offset())
            .select(SchoolRow::as_select())
            .load(&mut conn)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let counts: HashMap<Uuid, i64> = students::table
            .filter(students::school_id.eq_any(ids))
            .group_by(students::school_id)
            .select((students::school_id, diesel::dsl::count_star()))
            .load::<(Uuid, i64)>(&mut conn)
            .await?
            .into_iter()
            .collect();

        let schools = rows
            .into_iter()
            .map(|row| {
                let enrolled = counts.get(&row.id).copied().unwrap_or(0);
                row.into_domain(enrolled)
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(schools, page, u64::try_from(total).unwrap_or(0)))
    }
}
