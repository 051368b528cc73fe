//! Department standings: the cached `total_points` and `rank` columns.
//!
//! Every points-relevant write runs in a transaction opened with [`begin`],
//! which takes a transaction-scoped advisory lock so that concurrent writers
//! recompute one after another, then calls [`recalculate`] before committing.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::error::{Result, StorageError};
use crate::models::{Department, DepartmentTotal};

/// Advisory lock key guarding the standings recompute.
const STANDINGS_LOCK_KEY: i64 = 0x5343_4f52_4542_4f44;

/// Open a transaction holding the standings lock.
pub async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(STANDINGS_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

/// Recompute every department's total and rank on `conn` and write them
/// back. Returns the departments in rank order.
pub async fn recalculate(conn: &mut PgConnection) -> Result<Vec<Department>> {
    let totals = sqlx::query_as::<_, DepartmentTotal>(
        r#"
        SELECT d.id, d.name, COALESCE(SUM(r.points_awarded), 0)::INTEGER AS total_points
        FROM departments d
        LEFT JOIN results r ON r.department_id = d.id
        GROUP BY d.id, d.name
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| {
        let error = StorageError::from(e);
        if error.is_numeric_overflow() {
            StorageError::ConstraintViolation(
                "Department total points out of range".to_string(),
            )
        } else {
            error
        }
    })?;

    let standings = rank_departments(totals);

    let ids: Vec<i32> = standings.iter().map(|d| d.id).collect();
    let points: Vec<i32> = standings.iter().map(|d| d.total_points).collect();
    let ranks: Vec<i32> = standings.iter().map(|d| d.rank).collect();

    sqlx::query(
        r#"
        UPDATE departments d
        SET total_points = s.total_points, rank = s.rank
        FROM UNNEST($1::INTEGER[], $2::INTEGER[], $3::INTEGER[]) AS s(id, total_points, rank)
        WHERE d.id = s.id
        "#,
    )
    .bind(ids)
    .bind(points)
    .bind(ranks)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(departments = standings.len(), "Standings recalculated");

    Ok(standings)
}

/// Standalone recompute in its own transaction.
pub async fn recalculate_standings(pool: &PgPool) -> Result<Vec<Department>> {
    let mut tx = begin(pool).await?;
    let standings = recalculate(&mut tx).await?;
    tx.commit().await?;
    Ok(standings)
}

/// Order departments by points descending, then name, then id, and assign
/// ranks 1..=N in that order.
pub fn rank_departments(mut totals: Vec<DepartmentTotal>) -> Vec<Department> {
    totals.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    totals
        .into_iter()
        .zip(1..)
        .map(|(total, rank)| Department {
            id: total.id,
            name: total.name,
            total_points: total.total_points,
            rank,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(id: i32, name: &str, total_points: i32) -> DepartmentTotal {
        DepartmentTotal {
            id,
            name: name.to_string(),
            total_points,
        }
    }

    fn rank_of(standings: &[Department], name: &str) -> i32 {
        standings.iter().find(|d| d.name == name).unwrap().rank
    }

    #[test]
    fn test_higher_total_ranks_first() {
        let standings = rank_departments(vec![total(1, "A", 10), total(2, "B", 15)]);

        assert_eq!(rank_of(&standings, "A"), 2);
        assert_eq!(rank_of(&standings, "B"), 1);
        assert_eq!(standings[0].total_points, 15);
    }

    #[test]
    fn test_ties_are_broken_by_name_then_id() {
        let standings = rank_departments(vec![
            total(3, "Civil", 0),
            total(1, "Mechanical", 10),
            total(2, "Aero", 0),
            total(5, "Civil", 0),
        ]);

        let order: Vec<i32> = standings.iter().map(|d| d.id).collect();
        assert_eq!(order, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_ranks_form_a_permutation() {
        let totals: Vec<DepartmentTotal> = (1..=25)
            .map(|i| total(i, &format!("Dept {i:02}"), (i * 7) % 11))
            .collect();

        let standings = rank_departments(totals);
        let mut ranks: Vec<i32> = standings.iter().map(|d| d.rank).collect();
        ranks.sort_unstable();

        assert_eq!(ranks, (1..=25).collect::<Vec<i32>>());
        assert!(
            standings
                .windows(2)
                .all(|pair| pair[0].total_points >= pair[1].total_points)
        );
    }

    #[test]
    fn test_reranking_is_idempotent() {
        let first = rank_departments(vec![total(1, "A", 4), total(2, "B", 4), total(3, "C", 9)]);

        let again = rank_departments(
            first
                .iter()
                .rev()
                .map(|d| total(d.id, &d.name, d.total_points))
                .collect(),
        );

        assert_eq!(first, again);
    }

    #[test]
    fn test_no_departments() {
        assert!(rank_departments(Vec::new()).is_empty());
    }
}
