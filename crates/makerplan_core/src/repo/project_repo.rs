//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the persistence API for projects and their child records.
//! - Keep SQL details and transaction control inside the persistence boundary.
//!
//! # Invariants
//! - Every operation runs in one transaction that commits before returning or
//!   rolls back on the error path.
//! - A partially populated aggregate is never returned to the caller.
//! - List queries leave child collections empty; only `fetch_project_by_id`
//!   fills them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::project::{Category, Material, Project, ProjectId, Step};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    project_id,
    project_name,
    estimated_hours,
    actual_hours,
    difficulty,
    notes
FROM project";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from project repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No project row exists for the given id.
    NotFound(ProjectId),
    /// Operation needs a persisted project but `project_id` is unset.
    UnsavedProject,
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::UnsavedProject => {
                write!(f, "project has not been persisted (no project_id)")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "project repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "project repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "project repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::UnsavedProject => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for project persistence operations.
pub trait ProjectRepository {
    /// Inserts one project row and returns a copy with the generated id set.
    fn insert_project(&self, project: &Project) -> RepoResult<Project>;
    /// Lists all projects ordered by name; child collections stay empty.
    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>>;
    /// Loads one project with materials, steps and categories populated.
    fn fetch_project_by_id(&self, project_id: ProjectId) -> RepoResult<Option<Project>>;
    /// Updates the scalar detail fields of one persisted project.
    fn modify_project_details(&self, project: &Project) -> RepoResult<()>;
    /// Deletes one project; child rows are removed by cascade.
    fn delete_project(&self, project_id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_project_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&self, project: &Project) -> RepoResult<Project> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO project (
                project_name,
                estimated_hours,
                actual_hours,
                difficulty,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.project_name.as_str(),
                project.estimated_hours,
                project.actual_hours,
                project.difficulty,
                project.notes.as_deref(),
            ],
        )?;
        let project_id = tx.last_insert_rowid();
        tx.commit()?;

        let mut inserted = project.clone();
        inserted.project_id = Some(project_id);
        Ok(inserted)
    }

    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let projects = {
            let mut stmt =
                tx.prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY project_name ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut projects = Vec::new();
            while let Some(row) = rows.next()? {
                projects.push(parse_project_row(row)?);
            }
            projects
        };
        tx.commit()?;
        Ok(projects)
    }

    fn fetch_project_by_id(&self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let mut found = {
            let mut stmt = tx.prepare(&format!("{PROJECT_SELECT_SQL} WHERE project_id = ?1;"))?;
            let mut rows = stmt.query(params![project_id])?;
            match rows.next()? {
                Some(row) => Some(parse_project_row(row)?),
                None => None,
            }
        };

        if let Some(project) = found.as_mut() {
            project.materials = fetch_materials_for_project(&tx, project_id)?;
            project.steps = fetch_steps_for_project(&tx, project_id)?;
            project.categories = fetch_categories_for_project(&tx, project_id)?;
        }

        tx.commit()?;
        Ok(found)
    }

    fn modify_project_details(&self, project: &Project) -> RepoResult<()> {
        let project_id = project.project_id.ok_or(RepoError::UnsavedProject)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE project
             SET
                project_name = ?1,
                estimated_hours = ?2,
                actual_hours = ?3,
                difficulty = ?4,
                notes = ?5
             WHERE project_id = ?6;",
            params![
                project.project_name.as_str(),
                project.estimated_hours,
                project.actual_hours,
                project.difficulty,
                project.notes.as_deref(),
                project_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project_id));
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_project(&self, project_id: ProjectId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "DELETE FROM project
             WHERE project_id = ?1;",
            params![project_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project_id));
        }

        tx.commit()?;
        Ok(())
    }
}

fn fetch_materials_for_project(
    conn: &Connection,
    project_id: ProjectId,
) -> RepoResult<Vec<Material>> {
    let mut stmt = conn.prepare(
        "SELECT
            material_id,
            project_id,
            material_name,
            num_required,
            cost
         FROM material
         WHERE project_id = ?1;",
    )?;
    let mut rows = stmt.query(params![project_id])?;
    let mut materials = Vec::new();
    while let Some(row) = rows.next()? {
        materials.push(parse_material_row(row)?);
    }
    Ok(materials)
}

fn fetch_steps_for_project(conn: &Connection, project_id: ProjectId) -> RepoResult<Vec<Step>> {
    let mut stmt = conn.prepare(
        "SELECT
            step_id,
            project_id,
            step_text,
            step_order
         FROM step
         WHERE project_id = ?1;",
    )?;
    let mut rows = stmt.query(params![project_id])?;
    let mut steps = Vec::new();
    while let Some(row) = rows.next()? {
        steps.push(parse_step_row(row)?);
    }
    Ok(steps)
}

fn fetch_categories_for_project(
    conn: &Connection,
    project_id: ProjectId,
) -> RepoResult<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT
            c.category_id AS category_id,
            c.category_name AS category_name
         FROM category c
         INNER JOIN project_category pc ON pc.category_id = c.category_id
         WHERE pc.project_id = ?1;",
    )?;
    let mut rows = stmt.query(params![project_id])?;
    let mut categories = Vec::new();
    while let Some(row) = rows.next()? {
        categories.push(parse_category_row(row)?);
    }
    Ok(categories)
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        project_id: Some(row.get("project_id")?),
        project_name: row.get("project_name")?,
        estimated_hours: row.get("estimated_hours")?,
        actual_hours: row.get("actual_hours")?,
        difficulty: row.get("difficulty")?,
        notes: row.get("notes")?,
        materials: Vec::new(),
        steps: Vec::new(),
        categories: Vec::new(),
    })
}

fn parse_material_row(row: &Row<'_>) -> RepoResult<Material> {
    Ok(Material {
        material_id: row.get("material_id")?,
        project_id: row.get("project_id")?,
        material_name: row.get("material_name")?,
        num_required: row.get("num_required")?,
        cost: row.get("cost")?,
    })
}

fn parse_step_row(row: &Row<'_>) -> RepoResult<Step> {
    Ok(Step {
        step_id: row.get("step_id")?,
        project_id: row.get("project_id")?,
        step_text: row.get("step_text")?,
        step_order: row.get("step_order")?,
    })
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    Ok(Category {
        category_id: row.get("category_id")?,
        category_name: row.get("category_name")?,
    })
}

fn ensure_project_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in [
        "project",
        "material",
        "step",
        "category",
        "project_category",
    ] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in [
        "project_id",
        "project_name",
        "estimated_hours",
        "actual_hours",
        "difficulty",
        "notes",
    ] {
        if !table_has_column(conn, "project", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "project",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
