//! Repository for the `projects` table, including the public portfolio
//! queries.

use sqlx::PgPool;

use atelier_core::status::ProjectStatus;
use atelier_core::types::DbId;

use crate::models::project::{
    CreateProject, PortfolioCaseStudy, PortfolioEntry, Project, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, client_id, inquiry_id, title, description, slug, intro, \
                       client_type, industry, logo, case_study, status, project_phase, \
                       budget, hourly_rate, start_date, end_date, estimated_hours, \
                       design_tools, technologies, priority, progress_percentage, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, client_id, inquiry_id, title, description, slug,
                                   intro, client_type, industry, logo, case_study, status,
                                   project_phase, budget, hourly_rate, start_date, end_date,
                                   estimated_hours, design_tools, technologies, priority)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     COALESCE($11, '{{}}'::jsonb),
                     COALESCE($12, 'PLANNING'), COALESCE($13, 'DISCOVERY'),
                     COALESCE($14, 0), COALESCE($15, 0), $16, $17, COALESCE($18, 0),
                     COALESCE($19, '[]'::jsonb), COALESCE($20, '[]'::jsonb),
                     COALESCE($21, 'MEDIUM'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(input.client_id)
            .bind(input.inquiry_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.slug)
            .bind(&input.intro)
            .bind(&input.client_type)
            .bind(&input.industry)
            .bind(&input.logo)
            .bind(&input.case_study)
            .bind(input.status)
            .bind(input.project_phase)
            .bind(input.budget)
            .bind(input.hourly_rate)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.estimated_hours)
            .bind(&input.design_tools)
            .bind(&input.technologies)
            .bind(input.priority)
            .fetch_one(pool)
            .await
    }

    /// Find a project owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List projects for `user_id`, newest first, with optional status and
    /// client filters.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        status: Option<ProjectStatus>,
        client_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE user_id = $1
               AND ($2::project_status IS NULL OR status = $2)
               AND ($3::bigint IS NULL OR client_id = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(status)
            .bind(client_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                client_id = COALESCE($3, client_id),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                slug = COALESCE($6, slug),
                intro = COALESCE($7, intro),
                client_type = COALESCE($8, client_type),
                industry = COALESCE($9, industry),
                logo = COALESCE($10, logo),
                case_study = COALESCE($11, case_study),
                status = COALESCE($12, status),
                project_phase = COALESCE($13, project_phase),
                budget = COALESCE($14, budget),
                hourly_rate = COALESCE($15, hourly_rate),
                start_date = COALESCE($16, start_date),
                end_date = COALESCE($17, end_date),
                estimated_hours = COALESCE($18, estimated_hours),
                design_tools = COALESCE($19, design_tools),
                technologies = COALESCE($20, technologies),
                priority = COALESCE($21, priority),
                is_active = COALESCE($22, is_active),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.slug)
            .bind(&input.intro)
            .bind(&input.client_type)
            .bind(&input.industry)
            .bind(&input.logo)
            .bind(&input.case_study)
            .bind(input.status)
            .bind(input.project_phase)
            .bind(input.budget)
            .bind(input.hourly_rate)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.estimated_hours)
            .bind(&input.design_tools)
            .bind(&input.technologies)
            .bind(input.priority)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and its cascade (milestones, tasks, notes, files).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute `progress_percentage` from task completion.
    ///
    /// Projects without tasks keep their stored value so a manually set
    /// percentage survives until the first task lands.
    pub async fn recompute_progress(pool: &PgPool, project_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE projects p SET
                progress_percentage = sub.pct,
                updated_at = NOW()
             FROM (
                SELECT (COUNT(*) FILTER (WHERE status = 'COMPLETED') * 100 / COUNT(*))::int AS pct
                FROM project_tasks WHERE project_id = $1
                HAVING COUNT(*) > 0
             ) sub
             WHERE p.id = $1",
        )
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Public portfolio listing: active projects that carry a slug, newest
    /// first. No owner scoping -- this feeds the unauthenticated site.
    pub async fn portfolio_list(pool: &PgPool) -> Result<Vec<PortfolioEntry>, sqlx::Error> {
        sqlx::query_as::<_, PortfolioEntry>(
            "SELECT slug, title, intro, client_type, industry, logo, design_tools, technologies
             FROM projects
             WHERE slug IS NOT NULL AND is_active = true
             ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Public case study by slug.
    pub async fn portfolio_find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PortfolioCaseStudy>, sqlx::Error> {
        sqlx::query_as::<_, PortfolioCaseStudy>(
            "SELECT slug, title, intro, client_type, industry, logo, case_study,
                    design_tools, technologies
             FROM projects
             WHERE slug = $1 AND is_active = true",
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }
}
