//! Repository for the `plots` table and its owned collections.
//!
//! Every multi-statement mutation (create, update with child replacement,
//! media/document reconciliation) runs inside a single transaction so a
//! crash cannot leave a plot with half-replaced children or gapped media
//! ordering.

use sqlx::{PgPool, Postgres, Transaction};
use zemli_core::pagination::{offset_for_page, total_pages};
use zemli_core::types::DbId;
use zemli_core::units::square_meters_to_sotka;

use crate::models::plot::{
    FilterOptions, Plot, PlotCadastralNumber, PlotCommunication, PlotDetail, PlotDocument,
    PlotFeature, PlotInput, PlotListItem, PlotListParams, PlotMedia, PlotSort,
};
use crate::models::Paged;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, area_m2, price, price_per_m2, \
                       region, locality, land_use, land_category, status, is_visible, \
                       created_at, updated_at";

/// Listing columns, qualified with the `p` alias used by the grid queries.
const LIST_COLUMNS: &str = "p.id, p.title, p.slug, p.area_m2, p.price, p.price_per_m2, \
                            p.region, p.locality, p.land_use, p.land_category, p.status, \
                            p.is_visible, p.created_at";

/// Optional AND-combined filters shared by the public and admin grids.
/// Binds: $1 free-text, $2/$3 price range, $4/$5 area range, $6 region,
/// $7 land use, $8 land category, $9 status (admin only; NULL elsewhere).
const FILTERS: &str = "\
    ($1::TEXT IS NULL \
        OR p.title ILIKE '%' || $1 || '%' \
        OR p.description ILIKE '%' || $1 || '%' \
        OR EXISTS (SELECT 1 FROM plot_cadastral_numbers c \
                   WHERE c.plot_id = p.id AND c.value ILIKE '%' || $1 || '%')) \
    AND ($2::DOUBLE PRECISION IS NULL OR p.price >= $2) \
    AND ($3::DOUBLE PRECISION IS NULL OR p.price <= $3) \
    AND ($4::DOUBLE PRECISION IS NULL OR p.area_m2 >= $4) \
    AND ($5::DOUBLE PRECISION IS NULL OR p.area_m2 <= $5) \
    AND ($6::TEXT IS NULL OR p.region = $6) \
    AND ($7::TEXT IS NULL OR p.land_use = $7) \
    AND ($8::TEXT IS NULL OR p.land_category = $8) \
    AND ($9::TEXT IS NULL OR p.status = $9)";

/// Public eligibility: only visible, available plots are listed.
const PUBLIC_ELIGIBILITY: &str = "p.is_visible AND p.status = 'available' AND ";

/// Provides catalog queries and admin mutations for plots.
pub struct PlotRepo;

impl PlotRepo {
    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// Public grid: eligible plots only, caller-supplied status ignored.
    ///
    /// Returns `None` when the requested page lies beyond the last page of a
    /// non-empty result set.
    pub async fn list_public(
        pool: &PgPool,
        params: &PlotListParams,
        sort: PlotSort,
        page_size: i64,
    ) -> Result<Option<Paged<PlotListItem>>, sqlx::Error> {
        Self::list_inner(pool, params, sort, page_size, true).await
    }

    /// Admin grid: no eligibility restriction, status usable as a filter.
    pub async fn list_admin(
        pool: &PgPool,
        params: &PlotListParams,
        sort: PlotSort,
        page_size: i64,
    ) -> Result<Option<Paged<PlotListItem>>, sqlx::Error> {
        Self::list_inner(pool, params, sort, page_size, false).await
    }

    async fn list_inner(
        pool: &PgPool,
        params: &PlotListParams,
        sort: PlotSort,
        page_size: i64,
        public: bool,
    ) -> Result<Option<Paged<PlotListItem>>, sqlx::Error> {
        let eligibility = if public { PUBLIC_ELIGIBILITY } else { "" };
        // The status filter is admin-only; the public grid is pinned to
        // 'available' by the eligibility clause instead.
        let no_status: Option<String> = None;
        let status = if public { &no_status } else { &params.status };

        let count_query = format!("SELECT COUNT(*) FROM plots p WHERE {eligibility}{FILTERS}");
        let (total_items,): (i64,) = sqlx::query_as(&count_query)
            .bind(&params.q)
            .bind(params.min_price)
            .bind(params.max_price)
            .bind(params.min_area)
            .bind(params.max_area)
            .bind(&params.region)
            .bind(&params.land_use)
            .bind(&params.land_category)
            .bind(status)
            .fetch_one(pool)
            .await?;

        let current_page = params.page.unwrap_or(1).max(1);
        let offset = match offset_for_page(current_page, total_items, page_size) {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let page_query = format!(
            "SELECT {LIST_COLUMNS}, m.url AS thumbnail_url \
             FROM plots p \
             LEFT JOIN LATERAL ( \
                 SELECT url FROM plot_media \
                 WHERE plot_id = p.id \
                 ORDER BY sort_order ASC LIMIT 1 \
             ) m ON TRUE \
             WHERE {eligibility}{FILTERS} \
             ORDER BY {order} \
             LIMIT $10 OFFSET $11",
            order = sort.order_by()
        );
        let items = sqlx::query_as::<_, PlotListItem>(&page_query)
            .bind(&params.q)
            .bind(params.min_price)
            .bind(params.max_price)
            .bind(params.min_area)
            .bind(params.max_area)
            .bind(&params.region)
            .bind(&params.land_use)
            .bind(&params.land_category)
            .bind(status)
            .bind(page_size)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Some(Paged {
            items,
            total_items,
            total_pages: total_pages(total_items, page_size),
            current_page,
        }))
    }

    /// Up to 3 eligible plots in the same region with price and area inside
    /// the given inclusive ranges, newest first, excluding `exclude_id`.
    pub async fn similar(
        pool: &PgPool,
        exclude_id: DbId,
        region: &str,
        price_range: (f64, f64),
        area_range: (f64, f64),
    ) -> Result<Vec<PlotListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}, m.url AS thumbnail_url \
             FROM plots p \
             LEFT JOIN LATERAL ( \
                 SELECT url FROM plot_media \
                 WHERE plot_id = p.id \
                 ORDER BY sort_order ASC LIMIT 1 \
             ) m ON TRUE \
             WHERE p.is_visible AND p.status = 'available' \
               AND p.id <> $1 \
               AND p.region = $2 \
               AND p.price BETWEEN $3 AND $4 \
               AND p.area_m2 BETWEEN $5 AND $6 \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT 3"
        );
        sqlx::query_as::<_, PlotListItem>(&query)
            .bind(exclude_id)
            .bind(region)
            .bind(price_range.0)
            .bind(price_range.1)
            .bind(area_range.0)
            .bind(area_range.1)
            .fetch_all(pool)
            .await
    }

    /// Distinct regions, land uses, and land categories across eligible
    /// plots. Recomputed on every call.
    pub async fn filter_options(pool: &PgPool) -> Result<FilterOptions, sqlx::Error> {
        let regions = Self::distinct_eligible(pool, "region").await?;
        let land_uses = Self::distinct_eligible(pool, "land_use").await?;
        let land_categories = Self::distinct_eligible(pool, "land_category").await?;
        Ok(FilterOptions {
            regions,
            land_uses,
            land_categories,
        })
    }

    async fn distinct_eligible(pool: &PgPool, column: &str) -> Result<Vec<String>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT {column} FROM plots \
             WHERE is_visible AND status = 'available' \
             ORDER BY {column}"
        );
        sqlx::query_scalar(&query).fetch_all(pool).await
    }

    // -----------------------------------------------------------------------
    // Detail
    // -----------------------------------------------------------------------

    /// Find a plot by internal ID, regardless of visibility or status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Plot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plots WHERE id = $1");
        sqlx::query_as::<_, Plot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public detail fetch by slug: eligible plots only.
    pub async fn detail_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PlotDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM plots \
             WHERE slug = $1 AND is_visible AND status = 'available'"
        );
        let plot = sqlx::query_as::<_, Plot>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match plot {
            Some(plot) => Ok(Some(Self::load_detail(pool, plot).await?)),
            None => Ok(None),
        }
    }

    /// Admin detail fetch by id: no eligibility restriction.
    pub async fn detail_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlotDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(plot) => Ok(Some(Self::load_detail(pool, plot).await?)),
            None => Ok(None),
        }
    }

    async fn load_detail(pool: &PgPool, plot: Plot) -> Result<PlotDetail, sqlx::Error> {
        let media = sqlx::query_as::<_, PlotMedia>(
            "SELECT id, plot_id, url, alt, sort_order FROM plot_media \
             WHERE plot_id = $1 ORDER BY sort_order ASC",
        )
        .bind(plot.id)
        .fetch_all(pool)
        .await?;

        let documents = sqlx::query_as::<_, PlotDocument>(
            "SELECT id, plot_id, url, title, sort_order FROM plot_documents \
             WHERE plot_id = $1 ORDER BY sort_order ASC",
        )
        .bind(plot.id)
        .fetch_all(pool)
        .await?;

        let cadastral_numbers = sqlx::query_as::<_, PlotCadastralNumber>(
            "SELECT id, plot_id, value FROM plot_cadastral_numbers \
             WHERE plot_id = $1 ORDER BY id ASC",
        )
        .bind(plot.id)
        .fetch_all(pool)
        .await?;

        let communications = sqlx::query_as::<_, PlotCommunication>(
            "SELECT id, plot_id, name, description FROM plot_communications \
             WHERE plot_id = $1 ORDER BY id ASC",
        )
        .bind(plot.id)
        .fetch_all(pool)
        .await?;

        let features = sqlx::query_as::<_, PlotFeature>(
            "SELECT id, plot_id, value FROM plot_features \
             WHERE plot_id = $1 ORDER BY id ASC",
        )
        .bind(plot.id)
        .fetch_all(pool)
        .await?;

        Ok(PlotDetail {
            area_sotka: square_meters_to_sotka(plot.area_m2),
            plot,
            media,
            documents,
            cadastral_numbers,
            communications,
            features,
        })
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// True when another plot (excluding `exclude_id`) already owns `slug`.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                 SELECT 1 FROM plots \
                 WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2) \
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a plot and all its collections, returning the created row.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &PlotInput,
    ) -> Result<Plot, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO plots \
                (title, slug, description, area_m2, price, price_per_m2, region, \
                 locality, land_use, land_category, status, is_visible) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                     COALESCE($11, 'available'), COALESCE($12, TRUE)) \
             RETURNING {COLUMNS}"
        );
        let plot = sqlx::query_as::<_, Plot>(&insert_query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(input.area_m2)
            .bind(input.price)
            .bind(input.price_per_m2)
            .bind(&input.region)
            .bind(&input.locality)
            .bind(&input.land_use)
            .bind(&input.land_category)
            .bind(&input.status)
            .bind(input.is_visible)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_simple_children(&mut tx, plot.id, input).await?;
        Self::reconcile_media(&mut tx, plot.id, input).await?;
        Self::reconcile_documents(&mut tx, plot.id, input).await?;

        tx.commit().await?;
        Ok(plot)
    }

    /// Full update of a plot and its collections.
    ///
    /// Cadastral numbers, communications, and features are replaced
    /// wholesale; media and documents are reconciled by id (incoming rows
    /// without a known id are inserted, existing rows absent from the input
    /// are deleted, survivors take their incoming position as sort_order).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        slug: &str,
        input: &PlotInput,
    ) -> Result<Option<Plot>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE plots SET \
                title = $2, slug = $3, description = $4, area_m2 = $5, price = $6, \
                price_per_m2 = $7, region = $8, locality = $9, land_use = $10, \
                land_category = $11, status = COALESCE($12, status), \
                is_visible = COALESCE($13, is_visible) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let plot = sqlx::query_as::<_, Plot>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(input.area_m2)
            .bind(input.price)
            .bind(input.price_per_m2)
            .bind(&input.region)
            .bind(&input.locality)
            .bind(&input.land_use)
            .bind(&input.land_category)
            .bind(&input.status)
            .bind(input.is_visible)
            .fetch_optional(&mut *tx)
            .await?;

        let plot = match plot {
            Some(plot) => plot,
            None => return Ok(None),
        };

        Self::replace_simple_children(&mut tx, plot.id, input).await?;
        Self::reconcile_media(&mut tx, plot.id, input).await?;
        Self::reconcile_documents(&mut tx, plot.id, input).await?;

        tx.commit().await?;
        Ok(Some(plot))
    }

    /// Flip `is_visible`, returning the new value, or `None` when the plot
    /// does not exist.
    pub async fn toggle_visibility(pool: &PgPool, id: DbId) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE plots SET is_visible = NOT is_visible WHERE id = $1 RETURNING is_visible",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a plot. Owned collections go with it via ON DELETE CASCADE.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Child collection helpers (run inside the caller's transaction)
    // -----------------------------------------------------------------------

    /// Replace cadastral numbers, communications, and features wholesale.
    async fn replace_simple_children(
        tx: &mut Transaction<'_, Postgres>,
        plot_id: DbId,
        input: &PlotInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM plot_cadastral_numbers WHERE plot_id = $1")
            .bind(plot_id)
            .execute(&mut **tx)
            .await?;
        for value in &input.cadastral_numbers {
            sqlx::query("INSERT INTO plot_cadastral_numbers (plot_id, value) VALUES ($1, $2)")
                .bind(plot_id)
                .bind(value)
                .execute(&mut **tx)
                .await?;
        }

        sqlx::query("DELETE FROM plot_communications WHERE plot_id = $1")
            .bind(plot_id)
            .execute(&mut **tx)
            .await?;
        for communication in &input.communications {
            sqlx::query(
                "INSERT INTO plot_communications (plot_id, name, description) VALUES ($1, $2, $3)",
            )
            .bind(plot_id)
            .bind(&communication.name)
            .bind(&communication.description)
            .execute(&mut **tx)
            .await?;
        }

        sqlx::query("DELETE FROM plot_features WHERE plot_id = $1")
            .bind(plot_id)
            .execute(&mut **tx)
            .await?;
        for value in &input.features {
            sqlx::query("INSERT INTO plot_features (plot_id, value) VALUES ($1, $2)")
                .bind(plot_id)
                .bind(value)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    /// Reconcile `plot_media` against the incoming list. After this runs,
    /// sort_order values are exactly 0..n-1 in incoming order.
    async fn reconcile_media(
        tx: &mut Transaction<'_, Postgres>,
        plot_id: DbId,
        input: &PlotInput,
    ) -> Result<(), sqlx::Error> {
        let existing: Vec<DbId> = sqlx::query_scalar("SELECT id FROM plot_media WHERE plot_id = $1")
            .bind(plot_id)
            .fetch_all(&mut **tx)
            .await?;

        let keep: Vec<DbId> = input
            .media
            .iter()
            .filter_map(|m| m.id)
            .filter(|id| existing.contains(id))
            .collect();

        sqlx::query("DELETE FROM plot_media WHERE plot_id = $1 AND NOT (id = ANY($2))")
            .bind(plot_id)
            .bind(&keep)
            .execute(&mut **tx)
            .await?;

        for (index, item) in input.media.iter().enumerate() {
            let sort_order = index as i32;
            match item.id.filter(|id| existing.contains(id)) {
                Some(id) => {
                    sqlx::query(
                        "UPDATE plot_media SET url = $3, alt = $4, sort_order = $2 \
                         WHERE id = $1 AND plot_id = $5",
                    )
                    .bind(id)
                    .bind(sort_order)
                    .bind(&item.url)
                    .bind(&item.alt)
                    .bind(plot_id)
                    .execute(&mut **tx)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO plot_media (plot_id, url, alt, sort_order) \
                         VALUES ($1, $2, $3, $4)",
                    )
                    .bind(plot_id)
                    .bind(&item.url)
                    .bind(&item.alt)
                    .bind(sort_order)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }

        Ok(())
    }

    /// Reconcile `plot_documents` by id, mirroring [`Self::reconcile_media`].
    async fn reconcile_documents(
        tx: &mut Transaction<'_, Postgres>,
        plot_id: DbId,
        input: &PlotInput,
    ) -> Result<(), sqlx::Error> {
        let existing: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM plot_documents WHERE plot_id = $1")
                .bind(plot_id)
                .fetch_all(&mut **tx)
                .await?;

        let keep: Vec<DbId> = input
            .documents
            .iter()
            .filter_map(|d| d.id)
            .filter(|id| existing.contains(id))
            .collect();

        sqlx::query("DELETE FROM plot_documents WHERE plot_id = $1 AND NOT (id = ANY($2))")
            .bind(plot_id)
            .bind(&keep)
            .execute(&mut **tx)
            .await?;

        for (index, item) in input.documents.iter().enumerate() {
            let sort_order = index as i32;
            match item.id.filter(|id| existing.contains(id)) {
                Some(id) => {
                    sqlx::query(
                        "UPDATE plot_documents SET url = $3, title = $4, sort_order = $2 \
                         WHERE id = $1 AND plot_id = $5",
                    )
                    .bind(id)
                    .bind(sort_order)
                    .bind(&item.url)
                    .bind(&item.title)
                    .bind(plot_id)
                    .execute(&mut **tx)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO plot_documents (plot_id, url, title, sort_order) \
                         VALUES ($1, $2, $3, $4)",
                    )
                    .bind(plot_id)
                    .bind(&item.url)
                    .bind(&item.title)
                    .bind(sort_order)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }

        Ok(())
    }
}
